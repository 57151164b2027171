// Copyright (c) 2025 Portable Query contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Result types
//!
//! Every IR node carries the static SQL value type it evaluates to, fixed at
//! construction time. The set is unified across backends; a renderer maps
//! these onto backend-specific type names when it emits command text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Static SQL value type of an IR node (unified across backends)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SqlType {
    // Numeric types
    Integer,
    BigInt,
    Decimal,
    Float,
    Double,

    // String types
    Varchar(Option<usize>),
    Text,

    // Date/Time types
    Date,
    Timestamp,

    // Boolean
    Boolean,

    // Special types
    Uuid,

    // Unknown/Other (with original type name)
    Other(String),
}

impl SqlType {
    /// Whether this type is usable where a predicate is expected
    pub fn is_boolean(&self) -> bool {
        matches!(self, SqlType::Boolean)
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlType::Integer => write!(f, "integer"),
            SqlType::BigInt => write!(f, "bigint"),
            SqlType::Decimal => write!(f, "decimal"),
            SqlType::Float => write!(f, "float"),
            SqlType::Double => write!(f, "double"),
            SqlType::Varchar(Some(n)) => write!(f, "varchar({})", n),
            SqlType::Varchar(None) => write!(f, "varchar"),
            SqlType::Text => write!(f, "text"),
            SqlType::Date => write!(f, "date"),
            SqlType::Timestamp => write!(f, "timestamp"),
            SqlType::Boolean => write!(f, "boolean"),
            SqlType::Uuid => write!(f, "uuid"),
            SqlType::Other(name) => write!(f, "{}", name),
        }
    }
}
