// Copyright (c) 2025 Portable Query contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Error types for IR node construction

use serde::Serialize;

/// Result type alias for IR construction
pub type IrResult<T> = Result<T, IrError>;

/// Errors raised while building IR nodes
///
/// The taxonomy is deliberately narrow: every error is a construction-time
/// precondition failure. Traversal, equality, hashing, and rendering are
/// total over well-formed nodes, and a malformed node cannot be observed
/// because construction rejects it eagerly.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq, Serialize)]
pub enum IrError {
    /// A constructor parameter violated its precondition
    #[error("Invalid argument '{parameter}': {reason}")]
    InvalidArgument {
        parameter: &'static str,
        reason: String,
    },
}

impl IrError {
    pub(crate) fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        IrError::InvalidArgument {
            parameter,
            reason: reason.into(),
        }
    }

    /// The name of the constructor parameter that failed validation
    pub fn parameter(&self) -> &'static str {
        match self {
            IrError::InvalidArgument { parameter, .. } => parameter,
        }
    }
}
