// Copyright (c) 2025 Portable Query contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Diagnostic rendering
//!
//! `Display` for IR nodes, for tracing output and test assertions only.
//! This form is for humans; the backend renderer that emits executable
//! command text lives outside this crate and reads the nodes directly.
//!
//! Function calls render as `instance.NAME(a, b)` when a receiver is
//! present, `schema.NAME(a, b)` when schema-qualified, and `NAME(a, b)`
//! otherwise. Argument lists always join with a comma and a space.

use std::fmt;

use crate::node::{LiteralValue, NodeKind, SqlExpr, UnaryOp};

impl fmt::Display for SqlExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            NodeKind::Column(col) => write!(f, "{}", col.qualified()),
            NodeKind::Literal(lit) => write!(f, "{}", lit.value),
            NodeKind::Parameter(param) => write!(f, ":{}", param.name),
            NodeKind::Unary { op, operand, .. } => match op {
                UnaryOp::Neg => write!(f, "(- {})", operand),
                UnaryOp::Not => write!(f, "(NOT {})", operand),
                UnaryOp::IsNull => write!(f, "({} IS NULL)", operand),
            },
            NodeKind::Binary {
                op, left, right, ..
            } => write!(f, "({} {} {})", left, op.token(), right),
            NodeKind::FunctionCall(call) => {
                match (call.instance(), call.schema()) {
                    (Some(instance), _) => write!(f, "{}.{}(", instance, call.name())?,
                    (None, Some(schema)) => write!(f, "{}.{}(", schema, call.name())?,
                    (None, None) => write!(f, "{}(", call.name())?,
                }
                for (i, arg) in call.arguments().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Null => write!(f, "NULL"),
            LiteralValue::Boolean(true) => write!(f, "TRUE"),
            LiteralValue::Boolean(false) => write!(f, "FALSE"),
            LiteralValue::Integer(i) => write!(f, "{}", i),
            LiteralValue::Float(v) => write!(f, "{}", v),
            LiteralValue::Text(s) => write!(f, "'{}'", s),
        }
    }
}
