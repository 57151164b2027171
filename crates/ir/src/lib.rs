// Copyright (c) 2025 Portable Query contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Portable Query - Intermediate Representation
//!
//! This crate provides the SQL Intermediate Representation (IR) a query
//! compiler builds from a portable query description. The IR is designed to:
//! - Be backend-agnostic (one tree shape for every relational backend)
//! - Stay immutable after construction, so trees are freely shared across
//!   passes and threads
//! - Compare and hash structurally, so whole trees can key a plan cache
//! - Support rewrite-if-changed traversal (see the `portable-query-rewrite`
//!   crate) via cheap handle-identity tests

pub mod error;
pub mod function;
pub mod node;
pub mod render;
pub mod types;

// Re-export commonly used types
pub use error::{IrError, IrResult};
pub use function::FunctionCall;
pub use node::{
    BinaryOp, ColumnRef, LiteralValue, NodeKind, Parameter, SqlExpr, TypedLiteral, UnaryOp,
};
pub use types::SqlType;
