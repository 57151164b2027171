// Copyright (c) 2025 Portable Query contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # IR nodes
//!
//! This module defines the SQL-shaped syntax tree a query compiler builds,
//! rewrites, caches, and finally hands to a backend renderer.
//!
//! ## Design
//!
//! Every node is an immutable value carrying the static [`SqlType`] it
//! evaluates to plus zero or more child nodes. Trees are built bottom-up
//! (children before parents) and never mutated afterwards, which makes them
//! safe to share across concurrently running compiler passes and across
//! threads without locking.
//!
//! [`SqlExpr`] is the shared node handle: a cheap-to-clone `Arc` over the
//! closed [`NodeKind`] family. Cloning a handle shares the underlying
//! allocation, so [`SqlExpr::ptr_eq`] distinguishes "the same node instance"
//! from "a structurally equal node" — the distinction the rewrite-if-changed
//! contract and the plan cache rely on.
//!
//! ## Node kinds
//!
//! - **Column references**: `table.column` or unqualified `column`
//! - **Literal values**: NULL, booleans, integers, floats, text
//! - **Parameters**: named external values, inlined by a rewrite pass
//! - **Unary operations**: negation, NOT, IS NULL
//! - **Binary operations**: arithmetic, comparison, logical, LIKE
//! - **Function calls**: free, schema-qualified, or instance-invoked
//!   (see [`FunctionCall`])
//!
//! ## Identity vs equality
//!
//! Two independently built trees describing the same query compare equal and
//! hash identically ([`PartialEq`]/[`Hash`] are structural and recursive).
//! [`SqlExpr::ptr_eq`] is the separate, cheap identity test: it answers
//! "is this the very same allocation", which is how a caller checks whether
//! a rewrite pass changed anything.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::function::FunctionCall;
use crate::types::SqlType;

/// Shared handle to an immutable IR node
///
/// Clones share the underlying node. Structural equality and hashing walk
/// the whole subtree; [`SqlExpr::ptr_eq`] compares allocations only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqlExpr {
    node: Arc<NodeKind>,
}

/// The closed family of IR node kinds
///
/// Deliberately exhaustive: walkers dispatch by matching on this enum, and
/// adding a kind means giving it a generic-traversal default in the walker
/// protocol at the same time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Column reference (e.g., `table.column` or just `column`)
    Column(ColumnRef),

    /// Typed literal value
    Literal(TypedLiteral),

    /// Named external parameter (e.g., `:city`)
    Parameter(Parameter),

    /// Unary operation (e.g., `-x`, `NOT a`, `a IS NULL`)
    Unary {
        op: UnaryOp,
        operand: SqlExpr,
        result_type: SqlType,
    },

    /// Binary operation (e.g., `a + b`, `x = 5`)
    Binary {
        op: BinaryOp,
        left: SqlExpr,
        right: SqlExpr,
        result_type: SqlType,
    },

    /// Function call (e.g., `UPPER(name)`, `dbo.FN(x)`, `v.Substring(1)`)
    FunctionCall(FunctionCall),
}

impl SqlExpr {
    pub(crate) fn from_kind(kind: NodeKind) -> Self {
        Self {
            node: Arc::new(kind),
        }
    }

    /// The kind of this node, for dispatch in walkers and renderers
    pub fn kind(&self) -> &NodeKind {
        &self.node
    }

    /// The static value type this node evaluates to
    pub fn result_type(&self) -> &SqlType {
        match self.kind() {
            NodeKind::Column(col) => &col.result_type,
            NodeKind::Literal(lit) => &lit.result_type,
            NodeKind::Parameter(param) => &param.result_type,
            NodeKind::Unary { result_type, .. } => result_type,
            NodeKind::Binary { result_type, .. } => result_type,
            NodeKind::FunctionCall(call) => call.result_type(),
        }
    }

    /// Ordered direct children of this node
    ///
    /// Order is semantically significant (argument order, operand order) and
    /// is preserved verbatim. The returned handles share the children's
    /// allocations.
    pub fn children(&self) -> Vec<SqlExpr> {
        match self.kind() {
            NodeKind::Column(_) | NodeKind::Literal(_) | NodeKind::Parameter(_) => Vec::new(),
            NodeKind::Unary { operand, .. } => vec![operand.clone()],
            NodeKind::Binary { left, right, .. } => vec![left.clone(), right.clone()],
            NodeKind::FunctionCall(call) => call.children(),
        }
    }

    /// Identity test: do both handles point at the same allocation?
    ///
    /// This is the cheap "did the rewrite change anything" check. It implies
    /// structural equality but not the other way around.
    pub fn ptr_eq(a: &SqlExpr, b: &SqlExpr) -> bool {
        Arc::ptr_eq(&a.node, &b.node)
    }

    // --- constructors -----------------------------------------------------

    /// Column reference node
    pub fn column(column: ColumnRef) -> Self {
        Self::from_kind(NodeKind::Column(column))
    }

    /// Literal node with an explicit result type
    pub fn literal(value: LiteralValue, result_type: SqlType) -> Self {
        Self::from_kind(NodeKind::Literal(TypedLiteral { value, result_type }))
    }

    /// Boolean literal shorthand
    pub fn boolean(value: bool) -> Self {
        Self::literal(LiteralValue::Boolean(value), SqlType::Boolean)
    }

    /// Integer literal shorthand
    pub fn integer(value: i64) -> Self {
        Self::literal(LiteralValue::Integer(value), SqlType::Integer)
    }

    /// Text literal shorthand
    pub fn text(value: impl Into<String>) -> Self {
        Self::literal(LiteralValue::Text(value.into()), SqlType::Text)
    }

    /// Typed NULL literal shorthand
    pub fn null(result_type: SqlType) -> Self {
        Self::literal(LiteralValue::Null, result_type)
    }

    /// Named external parameter node
    pub fn parameter(name: impl Into<String>, result_type: SqlType) -> Self {
        Self::from_kind(NodeKind::Parameter(Parameter {
            name: name.into(),
            result_type,
        }))
    }

    /// Unary operation node
    pub fn unary(op: UnaryOp, operand: SqlExpr, result_type: SqlType) -> Self {
        Self::from_kind(NodeKind::Unary {
            op,
            operand,
            result_type,
        })
    }

    /// Binary operation node
    pub fn binary(op: BinaryOp, left: SqlExpr, right: SqlExpr, result_type: SqlType) -> Self {
        Self::from_kind(NodeKind::Binary {
            op,
            left,
            right,
            result_type,
        })
    }
}

impl PartialEq for SqlExpr {
    fn eq(&self, other: &Self) -> bool {
        // Identity fast path, then full structural descent.
        Arc::ptr_eq(&self.node, &other.node) || self.node == other.node
    }
}

impl Eq for SqlExpr {}

impl Hash for SqlExpr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.node.hash(state);
    }
}

/// Column reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnRef {
    /// Optional table/alias qualifier
    pub table: Option<String>,
    /// Column name
    pub column: String,
    /// Static column type
    pub result_type: SqlType,
}

impl ColumnRef {
    pub fn new(column: impl Into<String>, result_type: SqlType) -> Self {
        Self {
            table: None,
            column: column.into(),
            result_type,
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// `table.column` when qualified, `column` otherwise
    pub fn qualified(&self) -> String {
        match &self.table {
            Some(table) => format!("{}.{}", table, self.column),
            None => self.column.clone(),
        }
    }
}

/// Literal value together with its static type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypedLiteral {
    pub value: LiteralValue,
    pub result_type: SqlType,
}

/// Literal value
///
/// Floats compare and hash by bit pattern so every literal participates in
/// the `Eq + Hash` contract trees need to key a plan cache. `0.0` and `-0.0`
/// are therefore distinct values, and a NaN equals the same NaN bits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[non_exhaustive]
pub enum LiteralValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl PartialEq for LiteralValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (LiteralValue::Null, LiteralValue::Null) => true,
            (LiteralValue::Boolean(a), LiteralValue::Boolean(b)) => a == b,
            (LiteralValue::Integer(a), LiteralValue::Integer(b)) => a == b,
            (LiteralValue::Float(a), LiteralValue::Float(b)) => a.to_bits() == b.to_bits(),
            (LiteralValue::Text(a), LiteralValue::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for LiteralValue {}

impl Hash for LiteralValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            LiteralValue::Null => {}
            LiteralValue::Boolean(b) => b.hash(state),
            LiteralValue::Integer(i) => i.hash(state),
            LiteralValue::Float(f) => f.to_bits().hash(state),
            LiteralValue::Text(s) => s.hash(state),
        }
    }
}

/// Named external parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub result_type: SqlType,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum UnaryOp {
    Neg,
    Not,
    IsNull,
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,

    // String
    Like,
}

impl BinaryOp {
    /// SQL token used by the diagnostic rendering
    pub fn token(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "=",
            BinaryOp::NotEq => "<>",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::And => "AND",
            BinaryOp::Or => "OR",
            BinaryOp::Like => "LIKE",
        }
    }
}
