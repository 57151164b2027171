// Copyright (c) 2025 Portable Query contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Boolean predicate simplification
//!
//! A bottom-up pass that folds constant boolean structure out of predicates
//! before a backend translator sees them:
//!
//! - `NOT TRUE` → `FALSE`, `NOT FALSE` → `TRUE`
//! - `NOT (NOT x)` → `x`
//! - `x AND TRUE` → `x`, `x AND FALSE` → `FALSE` (and mirrored)
//! - `x OR FALSE` → `x`, `x OR TRUE` → `TRUE` (and mirrored)
//!
//! Anything else passes through the generic traversal, so a tree with no
//! foldable structure comes back as the same handle.

use portable_query_ir::{BinaryOp, LiteralValue, NodeKind, SqlExpr, UnaryOp};

use crate::{Rewriter, rewrite_children};

/// Rewrite pass folding constant boolean predicates
#[derive(Debug, Default)]
pub struct BooleanSimplifier;

impl BooleanSimplifier {
    pub fn new() -> Self {
        Self
    }
}

/// Constant boolean value of a node, if it is a boolean literal
fn as_bool(expr: &SqlExpr) -> Option<bool> {
    match expr.kind() {
        NodeKind::Literal(lit) => match lit.value {
            LiteralValue::Boolean(b) => Some(b),
            _ => None,
        },
        _ => None,
    }
}

impl Rewriter for BooleanSimplifier {
    fn rewrite_unary(&mut self, expr: &SqlExpr) -> SqlExpr {
        // Children first, so folds cascade upward.
        let rewritten = rewrite_children(self, expr);

        let NodeKind::Unary {
            op: UnaryOp::Not,
            operand,
            ..
        } = rewritten.kind()
        else {
            return rewritten;
        };

        if let Some(value) = as_bool(operand) {
            return SqlExpr::boolean(!value);
        }
        if let NodeKind::Unary {
            op: UnaryOp::Not,
            operand: inner,
            ..
        } = operand.kind()
        {
            return inner.clone();
        }
        rewritten
    }

    fn rewrite_binary(&mut self, expr: &SqlExpr) -> SqlExpr {
        let rewritten = rewrite_children(self, expr);

        let NodeKind::Binary {
            op, left, right, ..
        } = rewritten.kind()
        else {
            return rewritten;
        };

        match op {
            BinaryOp::And => match (as_bool(left), as_bool(right)) {
                (Some(false), _) | (_, Some(false)) => SqlExpr::boolean(false),
                (Some(true), _) => right.clone(),
                (_, Some(true)) => left.clone(),
                _ => rewritten,
            },
            BinaryOp::Or => match (as_bool(left), as_bool(right)) {
                (Some(true), _) | (_, Some(true)) => SqlExpr::boolean(true),
                (Some(false), _) => right.clone(),
                (_, Some(false)) => left.clone(),
                _ => rewritten,
            },
            _ => rewritten,
        }
    }
}
