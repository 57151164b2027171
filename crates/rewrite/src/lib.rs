// Copyright (c) 2025 Portable Query contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Portable Query - Tree-Walker Rewrite Protocol
//!
//! This crate provides the traversal and rewriting layer over the IR: each
//! compiler pass consumes a tree and produces a tree, and a chain of passes
//! (simplification, parameter inlining, backend translation) runs between
//! construction and rendering.
//!
//! ## The protocol
//!
//! [`Rewriter`] has one entry point, [`Rewriter::rewrite`], which dispatches
//! on the node kind to a per-kind method. Every per-kind method has a
//! default: leaves come back unchanged, interior kinds go through
//! [`rewrite_children`]. A concrete walker overrides only the kinds it cares
//! about, so new passes are added without touching any node type, and node
//! kinds a walker does not know about fall back to generic traversal.
//!
//! ## Rewrite-if-changed
//!
//! [`rewrite_children`] returns the *input handle* (same allocation) when no
//! child changed, and a newly constructed node otherwise. Callers test
//! whether a pass did anything with [`SqlExpr::ptr_eq`] — a pointer
//! comparison, not a deep equality walk — and unchanged subtrees stay shared
//! between the input and output trees. Downstream plan-cache logic depends on
//! this being an identity test, so walkers that rebuild a node must never
//! return a structurally-equal-but-fresh allocation for an untouched subtree.
//!
//! ## Example
//!
//! ```rust
//! use portable_query_ir::{ColumnRef, FunctionCall, NodeKind, SqlExpr, SqlType};
//! use portable_query_rewrite::Rewriter;
//!
//! /// Replaces every reference to one column with another.
//! struct RenameColumn {
//!     from: String,
//!     to: String,
//! }
//!
//! impl Rewriter for RenameColumn {
//!     fn rewrite_column(&mut self, expr: &SqlExpr) -> SqlExpr {
//!         let NodeKind::Column(col) = expr.kind() else {
//!             return expr.clone();
//!         };
//!         if col.column == self.from {
//!             let renamed = ColumnRef::new(self.to.clone(), col.result_type.clone());
//!             SqlExpr::column(match &col.table {
//!                 Some(table) => renamed.with_table(table.clone()),
//!                 None => renamed,
//!             })
//!         } else {
//!             expr.clone()
//!         }
//!     }
//! }
//!
//! let name = SqlExpr::column(ColumnRef::new("Name", SqlType::Text));
//! let call = FunctionCall::with_args("UPPER", SqlType::Text, &[name]).unwrap();
//!
//! let mut pass = RenameColumn { from: "Name".into(), to: "City".into() };
//! let rewritten = pass.rewrite(&call);
//!
//! assert_eq!(rewritten.to_string(), "UPPER(City)");
//! assert!(!SqlExpr::ptr_eq(&rewritten, &call));
//! ```

pub mod inline;
pub mod simplify;

pub use inline::ParameterInliner;
pub use simplify::BooleanSimplifier;

use portable_query_ir::{NodeKind, SqlExpr};

/// A tree-walking pass over IR trees
///
/// Implementations override the per-kind methods for the kinds they handle;
/// everything else falls back to generic traversal. All methods take the
/// node by handle so the walker can return it unchanged without allocating.
pub trait Rewriter {
    /// Rewrite one node, dispatching to the kind-specific handler
    fn rewrite(&mut self, expr: &SqlExpr) -> SqlExpr {
        match expr.kind() {
            NodeKind::Column(_) => self.rewrite_column(expr),
            NodeKind::Literal(_) => self.rewrite_literal(expr),
            NodeKind::Parameter(_) => self.rewrite_parameter(expr),
            NodeKind::Unary { .. } => self.rewrite_unary(expr),
            NodeKind::Binary { .. } => self.rewrite_binary(expr),
            NodeKind::FunctionCall(_) => self.rewrite_function_call(expr),
        }
    }

    /// Handle a column reference; default: unchanged
    fn rewrite_column(&mut self, expr: &SqlExpr) -> SqlExpr {
        expr.clone()
    }

    /// Handle a literal; default: unchanged
    fn rewrite_literal(&mut self, expr: &SqlExpr) -> SqlExpr {
        expr.clone()
    }

    /// Handle a parameter; default: unchanged
    fn rewrite_parameter(&mut self, expr: &SqlExpr) -> SqlExpr {
        expr.clone()
    }

    /// Handle a unary operation; default: generic children rewrite
    fn rewrite_unary(&mut self, expr: &SqlExpr) -> SqlExpr {
        rewrite_children(self, expr)
    }

    /// Handle a binary operation; default: generic children rewrite
    fn rewrite_binary(&mut self, expr: &SqlExpr) -> SqlExpr {
        rewrite_children(self, expr)
    }

    /// Handle a function call; default: generic children rewrite
    fn rewrite_function_call(&mut self, expr: &SqlExpr) -> SqlExpr {
        rewrite_children(self, expr)
    }
}

/// Generic children traversal with the rewrite-if-changed contract
///
/// Visits every direct child in order through `rewriter.rewrite`. Returns
/// the input handle (same allocation) when every rewritten child is
/// identical to the original; otherwise reconstructs the node with the same
/// non-child fields and the updated children.
pub fn rewrite_children<R: Rewriter + ?Sized>(rewriter: &mut R, expr: &SqlExpr) -> SqlExpr {
    match expr.kind() {
        NodeKind::Column(_) | NodeKind::Literal(_) | NodeKind::Parameter(_) => expr.clone(),

        NodeKind::Unary {
            op,
            operand,
            result_type,
        } => {
            let rewritten = rewriter.rewrite(operand);
            if SqlExpr::ptr_eq(&rewritten, operand) {
                expr.clone()
            } else {
                SqlExpr::unary(*op, rewritten, result_type.clone())
            }
        }

        NodeKind::Binary {
            op,
            left,
            right,
            result_type,
        } => {
            let new_left = rewriter.rewrite(left);
            let new_right = rewriter.rewrite(right);
            if SqlExpr::ptr_eq(&new_left, left) && SqlExpr::ptr_eq(&new_right, right) {
                expr.clone()
            } else {
                SqlExpr::binary(*op, new_left, new_right, result_type.clone())
            }
        }

        NodeKind::FunctionCall(call) => {
            let mut changed = false;

            let instance = match call.instance() {
                Some(original) => {
                    let rewritten = rewriter.rewrite(original);
                    changed |= !SqlExpr::ptr_eq(&rewritten, original);
                    Some(rewritten)
                }
                None => None,
            };

            let mut arguments = Vec::with_capacity(call.arguments().len());
            for original in call.arguments() {
                let rewritten = rewriter.rewrite(original);
                changed |= !SqlExpr::ptr_eq(&rewritten, original);
                arguments.push(rewritten);
            }

            if changed {
                call.with_children(instance, arguments)
            } else {
                expr.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portable_query_ir::{BinaryOp, ColumnRef, FunctionCall, SqlType};

    /// Walker with no overrides: pure generic traversal.
    struct Identity;
    impl Rewriter for Identity {}

    #[test]
    fn test_identity_walk_returns_same_handle() {
        let tree = FunctionCall::with_args(
            "CONCAT",
            SqlType::Text,
            &[
                SqlExpr::column(ColumnRef::new("a", SqlType::Text)),
                SqlExpr::text("-"),
            ],
        )
        .unwrap();

        let result = Identity.rewrite(&tree);
        assert!(SqlExpr::ptr_eq(&result, &tree));
    }

    #[test]
    fn test_identity_walk_on_nested_tree() {
        let pred = SqlExpr::binary(
            BinaryOp::Eq,
            SqlExpr::column(ColumnRef::new("status", SqlType::Text)),
            SqlExpr::text("active"),
            SqlType::Boolean,
        );
        let result = Identity.rewrite(&pred);
        assert!(SqlExpr::ptr_eq(&result, &pred));
    }
}
