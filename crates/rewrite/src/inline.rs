// Copyright (c) 2025 Portable Query contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Parameter inlining
//!
//! Replaces named [`Parameter`] nodes with bound replacement sub-trees. A
//! compiler runs this when a backend cannot take external parameters, or
//! when a cached general plan is specialized to concrete values.
//!
//! Parameters without a binding pass through unchanged, so the pass can run
//! with partial bindings and leave the rest for a later stage.
//!
//! [`Parameter`]: portable_query_ir::Parameter

use std::collections::HashMap;

use portable_query_ir::{NodeKind, SqlExpr};

use crate::Rewriter;

/// Rewrite pass substituting bound sub-trees for named parameters
#[derive(Debug, Default)]
pub struct ParameterInliner {
    bindings: HashMap<String, SqlExpr>,
}

impl ParameterInliner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: bind a parameter name to a replacement sub-tree
    pub fn with_binding(mut self, name: impl Into<String>, replacement: SqlExpr) -> Self {
        self.bindings.insert(name.into(), replacement);
        self
    }

    /// Number of bound parameters
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Rewriter for ParameterInliner {
    fn rewrite_parameter(&mut self, expr: &SqlExpr) -> SqlExpr {
        let NodeKind::Parameter(param) = expr.kind() else {
            return expr.clone();
        };
        match self.bindings.get(&param.name) {
            Some(replacement) => replacement.clone(),
            None => expr.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portable_query_ir::{BinaryOp, ColumnRef, SqlType};

    #[test]
    fn test_bound_parameter_replaced() {
        let pred = SqlExpr::binary(
            BinaryOp::Eq,
            SqlExpr::column(ColumnRef::new("city", SqlType::Text)),
            SqlExpr::parameter("city", SqlType::Text),
            SqlType::Boolean,
        );

        let mut pass = ParameterInliner::new().with_binding("city", SqlExpr::text("London"));
        let result = pass.rewrite(&pred);

        assert_eq!(result.to_string(), "(city = 'London')");
        assert!(!SqlExpr::ptr_eq(&result, &pred));
    }

    #[test]
    fn test_unbound_parameter_untouched() {
        let pred = SqlExpr::binary(
            BinaryOp::Eq,
            SqlExpr::column(ColumnRef::new("city", SqlType::Text)),
            SqlExpr::parameter("city", SqlType::Text),
            SqlType::Boolean,
        );

        let mut pass = ParameterInliner::new().with_binding("country", SqlExpr::text("UK"));
        let result = pass.rewrite(&pred);
        assert!(SqlExpr::ptr_eq(&result, &pred));
    }
}
