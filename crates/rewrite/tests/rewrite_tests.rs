// Copyright (c) 2025 Portable Query contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Integration tests for the rewrite-if-changed traversal contract

use portable_query_ir::{
    BinaryOp, ColumnRef, FunctionCall, NodeKind, SqlExpr, SqlType, UnaryOp,
};
use portable_query_rewrite::{BooleanSimplifier, ParameterInliner, Rewriter};

/// Walker with no overrides: every kind takes the generic default.
struct Noop;
impl Rewriter for Noop {}

/// Replaces any column named `from` with a column named `to`.
struct ReplaceColumn {
    from: &'static str,
    to: &'static str,
}

impl Rewriter for ReplaceColumn {
    fn rewrite_column(&mut self, expr: &SqlExpr) -> SqlExpr {
        let NodeKind::Column(col) = expr.kind() else {
            return expr.clone();
        };
        if col.column == self.from {
            SqlExpr::column(ColumnRef::new(self.to, col.result_type.clone()))
        } else {
            expr.clone()
        }
    }
}

fn text_column(name: &str) -> SqlExpr {
    SqlExpr::column(ColumnRef::new(name, SqlType::Text))
}

fn as_call(expr: &SqlExpr) -> &FunctionCall {
    match expr.kind() {
        NodeKind::FunctionCall(call) => call,
        other => panic!("expected a function call, got {:?}", other),
    }
}

#[test]
fn test_noop_rewrite_returns_input_handle() {
    let tree = FunctionCall::with_args(
        "CONCAT",
        SqlType::Text,
        &[text_column("first_name"), text_column("last_name")],
    )
    .unwrap();

    let result = Noop.rewrite(&tree);
    assert!(SqlExpr::ptr_eq(&result, &tree));
}

#[test]
fn test_noop_rewrite_preserves_instance_call() {
    let tree = FunctionCall::on_instance(
        text_column("name"),
        "Substring",
        SqlType::Text,
        &[SqlExpr::integer(1)],
    )
    .unwrap();

    let result = Noop.rewrite(&tree);
    assert!(SqlExpr::ptr_eq(&result, &tree));
}

#[test]
fn test_changed_argument_reconstructs_node() {
    let a = text_column("a");
    let b = text_column("b");
    let c = text_column("c");
    let tree =
        FunctionCall::qualified("dbo", "FN", SqlType::Text, &[a.clone(), b, c.clone()]).unwrap();

    let result = ReplaceColumn { from: "b", to: "z" }.rewrite(&tree);

    assert!(!SqlExpr::ptr_eq(&result, &tree));
    let original = as_call(&tree);
    let rewritten = as_call(&result);
    assert_eq!(rewritten.name(), original.name());
    assert_eq!(rewritten.schema(), original.schema());
    assert_eq!(rewritten.result_type(), original.result_type());

    // Only position 1 differs; untouched arguments keep their allocation.
    assert!(SqlExpr::ptr_eq(&rewritten.arguments()[0], &a));
    assert_eq!(rewritten.arguments()[1], text_column("z"));
    assert!(SqlExpr::ptr_eq(&rewritten.arguments()[2], &c));
}

#[test]
fn test_unchanged_subtree_shared_across_rewrite() {
    let left = SqlExpr::binary(
        BinaryOp::Eq,
        text_column("status"),
        SqlExpr::text("active"),
        SqlType::Boolean,
    );
    let right = SqlExpr::binary(
        BinaryOp::Eq,
        text_column("city"),
        SqlExpr::text("London"),
        SqlType::Boolean,
    );
    let tree = SqlExpr::binary(BinaryOp::And, left, right.clone(), SqlType::Boolean);

    let result = ReplaceColumn {
        from: "status",
        to: "state",
    }
    .rewrite(&tree);

    assert!(!SqlExpr::ptr_eq(&result, &tree));
    let NodeKind::Binary {
        left: new_left,
        right: new_right,
        ..
    } = result.kind()
    else {
        panic!("expected a binary node");
    };
    assert_eq!(new_left.to_string(), "(state = 'active')");
    // The untouched right arm is the very same subtree, not a copy.
    assert!(SqlExpr::ptr_eq(new_right, &right));
}

#[test]
fn test_rewritten_instance_reconstructs_node() {
    let tree = FunctionCall::on_instance(
        text_column("name"),
        "Trim",
        SqlType::Text,
        &[],
    )
    .unwrap();

    let result = ReplaceColumn {
        from: "name",
        to: "city",
    }
    .rewrite(&tree);

    assert!(!SqlExpr::ptr_eq(&result, &tree));
    let rewritten = as_call(&result);
    assert_eq!(rewritten.instance().unwrap().to_string(), "city");
    assert!(rewritten.schema().is_none());
}

#[test]
fn test_upper_name_to_city_end_to_end() {
    let tree = FunctionCall::with_args("UPPER", SqlType::Text, &[text_column("Name")]).unwrap();
    assert_eq!(tree.to_string(), "UPPER(Name)");

    let result = ReplaceColumn {
        from: "Name",
        to: "City",
    }
    .rewrite(&tree);

    assert_eq!(result.to_string(), "UPPER(City)");
    assert!(!SqlExpr::ptr_eq(&result, &tree));
    assert_eq!(as_call(&result).name(), "UPPER");
    assert_eq!(as_call(&result).result_type(), &SqlType::Text);
}

#[test]
fn test_pass_chain_inline_then_simplify() {
    // (is_active AND :flag) with :flag bound to TRUE collapses to the bare
    // column after the two passes run in sequence.
    let is_active = SqlExpr::column(ColumnRef::new("is_active", SqlType::Boolean));
    let tree = SqlExpr::binary(
        BinaryOp::And,
        is_active.clone(),
        SqlExpr::parameter("flag", SqlType::Boolean),
        SqlType::Boolean,
    );

    let inlined = ParameterInliner::new()
        .with_binding("flag", SqlExpr::boolean(true))
        .rewrite(&tree);
    assert!(!SqlExpr::ptr_eq(&inlined, &tree));

    let simplified = BooleanSimplifier::new().rewrite(&inlined);
    assert!(SqlExpr::ptr_eq(&simplified, &is_active));
}

#[test]
fn test_simplifier_folds_nested_constants() {
    // NOT (x AND FALSE) -> NOT FALSE -> TRUE
    let x = SqlExpr::column(ColumnRef::new("x", SqlType::Boolean));
    let and = SqlExpr::binary(BinaryOp::And, x, SqlExpr::boolean(false), SqlType::Boolean);
    let tree = SqlExpr::unary(UnaryOp::Not, and, SqlType::Boolean);

    let result = BooleanSimplifier::new().rewrite(&tree);
    assert_eq!(result, SqlExpr::boolean(true));
}

#[test]
fn test_identity_comparison_detects_no_change_cheaply() {
    // A pass chain can test "did anything change" per stage with ptr_eq.
    let tree = SqlExpr::binary(
        BinaryOp::Gt,
        SqlExpr::column(ColumnRef::new("age", SqlType::Integer)),
        SqlExpr::integer(18),
        SqlType::Boolean,
    );

    let after_simplify = BooleanSimplifier::new().rewrite(&tree);
    let after_inline = ParameterInliner::new().rewrite(&after_simplify);

    assert!(SqlExpr::ptr_eq(&after_simplify, &tree));
    assert!(SqlExpr::ptr_eq(&after_inline, &tree));
}
