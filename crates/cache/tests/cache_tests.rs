// Copyright (c) 2025 Portable Query contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Integration tests for the plan cache against the compile pipeline

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use anyhow::{Result, bail};

use portable_query_cache::PlanCache;
use portable_query_ir::{BinaryOp, ColumnRef, FunctionCall, SqlExpr, SqlType};
use portable_query_rewrite::{BooleanSimplifier, Rewriter};

fn where_city_equals(value: &str) -> SqlExpr {
    SqlExpr::binary(
        BinaryOp::Eq,
        SqlExpr::column(ColumnRef::new("city", SqlType::Text)),
        SqlExpr::text(value),
        SqlType::Boolean,
    )
}

#[test]
fn test_get_or_compile_compiles_once_sequentially() {
    let cache: PlanCache<String> = PlanCache::new();
    let compiles = AtomicUsize::new(0);

    let compile = |expr: &SqlExpr| -> Result<String> {
        compiles.fetch_add(1, Ordering::SeqCst);
        Ok(format!("WHERE {}", expr))
    };

    let key = where_city_equals("London");
    let first = cache.get_or_compile(&key, compile).unwrap();
    let again = cache
        .get_or_compile(&where_city_equals("London"), compile)
        .unwrap();

    assert_eq!(*first, "WHERE (city = 'London')");
    assert!(Arc::ptr_eq(&first, &again));
    assert_eq!(compiles.load(Ordering::SeqCst), 1);
}

#[test]
fn test_compile_error_is_propagated_and_not_cached() {
    let cache: PlanCache<String> = PlanCache::new();
    let key = where_city_equals("London");

    let failed = cache.get_or_compile(&key, |_| -> Result<String> { bail!("backend offline") });
    assert!(failed.is_err());
    assert!(cache.is_empty());

    // A later successful compile still lands.
    let ok = cache.get_or_compile(&key, |expr| -> Result<String> { Ok(expr.to_string()) });
    assert!(ok.is_ok());
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_distinct_trees_get_distinct_entries() {
    let cache: PlanCache<String> = PlanCache::new();
    cache.insert(where_city_equals("London"), "plan-london".to_string());
    cache.insert(where_city_equals("Paris"), "plan-paris".to_string());

    assert_eq!(cache.len(), 2);
    assert_eq!(
        cache.get(&where_city_equals("Paris")).as_deref(),
        Some(&"plan-paris".to_string())
    );
}

#[test]
fn test_rewritten_tree_reuses_simplified_plan() {
    // Two differently written queries that simplify to the same tree share
    // one cache entry.
    let cache: PlanCache<String> = PlanCache::new();

    let verbose = SqlExpr::binary(
        BinaryOp::And,
        where_city_equals("London"),
        SqlExpr::boolean(true),
        SqlType::Boolean,
    );
    let plain = where_city_equals("London");

    let simplified = BooleanSimplifier::new().rewrite(&verbose);
    cache.insert(simplified, "shared plan".to_string());

    assert!(cache.get(&plain).is_some());
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_concurrent_lookups_and_inserts() {
    let cache: Arc<PlanCache<String>> = Arc::new(PlanCache::new());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                // Four distinct keys, hit from two threads each.
                let key = FunctionCall::with_args(
                    "LOWER",
                    SqlType::Text,
                    &[SqlExpr::text(format!("value-{}", i % 4))],
                )
                .unwrap();
                let plan = cache
                    .get_or_compile(&key, |expr| -> Result<String> { Ok(expr.to_string()) })
                    .unwrap();
                assert!(plan.starts_with("LOWER("));
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(cache.len(), 4);
}
