// Copyright (c) 2025 Portable Query contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Portable Query - Plan Cache
//!
//! Maps whole IR trees to compiled plans using the IR's structural
//! equality and hashing: a query compiled once is reused for any
//! structurally identical tree built from a later invocation.
//!
//! ## Concurrency policy
//!
//! Lookups take a read lock; inserts take a write lock and are
//! first-writer-wins. Compilation in [`PlanCache::get_or_compile`] runs
//! outside any lock, so two threads missing on the same key may both
//! compile — duplicate work, never an inconsistent cache. Callers that need
//! at-most-one compile per key serialize at a higher layer.
//!
//! A cache is built explicitly by the compilation session that owns it;
//! there is no global instance.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::debug;

use portable_query_ir::SqlExpr;

/// Cache of compiled plans keyed by IR tree
///
/// `V` is whatever the renderer produced for the tree (command text, a
/// prepared-statement handle, ...). Values are handed out as `Arc<V>` so
/// entries stay alive for in-flight executions even if the cache is cleared.
pub struct PlanCache<V> {
    plans: RwLock<HashMap<SqlExpr, Arc<V>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

/// Hit/miss counters for a [`PlanCache`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl<V> PlanCache<V> {
    pub fn new() -> Self {
        Self {
            plans: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Look up the plan for a structurally equal tree
    pub fn get(&self, key: &SqlExpr) -> Option<Arc<V>> {
        let found = self.plans.read().get(key).cloned();
        match &found {
            Some(_) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(key = %key, "plan cache hit");
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!(key = %key, "plan cache miss");
            }
        }
        found
    }

    /// Insert a plan, returning the retained value
    ///
    /// First writer wins: if another thread already inserted a plan for an
    /// equal key, that plan is kept and returned and `value` is dropped.
    pub fn insert(&self, key: SqlExpr, value: V) -> Arc<V> {
        let mut plans = self.plans.write();
        match plans.entry(key) {
            std::collections::hash_map::Entry::Occupied(entry) => entry.get().clone(),
            std::collections::hash_map::Entry::Vacant(entry) => {
                debug!(key = %entry.key(), "plan cache insert");
                entry.insert(Arc::new(value)).clone()
            }
        }
    }

    /// Look up the plan for `key`, compiling and inserting on a miss
    ///
    /// `compile` runs without any cache lock held. Concurrent misses on the
    /// same key may compile redundantly; the first insert wins and every
    /// caller gets the retained plan. A compile error is returned to the
    /// caller and nothing is cached.
    pub fn get_or_compile<E>(
        &self,
        key: &SqlExpr,
        compile: impl FnOnce(&SqlExpr) -> Result<V, E>,
    ) -> Result<Arc<V>, E> {
        if let Some(plan) = self.get(key) {
            return Ok(plan);
        }
        let compiled = compile(key)?;
        Ok(self.insert(key.clone(), compiled))
    }

    /// Number of cached plans
    pub fn len(&self) -> usize {
        self.plans.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.read().is_empty()
    }

    /// Drop every cached plan; counters are kept
    pub fn clear(&self) {
        self.plans.write().clear();
    }

    /// Snapshot of the hit/miss counters
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl<V> Default for PlanCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
