// Copyright (c) 2025 Portable Query contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Function-call nodes
//!
//! A function call is the representative "interesting" node kind: it carries
//! an identifier, an optional namespace qualifier, an optional receiver
//! sub-tree, and an ordered argument list.
//!
//! ## Call shapes
//!
//! Four construction shapes are supported, mirroring the call forms a query
//! translator emits:
//!
//! - [`FunctionCall::free`] — `CURRENT_DATE()`
//! - [`FunctionCall::with_args`] — `UPPER(name)`
//! - [`FunctionCall::qualified`] — `dbo.CustomerTotal(id)`
//! - [`FunctionCall::on_instance`] — `name.Substring(1, 3)` against a
//!   receiver expression
//!
//! A schema qualifier and a receiver are mutually exclusive by construction:
//! the schema-qualified shape always leaves the instance absent and the
//! instance shape always leaves the schema absent. Each shape validates its
//! inputs and then delegates to one canonical internal constructor, so no
//! partially built node is ever observable.
//!
//! ## Arguments
//!
//! The argument slice is copied into an owned, externally read-only sequence
//! at construction; later mutation of the caller's collection cannot change
//! the node. Ordering is preserved verbatim through construction and
//! rewriting.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::node::{NodeKind, SqlExpr};
use crate::types::SqlType;

/// Function-call node payload
///
/// Fields are private; a renderer reads them through the accessors and is
/// never able to mutate a finished node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionCall {
    name: String,
    schema: Option<String>,
    instance: Option<SqlExpr>,
    arguments: Box<[SqlExpr]>,
    result_type: SqlType,
}

impl FunctionCall {
    /// Free function call with no arguments: `name()`
    pub fn free(name: impl Into<String>, result_type: SqlType) -> IrResult<SqlExpr> {
        Self::build(name.into(), None, None, Vec::new(), result_type)
    }

    /// Free function call with arguments: `name(a, b)`
    pub fn with_args(
        name: impl Into<String>,
        result_type: SqlType,
        args: &[SqlExpr],
    ) -> IrResult<SqlExpr> {
        Self::build(name.into(), None, None, args.to_vec(), result_type)
    }

    /// Schema-qualified free function call: `schema.name(a, b)`
    ///
    /// The resulting node never carries an instance.
    pub fn qualified(
        schema: impl Into<String>,
        name: impl Into<String>,
        result_type: SqlType,
        args: &[SqlExpr],
    ) -> IrResult<SqlExpr> {
        let schema = schema.into();
        if schema.is_empty() {
            return Err(IrError::invalid(
                "schema",
                "schema qualifier must not be empty",
            ));
        }
        Self::build(name.into(), Some(schema), None, args.to_vec(), result_type)
    }

    /// Instance method call: `instance.name(a, b)`
    ///
    /// The resulting node never carries a schema qualifier.
    pub fn on_instance(
        instance: SqlExpr,
        name: impl Into<String>,
        result_type: SqlType,
        args: &[SqlExpr],
    ) -> IrResult<SqlExpr> {
        Self::build(
            name.into(),
            None,
            Some(instance),
            args.to_vec(),
            result_type,
        )
    }

    // Canonical constructor: every public shape funnels through here after
    // shape-specific validation.
    fn build(
        name: String,
        schema: Option<String>,
        instance: Option<SqlExpr>,
        arguments: Vec<SqlExpr>,
        result_type: SqlType,
    ) -> IrResult<SqlExpr> {
        if name.is_empty() {
            return Err(IrError::invalid(
                "name",
                "function name must not be empty",
            ));
        }
        Ok(SqlExpr::from_kind(NodeKind::FunctionCall(FunctionCall {
            name,
            schema,
            instance,
            arguments: arguments.into_boxed_slice(),
            result_type,
        })))
    }

    /// Function name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace qualifier, absent for unqualified and instance calls
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// Receiver sub-tree, absent for free function calls
    pub fn instance(&self) -> Option<&SqlExpr> {
        self.instance.as_ref()
    }

    /// Ordered argument nodes
    pub fn arguments(&self) -> &[SqlExpr] {
        &self.arguments
    }

    /// Static result type
    pub fn result_type(&self) -> &SqlType {
        &self.result_type
    }

    /// Ordered children: the instance (when present) followed by the
    /// arguments in order
    pub fn children(&self) -> Vec<SqlExpr> {
        let mut children = Vec::with_capacity(self.arguments.len() + 1);
        if let Some(instance) = &self.instance {
            children.push(instance.clone());
        }
        children.extend(self.arguments.iter().cloned());
        children
    }

    /// Rebuild this call with new children, keeping `name`, `schema`, and
    /// `result_type` unchanged
    ///
    /// This is the reconstruction half of the rewrite-if-changed contract:
    /// the preserved fields were validated when the original node was built,
    /// so no revalidation happens here. Callers are expected to pass the
    /// original children back unchanged when nothing was rewritten, in which
    /// case they should return the original handle instead of calling this.
    pub fn with_children(&self, instance: Option<SqlExpr>, arguments: Vec<SqlExpr>) -> SqlExpr {
        SqlExpr::from_kind(NodeKind::FunctionCall(FunctionCall {
            name: self.name.clone(),
            schema: self.schema.clone(),
            instance,
            arguments: arguments.into_boxed_slice(),
            result_type: self.result_type.clone(),
        }))
    }
}
