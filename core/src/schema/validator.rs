#![deny(missing_docs)]

//! # Schema Validation Engine
//!
//! Runs every registered keyword declared on a schema node, in registry
//! order, and stops at the first failure.

use crate::schema::failure::KeywordFailure;
use crate::schema::model::{Schema, ValidationContext};
use crate::schema::registry::{KeywordContext, KeywordRegistry};
use serde_json::Value;
use tracing::trace;

/// Validates values against schema nodes using a keyword registry.
#[derive(Debug, Clone, Copy)]
pub struct SchemaValidator<'r> {
    registry: &'r KeywordRegistry,
}

impl<'r> SchemaValidator<'r> {
    /// Creates an engine over `registry`.
    pub fn new(registry: &'r KeywordRegistry) -> Self {
        Self { registry }
    }

    /// Validates `data` against `schema` in the given direction.
    ///
    /// Returns the first keyword failure; later keywords on the same node are
    /// not evaluated.
    pub fn validate(
        &self,
        data: &Value,
        schema: &Schema,
        context: ValidationContext,
    ) -> Result<(), KeywordFailure> {
        if data.is_null() && schema.is_nullable() {
            return Ok(());
        }

        let cx = KeywordContext::new(schema, context, self);
        for (name, keyword) in self.registry.iter() {
            let Some(argument) = schema.keyword(name) else {
                continue;
            };
            trace!(keyword = name, "evaluating keyword");
            keyword
                .validate(&cx, data, argument)
                .map_err(|cause| KeywordFailure::new(name, data, cause))?;
        }

        Ok(())
    }
}
