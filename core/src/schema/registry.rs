#![deny(missing_docs)]

//! # Keyword Registry
//!
//! Maps keyword names to validators with a uniform
//! `(context, value, argument) -> Result` signature. Registration order is
//! evaluation order.

use crate::schema::failure::{FailureCause, KeywordFailure};
use crate::schema::keywords;
use crate::schema::model::{Schema, ValidationContext};
use crate::schema::validator::SchemaValidator;
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Validates a value against the argument of one keyword.
///
/// Implementors only describe *why* a value fails; the engine wraps the
/// returned cause into a [`KeywordFailure`] named after the keyword.
pub trait KeywordValidator: Send + Sync {
    /// Checks `data` against `argument`, the raw keyword value from `cx.schema()`.
    fn validate(
        &self,
        cx: &KeywordContext<'_>,
        data: &Value,
        argument: &Value,
    ) -> Result<(), FailureCause>;
}

impl<F> KeywordValidator for F
where
    F: Fn(&KeywordContext<'_>, &Value, &Value) -> Result<(), FailureCause> + Send + Sync,
{
    fn validate(
        &self,
        cx: &KeywordContext<'_>,
        data: &Value,
        argument: &Value,
    ) -> Result<(), FailureCause> {
        self(cx, data, argument)
    }
}

/// What a keyword can see while it runs.
pub struct KeywordContext<'a> {
    schema: &'a Schema,
    context: ValidationContext,
    validator: &'a SchemaValidator<'a>,
}

impl<'a> KeywordContext<'a> {
    pub(crate) fn new(
        schema: &'a Schema,
        context: ValidationContext,
        validator: &'a SchemaValidator<'a>,
    ) -> Self {
        Self {
            schema,
            context,
            validator,
        }
    }

    /// The schema node that declares the keyword (siblings are reachable from it).
    pub fn schema(&self) -> &Schema {
        self.schema
    }

    /// Request or response direction.
    pub fn context(&self) -> ValidationContext {
        self.context
    }

    /// Validates `data` against a subschema in the same direction.
    pub fn descend(&self, data: &Value, schema: &Schema) -> Result<(), KeywordFailure> {
        self.validator.validate(data, schema, self.context)
    }
}

/// Ordered set of keyword validators.
#[derive(Clone)]
pub struct KeywordRegistry {
    keywords: IndexMap<String, Arc<dyn KeywordValidator>>,
}

impl KeywordRegistry {
    /// Creates a registry without any keyword.
    pub fn empty() -> Self {
        Self {
            keywords: IndexMap::new(),
        }
    }

    /// Registers `validator` under `name`.
    ///
    /// Replacing an existing keyword keeps its position in the evaluation order;
    /// new keywords are evaluated after all existing ones.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        validator: impl KeywordValidator + 'static,
    ) {
        self.keywords.insert(name.into(), Arc::new(validator));
    }

    /// Registers a closure under `name`; see [`KeywordRegistry::register`].
    pub fn register_fn<F>(&mut self, name: impl Into<String>, validator: F)
    where
        F: Fn(&KeywordContext<'_>, &Value, &Value) -> Result<(), FailureCause>
            + Send
            + Sync
            + 'static,
    {
        self.register(name, validator);
    }

    /// Removes a keyword; its occurrences in schemas are then ignored.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.keywords.shift_remove(name).is_some()
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.keywords.contains_key(name)
    }

    /// Keyword names in evaluation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.keywords.keys().map(String::as_str)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &dyn KeywordValidator)> {
        self.keywords.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }
}

impl Default for KeywordRegistry {
    /// The built-in OpenAPI keyword set.
    fn default() -> Self {
        let mut registry = Self::empty();
        keywords::register_builtin(&mut registry);
        registry
    }
}

impl fmt::Debug for KeywordRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtin_order_starts_with_type() {
        let registry = KeywordRegistry::default();
        assert_eq!(registry.names().next(), Some("type"));
        assert!(registry.contains("required"));
        assert!(registry.contains("multipleOf"));
    }

    #[test]
    fn test_replacing_keeps_position() {
        let mut registry = KeywordRegistry::default();
        let before: Vec<String> = registry.names().map(String::from).collect();
        registry.register_fn("maximum", |_, _, _| Ok(()));
        let after: Vec<String> = registry.names().map(String::from).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_custom_keyword() {
        let mut registry = KeywordRegistry::default();
        registry.register_fn("x-even", |_, data, _| match data.as_i64() {
            Some(n) if n % 2 == 0 => Ok(()),
            _ => Err(FailureCause::constraint("Value must be even")),
        });
        let schema = Schema::from_value(&json!({"x-even": true})).unwrap();
        let validator = SchemaValidator::new(&registry);

        assert!(validator
            .validate(&json!(4), &schema, ValidationContext::AsRequest)
            .is_ok());
        let err = validator
            .validate(&json!(3), &schema, ValidationContext::AsRequest)
            .unwrap_err();
        assert_eq!(err.keyword(), "x-even");
    }

    #[test]
    fn test_unregistered_keyword_is_ignored() {
        let mut registry = KeywordRegistry::default();
        assert!(registry.unregister("maxLength"));
        let schema = Schema::from_value(&json!({"maxLength": 1})).unwrap();
        assert!(SchemaValidator::new(&registry)
            .validate(&json!("long"), &schema, ValidationContext::AsResponse)
            .is_ok());
    }
}
