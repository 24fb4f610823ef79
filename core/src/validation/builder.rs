//! Construction of validators over one shared document and keyword set.

use crate::error::AppResult;
use crate::oas::OpenApiDocument;
use crate::schema::{
    FailureCause, KeywordContext, KeywordFailure, KeywordRegistry, KeywordValidator, Schema,
    SchemaValidator, ValidationContext,
};
use crate::validation::{ResponseValidator, RoutedRequestValidator, ServerRequestValidator};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

/// The immutable state every validator shares.
#[derive(Debug, Clone)]
pub(crate) struct Contract {
    pub(crate) document: Arc<OpenApiDocument>,
    pub(crate) registry: Arc<KeywordRegistry>,
}

impl Contract {
    pub(crate) fn check(
        &self,
        data: &Value,
        schema: &Schema,
        context: ValidationContext,
    ) -> Result<(), KeywordFailure> {
        SchemaValidator::new(&self.registry).validate(data, schema, context)
    }
}

/// Builds validators for one document.
///
/// ```rust
/// use oav_core::validation::ValidatorBuilder;
///
/// let builder = ValidatorBuilder::from_yaml(
///     "openapi: 3.0.0\npaths:\n  /ping:\n    get:\n      responses: {}\n",
/// )
/// .unwrap();
/// let validator = builder.server_request_validator();
/// let request = oav_core::http::ServerRequest::new("GET", "/ping");
/// assert_eq!(validator.validate(&request).unwrap().path(), "/ping");
/// ```
#[derive(Debug, Clone)]
pub struct ValidatorBuilder {
    document: Arc<OpenApiDocument>,
    registry: KeywordRegistry,
}

impl ValidatorBuilder {
    /// Starts from a loaded document and the built-in keywords.
    pub fn new(document: OpenApiDocument) -> Self {
        Self {
            document: Arc::new(document),
            registry: KeywordRegistry::default(),
        }
    }

    /// Loads a YAML document.
    pub fn from_yaml(content: &str) -> AppResult<Self> {
        OpenApiDocument::from_yaml(content).map(Self::new)
    }

    /// Loads a JSON document.
    pub fn from_json(content: &str) -> AppResult<Self> {
        OpenApiDocument::from_json(content).map(Self::new)
    }

    /// Reads and loads a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> AppResult<Self> {
        OpenApiDocument::from_yaml_file(path).map(Self::new)
    }

    /// Reads and loads a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> AppResult<Self> {
        OpenApiDocument::from_json_file(path).map(Self::new)
    }

    /// Adds or replaces a keyword.
    pub fn with_keyword(
        mut self,
        name: impl Into<String>,
        validator: impl KeywordValidator + 'static,
    ) -> Self {
        self.registry.register(name, validator);
        self
    }

    /// Adds or replaces a keyword implemented by a closure.
    pub fn with_keyword_fn<F>(mut self, name: impl Into<String>, validator: F) -> Self
    where
        F: Fn(&KeywordContext<'_>, &Value, &Value) -> Result<(), FailureCause>
            + Send
            + Sync
            + 'static,
    {
        self.registry.register_fn(name, validator);
        self
    }

    /// Replaces the whole keyword set.
    pub fn with_registry(mut self, registry: KeywordRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// The document validators will use.
    pub fn document(&self) -> &OpenApiDocument {
        &self.document
    }

    fn contract(&self) -> Contract {
        Contract {
            document: Arc::clone(&self.document),
            registry: Arc::new(self.registry.clone()),
        }
    }

    /// A validator that finds the operation itself.
    pub fn server_request_validator(&self) -> ServerRequestValidator {
        ServerRequestValidator::new(self.contract())
    }

    /// A validator for requests whose operation is already known.
    pub fn routed_request_validator(&self) -> RoutedRequestValidator {
        RoutedRequestValidator::new(self.contract())
    }

    /// A validator for responses.
    pub fn response_validator(&self) -> ResponseValidator {
        ResponseValidator::new(self.contract())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::ServerRequest;
    use serde_json::json;

    const DOC: &str = r#"
openapi: 3.0.0
paths:
  /items:
    post:
      requestBody:
        content:
          application/json:
            schema:
              type: object
              x-even: count
      responses: {}
"#;

    #[test]
    fn test_custom_keyword_is_applied() {
        let builder = ValidatorBuilder::from_yaml(DOC).unwrap();
        let request = ServerRequest::new("POST", "/items")
            .with_header("Content-Type", "application/json")
            .with_body(json!({"count": 3}));

        assert!(builder.server_request_validator().validate(&request).is_ok());

        let strict = builder.with_keyword_fn("x-even", |_, data, argument| {
            let field = argument.as_str().unwrap_or_default();
            match data.get(field).and_then(Value::as_i64) {
                Some(n) if n % 2 == 0 => Ok(()),
                _ => Err(FailureCause::constraint(format!("'{}' must be even", field))),
            }
        });
        let err = strict
            .server_request_validator()
            .validate(&request)
            .unwrap_err();
        assert_eq!(err.keyword_failure().map(|f| f.keyword()), Some("x-even"));
    }

    #[test]
    fn test_replaced_registry_drops_builtin_keywords() {
        let request = ServerRequest::new("POST", "/items")
            .with_header("Content-Type", "application/json")
            .with_body(json!([1, 2]));

        let builder = ValidatorBuilder::from_yaml(DOC).unwrap();
        let err = builder
            .server_request_validator()
            .validate(&request)
            .unwrap_err();
        assert_eq!(err.keyword_failure().map(|f| f.keyword()), Some("type"));

        let mut registry = KeywordRegistry::default();
        assert!(registry.unregister("type"));
        let lenient = builder.with_registry(registry);
        assert!(lenient.server_request_validator().validate(&request).is_ok());
    }

    #[test]
    fn test_validators_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ServerRequestValidator>();
        assert_send_sync::<RoutedRequestValidator>();
        assert_send_sync::<ResponseValidator>();
    }
}
