#![deny(missing_docs)]

//! # Document Model
//!
//! Reference-resolved OpenAPI objects, restricted to what validation needs.
//! Maps are `IndexMap`s so declaration order survives deserialization.

use crate::routing::PathTemplate;
use crate::schema::Schema;
use derive_more::Display;
use indexmap::IndexMap;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// HTTP methods that may appear as Path Item keys.
const HTTP_METHODS: [&str; 9] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace", "query",
];

/// A loaded, reference-resolved contract. Immutable once built.
#[derive(Debug, Clone)]
pub struct OpenApiDocument {
    pub(crate) openapi: String,
    pub(crate) paths: IndexMap<String, PathItem>,
    pub(crate) templates: Vec<PathTemplate>,
    pub(crate) base_paths: Vec<String>,
    pub(crate) security: Option<Vec<SecurityRequirement>>,
    pub(crate) security_schemes: IndexMap<String, SecurityScheme>,
}

impl OpenApiDocument {
    /// The declared `openapi` version.
    pub fn version(&self) -> &str {
        &self.openapi
    }

    /// Path templates in declaration order.
    pub fn path_templates(&self) -> impl Iterator<Item = &str> {
        self.paths.keys().map(String::as_str)
    }

    /// The Path Item declared for `template`.
    pub fn path_item(&self, template: &str) -> Option<&PathItem> {
        self.paths.get(template)
    }

    /// The operation declared for `template` and `method` (any case).
    pub fn operation(&self, template: &str, method: &str) -> Option<&Operation> {
        self.path_item(template)?.operation(method)
    }

    /// Compiled templates paired with their Path Items, in declaration order.
    pub(crate) fn routes(&self) -> impl Iterator<Item = (&PathTemplate, &PathItem)> {
        self.templates.iter().zip(self.paths.values())
    }

    /// The compiled template for a declared path.
    pub(crate) fn template(&self, template: &str) -> Option<&PathTemplate> {
        self.paths
            .get_index_of(template)
            .and_then(|index| self.templates.get(index))
    }

    /// Base paths derived from `servers`, longest first; `""` when none is declared.
    pub fn base_paths(&self) -> &[String] {
        &self.base_paths
    }

    /// Document-level security requirements.
    pub fn security(&self) -> Option<&[SecurityRequirement]> {
        self.security.as_deref()
    }

    /// A scheme declared under `components.securitySchemes`.
    pub fn security_scheme(&self, name: &str) -> Option<&SecurityScheme> {
        self.security_schemes.get(name)
    }
}

/// Operations of one path template, keyed by uppercase method.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathItem {
    /// Parameters shared by all operations of the path.
    pub parameters: Vec<Parameter>,
    /// Operations keyed by uppercase method, in declaration order.
    pub operations: IndexMap<String, Operation>,
}

impl PathItem {
    /// The operation for `method` (any case).
    pub fn operation(&self, method: &str) -> Option<&Operation> {
        self.operations.get(&method.to_ascii_uppercase())
    }
}

impl<'de> Deserialize<'de> for PathItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = IndexMap::<String, Value>::deserialize(deserializer)?;
        let mut item = PathItem::default();

        for (key, value) in raw {
            if key == "parameters" {
                item.parameters = serde_json::from_value(value)
                    .map_err(|e| DeError::custom(format!("Failed to parse parameters: {}", e)))?;
            } else if key == "additionalOperations" {
                let extra = IndexMap::<String, Operation>::deserialize(value)
                    .map_err(|e| DeError::custom(format!("Failed to parse operations: {}", e)))?;
                for (method, operation) in extra {
                    item.operations.insert(method.to_ascii_uppercase(), operation);
                }
            } else if HTTP_METHODS.contains(&key.as_str()) {
                let operation = serde_json::from_value::<Operation>(value).map_err(|e| {
                    DeError::custom(format!("Failed to parse operation '{}': {}", key, e))
                })?;
                item.operations.insert(key.to_ascii_uppercase(), operation);
            }
        }

        Ok(item)
    }
}

/// An operation (template + method).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Operation {
    /// Unique identifier for the operation.
    #[serde(rename = "operationId")]
    pub operation_id: Option<String>,
    /// Operation-specific parameters.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Request Body.
    #[serde(rename = "requestBody")]
    pub request_body: Option<RequestBody>,
    /// Responses keyed by status code, range (`2XX`) or `default`.
    #[serde(default)]
    pub responses: IndexMap<String, Response>,
    /// Security requirements overriding the document-level ones.
    pub security: Option<Vec<SecurityRequirement>>,
}

/// Where a parameter lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum ParameterIn {
    /// Path segment.
    #[display("path")]
    Path,
    /// Query string.
    #[display("query")]
    Query,
    /// Request header.
    #[display("header")]
    Header,
    /// Cookie.
    #[display("cookie")]
    Cookie,
}

/// A Parameter Object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Location.
    #[serde(rename = "in")]
    pub location: ParameterIn,
    /// Whether the parameter must be present. Path parameters always are.
    #[serde(default)]
    pub required: bool,
    /// Schema of the value.
    pub schema: Option<Schema>,
    /// Media-type encoded value (mutually exclusive with `schema`).
    pub content: Option<IndexMap<String, MediaType>>,
    /// Serialization style.
    pub style: Option<String>,
    /// Whether arrays are sent as repeated keys.
    pub explode: Option<bool>,
}

impl Parameter {
    /// Whether a value must be present.
    pub fn is_required(&self) -> bool {
        self.required || self.location == ParameterIn::Path
    }

    /// Serialization style, defaulting to `form` for query and cookie
    /// parameters and `simple` for path and header parameters.
    pub fn style(&self) -> &str {
        match (&self.style, self.location) {
            (Some(style), _) => style.as_str(),
            (None, ParameterIn::Query | ParameterIn::Cookie) => "form",
            (None, ParameterIn::Path | ParameterIn::Header) => "simple",
        }
    }

    /// Whether array items arrive as separate values. Defaults to true for `form`.
    pub fn explodes(&self) -> bool {
        self.explode.unwrap_or(self.style() == "form")
    }

    /// Separator between the items of a single array value, if items share one.
    pub fn array_delimiter(&self) -> Option<char> {
        match self.style() {
            "simple" => Some(','),
            _ if self.explodes() => None,
            "spaceDelimited" => Some(' '),
            "pipeDelimited" => Some('|'),
            _ => Some(','),
        }
    }

    /// The schema describing the value, looking into `content` when needed.
    pub fn value_schema(&self) -> Option<&Schema> {
        self.schema.as_ref().or_else(|| {
            self.content
                .as_ref()
                .and_then(|content| content.values().next())
                .and_then(|media| media.schema.as_ref())
        })
    }
}

/// A Media Type Object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MediaType {
    /// Schema of the payload.
    pub schema: Option<Schema>,
}

/// A Request Body Object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RequestBody {
    /// Whether a body must be sent.
    #[serde(default)]
    pub required: bool,
    /// Payload descriptions keyed by media type or media range.
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

/// A Response Object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Response {
    /// Response description.
    pub description: Option<String>,
    /// Declared response headers.
    #[serde(default)]
    pub headers: IndexMap<String, Header>,
    /// Payload descriptions keyed by media type or media range.
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

/// A Header Object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Header {
    /// Whether the header must be present.
    #[serde(default)]
    pub required: bool,
    /// Schema of the value.
    pub schema: Option<Schema>,
}

/// Scheme name to required scopes. Every scheme of one requirement must be satisfied.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// Security scheme definitions (`components.securitySchemes`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum SecurityScheme {
    /// API key sent in a header, query parameter or cookie.
    #[serde(rename = "apiKey")]
    ApiKey(ApiKey),
    /// HTTP authentication (basic, bearer, ...).
    #[serde(rename = "http")]
    Http(HttpAuth),
    /// OAuth2; tokens travel as bearer credentials.
    #[serde(rename = "oauth2")]
    OAuth2(OAuth2),
    /// OpenID Connect; tokens travel as bearer credentials.
    #[serde(rename = "openIdConnect")]
    OpenIdConnect(OpenIdConnect),
    /// Mutual TLS; nothing to see at the message level.
    #[serde(rename = "mutualTLS")]
    MutualTls(MutualTls),
}

/// API key definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiKey {
    /// Header, query parameter or cookie name.
    pub name: String,
    /// Location.
    #[serde(rename = "in")]
    pub location: ApiKeyIn,
}

/// Where an API key is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyIn {
    /// Query parameter.
    Query,
    /// Header.
    Header,
    /// Cookie.
    Cookie,
}

/// HTTP Authentication definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HttpAuth {
    /// Scheme (basic, bearer, etc.).
    pub scheme: String,
    /// Format (e.g. JWT).
    #[serde(rename = "bearerFormat")]
    pub bearer_format: Option<String>,
}

/// OAuth2 definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OAuth2 {
    /// Raw flows object.
    pub flows: Option<Value>,
}

/// OpenID Connect definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OpenIdConnect {
    /// Connect URL.
    #[serde(rename = "openIdConnectUrl")]
    pub open_id_connect_url: Option<String>,
}

/// Mutual TLS definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MutualTls {
    /// Description.
    pub description: Option<String>,
}

/// An object representing a Server.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Server {
    /// A URL to the target host, possibly relative and templated.
    pub url: String,
    /// Variables substituted into `url`.
    #[serde(default)]
    pub variables: IndexMap<String, ServerVariable>,
}

/// An object representing a Server Variable.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServerVariable {
    /// The default value to use for substitution.
    pub default: String,
}
