#![deny(missing_docs)]

//! # Document Loading
//!
//! Parses YAML or JSON, inlines local references, checks the root shape and
//! precompiles every path template.
//!
//! References are inlined eagerly, so recursive schemas (a `Node` whose
//! `children` refer back to `Node`) are rejected with `AppError::Reference`.

use crate::error::{AppError, AppResult};
use crate::oas::model::{
    OpenApiDocument, PathItem, SecurityRequirement, SecurityScheme, Server,
};
use crate::oas::refs::resolve_refs;
use crate::routing::PathTemplate;
use indexmap::IndexMap;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fs;
use std::path::Path;
use url::Url;

/// Root of the document, as far as validation is concerned.
#[derive(Debug, Deserialize)]
struct ShimOpenApi {
    openapi: String,
    #[serde(default)]
    servers: Vec<Server>,
    #[serde(default)]
    paths: ShimPaths,
    components: Option<ShimComponents>,
    security: Option<Vec<SecurityRequirement>>,
}

#[derive(Debug, Default, Deserialize)]
struct ShimComponents {
    #[serde(rename = "securitySchemes", default)]
    security_schemes: IndexMap<String, SecurityScheme>,
}

/// Paths object with `x-` extensions filtered out.
#[derive(Debug, Default)]
struct ShimPaths {
    items: IndexMap<String, PathItem>,
}

impl<'de> Deserialize<'de> for ShimPaths {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = IndexMap::<String, Value>::deserialize(deserializer)?;
        let mut items = IndexMap::new();

        for (key, value) in raw {
            if key.starts_with("x-") {
                continue;
            }
            let item = serde_json::from_value::<PathItem>(value).map_err(|e| {
                DeError::custom(format!("Failed to parse path item '{}': {}", key, e))
            })?;
            items.insert(key, item);
        }

        Ok(ShimPaths { items })
    }
}

impl OpenApiDocument {
    /// Builds a document from an already parsed JSON value.
    pub fn from_value(value: &Value) -> AppResult<Self> {
        let resolved = resolve_refs(value)?;
        let shim: ShimOpenApi = serde_json::from_value(resolved)?;

        if !shim.openapi.starts_with("3.") {
            return Err(AppError::General(format!(
                "Unsupported OpenAPI version '{}'",
                shim.openapi
            )));
        }

        let templates = shim
            .paths
            .items
            .keys()
            .map(String::as_str)
            .map(PathTemplate::parse)
            .collect::<AppResult<Vec<_>>>()?;
        let base_paths = base_paths(&shim.servers);

        tracing::debug!(
            paths = shim.paths.items.len(),
            servers = shim.servers.len(),
            "Loaded OpenAPI {} document",
            shim.openapi
        );

        Ok(OpenApiDocument {
            openapi: shim.openapi,
            paths: shim.paths.items,
            templates,
            base_paths,
            security: shim.security,
            security_schemes: shim
                .components
                .map(|components| components.security_schemes)
                .unwrap_or_default(),
        })
    }

    /// Parses a YAML document.
    pub fn from_yaml(content: &str) -> AppResult<Self> {
        let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;
        Self::from_value(&yaml_to_json(yaml)?)
    }

    /// Parses a JSON document.
    pub fn from_json(content: &str) -> AppResult<Self> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_value(&value)
    }

    /// Reads and parses a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> AppResult<Self> {
        Self::from_yaml(&fs::read_to_string(path)?)
    }

    /// Reads and parses a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> AppResult<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

/// Converts YAML to JSON, stringifying non-string keys such as `200:`.
fn yaml_to_json(value: serde_yaml::Value) -> AppResult<Value> {
    Ok(match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => serde_json::to_value(n)?,
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<AppResult<Vec<_>>>()?,
        ),
        serde_yaml::Value::Mapping(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (key, value) in map {
                let key = match key {
                    serde_yaml::Value::String(s) => s,
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => {
                        return Err(AppError::General(format!(
                            "Unsupported mapping key: {:?}",
                            other
                        )))
                    }
                };
                out.insert(key, yaml_to_json(value)?);
            }
            Value::Object(out)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

/// Base paths served by the document, longest first. `""` when none is declared.
fn base_paths(servers: &[Server]) -> Vec<String> {
    let mut paths: Vec<String> = servers.iter().map(server_base_path).collect();
    if paths.is_empty() {
        paths.push(String::new());
    }
    paths.sort_by(|a, b| b.len().cmp(&a.len()));
    paths.dedup();
    paths
}

fn server_base_path(server: &Server) -> String {
    let mut url = server.url.clone();
    for (name, variable) in &server.variables {
        url = url.replace(&format!("{{{}}}", name), &variable.default);
    }

    let path = match Url::parse(&url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url,
    };
    path.trim_end_matches('/').to_string()
}
