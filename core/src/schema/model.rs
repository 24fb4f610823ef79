#![deny(missing_docs)]

//! # Schema Nodes
//!
//! A reference-resolved Schema Object. Raw keyword arguments are kept in
//! declaration order; keywords that carry subschemas are additionally parsed
//! into owned child nodes so the engine never re-parses during validation.

use indexmap::IndexMap;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Keywords whose argument is a single subschema.
const SINGLE_SUBSCHEMA_KEYWORDS: [&str; 3] = ["items", "additionalProperties", "not"];

/// Keywords whose argument is a list of subschemas.
const LIST_SUBSCHEMA_KEYWORDS: [&str; 3] = ["allOf", "anyOf", "oneOf"];

/// Direction in which a value is validated.
///
/// Only affects `readOnly` / `writeOnly` exemptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationContext {
    /// The value travels in a request.
    AsRequest,
    /// The value travels in a response.
    AsResponse,
}

/// A schema node with its owned subschemas.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    keywords: IndexMap<String, Value>,
    properties: IndexMap<String, Schema>,
    read_only: bool,
    write_only: bool,
    children: HashMap<String, Children>,
}

#[derive(Debug, Clone, PartialEq)]
enum Children {
    Single(Box<Schema>),
    List(Vec<Schema>),
}

impl Schema {
    /// Builds a schema from a reference-resolved JSON value.
    ///
    /// Boolean schemas are accepted: `true` accepts everything, `false` is
    /// rewritten to `{"not": {}}`.
    pub fn from_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::Bool(true) => Ok(Self::default()),
            Value::Bool(false) => {
                let mut map = Map::new();
                map.insert("not".into(), Value::Object(Map::new()));
                Self::from_map(&map)
            }
            Value::Object(map) => Self::from_map(map),
            other => Err(format!("Schema must be an object or a boolean, got {}", other)),
        }
    }

    fn from_map(map: &Map<String, Value>) -> Result<Self, String> {
        if let Some(reference) = map.get("$ref") {
            return Err(format!("Unresolved reference {} in schema", reference));
        }

        let mut schema = Schema {
            keywords: map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            read_only: map.get("readOnly").and_then(Value::as_bool).unwrap_or(false),
            write_only: map.get("writeOnly").and_then(Value::as_bool).unwrap_or(false),
            ..Self::default()
        };

        if let Some(properties) = map.get("properties") {
            let properties = properties
                .as_object()
                .ok_or_else(|| "'properties' must be an object".to_string())?;
            for (name, sub) in properties {
                let parsed = Self::from_value(sub)
                    .map_err(|e| format!("properties.{}: {}", name, e))?;
                schema.properties.insert(name.clone(), parsed);
            }
        }

        for keyword in SINGLE_SUBSCHEMA_KEYWORDS {
            match map.get(keyword) {
                // `additionalProperties: false` is checked directly by its keyword.
                None | Some(Value::Bool(_)) if keyword == "additionalProperties" => {}
                None => {}
                Some(sub) => {
                    let parsed =
                        Self::from_value(sub).map_err(|e| format!("{}: {}", keyword, e))?;
                    schema
                        .children
                        .insert(keyword.to_string(), Children::Single(Box::new(parsed)));
                }
            }
        }

        for keyword in LIST_SUBSCHEMA_KEYWORDS {
            if let Some(list) = map.get(keyword) {
                let list = list
                    .as_array()
                    .ok_or_else(|| format!("'{}' must be an array of schemas", keyword))?;
                let parsed = list
                    .iter()
                    .enumerate()
                    .map(|(i, sub)| {
                        Self::from_value(sub).map_err(|e| format!("{}[{}]: {}", keyword, i, e))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                schema
                    .children
                    .insert(keyword.to_string(), Children::List(parsed));
            }
        }

        Ok(schema)
    }

    /// The raw argument of `keyword`, if declared on this node.
    pub fn keyword(&self, keyword: &str) -> Option<&Value> {
        self.keywords.get(keyword)
    }

    /// All raw keywords in declaration order.
    pub fn keywords(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.keywords.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Declared properties in declaration order.
    pub fn properties(&self) -> &IndexMap<String, Schema> {
        &self.properties
    }

    /// The subschema of a declared property.
    pub fn property(&self, name: &str) -> Option<&Schema> {
        self.properties.get(name)
    }

    /// `readOnly` flag.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// `writeOnly` flag.
    pub fn is_write_only(&self) -> bool {
        self.write_only
    }

    /// The single subschema of `items`, `additionalProperties` or `not`.
    pub fn subschema(&self, keyword: &str) -> Option<&Schema> {
        match self.children.get(keyword) {
            Some(Children::Single(schema)) => Some(schema),
            _ => None,
        }
    }

    /// The subschema list of `allOf`, `anyOf` or `oneOf`.
    pub fn subschemas(&self, keyword: &str) -> &[Schema] {
        match self.children.get(keyword) {
            Some(Children::List(list)) => list,
            _ => &[],
        }
    }

    /// Declared type names (`type: x` or `type: [x, y]`).
    pub fn types(&self) -> Vec<&str> {
        match self.keyword("type") {
            Some(Value::String(name)) => vec![name.as_str()],
            Some(Value::Array(names)) => names.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Whether `null` is accepted (`nullable: true` or `"null"` in the type list).
    pub fn is_nullable(&self) -> bool {
        self.keyword("nullable").and_then(Value::as_bool).unwrap_or(false)
            || self.types().contains(&"null")
    }
}

impl TryFrom<Value> for Schema {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(&value)
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        Self::from_value(&raw).map_err(DeError::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_properties_keep_declaration_order() {
        let schema = Schema::from_value(&json!({
            "type": "object",
            "properties": {
                "zeta": {"type": "string"},
                "alpha": {"type": "integer", "readOnly": true}
            }
        }))
        .unwrap();

        let names: Vec<_> = schema.properties().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
        assert!(schema.property("alpha").unwrap().is_read_only());
        assert!(!schema.property("zeta").unwrap().is_write_only());
    }

    #[test]
    fn test_boolean_schemas() {
        assert_eq!(Schema::from_value(&json!(true)).unwrap(), Schema::default());
        let never = Schema::from_value(&json!(false)).unwrap();
        assert!(never.subschema("not").is_some());
    }

    #[test]
    fn test_subschemas_are_parsed() {
        let schema = Schema::from_value(&json!({
            "items": {"type": "string"},
            "additionalProperties": false,
            "oneOf": [{"type": "string"}, {"type": "integer"}]
        }))
        .unwrap();

        assert_eq!(schema.subschema("items").unwrap().types(), vec!["string"]);
        assert!(schema.subschema("additionalProperties").is_none());
        assert_eq!(schema.subschemas("oneOf").len(), 2);
        assert!(schema.subschemas("anyOf").is_empty());
    }

    #[test]
    fn test_nullable() {
        let v30 = Schema::from_value(&json!({"type": "string", "nullable": true})).unwrap();
        let v31 = Schema::from_value(&json!({"type": ["string", "null"]})).unwrap();
        assert!(v30.is_nullable());
        assert!(v31.is_nullable());
    }

    #[test]
    fn test_malformed_schema_is_rejected() {
        let err = Schema::from_value(&json!({"properties": {"a": 5}})).unwrap_err();
        assert!(err.contains("properties.a"));
        assert!(Schema::from_value(&json!({"allOf": {}})).is_err());
        assert!(Schema::from_value(&json!({"$ref": "#/components/schemas/A"})).is_err());
    }
}
