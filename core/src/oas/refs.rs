#![deny(missing_docs)]

//! # Reference Resolution
//!
//! Inlines every local `$ref` (`#/...`) of a raw document before it is
//! deserialized. External documents are never fetched.

use crate::error::{AppError, AppResult};
use percent_encoding::percent_decode_str;
use serde_json::Value;

/// Returns a copy of `document` with every local `$ref` replaced by its target.
///
/// Keywords next to a `$ref` are kept and take precedence over the target's.
/// Reference cycles are rejected, self-referential schemas included.
pub(crate) fn resolve_refs(document: &Value) -> AppResult<Value> {
    let mut stack = Vec::new();
    resolve_value(document, document, &mut stack)
}

fn resolve_value(root: &Value, value: &Value, stack: &mut Vec<String>) -> AppResult<Value> {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(reference)) = map.get("$ref") {
                if stack.contains(reference) {
                    return Err(AppError::Reference(format!(
                        "Cyclic reference '{}'",
                        reference
                    )));
                }
                let target = lookup_pointer(root, reference)?;

                stack.push(reference.clone());
                let resolved = resolve_value(root, target, stack);
                stack.pop();
                let mut resolved = resolved?;

                if let Value::Object(target_map) = &mut resolved {
                    for (key, sibling) in map.iter().filter(|(key, _)| *key != "$ref") {
                        target_map.insert(key.clone(), resolve_value(root, sibling, stack)?);
                    }
                }
                return Ok(resolved);
            }

            let mut out = serde_json::Map::with_capacity(map.len());
            for (key, child) in map {
                out.insert(key.clone(), resolve_value(root, child, stack)?);
            }
            Ok(Value::Object(out))
        }
        Value::Array(items) => items
            .iter()
            .map(|item| resolve_value(root, item, stack))
            .collect::<AppResult<Vec<_>>>()
            .map(Value::Array),
        other => Ok(other.clone()),
    }
}

fn lookup_pointer<'a>(root: &'a Value, reference: &str) -> AppResult<&'a Value> {
    let pointer = reference.strip_prefix('#').ok_or_else(|| {
        AppError::Reference(format!("External reference '{}' is not supported", reference))
    })?;
    if pointer.is_empty() {
        return Ok(root);
    }

    pointer
        .trim_start_matches('/')
        .split('/')
        .map(decode_pointer_segment)
        .try_fold(root, |node, segment| match node {
            Value::Object(map) => map.get(&segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
        .ok_or_else(|| AppError::Reference(format!("Unresolvable reference '{}'", reference)))
}

/// Decodes a JSON Pointer segment (handles `~1` and `~0`, then percent-encoding).
pub(crate) fn decode_pointer_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded).decode_utf8_lossy().into_owned()
}
