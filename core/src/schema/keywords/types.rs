//! `type`, `enum` and `const`.

use crate::schema::failure::FailureCause;
use crate::schema::keywords::values_equal;
use crate::schema::registry::{KeywordContext, KeywordValidator};
use serde_json::Value;

/// `type`: a single type name or a list of names (OAS 3.1).
///
/// `nullable: true` on the same node also admits `null` (OAS 3.0).
pub struct Type;

impl KeywordValidator for Type {
    fn validate(
        &self,
        cx: &KeywordContext<'_>,
        data: &Value,
        argument: &Value,
    ) -> Result<(), FailureCause> {
        let names: Vec<&str> = match argument {
            Value::String(name) => vec![name.as_str()],
            Value::Array(list) if !list.is_empty() => list
                .iter()
                .map(Value::as_str)
                .collect::<Option<Vec<_>>>()
                .ok_or(FailureCause::InvalidArgument {
                    expected: "a type name or a list of type names",
                })?,
            _ => {
                return Err(FailureCause::InvalidArgument {
                    expected: "a type name or a list of type names",
                })
            }
        };

        if data.is_null() && cx.schema().is_nullable() {
            return Ok(());
        }

        for name in &names {
            if !is_known_type(name) {
                return Err(FailureCause::InvalidArgument {
                    expected: "one of object, array, string, number, integer, boolean, null",
                });
            }
            if matches_type(data, name) {
                return Ok(());
            }
        }

        Err(FailureCause::constraint(format!(
            "Value must be of type {}, got {}",
            names.join(" or "),
            type_of(data)
        )))
    }
}

/// `enum`: the value equals one member of the list.
pub struct Enum;

impl KeywordValidator for Enum {
    fn validate(
        &self,
        _cx: &KeywordContext<'_>,
        data: &Value,
        argument: &Value,
    ) -> Result<(), FailureCause> {
        let members = match argument {
            Value::Array(list) if !list.is_empty() => list,
            _ => {
                return Err(FailureCause::InvalidArgument {
                    expected: "a non-empty array",
                })
            }
        };

        if members.iter().any(|member| values_equal(member, data)) {
            return Ok(());
        }
        Err(FailureCause::constraint(format!(
            "Value {} must be one of {}",
            data, argument
        )))
    }
}

/// `const`: the value equals the argument.
pub struct Const;

impl KeywordValidator for Const {
    fn validate(
        &self,
        _cx: &KeywordContext<'_>,
        data: &Value,
        argument: &Value,
    ) -> Result<(), FailureCause> {
        if values_equal(argument, data) {
            Ok(())
        } else {
            Err(FailureCause::constraint(format!(
                "Value {} must be equal to {}",
                data, argument
            )))
        }
    }
}

fn is_known_type(name: &str) -> bool {
    matches!(
        name,
        "object" | "array" | "string" | "number" | "integer" | "boolean" | "null"
    )
}

/// Whether `data` is an instance of the JSON Schema type `name`.
pub(crate) fn matches_type(data: &Value, name: &str) -> bool {
    match name {
        "object" => data.is_object(),
        "array" => data.is_array(),
        "string" => data.is_string(),
        "number" => data.is_number(),
        "integer" => is_integer(data),
        "boolean" => data.is_boolean(),
        "null" => data.is_null(),
        _ => false,
    }
}

fn is_integer(data: &Value) -> bool {
    match data {
        Value::Number(n) => {
            n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
        }
        _ => false,
    }
}

/// The JSON Schema type name of `data`.
pub(crate) fn type_of(data: &Value) -> &'static str {
    match data {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) if is_integer(data) => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
