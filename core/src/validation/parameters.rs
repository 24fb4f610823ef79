//! Parameter collection, coercion and validation.

use crate::address::OperationAddress;
use crate::error::{MessageAddress, MessagePart, ValidationError};
use crate::http::RequestMessage;
use crate::oas::{Operation, Parameter, ParameterIn, PathItem};
use crate::schema::{FailureCause, KeywordFailure, Schema, ValidationContext};
use crate::validation::builder::Contract;
use indexmap::IndexMap;
use serde_json::{Number, Value};

const LOCATIONS: [ParameterIn; 4] = [
    ParameterIn::Path,
    ParameterIn::Query,
    ParameterIn::Header,
    ParameterIn::Cookie,
];

/// Path-item parameters overridden by operation parameters with the same name and location.
pub(crate) fn effective_parameters<'a>(
    item: &'a PathItem,
    operation: &'a Operation,
) -> Vec<&'a Parameter> {
    let mut merged: IndexMap<(ParameterIn, &str), &Parameter> = IndexMap::new();
    for param in item.parameters.iter().chain(&operation.parameters) {
        merged.insert((param.location, param.name.as_str()), param);
    }
    merged.into_values().collect()
}

/// Validates path, query, header and cookie parameters, in that order.
pub(crate) fn validate_parameters<R>(
    contract: &Contract,
    addr: &OperationAddress,
    parameters: &[&Parameter],
    path_params: &IndexMap<String, String>,
    request: &R,
) -> Result<(), ValidationError>
where
    R: RequestMessage + ?Sized,
{
    let query = request.query_pairs();
    let cookies = request.cookies();

    for location in LOCATIONS {
        for param in parameters.iter().filter(|p| p.location == location) {
            let raw: Vec<&str> = match location {
                ParameterIn::Path => path_params
                    .get(&param.name)
                    .map(String::as_str)
                    .into_iter()
                    .collect(),
                ParameterIn::Query => query
                    .iter()
                    .filter(|(key, _)| *key == param.name)
                    .map(|(_, value)| value.as_str())
                    .collect(),
                ParameterIn::Header => request.header_values(&param.name),
                ParameterIn::Cookie => cookies
                    .get(&param.name)
                    .map(String::as_str)
                    .into_iter()
                    .collect(),
            };

            let part = || MessagePart::Parameter {
                location,
                name: param.name.clone(),
            };
            let fail = |failure| ValidationError::ValidationKeywordFailed {
                addr: MessageAddress::Request(addr.clone()),
                part: part(),
                failure,
            };

            if raw.is_empty() {
                if param.is_required() {
                    return Err(fail(KeywordFailure::new(
                        "required",
                        &Value::Null,
                        FailureCause::constraint(format!(
                            "Required {} parameter '{}' must be present",
                            location, param.name
                        )),
                    )));
                }
                continue;
            }

            let Some(schema) = param.value_schema() else {
                continue;
            };
            let value = if param.content.is_some() {
                decode_json(raw[0])
            } else {
                coerce(&raw, schema, param.array_delimiter())
            };
            contract
                .check(&value, schema, ValidationContext::AsRequest)
                .map_err(fail)?;
        }
    }
    Ok(())
}

/// Turns raw string values into the JSON value the schema describes.
///
/// Array items come from repeated values, or from splitting a single value
/// on `delimiter`. Values that do not parse stay strings so that `type`
/// reports them.
pub(crate) fn coerce(raw: &[&str], schema: &Schema, delimiter: Option<char>) -> Value {
    match primary_type(schema) {
        Some("array") => {
            let items: Vec<&str> = match (raw, delimiter) {
                ([value], Some(delimiter)) => value.split(delimiter).collect(),
                _ => raw.to_vec(),
            };
            let item_type = schema.subschema("items").and_then(primary_type);
            Value::Array(
                items
                    .into_iter()
                    .map(|item| coerce_scalar(item, item_type))
                    .collect(),
            )
        }
        Some("object") => raw.first().map(|value| decode_json(value)).unwrap_or(Value::Null),
        ty => raw
            .first()
            .map(|value| coerce_scalar(value, ty))
            .unwrap_or(Value::Null),
    }
}

fn primary_type(schema: &Schema) -> Option<&str> {
    schema.types().into_iter().find(|ty| *ty != "null")
}

fn coerce_scalar(raw: &str, ty: Option<&str>) -> Value {
    let parsed = match ty {
        Some("integer") | Some("number") => raw
            .parse::<i64>()
            .ok()
            .map(Value::from)
            .or_else(|| float(raw)),
        Some("boolean") => match raw {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            _ => None,
        },
        _ => None,
    };
    parsed.unwrap_or_else(|| Value::String(raw.to_string()))
}

fn float(raw: &str) -> Option<Value> {
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}

fn decode_json(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
