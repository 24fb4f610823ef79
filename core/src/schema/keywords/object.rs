//! Object keywords: `required`, `properties`, `additionalProperties`,
//! `maxProperties` and `minProperties`.

use crate::schema::failure::FailureCause;
use crate::schema::keywords::count_argument;
use crate::schema::model::ValidationContext;
use crate::schema::registry::{KeywordContext, KeywordValidator};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// `required`.
///
/// The argument must be a non-empty list of unique strings. A missing
/// property is exempted when its schema is `readOnly` and the value is a
/// request, or `writeOnly` and the value is a response.
pub struct Required;

impl KeywordValidator for Required {
    fn validate(
        &self,
        cx: &KeywordContext<'_>,
        data: &Value,
        argument: &Value,
    ) -> Result<(), FailureCause> {
        let object = object_data(data)?;
        let required = required_names(argument)?;

        for name in required {
            if object.contains_key(name) {
                continue;
            }
            if is_exempted(cx, name) {
                continue;
            }
            return Err(FailureCause::constraint(format!(
                "Required property '{}' must be present in the object",
                name
            )));
        }
        Ok(())
    }
}

fn required_names(argument: &Value) -> Result<Vec<&str>, FailureCause> {
    let invalid = || FailureCause::InvalidArgument {
        expected: "a non-empty array of unique strings",
    };

    let list = argument.as_array().filter(|l| !l.is_empty()).ok_or_else(invalid)?;
    let names = list
        .iter()
        .map(Value::as_str)
        .collect::<Option<Vec<_>>>()
        .ok_or_else(invalid)?;

    let unique: HashSet<&str> = names.iter().copied().collect();
    if unique.len() != names.len() {
        return Err(invalid());
    }
    Ok(names)
}

fn is_exempted(cx: &KeywordContext<'_>, name: &str) -> bool {
    let Some(property) = cx.schema().property(name) else {
        return false;
    };
    match cx.context() {
        ValidationContext::AsRequest => property.is_read_only(),
        ValidationContext::AsResponse => property.is_write_only(),
    }
}

/// `properties`: each declared property present in the value is validated
/// against its schema, in declaration order. The first failure wins.
pub struct Properties;

impl KeywordValidator for Properties {
    fn validate(
        &self,
        cx: &KeywordContext<'_>,
        data: &Value,
        _argument: &Value,
    ) -> Result<(), FailureCause> {
        let object = object_data(data)?;

        for (name, schema) in cx.schema().properties() {
            let Some(value) = object.get(name) else {
                continue;
            };
            cx.descend(value, schema)
                .map_err(|failure| FailureCause::nested(name.clone(), failure))?;
        }
        Ok(())
    }
}

/// `additionalProperties`: properties not declared in `properties` are
/// rejected when the argument is `false`, validated when it is a schema.
pub struct AdditionalProperties;

impl KeywordValidator for AdditionalProperties {
    fn validate(
        &self,
        cx: &KeywordContext<'_>,
        data: &Value,
        argument: &Value,
    ) -> Result<(), FailureCause> {
        let object = object_data(data)?;
        let declared = cx.schema().properties();
        let mut undeclared = object.iter().filter(|(name, _)| !declared.contains_key(*name));

        match argument {
            Value::Bool(true) => Ok(()),
            Value::Bool(false) => match undeclared.next() {
                Some((name, _)) => Err(FailureCause::constraint(format!(
                    "Property '{}' is not allowed",
                    name
                ))),
                None => Ok(()),
            },
            Value::Object(_) => {
                let schema = cx
                    .schema()
                    .subschema("additionalProperties")
                    .ok_or(FailureCause::InvalidArgument {
                        expected: "a boolean or a schema",
                    })?;
                for (name, value) in undeclared {
                    cx.descend(value, schema)
                        .map_err(|failure| FailureCause::nested(name.clone(), failure))?;
                }
                Ok(())
            }
            _ => Err(FailureCause::InvalidArgument {
                expected: "a boolean or a schema",
            }),
        }
    }
}

/// `maxProperties`.
pub struct MaxProperties;

impl KeywordValidator for MaxProperties {
    fn validate(
        &self,
        _cx: &KeywordContext<'_>,
        data: &Value,
        argument: &Value,
    ) -> Result<(), FailureCause> {
        let object = object_data(data)?;
        let max = count_argument(argument)?;
        if object.len() > max {
            return Err(FailureCause::constraint(format!(
                "Object with {} properties must have at most {} properties",
                object.len(),
                max
            )));
        }
        Ok(())
    }
}

/// `minProperties`.
pub struct MinProperties;

impl KeywordValidator for MinProperties {
    fn validate(
        &self,
        _cx: &KeywordContext<'_>,
        data: &Value,
        argument: &Value,
    ) -> Result<(), FailureCause> {
        let object = object_data(data)?;
        let min = count_argument(argument)?;
        if object.len() < min {
            return Err(FailureCause::constraint(format!(
                "Object with {} properties must have at least {} properties",
                object.len(),
                min
            )));
        }
        Ok(())
    }
}

fn object_data(data: &Value) -> Result<&Map<String, Value>, FailureCause> {
    data.as_object()
        .ok_or(FailureCause::InvalidData { expected: "an object" })
}
