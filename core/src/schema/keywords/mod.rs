#![deny(missing_docs)]

//! # Built-in Keywords
//!
//! One unit struct per keyword. Each asserts its preconditions on the value
//! and on its own argument before checking the constraint; a violated
//! precondition is a failure, never a silent pass.

pub mod array;
pub mod composition;
pub mod format;
pub mod numeric;
pub mod object;
pub mod string;
pub mod types;

use crate::schema::failure::FailureCause;
use crate::schema::registry::KeywordRegistry;
use serde_json::Value;

/// Registers the built-in keywords in evaluation order.
///
/// `type` runs first so that shape errors are reported before any
/// keyword-specific precondition.
pub(crate) fn register_builtin(registry: &mut KeywordRegistry) {
    registry.register("type", types::Type);
    registry.register("enum", types::Enum);
    registry.register("const", types::Const);
    registry.register("format", format::Format);
    registry.register("maximum", numeric::Maximum);
    registry.register("exclusiveMaximum", numeric::ExclusiveMaximum);
    registry.register("minimum", numeric::Minimum);
    registry.register("exclusiveMinimum", numeric::ExclusiveMinimum);
    registry.register("multipleOf", numeric::MultipleOf);
    registry.register("maxLength", string::MaxLength);
    registry.register("minLength", string::MinLength);
    registry.register("pattern", string::Pattern);
    registry.register("maxItems", array::MaxItems);
    registry.register("minItems", array::MinItems);
    registry.register("uniqueItems", array::UniqueItems);
    registry.register("items", array::Items);
    registry.register("maxProperties", object::MaxProperties);
    registry.register("minProperties", object::MinProperties);
    registry.register("required", object::Required);
    registry.register("properties", object::Properties);
    registry.register("additionalProperties", object::AdditionalProperties);
    registry.register("allOf", composition::AllOf);
    registry.register("anyOf", composition::AnyOf);
    registry.register("oneOf", composition::OneOf);
    registry.register("not", composition::Not);
}

/// Equality that treats `1` and `1.0` as the same number.
pub(crate) fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}

/// The numeric value of `data`, or an `InvalidData` cause.
pub(crate) fn numeric_data(data: &Value) -> Result<f64, FailureCause> {
    data.as_f64()
        .ok_or(FailureCause::InvalidData { expected: "numeric" })
}

/// The numeric value of a keyword argument, or an `InvalidArgument` cause.
pub(crate) fn numeric_argument(argument: &Value) -> Result<f64, FailureCause> {
    argument
        .as_f64()
        .ok_or(FailureCause::InvalidArgument { expected: "numeric" })
}

/// A keyword argument that must be a non-negative integer (`maxLength`, `minItems`, ...).
pub(crate) fn count_argument(argument: &Value) -> Result<usize, FailureCause> {
    let invalid = FailureCause::InvalidArgument {
        expected: "a non-negative integer",
    };
    if let Some(n) = argument.as_u64() {
        return usize::try_from(n).map_err(|_| invalid);
    }
    // `5.0` is an integer in JSON Schema terms.
    match argument.as_f64() {
        Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= usize::MAX as f64 => Ok(f as usize),
        _ => Err(invalid),
    }
}

/// A keyword argument that must be a boolean (`uniqueItems`, `exclusiveMaximum`).
pub(crate) fn bool_argument(argument: &Value) -> Result<bool, FailureCause> {
    argument
        .as_bool()
        .ok_or(FailureCause::InvalidArgument { expected: "a boolean" })
}

/// Renders a number without a trailing `.0` when it is integral.
pub(crate) fn fmt_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
