//! `maximum`, `minimum`, their exclusive forms, and `multipleOf`.
//!
//! In OAS 3.0 `exclusiveMaximum` / `exclusiveMinimum` are booleans that modify
//! the sibling bound. In OAS 3.1 they are standalone numeric bounds. Both
//! forms are accepted.

use crate::schema::failure::FailureCause;
use crate::schema::keywords::{fmt_number, numeric_argument, numeric_data};
use crate::schema::registry::{KeywordContext, KeywordValidator};
use serde_json::Value;

/// Relative tolerance used by `multipleOf`.
const MULTIPLE_OF_TOLERANCE: f64 = 1e-9;

/// `maximum`, exclusive when the sibling `exclusiveMaximum` is `true`.
pub struct Maximum;

impl KeywordValidator for Maximum {
    fn validate(
        &self,
        cx: &KeywordContext<'_>,
        data: &Value,
        argument: &Value,
    ) -> Result<(), FailureCause> {
        let value = numeric_data(data)?;
        let maximum = numeric_argument(argument)?;
        let exclusive = exclusive_flag(cx, "exclusiveMaximum")?;

        if exclusive && value >= maximum {
            return Err(FailureCause::constraint(format!(
                "Value {} must be less than {}",
                fmt_number(value),
                fmt_number(maximum)
            )));
        }
        if !exclusive && value > maximum {
            return Err(FailureCause::constraint(format!(
                "Value {} must be less or equal to {}",
                fmt_number(value),
                fmt_number(maximum)
            )));
        }
        Ok(())
    }
}

/// `minimum`, exclusive when the sibling `exclusiveMinimum` is `true`.
pub struct Minimum;

impl KeywordValidator for Minimum {
    fn validate(
        &self,
        cx: &KeywordContext<'_>,
        data: &Value,
        argument: &Value,
    ) -> Result<(), FailureCause> {
        let value = numeric_data(data)?;
        let minimum = numeric_argument(argument)?;
        let exclusive = exclusive_flag(cx, "exclusiveMinimum")?;

        if exclusive && value <= minimum {
            return Err(FailureCause::constraint(format!(
                "Value {} must be greater than {}",
                fmt_number(value),
                fmt_number(minimum)
            )));
        }
        if !exclusive && value < minimum {
            return Err(FailureCause::constraint(format!(
                "Value {} must be greater or equal to {}",
                fmt_number(value),
                fmt_number(minimum)
            )));
        }
        Ok(())
    }
}

/// Numeric `exclusiveMaximum` (OAS 3.1). The boolean form is handled by [`Maximum`].
pub struct ExclusiveMaximum;

impl KeywordValidator for ExclusiveMaximum {
    fn validate(
        &self,
        _cx: &KeywordContext<'_>,
        data: &Value,
        argument: &Value,
    ) -> Result<(), FailureCause> {
        if argument.is_boolean() {
            return Ok(());
        }
        let value = numeric_data(data)?;
        let bound = numeric_argument(argument)?;
        if value >= bound {
            return Err(FailureCause::constraint(format!(
                "Value {} must be less than {}",
                fmt_number(value),
                fmt_number(bound)
            )));
        }
        Ok(())
    }
}

/// Numeric `exclusiveMinimum` (OAS 3.1). The boolean form is handled by [`Minimum`].
pub struct ExclusiveMinimum;

impl KeywordValidator for ExclusiveMinimum {
    fn validate(
        &self,
        _cx: &KeywordContext<'_>,
        data: &Value,
        argument: &Value,
    ) -> Result<(), FailureCause> {
        if argument.is_boolean() {
            return Ok(());
        }
        let value = numeric_data(data)?;
        let bound = numeric_argument(argument)?;
        if value <= bound {
            return Err(FailureCause::constraint(format!(
                "Value {} must be greater than {}",
                fmt_number(value),
                fmt_number(bound)
            )));
        }
        Ok(())
    }
}

/// `multipleOf`: the quotient must be integral within a relative tolerance.
pub struct MultipleOf;

impl KeywordValidator for MultipleOf {
    fn validate(
        &self,
        _cx: &KeywordContext<'_>,
        data: &Value,
        argument: &Value,
    ) -> Result<(), FailureCause> {
        let value = numeric_data(data)?;
        let divisor = numeric_argument(argument)?;
        if divisor <= 0.0 {
            return Err(FailureCause::InvalidArgument {
                expected: "a number strictly greater than 0",
            });
        }

        let quotient = value / divisor;
        if (quotient - quotient.round()).abs() > MULTIPLE_OF_TOLERANCE * quotient.abs().max(1.0) {
            return Err(FailureCause::constraint(format!(
                "Value {} must be a multiple of {}",
                fmt_number(value),
                fmt_number(divisor)
            )));
        }
        Ok(())
    }
}

/// Reads the boolean form of `exclusiveMaximum` / `exclusiveMinimum` from the sibling.
///
/// A numeric sibling belongs to the standalone keyword and does not make the
/// bound exclusive.
fn exclusive_flag(cx: &KeywordContext<'_>, sibling: &str) -> Result<bool, FailureCause> {
    match cx.schema().keyword(sibling) {
        None | Some(Value::Number(_)) => Ok(false),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(_) => Err(FailureCause::InvalidArgument {
            expected: "a boolean or a number for the exclusive flag",
        }),
    }
}
