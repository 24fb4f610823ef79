//! `maxLength`, `minLength` and `pattern`.
//!
//! Lengths are counted in Unicode code points, not bytes.

use crate::schema::failure::FailureCause;
use crate::schema::keywords::count_argument;
use crate::schema::registry::{KeywordContext, KeywordValidator};
use regex::Regex;
use serde_json::Value;

/// `maxLength`.
pub struct MaxLength;

impl KeywordValidator for MaxLength {
    fn validate(
        &self,
        _cx: &KeywordContext<'_>,
        data: &Value,
        argument: &Value,
    ) -> Result<(), FailureCause> {
        let text = string_data(data)?;
        let max = count_argument(argument)?;
        let length = text.chars().count();
        if length > max {
            return Err(FailureCause::constraint(format!(
                "Length of '{}' must be shorter or equal to {}",
                text, max
            )));
        }
        Ok(())
    }
}

/// `minLength`.
pub struct MinLength;

impl KeywordValidator for MinLength {
    fn validate(
        &self,
        _cx: &KeywordContext<'_>,
        data: &Value,
        argument: &Value,
    ) -> Result<(), FailureCause> {
        let text = string_data(data)?;
        let min = count_argument(argument)?;
        let length = text.chars().count();
        if length < min {
            return Err(FailureCause::constraint(format!(
                "Length of '{}' must be longer or equal to {}",
                text, min
            )));
        }
        Ok(())
    }
}

/// `pattern`: unanchored regular expression search.
///
/// The expression is compiled on every call; nothing is cached between
/// validations.
pub struct Pattern;

impl KeywordValidator for Pattern {
    fn validate(
        &self,
        _cx: &KeywordContext<'_>,
        data: &Value,
        argument: &Value,
    ) -> Result<(), FailureCause> {
        let text = string_data(data)?;
        let pattern = argument.as_str().ok_or(FailureCause::InvalidArgument {
            expected: "a regular expression string",
        })?;
        let regex = Regex::new(pattern).map_err(|source| FailureCause::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        if !regex.is_match(text) {
            return Err(FailureCause::constraint(format!(
                "Value '{}' does not match pattern '{}'",
                text, pattern
            )));
        }
        Ok(())
    }
}

fn string_data(data: &Value) -> Result<&str, FailureCause> {
    data.as_str()
        .ok_or(FailureCause::InvalidData { expected: "a string" })
}
