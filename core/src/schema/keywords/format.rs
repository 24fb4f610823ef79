//! `format`.
//!
//! Formats only constrain values of the type they describe: `date` says
//! nothing about a number, `int32` nothing about a string. Unknown formats
//! are accepted.

use crate::schema::failure::FailureCause;
use crate::schema::registry::{KeywordContext, KeywordValidator};
use chrono::{DateTime, NaiveDate};
use regex::Regex;
use serde_json::Value;
use std::net::{Ipv4Addr, Ipv6Addr};
use url::Url;
use uuid::Uuid;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
const HOSTNAME_PATTERN: &str =
    r"^(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$";
const BYTE_PATTERN: &str = r"^(?:[A-Za-z0-9+/]{4})*(?:[A-Za-z0-9+/]{2}==|[A-Za-z0-9+/]{3}=)?$";

/// `format`.
pub struct Format;

impl KeywordValidator for Format {
    fn validate(
        &self,
        _cx: &KeywordContext<'_>,
        data: &Value,
        argument: &Value,
    ) -> Result<(), FailureCause> {
        let format = argument.as_str().ok_or(FailureCause::InvalidArgument {
            expected: "a format name",
        })?;

        let valid = match data {
            Value::String(text) => check_string(format, text)?,
            Value::Number(_) => check_number(format, data),
            _ => true,
        };

        if valid {
            Ok(())
        } else {
            Err(FailureCause::constraint(format!(
                "Value {} does not match format '{}'",
                data, format
            )))
        }
    }
}

fn check_string(format: &str, text: &str) -> Result<bool, FailureCause> {
    let valid = match format {
        "date" => NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok(),
        "date-time" => DateTime::parse_from_rfc3339(text).is_ok(),
        "time" => DateTime::parse_from_rfc3339(&format!("1970-01-01T{}", text)).is_ok(),
        "email" => matches_pattern(EMAIL_PATTERN, text)?,
        "hostname" => text.len() <= 253 && matches_pattern(HOSTNAME_PATTERN, text)?,
        "byte" => matches_pattern(BYTE_PATTERN, text)?,
        "uuid" => text.len() == 36 && Uuid::parse_str(text).is_ok(),
        "ipv4" => text.parse::<Ipv4Addr>().is_ok(),
        "ipv6" => text.parse::<Ipv6Addr>().is_ok(),
        "uri" => Url::parse(text).is_ok(),
        _ => true,
    };
    Ok(valid)
}

fn check_number(format: &str, data: &Value) -> bool {
    match format {
        "int32" => whole_number(data)
            .is_some_and(|n| n >= f64::from(i32::MIN) && n <= f64::from(i32::MAX)),
        "int64" => {
            data.is_i64()
                || whole_number(data).is_some_and(|n| n >= i64::MIN as f64 && n < i64::MAX as f64)
        }
        "float" => data
            .as_f64()
            .is_some_and(|f| f.is_finite() && f.abs() <= f64::from(f32::MAX)),
        "double" => data.as_f64().is_some_and(f64::is_finite),
        _ => true,
    }
}

/// Integral values, including floats such as `12.0`.
fn whole_number(data: &Value) -> Option<f64> {
    data.as_f64().filter(|n| n.fract() == 0.0)
}

fn matches_pattern(pattern: &str, text: &str) -> Result<bool, FailureCause> {
    let regex = Regex::new(pattern).map_err(|source| FailureCause::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })?;
    Ok(regex.is_match(text))
}

#[cfg(test)]
mod tests {
    use crate::schema::{KeywordFailure, KeywordRegistry, Schema, SchemaValidator, ValidationContext};
    use serde_json::{json, Value};

    fn check(format: &str, data: Value) -> Result<(), KeywordFailure> {
        let registry = KeywordRegistry::default();
        let schema = Schema::from_value(&json!({ "format": format })).unwrap();
        SchemaValidator::new(&registry).validate(&data, &schema, ValidationContext::AsRequest)
    }

    #[test]
    fn test_dates() {
        assert!(check("date", json!("2024-02-29")).is_ok());
        assert!(check("date", json!("2023-02-29")).is_err());
        assert!(check("date-time", json!("2024-01-01T10:00:00Z")).is_ok());
        assert!(check("date-time", json!("2024-01-01 10:00")).is_err());
        assert!(check("time", json!("10:00:00+02:00")).is_ok());
    }

    #[test]
    fn test_network_formats() {
        assert!(check("ipv4", json!("10.0.0.1")).is_ok());
        assert!(check("ipv4", json!("10.0.0.256")).is_err());
        assert!(check("ipv6", json!("::1")).is_ok());
        assert!(check("uri", json!("https://example.com/a")).is_ok());
        assert!(check("uri", json!("not a uri")).is_err());
        assert!(check("hostname", json!("api.example.com")).is_ok());
        assert!(check("hostname", json!("-bad-.com")).is_err());
    }

    #[test]
    fn test_identifiers() {
        assert!(check("uuid", json!("67e55044-10b1-426f-9247-bb680e5fe0c8")).is_ok());
        assert!(check("uuid", json!("67e5504410b1426f9247bb680e5fe0c8")).is_err());
        assert!(check("email", json!("dev@example.com")).is_ok());
        assert!(check("email", json!("dev.example.com")).is_err());
        assert!(check("byte", json!("aGVsbG8=")).is_ok());
        assert!(check("byte", json!("aGVsbG8")).is_err());
    }

    #[test]
    fn test_numeric_formats() {
        assert!(check("int32", json!(2147483647)).is_ok());
        assert!(check("int32", json!(2147483648i64)).is_err());
        assert!(check("int64", json!(1.5)).is_err());
        assert!(check("double", json!(1.5)).is_ok());
    }

    #[test]
    fn test_integer_formats_accept_integral_floats() {
        assert!(check("int32", json!(12.0)).is_ok());
        assert!(check("int64", json!(12.0)).is_ok());
        assert!(check("int32", json!(3e9)).is_err());
        assert!(check("int64", json!(1e19)).is_err());
        assert!(check("int64", json!(u64::MAX)).is_err());

        let registry = KeywordRegistry::default();
        let schema = Schema::from_value(&json!({"type": "integer", "format": "int32"})).unwrap();
        assert!(SchemaValidator::new(&registry)
            .validate(&json!(12.0), &schema, ValidationContext::AsResponse)
            .is_ok());
    }

    #[test]
    fn test_format_ignores_other_types_and_unknown_names() {
        assert!(check("date", json!(20240101)).is_ok());
        assert!(check("int32", json!("abc")).is_ok());
        assert!(check("x-custom", json!("anything")).is_ok());
    }
}
