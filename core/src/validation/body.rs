//! Body schema selection and validation.

use crate::error::{MessageAddress, MessagePart, ValidationError};
use crate::http::message::media_type_essence;
use crate::oas::{MediaType, RequestBody};
use crate::schema::{FailureCause, KeywordFailure, ValidationContext};
use crate::validation::builder::Contract;
use indexmap::IndexMap;
use serde_json::Value;

/// Picks the Media Type Object for a `Content-Type` essence.
///
/// Exact match, then `type/*`, then `*/*`, then the first declared entry.
pub(crate) fn select_media_type<'c>(
    content: &'c IndexMap<String, MediaType>,
    content_type: Option<&str>,
) -> Option<&'c MediaType> {
    let declared = |key: &str| {
        content
            .iter()
            .find(|(range, _)| media_type_essence(range) == key)
            .map(|(_, media)| media)
    };

    content_type
        .and_then(|actual| {
            let wildcard = actual
                .split_once('/')
                .map(|(kind, _)| format!("{}/*", kind))
                .unwrap_or_default();
            declared(actual).or_else(|| declared(&wildcard))
        })
        .or_else(|| declared("*/*"))
        .or_else(|| content.values().next())
}

pub(crate) fn validate_request_body(
    contract: &Contract,
    addr: &MessageAddress,
    request_body: Option<&RequestBody>,
    content_type: Option<&str>,
    body: Option<&Value>,
) -> Result<(), ValidationError> {
    let Some(request_body) = request_body else {
        return Ok(());
    };
    let fail = |failure| ValidationError::ValidationKeywordFailed {
        addr: addr.clone(),
        part: MessagePart::Body,
        failure,
    };

    let Some(body) = body else {
        if request_body.required {
            return Err(fail(KeywordFailure::new(
                "required",
                &Value::Null,
                FailureCause::constraint("Required request body must be present"),
            )));
        }
        return Ok(());
    };

    validate_body(
        contract,
        &request_body.content,
        content_type,
        body,
        ValidationContext::AsRequest,
    )
    .map_err(fail)
}

pub(crate) fn validate_body(
    contract: &Contract,
    content: &IndexMap<String, MediaType>,
    content_type: Option<&str>,
    body: &Value,
    context: ValidationContext,
) -> Result<(), KeywordFailure> {
    match select_media_type(content, content_type).and_then(|media| media.schema.as_ref()) {
        Some(schema) => contract.check(body, schema, context),
        None => Ok(()),
    }
}
