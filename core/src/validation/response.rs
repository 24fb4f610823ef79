//! Response validator.

use crate::address::{OperationAddress, ResponseAddress};
use crate::error::{MessageAddress, MessagePart, ValidationError};
use crate::http::ResponseMessage;
use crate::schema::{FailureCause, KeywordFailure, ValidationContext};
use crate::validation::body::validate_body;
use crate::validation::builder::Contract;
use crate::validation::parameters::coerce;
use serde_json::Value;

/// Validates responses of known operations.
#[derive(Debug, Clone)]
pub struct ResponseValidator {
    contract: Contract,
}

impl ResponseValidator {
    pub(crate) fn new(contract: Contract) -> Self {
        Self { contract }
    }

    /// Validates `response` as a response of the operation at `addr`.
    ///
    /// The response object is picked by status code; declared headers are
    /// checked before the body. `readOnly` properties are required here,
    /// `writeOnly` ones are not.
    pub fn validate<R>(&self, addr: &OperationAddress, response: &R) -> Result<(), ValidationError>
    where
        R: ResponseMessage + ?Sized,
    {
        let response_addr = ResponseAddress::new(addr.clone(), response.status().to_string());
        let declared = self.contract.document.find_response(&response_addr)?;
        let message = MessageAddress::Response(response_addr);

        for (name, header) in &declared.headers {
            // Content-Type is described by `content`.
            if name.eq_ignore_ascii_case("content-type") {
                continue;
            }
            let fail = |failure| ValidationError::ValidationKeywordFailed {
                addr: message.clone(),
                part: MessagePart::Header(name.clone()),
                failure,
            };

            match response.header(name) {
                None if header.required => {
                    return Err(fail(KeywordFailure::new(
                        "required",
                        &Value::Null,
                        FailureCause::constraint(format!(
                            "Required header '{}' must be present",
                            name
                        )),
                    )));
                }
                None => {}
                Some(raw) => {
                    if let Some(schema) = &header.schema {
                        self.contract
                            .check(
                                &coerce(&[raw], schema, Some(',')),
                                schema,
                                ValidationContext::AsResponse,
                            )
                            .map_err(fail)?;
                    }
                }
            }
        }

        if let Some(body) = response.body() {
            validate_body(
                &self.contract,
                &declared.content,
                response.content_type().as_deref(),
                body,
                ValidationContext::AsResponse,
            )
            .map_err(|failure| ValidationError::ValidationKeywordFailed {
                addr: message.clone(),
                part: MessagePart::Body,
                failure,
            })?;
        }
        Ok(())
    }
}
