//! Request validators.

use crate::address::OperationAddress;
use crate::error::{MessageAddress, ValidationError};
use crate::http::RequestMessage;
use crate::routing::path_finder::match_with_base;
use crate::routing::{PathFinder, RouteMatch};
use crate::validation::body::validate_request_body;
use crate::validation::builder::Contract;
use crate::validation::parameters::{effective_parameters, validate_parameters};
use crate::validation::security::check_security;
use indexmap::IndexMap;
use tracing::debug;

/// Validates a request against an operation that is already known.
#[derive(Debug, Clone)]
pub struct RoutedRequestValidator {
    contract: Contract,
}

impl RoutedRequestValidator {
    pub(crate) fn new(contract: Contract) -> Self {
        Self { contract }
    }

    /// Validates `request` against the operation at `addr`.
    ///
    /// Path parameters are captured by matching the request path against the
    /// operation's template.
    pub fn validate<R>(&self, addr: &OperationAddress, request: &R) -> Result<(), ValidationError>
    where
        R: RequestMessage + ?Sized,
    {
        let document = &self.contract.document;
        document.find_operation(addr)?;

        let params = document
            .template(addr.path())
            .and_then(|template| match_with_base(document, template, request.path()))
            .unwrap_or_default();
        validate_operation(&self.contract, addr, &params, request)
    }
}

/// Finds the operation a request addresses and validates the request against it.
#[derive(Debug, Clone)]
pub struct ServerRequestValidator {
    contract: Contract,
}

impl ServerRequestValidator {
    pub(crate) fn new(contract: Contract) -> Self {
        Self { contract }
    }

    /// Validates `request` and returns the operation it matched.
    ///
    /// With several structural candidates, exactly one of them must accept the
    /// request; otherwise `MultipleOperationsMismatchForRequest` lists all of them.
    pub fn validate<R>(&self, request: &R) -> Result<OperationAddress, ValidationError>
    where
        R: RequestMessage + ?Sized,
    {
        let mut candidates =
            PathFinder::new(&self.contract.document, request.path(), request.method())
                .search_matches()?;

        if candidates.len() == 1 {
            let RouteMatch { addr, params } = candidates.remove(0);
            validate_operation(&self.contract, &addr, &params, request)?;
            return Ok(addr);
        }

        let accepted: Vec<&OperationAddress> = candidates
            .iter()
            .filter(|found| {
                let outcome = validate_operation(&self.contract, &found.addr, &found.params, request);
                if let Err(err) = &outcome {
                    debug!(candidate = %found.addr, error = %err, "Candidate rejected the request");
                }
                outcome.is_ok()
            })
            .map(|found| &found.addr)
            .collect();

        if let [addr] = accepted.as_slice() {
            return Ok((*addr).clone());
        }

        debug!(
            candidates = candidates.len(),
            accepted = accepted.len(),
            "Request is ambiguous"
        );
        Err(ValidationError::MultipleOperationsMismatchForRequest {
            matched: candidates.into_iter().map(|found| found.addr).collect(),
        })
    }
}

/// Parameters, body, then security.
fn validate_operation<R>(
    contract: &Contract,
    addr: &OperationAddress,
    path_params: &IndexMap<String, String>,
    request: &R,
) -> Result<(), ValidationError>
where
    R: RequestMessage + ?Sized,
{
    let document = &contract.document;
    let item = document.find_path(addr.path_address())?;
    let operation = document.find_operation(addr)?;

    let parameters = effective_parameters(item, operation);
    validate_parameters(contract, addr, &parameters, path_params, request)?;

    validate_request_body(
        contract,
        &MessageAddress::Request(addr.clone()),
        operation.request_body.as_ref(),
        request.content_type().as_deref(),
        request.body(),
    )?;

    check_security(document, addr, operation, request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::ServerRequest;
    use crate::validation::ValidatorBuilder;
    use serde_json::json;

    const DOC: &str = r#"
openapi: 3.0.0
paths:
  /pets/{id}:
    parameters:
      - name: id
        in: path
        schema:
          type: integer
    put:
      parameters:
        - name: dryRun
          in: query
          schema:
            type: boolean
        - name: X-Request-Id
          in: header
          required: true
          schema:
            type: string
            minLength: 3
      requestBody:
        required: true
        content:
          application/json:
            schema:
              type: object
              required: [name]
              properties:
                name:
                  type: string
      responses: {}
"#;

    fn request() -> ServerRequest {
        ServerRequest::new("PUT", "/pets/7?dryRun=true")
            .with_header("X-Request-Id", "abc")
            .with_header("Content-Type", "application/json")
            .with_body(json!({"name": "Rex"}))
    }

    #[test]
    fn test_valid_request() {
        let builder = ValidatorBuilder::from_yaml(DOC).unwrap();
        let addr = builder.server_request_validator().validate(&request()).unwrap();
        assert_eq!(addr, OperationAddress::new("/pets/{id}", "PUT"));
        assert!(builder
            .routed_request_validator()
            .validate(&addr, &request())
            .is_ok());
    }

    #[test]
    fn test_path_parameter_is_checked_first() {
        let builder = ValidatorBuilder::from_yaml(DOC).unwrap();
        let bad = ServerRequest::new("PUT", "/pets/seven?dryRun=maybe");
        let err = builder.server_request_validator().validate(&bad).unwrap_err();
        assert!(err.to_string().contains("path parameter 'id'"));
    }

    #[test]
    fn test_missing_header_and_body() {
        let builder = ValidatorBuilder::from_yaml(DOC).unwrap();
        let validator = builder.server_request_validator();

        let no_header = ServerRequest::new("PUT", "/pets/7").with_body(json!({"name": "Rex"}));
        let err = validator.validate(&no_header).unwrap_err();
        assert_eq!(err.keyword_failure().map(|f| f.keyword()), Some("required"));
        assert!(err.to_string().contains("header parameter 'X-Request-Id'"));

        let no_body = ServerRequest::new("PUT", "/pets/7").with_header("x-request-id", "abcd");
        let err = validator.validate(&no_body).unwrap_err();
        assert_eq!(err.keyword_failure().map(|f| f.keyword()), Some("required"));
        assert!(err.to_string().contains("body"));
    }

    #[test]
    fn test_routed_lookup_errors() {
        let builder = ValidatorBuilder::from_yaml(DOC).unwrap();
        let validator = builder.routed_request_validator();
        assert!(matches!(
            validator.validate(&OperationAddress::new("/pets/{id}", "GET"), &request()),
            Err(ValidationError::NoOperation { .. })
        ));
        assert!(matches!(
            validator.validate(&OperationAddress::new("/owners", "GET"), &request()),
            Err(ValidationError::NoPath { .. })
        ));
    }
}
