//! Presence checks for security credentials. Credentials are never verified.

use crate::address::OperationAddress;
use crate::error::ValidationError;
use crate::http::RequestMessage;
use crate::oas::{ApiKeyIn, OpenApiDocument, Operation, SecurityRequirement, SecurityScheme};
use tracing::debug;

/// Passes when any effective requirement is satisfied.
///
/// Operation requirements replace the document ones. No requirement, or an
/// empty one, allows anonymous access.
pub(crate) fn check_security<R>(
    document: &OpenApiDocument,
    addr: &OperationAddress,
    operation: &Operation,
    request: &R,
) -> Result<(), ValidationError>
where
    R: RequestMessage + ?Sized,
{
    let requirements = operation
        .security
        .as_deref()
        .or_else(|| document.security())
        .unwrap_or_default();
    if requirements.is_empty() || requirements.iter().any(|req| req.is_empty()) {
        return Ok(());
    }

    let mut first_failure = None;
    for requirement in requirements {
        match check_requirement(document, addr, requirement, request) {
            Ok(()) => return Ok(()),
            Err(err) => {
                first_failure.get_or_insert(err);
            }
        }
    }

    debug!(%addr, "No security requirement is satisfied");
    match first_failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn check_requirement<R>(
    document: &OpenApiDocument,
    addr: &OperationAddress,
    requirement: &SecurityRequirement,
    request: &R,
) -> Result<(), ValidationError>
where
    R: RequestMessage + ?Sized,
{
    for name in requirement.keys() {
        let missing = || ValidationError::MissingSecurityCredentials {
            addr: addr.clone(),
            scheme: name.clone(),
        };

        match document.security_scheme(name) {
            Some(SecurityScheme::Http(_))
            | Some(SecurityScheme::OAuth2(_))
            | Some(SecurityScheme::OpenIdConnect(_)) => {
                if !present(request.header("authorization")) {
                    return Err(ValidationError::MalformattedRequestAuthorizationHeader {
                        addr: addr.clone(),
                    });
                }
            }
            Some(SecurityScheme::ApiKey(key)) => {
                let found = match key.location {
                    ApiKeyIn::Header => present(request.header(&key.name)),
                    ApiKeyIn::Query => request
                        .query_pairs()
                        .iter()
                        .any(|(k, v)| *k == key.name && !v.is_empty()),
                    ApiKeyIn::Cookie => request
                        .cookies()
                        .get(&key.name)
                        .is_some_and(|v| !v.is_empty()),
                };
                if !found {
                    return Err(missing());
                }
            }
            Some(SecurityScheme::MutualTls(_)) => {}
            None => return Err(missing()),
        }
    }
    Ok(())
}

fn present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::ServerRequest;

    const DOC: &str = r#"
openapi: 3.0.0
paths:
  /secure:
    get:
      responses: {}
  /either:
    get:
      security:
        - apiKey: []
        - bearer: []
      responses: {}
  /both:
    get:
      security:
        - apiKey: []
          bearer: []
      responses: {}
  /public:
    get:
      security: []
      responses: {}
  /optional:
    get:
      security:
        - {}
        - bearer: []
      responses: {}
  /unknown:
    get:
      security:
        - ghost: []
      responses: {}
  /cookie:
    get:
      security:
        - session: []
      responses: {}
components:
  securitySchemes:
    bearer:
      type: http
      scheme: bearer
    apiKey:
      type: apiKey
      name: X-API-Key
      in: header
    session:
      type: apiKey
      name: sid
      in: cookie
security:
  - bearer: []
"#;

    fn check(path: &str, request: ServerRequest) -> Result<(), ValidationError> {
        let doc = OpenApiDocument::from_yaml(DOC).unwrap();
        let addr = OperationAddress::new(path, "GET");
        let operation = doc.find_operation(&addr).unwrap();
        check_security(&doc, &addr, operation, &request)
    }

    fn get(path: &str) -> ServerRequest {
        ServerRequest::new("GET", path)
    }

    #[test]
    fn test_document_security_applies() {
        assert!(matches!(
            check("/secure", get("/secure")),
            Err(ValidationError::MalformattedRequestAuthorizationHeader { .. })
        ));
        assert!(check("/secure", get("/secure").with_header("Authorization", "Bearer t")).is_ok());
        assert!(check("/secure", get("/secure").with_header("Authorization", "  ")).is_err());
    }

    #[test]
    fn test_any_requirement_suffices() {
        assert!(check("/either", get("/either").with_header("x-api-key", "k")).is_ok());
        assert!(check("/either", get("/either").with_header("Authorization", "Bearer t")).is_ok());
        match check("/either", get("/either")) {
            Err(ValidationError::MissingSecurityCredentials { scheme, .. }) => {
                assert_eq!(scheme, "apiKey")
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_all_schemes_of_a_requirement_are_needed() {
        let partial = get("/both").with_header("X-API-Key", "k");
        assert!(matches!(
            check("/both", partial),
            Err(ValidationError::MalformattedRequestAuthorizationHeader { .. })
        ));
        let full = get("/both")
            .with_header("X-API-Key", "k")
            .with_header("Authorization", "Bearer t");
        assert!(check("/both", full).is_ok());
    }

    #[test]
    fn test_anonymous_access() {
        assert!(check("/public", get("/public")).is_ok());
        assert!(check("/optional", get("/optional")).is_ok());
    }

    #[test]
    fn test_unknown_scheme_is_unsatisfiable() {
        let request = get("/unknown").with_header("Authorization", "Bearer t");
        assert!(matches!(
            check("/unknown", request),
            Err(ValidationError::MissingSecurityCredentials { .. })
        ));
    }

    #[test]
    fn test_cookie_api_key() {
        assert!(check("/cookie", get("/cookie").with_header("Cookie", "sid=abc")).is_ok());
        assert!(check("/cookie", get("/cookie").with_header("Cookie", "other=abc")).is_err());
    }
}
