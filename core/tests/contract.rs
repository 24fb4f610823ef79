use oav_core::{
    FailureCause, KeywordRegistry, OperationAddress, Schema, SchemaValidator, ServerRequest,
    ServerResponse, ValidationContext, ValidationError, ValidatorBuilder,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::error::Error;
use std::path::PathBuf;

fn users() -> ValidatorBuilder {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/stubs/users.yaml");
    ValidatorBuilder::from_yaml_file(path).unwrap()
}

fn create_user(body: serde_json::Value) -> ServerRequest {
    ServerRequest::new("POST", "/v1/users")
        .with_header("Authorization", "Bearer token")
        .with_header("Content-Type", "application/json")
        .with_body(body)
}

#[test]
fn test_read_only_properties_are_not_required_in_requests() {
    let addr = users()
        .server_request_validator()
        .validate(&create_user(json!({"name": "Ann", "password": "s3cret"})))
        .unwrap();
    assert_eq!(addr, OperationAddress::new("/users", "POST"));
}

#[test]
fn test_write_only_properties_are_required_in_requests() {
    let err = users()
        .server_request_validator()
        .validate(&create_user(json!({"name": "Ann"})))
        .unwrap_err();

    let failure = err.keyword_failure().unwrap();
    assert_eq!(failure.keyword(), "required");
    assert_eq!(
        failure.reason(),
        "Required property 'password' must be present in the object"
    );
}

#[test]
fn test_body_failure_keeps_its_cause_chain() {
    let err = users()
        .server_request_validator()
        .validate(&create_user(json!({"name": "Annabelle", "password": "x"})))
        .unwrap_err();

    let failure = err.keyword_failure().unwrap();
    assert_eq!(failure.keyword(), "properties");
    assert_eq!(failure.innermost().keyword(), "maxLength");
    assert!(matches!(failure.cause(), FailureCause::Nested { at, .. } if at == "name"));

    let source = err.source().unwrap();
    assert!(source.source().is_some());
}

#[test]
fn test_code_points_are_counted() {
    let addr = users()
        .server_request_validator()
        .validate(&create_user(json!({"name": "ĀĂĄĆĈ", "password": "x"})))
        .unwrap();
    assert_eq!(addr.path(), "/users");
}

#[test]
fn test_missing_authorization_header() {
    let request = ServerRequest::new("POST", "/v1/users")
        .with_header("Content-Type", "application/json")
        .with_body(json!({"name": "Ann", "password": "x"}));

    match users().server_request_validator().validate(&request) {
        Err(ValidationError::MalformattedRequestAuthorizationHeader { addr }) => {
            assert_eq!(addr, OperationAddress::new("/users", "POST"));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_api_key_satisfies_alternative_requirement() {
    let validator = users().server_request_validator();

    let with_key = ServerRequest::new("GET", "/v1/users/7?api_key=k&fields=name,email");
    assert!(validator.validate(&with_key).is_ok());

    let without = ServerRequest::new("GET", "/v1/users/7");
    assert!(matches!(
        validator.validate(&without),
        Err(ValidationError::MalformattedRequestAuthorizationHeader { .. })
    ));
}

#[test]
fn test_query_array_items_are_validated() {
    let request = ServerRequest::new("GET", "/v1/users/7?fields=name&fields=avatar")
        .with_header("Authorization", "Bearer t");
    let err = users()
        .server_request_validator()
        .validate(&request)
        .unwrap_err();
    assert!(err.to_string().contains("query parameter 'fields'"));
    assert_eq!(err.keyword_failure().unwrap().innermost().keyword(), "enum");
}

#[test]
fn test_path_level_parameter_is_validated() {
    let request = ServerRequest::new("GET", "/v1/users/0").with_header("Authorization", "Bearer t");
    let err = users()
        .routed_request_validator()
        .validate(&OperationAddress::new("/users/{id}", "GET"), &request)
        .unwrap_err();
    assert_eq!(err.keyword_failure().unwrap().keyword(), "minimum");
}

#[test]
fn test_response_requires_read_only_and_skips_write_only() {
    let validator = users().response_validator();
    let addr = OperationAddress::new("/users/{id}", "GET");

    let ok = ServerResponse::new(200)
        .with_header("Content-Type", "application/json")
        .with_body(json!({"id": 7, "name": "Ann", "createdAt": "2024-01-01T10:00:00Z"}));
    assert!(validator.validate(&addr, &ok).is_ok());

    let missing_id = ServerResponse::new(200).with_body(json!({"name": "Ann"}));
    let err = validator.validate(&addr, &missing_id).unwrap_err();
    assert_eq!(
        err.keyword_failure().unwrap().reason(),
        "Required property 'id' must be present in the object"
    );

    let bad_date =
        ServerResponse::new(200).with_body(json!({"id": 7, "name": "Ann", "createdAt": "yesterday"}));
    assert_eq!(
        validator
            .validate(&addr, &bad_date)
            .unwrap_err()
            .keyword_failure()
            .unwrap()
            .innermost()
            .keyword(),
        "format"
    );
}

#[test]
fn test_response_codes() {
    let validator = users().response_validator();
    let create = OperationAddress::new("/users", "POST");

    let error = ServerResponse::new(500).with_body(json!({"message": "boom"}));
    assert!(validator.validate(&create, &error).is_ok());

    let get = OperationAddress::new("/users/{id}", "GET");
    match validator.validate(&get, &ServerResponse::new(500)) {
        Err(ValidationError::NoResponseCode { addr }) => {
            assert_eq!(addr.to_string(), "[/users/{id},GET,500]");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_direction_on_a_bare_schema() {
    let registry = KeywordRegistry::default();
    let validator = SchemaValidator::new(&registry);
    let schema = Schema::from_value(&json!({
        "required": ["name"],
        "properties": {"name": {"readOnly": true}}
    }))
    .unwrap();

    assert!(validator
        .validate(&json!({}), &schema, ValidationContext::AsRequest)
        .is_ok());
    let err = validator
        .validate(&json!({}), &schema, ValidationContext::AsResponse)
        .unwrap_err();
    assert_eq!(err.keyword(), "required");

    let exclusive = Schema::from_value(&json!({"maximum": 10, "exclusiveMaximum": true})).unwrap();
    let err = validator
        .validate(&json!(10), &exclusive, ValidationContext::AsRequest)
        .unwrap_err();
    assert_eq!(err.keyword(), "maximum");
}
