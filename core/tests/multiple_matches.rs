use oav_core::{OperationAddress, ServerRequest, ValidationError, ValidatorBuilder};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn stub(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("stubs")
        .join(name)
}

fn matched_paths(err: &ValidationError) -> Vec<&str> {
    err.matched_addrs().iter().map(|addr| addr.path()).collect()
}

#[test]
fn test_ambiguous_path_accepted_by_both_candidates() {
    let builder = ValidatorBuilder::from_yaml_file(stub("multiple_matches.yaml")).unwrap();
    let request = ServerRequest::new("GET", "/users/12.33");

    let err = builder
        .server_request_validator()
        .validate(&request)
        .unwrap_err();

    assert!(matches!(
        err,
        ValidationError::MultipleOperationsMismatchForRequest { .. }
    ));
    assert_eq!(matched_paths(&err), vec!["/users/{id}", "/users/{group}"]);
}

#[test]
fn test_ambiguous_path_accepted_by_no_candidate() {
    let builder = ValidatorBuilder::from_yaml_file(stub("strict_matches.yaml")).unwrap();
    let request = ServerRequest::new("GET", "/users/12.33");

    let err = builder
        .server_request_validator()
        .validate(&request)
        .unwrap_err();

    assert_eq!(matched_paths(&err), vec!["/users/{id}", "/users/{group}"]);
    assert_eq!(err.matched_addrs()[0].method(), "GET");
}

#[test]
fn test_single_accepting_candidate_wins() {
    let builder = ValidatorBuilder::from_yaml_file(stub("multiple_matches.yaml")).unwrap();
    let validator = builder.server_request_validator();

    let addr = validator
        .validate(&ServerRequest::new("GET", "/users/goodstring"))
        .unwrap();
    assert_eq!(addr, OperationAddress::new("/users/{group}", "GET"));

    let strict = ValidatorBuilder::from_yaml_file(stub("strict_matches.yaml")).unwrap();
    let addr = strict
        .server_request_validator()
        .validate(&ServerRequest::new("GET", "/users/12"))
        .unwrap();
    assert_eq!(addr.path(), "/users/{id}");
}

#[test]
fn test_validation_is_idempotent() {
    let builder = ValidatorBuilder::from_yaml_file(stub("multiple_matches.yaml")).unwrap();
    let validator = builder.server_request_validator();

    for _ in 0..2 {
        assert!(validator
            .validate(&ServerRequest::new("GET", "/users/goodstring"))
            .is_ok());
        assert!(validator
            .validate(&ServerRequest::new("GET", "/users/12.33"))
            .is_err());
    }
}

#[test]
fn test_lookup_failures() {
    let builder = ValidatorBuilder::from_yaml_file(stub("multiple_matches.yaml")).unwrap();
    let validator = builder.server_request_validator();

    match validator.validate(&ServerRequest::new("GET", "/groups/1")) {
        Err(ValidationError::NoPath { addr }) => assert_eq!(addr.path(), "/groups/1"),
        other => panic!("unexpected {other:?}"),
    }
    match validator.validate(&ServerRequest::new("POST", "/users/1")) {
        Err(ValidationError::NoOperation { addr }) => assert_eq!(addr.method(), "POST"),
        other => panic!("unexpected {other:?}"),
    }
}
