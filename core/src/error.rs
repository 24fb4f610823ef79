//! # Error Handling
//!
//! - `AppError`: loading and document-shape failures, before any validation runs.
//! - `ValidationError`: the typed outcome of validating a message against a contract.

use crate::address::{OperationAddress, PathAddress, ResponseAddress};
use crate::oas::ParameterIn;
use crate::schema::KeywordFailure;
use derive_more::{Display, From};

/// The Global Error Enum for loading contracts.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The document is not valid YAML.
    #[display("YAML Error: {_0}")]
    Yaml(serde_yaml::Error),

    /// The document is not valid JSON, or does not have the expected shape.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// A `$ref` could not be resolved.
    #[from(ignore)]
    #[display("Reference Error: {_0}")]
    Reference(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Io(e) => Some(e),
            AppError::Yaml(e) => Some(e),
            AppError::Json(e) => Some(e),
            _ => None,
        }
    }
}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

/// The message a schema failure was found in.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum MessageAddress {
    /// A request addressed to an operation.
    #[display("Request {_0}")]
    Request(OperationAddress),
    /// A response of an operation.
    #[display("Response {_0}")]
    Response(ResponseAddress),
}

impl MessageAddress {
    /// The operation the message belongs to.
    pub fn operation(&self) -> &OperationAddress {
        match self {
            MessageAddress::Request(addr) => addr,
            MessageAddress::Response(addr) => addr.operation(),
        }
    }
}

/// The part of a message a schema failure was found in.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum MessagePart {
    /// The decoded body.
    #[display("body")]
    Body,
    /// A request parameter.
    #[display("{location} parameter '{name}'")]
    Parameter {
        /// Where the parameter lives.
        location: ParameterIn,
        /// Parameter name.
        name: String,
    },
    /// A response header.
    #[display("header '{_0}'")]
    Header(String),
}

/// Why a message does not conform to the contract.
///
/// Callers branch on the variant, never on the message text.
#[derive(Debug, Display)]
pub enum ValidationError {
    /// The path is not declared.
    #[display("OpenAPI spec contains no such path '{addr}'")]
    NoPath {
        /// The path that failed to resolve.
        addr: PathAddress,
    },

    /// The path is declared but not with this method.
    #[display("OpenAPI spec contains no such operation [{},{}]", addr.path(), addr.method())]
    NoOperation {
        /// The operation that failed to resolve.
        addr: OperationAddress,
    },

    /// The operation does not declare this response code.
    #[display(
        "OpenAPI spec contains no such operation [{},{},{}]",
        addr.path(),
        addr.method(),
        addr.response_code()
    )]
    NoResponseCode {
        /// The response that failed to resolve.
        addr: ResponseAddress,
    },

    /// Several templates matched structurally and not exactly one of them
    /// accepted the request.
    #[display(
        "Request matched multiple operations ({}) but none or more than one accepted it",
        matched.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
    )]
    MultipleOperationsMismatchForRequest {
        /// Every structural candidate, in declaration order.
        matched: Vec<OperationAddress>,
    },

    /// A value in the message did not satisfy a schema keyword.
    #[display("{addr}: {part} is invalid: {failure}")]
    ValidationKeywordFailed {
        /// The message.
        addr: MessageAddress,
        /// The part of the message.
        part: MessagePart,
        /// The keyword failure, untouched.
        failure: KeywordFailure,
    },

    /// An HTTP-header-based security scheme applies and `Authorization` is missing.
    #[display("Request [{},{}]: `Authorization` header must be present", addr.path(), addr.method())]
    MalformattedRequestAuthorizationHeader {
        /// The operation being called.
        addr: OperationAddress,
    },

    /// An API key security scheme applies and its credential is missing.
    #[display(
        "Request [{},{}]: credentials for security scheme '{scheme}' must be present",
        addr.path(),
        addr.method()
    )]
    MissingSecurityCredentials {
        /// The operation being called.
        addr: OperationAddress,
        /// Name of the unsatisfied scheme.
        scheme: String,
    },
}

impl ValidationError {
    /// The structural candidates of an ambiguity failure, in declaration order.
    pub fn matched_addrs(&self) -> &[OperationAddress] {
        match self {
            ValidationError::MultipleOperationsMismatchForRequest { matched } => matched,
            _ => &[],
        }
    }

    /// The keyword failure, if this is a schema failure.
    pub fn keyword_failure(&self) -> Option<&KeywordFailure> {
        match self {
            ValidationError::ValidationKeywordFailed { failure, .. } => Some(failure),
            _ => None,
        }
    }
}

impl std::error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ValidationError::ValidationKeywordFailed { failure, .. } => Some(failure),
            _ => None,
        }
    }
}
