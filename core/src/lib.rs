#![deny(missing_docs)]

//! # OAV Core
//!
//! Validates HTTP requests and responses against an OpenAPI 3.x contract.

/// Contract addresses.
pub mod address;

/// Shared error types.
pub mod error;

/// HTTP message abstractions.
pub mod http;

/// OpenAPI document loading and lookups.
pub mod oas;

/// Path template matching.
pub mod routing;

/// Keyword-based schema validation.
pub mod schema;

/// Request and response validators.
pub mod validation;

pub use address::{OperationAddress, PathAddress, ResponseAddress};
pub use error::{AppError, AppResult, MessageAddress, MessagePart, ValidationError};
pub use http::{RequestMessage, ResponseMessage, ServerRequest, ServerResponse};
pub use oas::OpenApiDocument;
pub use routing::{PathFinder, RouteMatch};
pub use schema::{
    FailureCause, KeywordContext, KeywordFailure, KeywordRegistry, KeywordValidator, Schema,
    SchemaValidator, ValidationContext,
};
pub use validation::{
    ResponseValidator, RoutedRequestValidator, ServerRequestValidator, ValidatorBuilder,
};
