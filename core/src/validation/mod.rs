#![deny(missing_docs)]

//! # Message Validation
//!
//! Entry points are built from a [`ValidatorBuilder`]:
//!
//! - [`ServerRequestValidator`]: resolves the operation from the request, then validates it.
//! - [`RoutedRequestValidator`]: validates a request against a known operation.
//! - [`ResponseValidator`]: validates a response of a known operation.

pub mod builder;
pub mod request;
pub mod response;

mod body;
mod parameters;
mod security;

pub use builder::ValidatorBuilder;
pub use request::{RoutedRequestValidator, ServerRequestValidator};
pub use response::ResponseValidator;
