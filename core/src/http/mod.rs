#![deny(missing_docs)]

//! # HTTP Messages
//!
//! The validators only read messages through [`RequestMessage`] and
//! [`ResponseMessage`], so any HTTP stack can be adapted. [`ServerRequest`]
//! and [`ServerResponse`] are owned implementations.

pub mod message;

pub use message::{RequestMessage, ResponseMessage, ServerRequest, ServerResponse};
