#![deny(missing_docs)]

//! # Schema Validation
//!
//! - **model**: reference-resolved schema nodes and the validation direction.
//! - **failure**: the keyword failure kind and its chained causes.
//! - **registry**: name-keyed keyword validators.
//! - **validator**: the recursive engine.
//! - **keywords**: the built-in keyword set.

pub mod failure;
pub mod keywords;
pub mod model;
pub mod registry;
pub mod validator;

pub use failure::{FailureCause, KeywordFailure};
pub use model::{Schema, ValidationContext};
pub use registry::{KeywordContext, KeywordRegistry, KeywordValidator};
pub use validator::SchemaValidator;
