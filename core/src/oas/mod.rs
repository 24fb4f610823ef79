#![deny(missing_docs)]

//! # OpenAPI Documents
//!
//! Loading, reference resolution and typed lookups over an OpenAPI 3.x contract.

mod loader;
mod lookup;
pub mod model;
pub(crate) mod refs;

pub use model::{
    ApiKey, ApiKeyIn, Header, HttpAuth, MediaType, MutualTls, OAuth2, OpenApiDocument,
    OpenIdConnect, Operation, Parameter, ParameterIn, PathItem, RequestBody, Response,
    SecurityRequirement, SecurityScheme, Server, ServerVariable,
};
