#![deny(missing_docs)]

//! # Request Command
//!
//! Finds the operation a request addresses and validates the request.

use oav_core::{OperationAddress, ServerRequest};
use tracing::debug;

use crate::error::CliResult;
use crate::input::MessageArgs;

/// Arguments for the request command.
#[derive(clap::Args, Debug, Clone)]
pub struct RequestArgs {
    #[clap(flatten)]
    pub message: MessageArgs,

    /// Request path, optionally with a query string (`/users/7?fields=name`).
    #[clap(long)]
    pub path: String,
}

/// Validates the request and returns the operation it matched.
pub fn execute(args: &RequestArgs) -> CliResult<OperationAddress> {
    let builder = args.message.builder()?;

    let mut request = ServerRequest::new(args.message.method.clone(), &args.path);
    for (name, value) in args.message.headers()? {
        request = request.with_header(name, value);
    }
    if let Some(body) = args.message.body()? {
        request = request.with_body(body);
    }

    debug!(
        spec = ?args.message.spec,
        method = %args.message.method,
        path = %args.path,
        "Validating request"
    );
    let addr = builder.server_request_validator().validate(&request)?;
    debug!(operation = %addr, "Request matched");
    Ok(addr)
}
