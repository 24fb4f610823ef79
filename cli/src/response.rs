#![deny(missing_docs)]

//! # Response Command
//!
//! Validates a response of a known operation.

use oav_core::{OperationAddress, ServerResponse};
use tracing::debug;

use crate::error::CliResult;
use crate::input::MessageArgs;

/// Arguments for the response command.
#[derive(clap::Args, Debug, Clone)]
pub struct ResponseArgs {
    #[clap(flatten)]
    pub message: MessageArgs,

    /// Path template of the operation (`/users/{id}`).
    #[clap(long)]
    pub path: String,

    /// Response status code.
    #[clap(long)]
    pub status: u16,
}

/// Validates the response.
pub fn execute(args: &ResponseArgs) -> CliResult<OperationAddress> {
    let builder = args.message.builder()?;
    let addr = OperationAddress::new(args.path.clone(), &args.message.method);

    let mut response = ServerResponse::new(args.status);
    for (name, value) in args.message.headers()? {
        response = response.with_header(name, value);
    }
    if let Some(body) = args.message.body()? {
        response = response.with_body(body);
    }

    debug!(
        spec = ?args.message.spec,
        operation = %addr,
        status = args.status,
        "Validating response"
    );
    builder.response_validator().validate(&addr, &response)?;
    Ok(addr)
}
