#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use derive_more::{Display, From};
use oav_core::{AppError, ValidationError};

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// IO Error wrapper.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// The contract could not be loaded.
    #[display("{}", _0)]
    Contract(AppError),

    /// The message does not conform to the contract.
    #[display("Invalid message: {}", _0)]
    Invalid(ValidationError),

    /// A JSON body could not be parsed.
    #[display("JSON Error: {}", _0)]
    Json(serde_json::Error),

    /// A YAML body could not be parsed.
    #[display("YAML Error: {}", _0)]
    Yaml(serde_yaml::Error),

    /// Malformed command line input.
    #[display("Operation failed: {}", _0)]
    General(String),
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Contract(e) => Some(e),
            CliError::Invalid(e) => Some(e),
            CliError::Json(e) => Some(e),
            CliError::Yaml(e) => Some(e),
            CliError::General(_) => None,
        }
    }
}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;
