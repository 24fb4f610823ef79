#![deny(missing_docs)]

//! # Message Input
//!
//! Arguments shared by the `request` and `response` commands.

use std::fs;
use std::path::{Path, PathBuf};

use oav_core::ValidatorBuilder;
use serde_json::Value;

use crate::error::{CliError, CliResult};

/// Contract, headers and body of a message.
#[derive(clap::Args, Debug, Clone)]
pub struct MessageArgs {
    /// Path to the OpenAPI document (YAML or JSON).
    #[clap(long, env = "OAV_SPEC")]
    pub spec: PathBuf,

    /// HTTP method of the operation.
    #[clap(long, default_value = "GET")]
    pub method: String,

    /// Header as `Name: value`. Repeatable.
    #[clap(long = "header", short = 'H')]
    pub headers: Vec<String>,

    /// File holding the body, JSON or YAML.
    #[clap(long)]
    pub body: Option<PathBuf>,
}

impl MessageArgs {
    /// Loads the contract, choosing the parser from the file extension.
    pub fn builder(&self) -> CliResult<ValidatorBuilder> {
        if !self.spec.exists() {
            return Err(CliError::General(format!(
                "OpenAPI file not found: {:?}",
                self.spec
            )));
        }
        let builder = if has_extension(&self.spec, "json") {
            ValidatorBuilder::from_json_file(&self.spec)?
        } else {
            ValidatorBuilder::from_yaml_file(&self.spec)?
        };
        Ok(builder)
    }

    /// Parsed `Name: value` headers.
    pub fn headers(&self) -> CliResult<Vec<(String, String)>> {
        self.headers.iter().map(|raw| parse_header(raw)).collect()
    }

    /// The decoded body, if a body file was given.
    pub fn body(&self) -> CliResult<Option<Value>> {
        let Some(path) = &self.body else {
            return Ok(None);
        };
        let content = fs::read_to_string(path)?;
        let value = if has_extension(path, "json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        Ok(Some(value))
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

/// Splits `Name: value`.
pub fn parse_header(raw: &str) -> CliResult<(String, String)> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| CliError::General(format!("Header must be 'Name: value', got '{}'", raw)))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::General(format!("Header name is empty in '{}'", raw)));
    }
    Ok((name.to_string(), value.trim().to_string()))
}
