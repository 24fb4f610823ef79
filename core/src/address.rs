#![deny(missing_docs)]

//! # Addresses
//!
//! Immutable identifiers of a location inside the contract: a path template,
//! an operation (template + method) and a response (operation + status code).

use derive_more::Display;

/// A path template (e.g. `/users/{id}`) or a concrete request path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display("{path}")]
pub struct PathAddress {
    path: String,
}

impl PathAddress {
    /// Creates a new path address.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// The path (template or concrete).
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// An operation: a path template paired with an HTTP method.
///
/// The method is uppercased on construction, so `get` and `GET` address the
/// same operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display("[{},{}]", path, method)]
pub struct OperationAddress {
    path: PathAddress,
    method: String,
}

impl OperationAddress {
    /// Creates a new operation address.
    pub fn new(path: impl Into<String>, method: impl AsRef<str>) -> Self {
        Self {
            path: PathAddress::new(path),
            method: method.as_ref().to_ascii_uppercase(),
        }
    }

    /// The path template.
    pub fn path(&self) -> &str {
        self.path.path()
    }

    /// The uppercase HTTP method.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The path part of this address.
    pub fn path_address(&self) -> &PathAddress {
        &self.path
    }
}

/// A response of an operation, identified by its status code.
///
/// The code is kept as written: a literal status (`"200"`), a range (`"2XX"`)
/// or `"default"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display("[{},{},{}]", operation.path(), operation.method(), response_code)]
pub struct ResponseAddress {
    operation: OperationAddress,
    response_code: String,
}

impl ResponseAddress {
    /// Creates a new response address.
    pub fn new(operation: OperationAddress, response_code: impl Into<String>) -> Self {
        Self {
            operation,
            response_code: response_code.into(),
        }
    }

    /// The operation this response belongs to.
    pub fn operation(&self) -> &OperationAddress {
        &self.operation
    }

    /// The path template of the operation.
    pub fn path(&self) -> &str {
        self.operation.path()
    }

    /// The uppercase HTTP method of the operation.
    pub fn method(&self) -> &str {
        self.operation.method()
    }

    /// The status code.
    pub fn response_code(&self) -> &str {
        &self.response_code
    }
}
