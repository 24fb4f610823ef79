//! Typed lookups of paths, operations and responses.

use crate::address::{OperationAddress, PathAddress, ResponseAddress};
use crate::error::ValidationError;
use crate::oas::model::{OpenApiDocument, Operation, PathItem, Response};

impl OpenApiDocument {
    /// The Path Item declared for a template, or `NoPath`.
    pub fn find_path(&self, addr: &PathAddress) -> Result<&PathItem, ValidationError> {
        self.path_item(addr.path())
            .ok_or_else(|| ValidationError::NoPath { addr: addr.clone() })
    }

    /// The operation at an address, or `NoPath` / `NoOperation`.
    pub fn find_operation(&self, addr: &OperationAddress) -> Result<&Operation, ValidationError> {
        self.find_path(addr.path_address())?
            .operation(addr.method())
            .ok_or_else(|| ValidationError::NoOperation { addr: addr.clone() })
    }

    /// The response declared for a status code.
    ///
    /// Tries the exact code, then its range (`2XX`), then `default`.
    pub fn find_response(&self, addr: &ResponseAddress) -> Result<&Response, ValidationError> {
        let operation = self.find_operation(addr.operation())?;
        let code = addr.response_code();
        let range = code
            .chars()
            .next()
            .map(|first| format!("{}XX", first))
            .unwrap_or_default();

        operation
            .responses
            .get(code)
            .or_else(|| {
                operation
                    .responses
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(&range))
                    .map(|(_, response)| response)
            })
            .or_else(|| operation.responses.get("default"))
            .ok_or_else(|| ValidationError::NoResponseCode { addr: addr.clone() })
    }
}
