#![deny(missing_docs)]

//! # Path Finder
//!
//! Resolves a concrete request path and method to every structurally matching
//! operation. No ranking is attempted: `/users/me` and `/users/{id}` both
//! match `/users/me`, and the caller decides between them.

use crate::address::{OperationAddress, PathAddress};
use crate::error::ValidationError;
use crate::oas::OpenApiDocument;
use crate::routing::PathTemplate;
use indexmap::IndexMap;
use tracing::debug;

/// A structural candidate with the path parameter values it captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// The matching operation.
    pub addr: OperationAddress,
    /// Percent-decoded placeholder values.
    pub params: IndexMap<String, String>,
}

/// Finds the operations a request may address.
#[derive(Debug)]
pub struct PathFinder<'a> {
    document: &'a OpenApiDocument,
    path: String,
    method: String,
}

impl<'a> PathFinder<'a> {
    /// Creates a finder for `path` (without query string) and `method`.
    pub fn new(document: &'a OpenApiDocument, path: impl Into<String>, method: impl AsRef<str>) -> Self {
        Self {
            document,
            path: path.into(),
            method: method.as_ref().to_ascii_uppercase(),
        }
    }

    /// Every candidate operation, in declaration order.
    pub fn search(&self) -> Result<Vec<OperationAddress>, ValidationError> {
        Ok(self
            .search_matches()?
            .into_iter()
            .map(|found| found.addr)
            .collect())
    }

    /// Every candidate operation with its captured path parameters, in declaration order.
    pub fn search_matches(&self) -> Result<Vec<RouteMatch>, ValidationError> {
        let structural: Vec<(&PathTemplate, IndexMap<String, String>, bool)> = self
            .document
            .routes()
            .filter_map(|(template, item)| {
                let params = match_with_base(self.document, template, &self.path)?;
                Some((template, params, item.operation(&self.method).is_some()))
            })
            .collect();

        if structural.is_empty() {
            debug!(path = %self.path, "No path template matches");
            return Err(ValidationError::NoPath {
                addr: PathAddress::new(self.path.clone()),
            });
        }

        let found: Vec<RouteMatch> = structural
            .into_iter()
            .filter(|(_, _, has_method)| *has_method)
            .map(|(template, params, _)| RouteMatch {
                addr: OperationAddress::new(template.template(), &self.method),
                params,
            })
            .collect();

        if found.is_empty() {
            debug!(path = %self.path, method = %self.method, "Path matches but method is not declared");
            return Err(ValidationError::NoOperation {
                addr: OperationAddress::new(self.path.clone(), &self.method),
            });
        }

        debug!(
            path = %self.path,
            method = %self.method,
            candidates = found.len(),
            "Path resolved"
        );
        Ok(found)
    }
}

/// Matches `path` against `template` after stripping one of the document's
/// base paths. Longer base paths are tried first.
pub(crate) fn match_with_base(
    document: &OpenApiDocument,
    template: &PathTemplate,
    path: &str,
) -> Option<IndexMap<String, String>> {
    document
        .base_paths()
        .iter()
        .filter_map(|base| strip_base(path, base))
        .find_map(|relative| template.matches(relative))
}

fn strip_base<'p>(path: &'p str, base: &str) -> Option<&'p str> {
    if base.is_empty() {
        return Some(path);
    }
    let rest = path.strip_prefix(base)?;
    if rest.is_empty() || rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USERS: &str = r#"
openapi: 3.0.0
paths:
  /users/{id}:
    get:
      responses: {}
  /users/me:
    get:
      responses: {}
  /users/{group}:
    get:
      responses: {}
    delete:
      responses: {}
  /reports/{name}.json:
    get:
      responses: {}
"#;

    fn paths(found: Vec<OperationAddress>) -> Vec<String> {
        found.iter().map(|addr| addr.path().to_string()).collect()
    }

    #[test]
    fn test_candidates_in_declaration_order() {
        let doc = OpenApiDocument::from_yaml(USERS).unwrap();
        let found = PathFinder::new(&doc, "/users/me", "get").search().unwrap();
        assert_eq!(
            paths(found),
            vec!["/users/{id}", "/users/me", "/users/{group}"]
        );
    }

    #[test]
    fn test_method_filters_candidates() {
        let doc = OpenApiDocument::from_yaml(USERS).unwrap();
        let found = PathFinder::new(&doc, "/users/12", "DELETE").search().unwrap();
        assert_eq!(paths(found), vec!["/users/{group}"]);
        assert_eq!(
            PathFinder::new(&doc, "/users/12", "DELETE").search().unwrap()[0].method(),
            "DELETE"
        );
    }

    #[test]
    fn test_no_path_and_no_operation() {
        let doc = OpenApiDocument::from_yaml(USERS).unwrap();

        match PathFinder::new(&doc, "/groups/1", "get").search() {
            Err(ValidationError::NoPath { addr }) => assert_eq!(addr.path(), "/groups/1"),
            other => panic!("unexpected {other:?}"),
        }
        match PathFinder::new(&doc, "/users/1", "post").search() {
            Err(ValidationError::NoOperation { addr }) => {
                assert_eq!(addr.path(), "/users/1");
                assert_eq!(addr.method(), "POST");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_captured_params() {
        let doc = OpenApiDocument::from_yaml(USERS).unwrap();
        let found = PathFinder::new(&doc, "/reports/q%201.json", "get")
            .search_matches()
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].params["name"], "q 1");
    }

    #[test]
    fn test_server_base_path_is_stripped() {
        let doc = OpenApiDocument::from_yaml(
            r#"
openapi: 3.0.0
servers:
  - url: https://api.example.com/v1
paths:
  /ping:
    get:
      responses: {}
"#,
        )
        .unwrap();

        assert!(PathFinder::new(&doc, "/v1/ping", "get").search().is_ok());
        assert!(PathFinder::new(&doc, "/v1ping", "get").search().is_err());
        assert!(PathFinder::new(&doc, "/ping", "get").search().is_err());
    }
}
