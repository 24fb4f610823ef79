//! Message traits and their owned implementations.

use indexmap::IndexMap;
use serde_json::Value;

/// Read access to an incoming request.
pub trait RequestMessage {
    /// HTTP method, any case.
    fn method(&self) -> &str;

    /// Path without the query string, still percent-encoded.
    fn path(&self) -> &str;

    /// Raw query string without the leading `?`.
    fn query(&self) -> Option<&str>;

    /// Every value of a header, matched case-insensitively.
    fn header_values(&self, name: &str) -> Vec<&str>;

    /// Decoded body, if one was sent.
    fn body(&self) -> Option<&Value>;

    /// First value of a header.
    fn header(&self, name: &str) -> Option<&str> {
        self.header_values(name).into_iter().next()
    }

    /// Decoded query pairs, in order. Repeated keys are kept.
    fn query_pairs(&self) -> Vec<(String, String)> {
        self.query()
            .map(|query| {
                url::form_urlencoded::parse(query.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Cookies from every `Cookie` header.
    fn cookies(&self) -> IndexMap<String, String> {
        self.header_values("cookie")
            .into_iter()
            .flat_map(|header| header.split(';'))
            .filter_map(|pair| {
                let (name, value) = pair.split_once('=')?;
                let name = name.trim();
                (!name.is_empty()).then(|| (name.to_string(), value.trim().to_string()))
            })
            .collect()
    }

    /// The `Content-Type` essence (`application/json` for `application/json; charset=utf-8`).
    fn content_type(&self) -> Option<String> {
        self.header("content-type").map(media_type_essence)
    }
}

/// Read access to an outgoing response.
pub trait ResponseMessage {
    /// Status code.
    fn status(&self) -> u16;

    /// First value of a header, matched case-insensitively.
    fn header(&self, name: &str) -> Option<&str>;

    /// Decoded body, if one was sent.
    fn body(&self) -> Option<&Value>;

    /// The `Content-Type` essence.
    fn content_type(&self) -> Option<String> {
        self.header("content-type").map(media_type_essence)
    }
}

pub(crate) fn media_type_essence(value: &str) -> String {
    value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// An owned request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerRequest {
    method: String,
    path: String,
    query: Option<String>,
    headers: Vec<(String, String)>,
    body: Option<Value>,
}

impl ServerRequest {
    /// Creates a request; `uri` may carry a query string (`/users?limit=10`).
    pub fn new(method: impl Into<String>, uri: &str) -> Self {
        let (path, query) = match uri.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (uri, None),
        };
        Self {
            method: method.into(),
            path: path.to_string(),
            query,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Adds a header. Repeated names are kept.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the decoded body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

impl RequestMessage for ServerRequest {
    fn method(&self) -> &str {
        &self.method
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
            .collect()
    }

    fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

/// An owned response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: Option<Value>,
}

impl ServerResponse {
    /// Creates a response with a status code.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    /// Adds a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the decoded body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

impl ResponseMessage for ServerResponse {
    fn status(&self) -> u16 {
        self.status
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}
