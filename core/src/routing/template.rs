#![deny(missing_docs)]

//! # Path Templates
//!
//! A template such as `/users/{id}` is split by `/`. Literal segments must
//! match exactly; segments containing `{name}` placeholders are compiled into
//! anchored regexes where each placeholder captures a non-empty value.

use crate::error::{AppError, AppResult};
use indexmap::IndexMap;
use percent_encoding::percent_decode_str;
use regex::Regex;

/// A compiled path template.
#[derive(Debug, Clone)]
pub struct PathTemplate {
    template: String,
    segments: Vec<Segment>,
}

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Placeholder { matcher: Regex, names: Vec<String> },
}

impl PathTemplate {
    /// Compiles `template`.
    pub fn parse(template: &str) -> AppResult<Self> {
        let segments = split_segments(template)
            .into_iter()
            .map(|segment| parse_segment(template, segment))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Self {
            template: template.to_string(),
            segments,
        })
    }

    /// The template as declared.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Matches a concrete path, returning the percent-decoded placeholder values.
    pub fn matches(&self, path: &str) -> Option<IndexMap<String, String>> {
        let parts = split_segments(path);
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = IndexMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) => {
                    if literal != part && *literal != decode(part) {
                        return None;
                    }
                }
                Segment::Placeholder { matcher, names } => {
                    let captures = matcher.captures(part)?;
                    for (index, name) in names.iter().enumerate() {
                        let value = captures.get(index + 1)?.as_str();
                        params.insert(name.clone(), decode(value));
                    }
                }
            }
        }
        Some(params)
    }
}

/// Splits a path into segments, ignoring the leading and trailing `/`.
fn split_segments(path: &str) -> Vec<&str> {
    let trimmed = path.trim_start_matches('/').trim_end_matches('/');
    if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').collect()
    }
}

fn parse_segment(template: &str, segment: &str) -> AppResult<Segment> {
    if !segment.contains('{') && !segment.contains('}') {
        return Ok(Segment::Literal(segment.to_string()));
    }

    let invalid = || AppError::General(format!("Invalid path template '{}'", template));
    let mut pattern = String::from("^");
    let mut names = Vec::new();
    let mut rest = segment;

    while let Some(open) = rest.find('{') {
        let close = rest[open..].find('}').map(|i| open + i).ok_or_else(invalid)?;
        let literal = &rest[..open];
        if literal.contains('}') {
            return Err(invalid());
        }
        let name = &rest[open + 1..close];
        if name.is_empty() || name.contains('{') {
            return Err(invalid());
        }
        pattern.push_str(&regex::escape(literal));
        pattern.push_str("(.+?)");
        names.push(name.to_string());
        rest = &rest[close + 1..];
    }
    if rest.contains('}') {
        return Err(invalid());
    }
    pattern.push_str(&regex::escape(rest));
    pattern.push('$');

    let matcher = Regex::new(&pattern)
        .map_err(|e| AppError::General(format!("Invalid path template '{}': {}", template, e)))?;
    Ok(Segment::Placeholder { matcher, names })
}

fn decode(value: &str) -> String {
    percent_decode_str(value).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_template() {
        let template = PathTemplate::parse("/users/me").unwrap();
        assert!(template.matches("/users/me").is_some());
        assert!(template.matches("/users/me/").is_some());
        assert!(template.matches("/users/you").is_none());
        assert!(template.matches("/users").is_none());
    }

    #[test]
    fn test_placeholder_matches_one_segment() {
        let template = PathTemplate::parse("/users/{id}").unwrap();
        let params = template.matches("/users/12.33").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("12.33"));
        assert!(template.matches("/users/12/posts").is_none());
        assert!(template.matches("/users/").is_none());
    }

    #[test]
    fn test_mixed_segment() {
        let template = PathTemplate::parse("/reports/{name}.{format}").unwrap();
        let params = template.matches("/reports/q1.summary.json").unwrap();
        assert_eq!(params["name"], "q1");
        assert_eq!(params["format"], "summary.json");
        assert!(template.matches("/reports/.json").is_none());
    }

    #[test]
    fn test_values_are_percent_decoded() {
        let template = PathTemplate::parse("/files/{name}").unwrap();
        let params = template.matches("/files/my%20file").unwrap();
        assert_eq!(params["name"], "my file");
    }

    #[test]
    fn test_root_template() {
        let template = PathTemplate::parse("/").unwrap();
        assert!(template.matches("/").is_some());
        assert!(template.matches("").is_some());
        assert!(template.matches("/a").is_none());
    }

    #[test]
    fn test_invalid_templates() {
        assert!(PathTemplate::parse("/users/{id").is_err());
        assert!(PathTemplate::parse("/users/{}").is_err());
        assert!(PathTemplate::parse("/users/id}").is_err());
    }
}
