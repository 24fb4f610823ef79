#![deny(missing_docs)]

//! # Keyword Failures
//!
//! The single failure kind produced by the schema engine, plus the chained
//! low-level cause that explains it.

use derive_more::Display;
use serde_json::Value;

/// A value did not satisfy a keyword.
///
/// `cause` is exposed through [`std::error::Error::source`], so the original
/// low-level reason stays inspectable after wrapping.
#[derive(Debug, Display)]
#[display("Keyword validation failed for '{keyword}': {reason}")]
pub struct KeywordFailure {
    keyword: String,
    data: Value,
    reason: String,
    cause: Box<FailureCause>,
}

impl KeywordFailure {
    /// Wraps `cause` into a failure of `keyword` for the offending `data`.
    pub fn new(keyword: impl Into<String>, data: &Value, cause: FailureCause) -> Self {
        Self {
            keyword: keyword.into(),
            data: data.clone(),
            reason: cause.to_string(),
            cause: Box::new(cause),
        }
    }

    /// The name of the failing keyword.
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// The value that failed.
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Human readable reason.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// The chained cause.
    pub fn cause(&self) -> &FailureCause {
        &self.cause
    }

    /// Follows nested subschema failures down to the innermost keyword failure.
    pub fn innermost(&self) -> &KeywordFailure {
        match self.cause.as_ref() {
            FailureCause::Nested { failure, .. } => failure.innermost(),
            _ => self,
        }
    }
}

impl std::error::Error for KeywordFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.cause.as_ref())
    }
}

/// The low-level reason behind a [`KeywordFailure`].
#[derive(Debug, Display)]
pub enum FailureCause {
    /// The value has the wrong shape for the keyword (e.g. `maximum` on a string).
    #[display("Value must be {expected}")]
    InvalidData {
        /// Description of the expected shape.
        expected: &'static str,
    },

    /// The keyword argument in the schema is malformed.
    #[display("Keyword argument must be {expected}")]
    InvalidArgument {
        /// Description of the expected argument.
        expected: &'static str,
    },

    /// The value is well formed but violates the constraint.
    #[display("{_0}")]
    Constraint(String),

    /// The `pattern` argument is not a valid regular expression.
    #[display("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Compilation error.
        source: regex::Error,
    },

    /// A subschema rejected part of the value.
    #[display("{at}: {failure}")]
    Nested {
        /// Location of the subschema or element, e.g. `name`, `[2]`, `allOf[1]`.
        at: String,
        /// The subschema failure.
        failure: Box<KeywordFailure>,
    },
}

impl FailureCause {
    /// Shorthand for a constraint violation.
    pub fn constraint(message: impl Into<String>) -> Self {
        Self::Constraint(message.into())
    }

    /// Shorthand for a nested failure at `at`.
    pub fn nested(at: impl Into<String>, failure: KeywordFailure) -> Self {
        Self::Nested {
            at: at.into(),
            failure: Box::new(failure),
        }
    }
}

impl std::error::Error for FailureCause {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidPattern { source, .. } => Some(source),
            Self::Nested { failure, .. } => Some(failure.as_ref()),
            _ => None,
        }
    }
}
