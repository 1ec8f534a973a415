//! Parameter Store error types using thiserror 2.0.
//!
//! Every failure aborts the in-flight operation. Remote-originated messages
//! are sanitized before they are stored in an error.

use thiserror::Error;

/// Parameter Store provider errors.
#[derive(Error, Debug)]
pub enum ParameterStoreError {
    /// Neither a name pattern nor a tag filter was supplied.
    #[error("no selector provided: a name pattern or tag filter is required")]
    SelectorMissing,

    /// The name pattern failed to compile.
    #[error("invalid name pattern {pattern}: {source}")]
    InvalidPattern {
        /// Pattern as supplied by the caller
        pattern: String,
        /// Compilation error
        #[source]
        source: regex::Error,
    },

    /// A describe (listing) call failed.
    #[error("failed to list parameters: {0}")]
    RemoteList(String),

    /// A point lookup failed.
    #[error("failed to fetch parameter {name}: {message}")]
    RemoteFetch {
        /// Remote parameter name
        name: String,
        /// Sanitized remote message
        message: String,
    },

    /// Two remote names normalized to the same local key.
    #[error("duplicate key mapping at {0}")]
    KeyCollision(String),

    /// The remote parameter carried no value.
    #[error("invalid secret received. parameter value is nil for key: {0}")]
    MissingValue(String),

    /// The requested property path did not resolve.
    #[error("key {property} does not exist in secret {key}")]
    PropertyNotFound {
        /// Structured path that was evaluated
        property: String,
        /// Remote parameter name
        key: String,
    },

    /// The value is not a flat JSON object of strings.
    #[error("unable to unmarshal secret {key}: {source}")]
    MalformedValue {
        /// Remote parameter name
        key: String,
        /// Parse error
        #[source]
        source: serde_json::Error,
    },

    /// Credentials could not be resolved.
    #[error("credentials unavailable: {0}")]
    Credentials(String),
}

/// Result type for Parameter Store operations.
pub type ParameterStoreResult<T> = Result<T, ParameterStoreError>;

impl ParameterStoreError {
    /// Check if the caller may retry the operation.
    ///
    /// Only failures reported by the remote service are transient; selector,
    /// mapping and decoding failures will repeat on every attempt.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RemoteList(_) | Self::RemoteFetch { .. } | Self::Credentials(_)
        )
    }

    /// Create a listing error.
    #[must_use]
    pub fn remote_list(msg: impl Into<String>) -> Self {
        Self::RemoteList(msg.into())
    }

    /// Create a point lookup error.
    #[must_use]
    pub fn remote_fetch(name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::RemoteFetch {
            name: name.into(),
            message: msg.into(),
        }
    }

    /// Create a property not found error.
    #[must_use]
    pub fn property_not_found(property: impl Into<String>, key: impl Into<String>) -> Self {
        Self::PropertyNotFound {
            property: property.into(),
            key: key.into(),
        }
    }

    /// Create a credentials error.
    #[must_use]
    pub fn credentials(msg: impl Into<String>) -> Self {
        Self::Credentials(msg.into())
    }
}
