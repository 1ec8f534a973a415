//! Name matcher for pattern-based discovery.

use crate::error::{ParameterStoreError, ParameterStoreResult};
use regex::Regex;

/// Compiled name pattern.
///
/// Patterns are unanchored regular expressions: `^/dev/` matches every name
/// below `/dev`, `password` matches any name containing it.
#[derive(Debug, Clone)]
pub struct NameMatcher {
    regex: Regex,
}

impl NameMatcher {
    /// Compile a pattern.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterStoreError::InvalidPattern`] for malformed patterns.
    pub fn new(pattern: &str) -> ParameterStoreResult<Self> {
        let regex = Regex::new(pattern).map_err(|source| ParameterStoreError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { regex })
    }

    /// Check whether a parameter name matches.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}
