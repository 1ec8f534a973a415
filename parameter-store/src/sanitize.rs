//! Sanitization of remote error messages.
//!
//! AWS errors embed request identifiers and, for signature failures, the
//! credential scope. Neither belongs in a status surfaced to users.

use once_cell::sync::Lazy;
use regex::Regex;

static SENSITIVE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [r"(?i)request id: (\S+)", r" Credential=.+"]
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
});

/// Remove request ids and credential scopes from a remote error message.
#[must_use]
pub fn sanitize_message(message: &str) -> String {
    SENSITIVE_PATTERNS
        .iter()
        .fold(message.to_string(), |msg, re| {
            re.replace_all(&msg, "").into_owned()
        })
}

/// Sanitize any displayable error into a plain message.
#[must_use]
pub fn sanitize_error(err: &dyn std::error::Error) -> String {
    sanitize_message(&err.to_string())
}
