//! Remote Parameter Store API consumed by the provider.
//!
//! This is the subset of the SSM API the provider needs: a decrypting point
//! lookup and a paginated describe call, plus credential resolution for
//! health checks. [`crate::ssm::SsmClient`] implements it over the AWS SDK.

use async_trait::async_trait;
use std::collections::BTreeMap;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

/// Filter option for tag equality.
pub const FILTER_OPTION_EQUALS: &str = "Equals";

/// Prefix for tag filter keys.
pub const TAG_FILTER_PREFIX: &str = "tag:";

/// Failure reported by the remote service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RemoteError {
    message: String,
}

impl RemoteError {
    /// Create a remote error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Unsanitized message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A parameter as returned by the point lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name
    pub name: String,
    /// Decrypted value, absent if the service returned none
    pub value: Option<String>,
}

/// A parameter as returned by the describe call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterMetadata {
    /// Parameter name; the service may omit it
    pub name: Option<String>,
    /// Tags, when the listing carries them
    pub tags: BTreeMap<String, String>,
}

impl ParameterMetadata {
    /// Metadata for a named parameter without tags.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            tags: BTreeMap::new(),
        }
    }
}

/// Server-side filter for the describe call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterFilter {
    /// Filter key, e.g. `tag:team`
    pub key: String,
    /// Comparison option
    pub option: String,
    /// Accepted values
    pub values: Vec<String>,
}

impl ParameterFilter {
    /// Equality filter on a tag.
    #[must_use]
    pub fn tag_equals(tag: &str, value: &str) -> Self {
        Self {
            key: format!("{TAG_FILTER_PREFIX}{tag}"),
            option: FILTER_OPTION_EQUALS.to_string(),
            values: vec![value.to_string()],
        }
    }

    /// Tag name if this is a tag filter.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.key.strip_prefix(TAG_FILTER_PREFIX)
    }
}

/// One describe request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescribeRequest {
    /// Server-side filters; empty lists everything
    pub filters: Vec<ParameterFilter>,
    /// Continuation token from the previous page
    pub next_token: Option<String>,
}

/// One page of describe results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescribePage {
    /// Parameters on this page
    pub parameters: Vec<ParameterMetadata>,
    /// Token for the next page, absent on the last page
    pub next_token: Option<String>,
}

/// Remote Parameter Store operations.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ParameterStoreApi: Send + Sync {
    /// Look up a single parameter.
    async fn get_parameter(
        &self,
        name: &str,
        with_decryption: bool,
    ) -> Result<Parameter, RemoteError>;

    /// Fetch one page of parameter metadata.
    async fn describe_parameters(
        &self,
        request: DescribeRequest,
    ) -> Result<DescribePage, RemoteError>;

    /// Resolve the configured credentials without calling the API.
    async fn check_credentials(&self) -> Result<(), RemoteError>;
}
