//! Generic secrets client trait.
//!
//! The sync controller talks to every backend through [`SecretsClient`];
//! [`crate::ParameterStore`] is the Parameter Store implementation.

use async_trait::async_trait;
use secrecy::SecretSlice;
use std::collections::BTreeMap;

/// Decrypted secret payload.
///
/// Zeroized on drop and redacted in `Debug` output; read it through
/// [`secrecy::ExposeSecret`].
pub type SecretValue = SecretSlice<u8>;

/// Local key to secret value, built by one call.
pub type SecretMap = BTreeMap<String, SecretValue>;

/// Name selector for discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindName {
    /// Regular expression matched against remote names
    pub regexp: String,
}

/// Discovery request: a name pattern or a set of required tags.
///
/// When both are set the name pattern wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindRequest {
    /// Name selector
    pub name: Option<FindName>,
    /// Tags that must all be present with equal values
    pub tags: BTreeMap<String, String>,
}

impl FindRequest {
    /// Select by name pattern.
    #[must_use]
    pub fn by_name(regexp: impl Into<String>) -> Self {
        Self {
            name: Some(FindName {
                regexp: regexp.into(),
            }),
            tags: BTreeMap::new(),
        }
    }

    /// Select by tags.
    #[must_use]
    pub fn by_tags<I, K, V>(tags: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            name: None,
            tags: tags.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Add a required tag.
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }
}

/// Reference to a single remote value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteRef {
    /// Remote parameter name
    pub key: String,
    /// Structured path into the value
    pub property: Option<String>,
}

impl RemoteRef {
    /// Reference a whole value.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            property: None,
        }
    }

    /// Narrow to a structured path.
    #[must_use]
    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    /// The property, treating an empty string as absent.
    #[must_use]
    pub fn property(&self) -> Option<&str> {
        self.property.as_deref().filter(|p| !p.is_empty())
    }
}

/// Backend-agnostic secrets retrieval.
#[async_trait]
pub trait SecretsClient: Send + Sync {
    /// Error type of the backend.
    type Error: std::error::Error + Send + Sync;

    /// Discover and fetch every secret selected by `request`.
    async fn get_all_secrets(&self, request: &FindRequest) -> Result<SecretMap, Self::Error>;

    /// Fetch one value, optionally narrowed to a property.
    async fn get_secret(&self, reference: &RemoteRef) -> Result<SecretValue, Self::Error>;

    /// Fetch one value and decompose it as a flat JSON object of strings.
    async fn get_secret_map(&self, reference: &RemoteRef) -> Result<SecretMap, Self::Error>;

    /// Check that the backend credentials resolve.
    async fn validate(&self) -> Result<(), Self::Error>;

    /// Release backend resources.
    async fn close(&self) -> Result<(), Self::Error>;
}
