//! Parameter Store secrets client.
//!
//! Discovery pages through the describe call and fetches every selected
//! parameter one after another; nothing is fetched concurrently and nothing
//! is cached between calls.

use crate::error::{ParameterStoreError, ParameterStoreResult};
use crate::key::map_secret_key;
use crate::matcher::NameMatcher;
use crate::pager::pages;
use crate::path;
use crate::provider::{FindRequest, RemoteRef, SecretMap, SecretValue, SecretsClient};
use crate::remote::{ParameterFilter, ParameterMetadata, ParameterStoreApi};
use crate::sanitize::sanitize_error;
use async_trait::async_trait;
use futures::TryStreamExt;
use secrecy::ExposeSecret;
use std::collections::{BTreeMap, HashMap};
use std::pin::pin;
use tracing::{Instrument, Span, debug, info, info_span, warn};
use zeroize::Zeroizing;

/// Parameter Store provider over any [`ParameterStoreApi`].
pub struct ParameterStore<A> {
    api: A,
    span: Span,
}

impl<A: ParameterStoreApi> ParameterStore<A> {
    /// Create a provider logging under a `parameter_store` span.
    #[must_use]
    pub fn new(api: A) -> Self {
        Self {
            api,
            span: info_span!("parameter_store"),
        }
    }

    /// Log every call under `span` instead.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// The underlying API client.
    pub const fn api(&self) -> &A {
        &self.api
    }

    async fn find_by_name(&self, pattern: &str) -> ParameterStoreResult<SecretMap> {
        let matcher = NameMatcher::new(pattern)?;
        let mut data = SecretMap::new();
        let mut listing = pin!(pages(&self.api, Vec::new()));

        while let Some(parameters) = listing.try_next().await? {
            info!(parameters = parameters.len(), "find by name");
            for name in parameters.into_iter().filter_map(named) {
                if !matcher.matches(&name) {
                    continue;
                }
                self.fetch_and_set(&mut data, &name).await?;
            }
        }
        Ok(data)
    }

    async fn find_by_tags(&self, tags: &BTreeMap<String, String>) -> ParameterStoreResult<SecretMap> {
        let filters = tags
            .iter()
            .map(|(k, v)| ParameterFilter::tag_equals(k, v))
            .collect();
        let mut data = SecretMap::new();
        let mut listing = pin!(pages(&self.api, filters));

        while let Some(parameters) = listing.try_next().await? {
            debug!(parameters = parameters.len(), "find by tags");
            for name in parameters.into_iter().filter_map(named) {
                self.fetch_and_set(&mut data, &name).await?;
            }
        }
        Ok(data)
    }

    async fn fetch_and_set(&self, data: &mut SecretMap, name: &str) -> ParameterStoreResult<()> {
        // `/dev/my_db` and `/dev/my/db` both map to `dev_my_db`
        let key = map_secret_key(name);
        if data.contains_key(&key) {
            return Err(ParameterStoreError::KeyCollision(key));
        }

        let value = self
            .fetch_value(name)
            .await?
            .ok_or_else(|| ParameterStoreError::MissingValue(name.to_string()))?;

        debug!(name, key = %key, "mapped parameter");
        data.insert(key, SecretValue::from(value.into_bytes()));
        Ok(())
    }

    async fn fetch_value(&self, name: &str) -> ParameterStoreResult<Option<String>> {
        let parameter = self
            .api
            .get_parameter(name, true)
            .await
            .map_err(|e| ParameterStoreError::remote_fetch(name, sanitize_error(&e)))?;
        Ok(parameter.value)
    }

    async fn extract(&self, reference: &RemoteRef) -> ParameterStoreResult<SecretValue> {
        let value = self.fetch_value(&reference.key).await?;

        let Some(property) = reference.property() else {
            return value
                .map(|v| SecretValue::from(v.into_bytes()))
                .ok_or_else(|| ParameterStoreError::MissingValue(reference.key.clone()));
        };

        // only the resolved property outlives this call
        let document = value.map(Zeroizing::new);
        document
            .as_deref()
            .and_then(|document| path::get(document, property))
            .map(|v| SecretValue::from(v.into_bytes()))
            .ok_or_else(|| ParameterStoreError::property_not_found(property, &reference.key))
    }

    async fn decompose(&self, reference: &RemoteRef) -> ParameterStoreResult<SecretMap> {
        let raw = self.extract(reference).await?;
        let kv: HashMap<String, String> =
            serde_json::from_slice(raw.expose_secret()).map_err(|source| {
                ParameterStoreError::MalformedValue {
                    key: reference.key.clone(),
                    source,
                }
            })?;
        Ok(kv
            .into_iter()
            .map(|(k, v)| (k, SecretValue::from(v.into_bytes())))
            .collect())
    }
}

fn named(metadata: ParameterMetadata) -> Option<String> {
    if metadata.name.is_none() {
        warn!("skipping listed parameter without a name");
    }
    metadata.name
}

#[async_trait]
impl<A: ParameterStoreApi> SecretsClient for ParameterStore<A> {
    type Error = ParameterStoreError;

    async fn get_all_secrets(&self, request: &FindRequest) -> ParameterStoreResult<SecretMap> {
        if let Some(name) = &request.name {
            let span = info_span!(parent: &self.span, "get_all_secrets", selector = "name", pattern = %name.regexp);
            return self.find_by_name(&name.regexp).instrument(span).await;
        }
        if !request.tags.is_empty() {
            let span = info_span!(parent: &self.span, "get_all_secrets", selector = "tags", tags = request.tags.len());
            return self.find_by_tags(&request.tags).instrument(span).await;
        }
        Err(ParameterStoreError::SelectorMissing)
    }

    async fn get_secret(&self, reference: &RemoteRef) -> ParameterStoreResult<SecretValue> {
        let span = info_span!(parent: &self.span, "get_secret", key = %reference.key);
        span.in_scope(|| info!("fetching secret value"));
        self.extract(reference).instrument(span).await
    }

    async fn get_secret_map(&self, reference: &RemoteRef) -> ParameterStoreResult<SecretMap> {
        let span = info_span!(parent: &self.span, "get_secret_map", key = %reference.key);
        span.in_scope(|| info!("fetching secret map"));
        self.decompose(reference).instrument(span).await
    }

    async fn validate(&self) -> ParameterStoreResult<()> {
        let span = info_span!(parent: &self.span, "validate");
        self.api
            .check_credentials()
            .instrument(span)
            .await
            .map_err(|e| ParameterStoreError::credentials(sanitize_error(&e)))
    }

    async fn close(&self) -> ParameterStoreResult<()> {
        Ok(())
    }
}
