//! In-memory Parameter Store for testing.
//!
//! Parameters are listed in insertion order and split into pages of a fixed
//! size. Every API call is recorded so tests can assert on call counts and
//! continuation tokens.

use async_trait::async_trait;
use parameter_store::remote::{
    DescribePage, DescribeRequest, Parameter, ParameterMetadata, ParameterStoreApi, RemoteError,
};
use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, PoisonError};

/// A call made against the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    /// Point lookup
    GetParameter {
        /// Parameter name
        name: String,
        /// Whether decryption was requested
        with_decryption: bool,
    },
    /// Describe call
    DescribeParameters(DescribeRequest),
    /// Credential check
    CheckCredentials,
}

#[derive(Debug, Clone)]
struct StoredParameter {
    name: String,
    value: Option<String>,
    tags: BTreeMap<String, String>,
}

/// Paginated in-memory Parameter Store.
#[derive(Debug)]
pub struct MockParameterStore {
    parameters: Vec<StoredParameter>,
    page_size: usize,
    failing_lookups: HashSet<String>,
    fail_describe_on_page: Option<usize>,
    credentials_error: Option<String>,
    calls: Mutex<Vec<MockCall>>,
}

impl Default for MockParameterStore {
    fn default() -> Self {
        Self {
            parameters: Vec::new(),
            page_size: 10,
            failing_lookups: HashSet::new(),
            fail_describe_on_page: None,
            credentials_error: None,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl MockParameterStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of parameters per page (minimum 1).
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Add a parameter with a value.
    #[must_use]
    pub fn with_parameter(self, name: &str, value: &str) -> Self {
        self.with_tagged_parameter(name, value, &[])
    }

    /// Add a parameter with a value and tags.
    #[must_use]
    pub fn with_tagged_parameter(mut self, name: &str, value: &str, tags: &[(&str, &str)]) -> Self {
        self.parameters.push(StoredParameter {
            name: name.to_string(),
            value: Some(value.to_string()),
            tags: tags
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        });
        self
    }

    /// Add a parameter whose lookup returns no value.
    #[must_use]
    pub fn with_valueless_parameter(mut self, name: &str) -> Self {
        self.parameters.push(StoredParameter {
            name: name.to_string(),
            value: None,
            tags: BTreeMap::new(),
        });
        self
    }

    /// Make lookups of `name` fail.
    #[must_use]
    pub fn with_failing_lookup(mut self, name: &str) -> Self {
        self.failing_lookups.insert(name.to_string());
        self
    }

    /// Make the describe call for the zero-based page `page` fail.
    #[must_use]
    pub const fn with_failing_page(mut self, page: usize) -> Self {
        self.fail_describe_on_page = Some(page);
        self
    }

    /// Make credential checks fail with `message`.
    #[must_use]
    pub fn with_credentials_error(mut self, message: &str) -> Self {
        self.credentials_error = Some(message.to_string());
        self
    }

    /// Every call made so far.
    #[must_use]
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of describe calls made so far.
    #[must_use]
    pub fn describe_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, MockCall::DescribeParameters(_)))
            .count()
    }

    /// Names looked up so far, in call order.
    #[must_use]
    pub fn lookups(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                MockCall::GetParameter { name, .. } => Some(name),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: MockCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }

    fn page_token(page: usize) -> String {
        format!("page-{page}")
    }

    fn parse_token(token: &str) -> Result<usize, RemoteError> {
        token
            .strip_prefix("page-")
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| RemoteError::new(format!("InvalidNextToken: {token}")))
    }
}

#[async_trait]
impl ParameterStoreApi for MockParameterStore {
    async fn get_parameter(
        &self,
        name: &str,
        with_decryption: bool,
    ) -> Result<Parameter, RemoteError> {
        self.record(MockCall::GetParameter {
            name: name.to_string(),
            with_decryption,
        });

        if self.failing_lookups.contains(name) {
            return Err(RemoteError::new(format!(
                "InternalServerError: lookup failed for {name}, request id: 0f4e-mock"
            )));
        }

        self.parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| Parameter {
                name: p.name.clone(),
                value: p.value.clone(),
            })
            .ok_or_else(|| RemoteError::new(format!("ParameterNotFound: {name}")))
    }

    async fn describe_parameters(
        &self,
        request: DescribeRequest,
    ) -> Result<DescribePage, RemoteError> {
        self.record(MockCall::DescribeParameters(request.clone()));

        let page = request
            .next_token
            .as_deref()
            .map_or(Ok(0), Self::parse_token)?;
        if self.fail_describe_on_page == Some(page) {
            return Err(RemoteError::new(
                "ThrottlingException: Rate exceeded, request id: 9a1b-mock",
            ));
        }

        let selected: Vec<&StoredParameter> = self
            .parameters
            .iter()
            .filter(|p| {
                request.filters.iter().all(|f| {
                    f.tag()
                        .and_then(|tag| p.tags.get(tag))
                        .is_some_and(|v| f.values.contains(v))
                })
            })
            .collect();

        let start = page * self.page_size;
        let end = (start + self.page_size).min(selected.len());
        let parameters = selected
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .map(|p| ParameterMetadata {
                name: Some(p.name.clone()),
                tags: p.tags.clone(),
            })
            .collect();

        Ok(DescribePage {
            parameters,
            next_token: (end < selected.len()).then(|| Self::page_token(page + 1)),
        })
    }

    async fn check_credentials(&self) -> Result<(), RemoteError> {
        self.record(MockCall::CheckCredentials);
        self.credentials_error
            .as_ref()
            .map_or(Ok(()), |msg| Err(RemoteError::new(msg.clone())))
    }
}
