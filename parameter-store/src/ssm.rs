//! AWS SDK implementation of [`ParameterStoreApi`].

use crate::config::ParameterStoreConfig;
use crate::remote::{
    DescribePage, DescribeRequest, Parameter, ParameterFilter, ParameterMetadata,
    ParameterStoreApi, RemoteError,
};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_sdk_ssm::error::DisplayErrorContext;
use aws_sdk_ssm::types::ParameterStringFilter;
use tracing::debug;

/// SSM client bound to one AWS session.
#[derive(Debug, Clone)]
pub struct SsmClient {
    client: aws_sdk_ssm::Client,
    credentials: Option<SharedCredentialsProvider>,
}

impl SsmClient {
    /// Create a client from an already loaded AWS configuration.
    #[must_use]
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_ssm::Client::new(sdk_config),
            credentials: sdk_config.credentials_provider(),
        }
    }

    /// Load the AWS configuration and create a client.
    ///
    /// Region, profile and endpoint overrides from `config` take precedence
    /// over the ambient environment.
    pub async fn from_config(config: &ParameterStoreConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(profile) = &config.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint.as_str());
        }
        let sdk_config = loader.load().await;
        debug!(region = ?sdk_config.region(), "loaded aws configuration");
        Self::new(&sdk_config)
    }
}

fn to_sdk_filter(filter: ParameterFilter) -> Result<ParameterStringFilter, RemoteError> {
    ParameterStringFilter::builder()
        .key(filter.key)
        .option(filter.option)
        .set_values(Some(filter.values))
        .build()
        .map_err(|e| RemoteError::new(e.to_string()))
}

#[async_trait]
impl ParameterStoreApi for SsmClient {
    async fn get_parameter(
        &self,
        name: &str,
        with_decryption: bool,
    ) -> Result<Parameter, RemoteError> {
        let output = self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(with_decryption)
            .send()
            .await
            .map_err(|e| RemoteError::new(DisplayErrorContext(&e).to_string()))?;

        Ok(Parameter {
            name: name.to_string(),
            value: output
                .parameter()
                .and_then(|p| p.value())
                .map(ToString::to_string),
        })
    }

    async fn describe_parameters(
        &self,
        request: DescribeRequest,
    ) -> Result<DescribePage, RemoteError> {
        let filters = request
            .filters
            .into_iter()
            .map(to_sdk_filter)
            .collect::<Result<Vec<_>, _>>()?;

        let output = self
            .client
            .describe_parameters()
            .set_parameter_filters((!filters.is_empty()).then_some(filters))
            .set_next_token(request.next_token)
            .send()
            .await
            .map_err(|e| RemoteError::new(DisplayErrorContext(&e).to_string()))?;

        Ok(DescribePage {
            parameters: output
                .parameters()
                .iter()
                .map(|p| ParameterMetadata {
                    name: p.name().map(ToString::to_string),
                    ..ParameterMetadata::default()
                })
                .collect(),
            next_token: output.next_token().map(ToString::to_string),
        })
    }

    async fn check_credentials(&self) -> Result<(), RemoteError> {
        let provider = self
            .credentials
            .as_ref()
            .ok_or_else(|| RemoteError::new("no credentials provider configured"))?;
        provider
            .provide_credentials()
            .await
            .map_err(|e| RemoteError::new(DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }
}
