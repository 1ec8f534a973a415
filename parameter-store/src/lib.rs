//! AWS SSM Parameter Store provider for secret synchronization.
//!
//! Resolves lookup requests (a single key, a name pattern or a tag filter)
//! into decrypted values keyed by names usable as local secret keys.
//!
//! ```no_run
//! use parameter_store::{FindRequest, ParameterStore, ParameterStoreConfig, SecretsClient, SsmClient};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ParameterStoreConfig::from_env()?;
//! let store = ParameterStore::new(SsmClient::from_config(&config).await);
//! let secrets = store.get_all_secrets(&FindRequest::by_name("^/dev/myapp/")).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod key;
pub mod matcher;
pub mod pager;
pub mod path;
pub mod provider;
pub mod remote;
pub mod sanitize;
pub mod ssm;
pub mod store;
pub mod telemetry;

pub use config::{ConfigError, ParameterStoreConfig};
pub use error::{ParameterStoreError, ParameterStoreResult};
pub use provider::{FindName, FindRequest, RemoteRef, SecretMap, SecretValue, SecretsClient};
pub use remote::ParameterStoreApi;
pub use secrecy::ExposeSecret;
pub use ssm::SsmClient;
pub use store::ParameterStore;
pub use telemetry::{TracingConfig, init_tracing};
