//! Test fixtures with sample parameter values.

use crate::mocks::MockParameterStore;
use serde_json::json;

/// A flat JSON object of strings.
#[must_use]
pub fn flat_json_secret() -> String {
    json!({"username": "admin", "password": "s3cr3t"}).to_string()
}

/// A nested JSON document.
#[must_use]
pub fn nested_json_secret() -> String {
    json!({
        "database": {
            "host": "db.internal",
            "port": 5432,
            "replicas": ["db-1.internal", "db-2.internal"]
        },
        "tls.crt": "-----BEGIN CERTIFICATE-----"
    })
    .to_string()
}

/// A JSON object with a non-string value.
#[must_use]
pub fn non_string_json_secret() -> String {
    json!({"a": 1}).to_string()
}

/// A small store resembling a team's application hierarchy.
///
/// `/dev/myapp/*` parameters are tagged `env=dev`, `/prod/myapp/*`
/// parameters `env=prod`; everything is tagged `team=payments`.
#[must_use]
pub fn application_store() -> MockParameterStore {
    MockParameterStore::new()
        .with_page_size(2)
        .with_tagged_parameter(
            "/dev/myapp/password",
            "dev-password",
            &[("env", "dev"), ("team", "payments")],
        )
        .with_tagged_parameter(
            "/dev/myapp/username",
            "dev-user",
            &[("env", "dev"), ("team", "payments")],
        )
        .with_tagged_parameter(
            "/dev/myapp/config",
            &flat_json_secret(),
            &[("env", "dev"), ("team", "payments")],
        )
        .with_tagged_parameter(
            "/prod/myapp/password",
            "prod-password",
            &[("env", "prod"), ("team", "payments")],
        )
        .with_tagged_parameter(
            "/prod/myapp/database",
            &nested_json_secret(),
            &[("env", "prod"), ("team", "payments")],
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_are_json() {
        for raw in [flat_json_secret(), nested_json_secret(), non_string_json_secret()] {
            assert!(serde_json::from_str::<serde_json::Value>(&raw).is_ok());
        }
    }
}
