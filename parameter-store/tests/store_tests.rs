//! End-to-end behavior of the provider against an in-memory store.

use parameter_store::remote::ParameterFilter;
use parameter_store::{
    ExposeSecret, FindRequest, ParameterStore, ParameterStoreError, RemoteRef, SecretsClient,
};
use std::sync::{Arc, Mutex};
use test_utils::fixtures::{application_store, flat_json_secret, nested_json_secret};
use test_utils::{MockCall, MockParameterStore};
use tracing::Subscriber;
use tracing::span::{Attributes, Id};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;

#[tokio::test]
async fn test_find_by_name_maps_keys() {
    let store = ParameterStore::new(application_store());

    let data = store
        .get_all_secrets(&FindRequest::by_name("^/dev/myapp/"))
        .await
        .unwrap();

    let keys: Vec<&str> = data.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec!["dev_myapp_config", "dev_myapp_password", "dev_myapp_username"]
    );
    assert_eq!(data["dev_myapp_password"].expose_secret(), b"dev-password");
}

#[tokio::test]
async fn test_find_by_name_walks_all_pages() {
    let store = ParameterStore::new(application_store());

    let data = store
        .get_all_secrets(&FindRequest::by_name("password$"))
        .await
        .unwrap();

    assert_eq!(data.len(), 2);
    assert!(data.contains_key("prod_myapp_password"));
    // five parameters, two per page
    assert_eq!(store.api().describe_count(), 3);
}

#[tokio::test]
async fn test_find_by_tags_sends_server_filters() {
    let store = ParameterStore::new(application_store());

    let request = FindRequest::by_tags([("env", "prod"), ("team", "payments")]);
    let data = store.get_all_secrets(&request).await.unwrap();

    assert_eq!(data.len(), 2);
    assert!(data.contains_key("prod_myapp_database"));

    let first_describe = store
        .api()
        .calls()
        .into_iter()
        .find_map(|c| match c {
            MockCall::DescribeParameters(request) => Some(request),
            _ => None,
        })
        .unwrap();
    assert_eq!(
        first_describe.filters,
        vec![
            ParameterFilter::tag_equals("env", "prod"),
            ParameterFilter::tag_equals("team", "payments"),
        ]
    );
    assert_eq!(first_describe.next_token, None);
}

#[tokio::test]
async fn test_lookups_request_decryption() {
    let store = ParameterStore::new(application_store());
    store
        .get_all_secrets(&FindRequest::by_name("^/dev/"))
        .await
        .unwrap();

    let calls = store.api().calls();
    assert!(calls.iter().all(|c| match c {
        MockCall::GetParameter { with_decryption, .. } => *with_decryption,
        _ => true,
    }));
}

#[tokio::test]
async fn test_collision_scenario() {
    let api = MockParameterStore::new()
        .with_parameter("/dev/my_db", "a")
        .with_parameter("/dev/my/db", "b");
    let store = ParameterStore::new(api);

    let err = store
        .get_all_secrets(&FindRequest::by_name("^/dev/"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "duplicate key mapping at dev_my_db");
}

#[tokio::test]
async fn test_list_failure_discards_partial_results() {
    let api = application_store().with_failing_page(1);
    let store = ParameterStore::new(api);

    let err = store
        .get_all_secrets(&FindRequest::by_name(".*"))
        .await
        .unwrap_err();
    match err {
        ParameterStoreError::RemoteList(message) => {
            assert!(message.contains("ThrottlingException"));
            assert!(!message.contains("9a1b-mock"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    // both entries of the first page were fetched before the failure
    assert_eq!(store.api().lookups().len(), 2);
}

#[tokio::test]
async fn test_fetch_failure_aborts() {
    let api = application_store().with_failing_lookup("/dev/myapp/username");
    let store = ParameterStore::new(api);

    let err = store
        .get_all_secrets(&FindRequest::by_name(".*"))
        .await
        .unwrap_err();
    assert!(matches!(
        &err,
        ParameterStoreError::RemoteFetch { name, message }
            if name == "/dev/myapp/username" && !message.contains("0f4e-mock")
    ));
    assert_eq!(store.api().describe_count(), 1);
}

#[tokio::test]
async fn test_bulk_fetch_missing_value() {
    let api = MockParameterStore::new().with_valueless_parameter("/dev/empty");
    let store = ParameterStore::new(api);

    let err = store
        .get_all_secrets(&FindRequest::by_name(".*"))
        .await
        .unwrap_err();
    assert!(matches!(err, ParameterStoreError::MissingValue(ref k) if k == "/dev/empty"));
}

#[tokio::test]
async fn test_get_secret_scenarios() {
    let api = MockParameterStore::new()
        .with_parameter("nested", r#"{"a":{"b":"x"}}"#)
        .with_parameter("numeric", r#"{"a":1}"#)
        .with_parameter("db", &nested_json_secret())
        .with_parameter("account", r#"{"id": 123456789012345678901234, "rate": 1.0}"#)
        .with_valueless_parameter("empty");
    let store = ParameterStore::new(api);

    let value = store
        .get_secret(&RemoteRef::new("nested").with_property("a.b"))
        .await
        .unwrap();
    assert_eq!(value.expose_secret(), b"x");

    let err = store
        .get_secret(&RemoteRef::new("numeric").with_property("missing"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ParameterStoreError::PropertyNotFound { ref property, ref key }
            if property == "missing" && key == "numeric"
    ));

    let port = store
        .get_secret(&RemoteRef::new("db").with_property("database.port"))
        .await
        .unwrap();
    assert_eq!(port.expose_secret(), b"5432");

    let cert = store
        .get_secret(&RemoteRef::new("db").with_property(r"tls\.crt"))
        .await
        .unwrap();
    assert_eq!(cert.expose_secret(), b"-----BEGIN CERTIFICATE-----");

    let replica = store
        .get_secret(&RemoteRef::new("db").with_property("database.replicas.1"))
        .await
        .unwrap();
    assert_eq!(replica.expose_secret(), b"db-2.internal");

    let id = store
        .get_secret(&RemoteRef::new("account").with_property("id"))
        .await
        .unwrap();
    assert_eq!(id.expose_secret(), b"123456789012345678901234");

    let rate = store
        .get_secret(&RemoteRef::new("account").with_property("rate"))
        .await
        .unwrap();
    assert_eq!(rate.expose_secret(), b"1.0");

    let err = store.get_secret(&RemoteRef::new("empty")).await.unwrap_err();
    assert!(matches!(err, ParameterStoreError::MissingValue(_)));
}

#[tokio::test]
async fn test_get_secret_raw_value_verbatim() {
    let raw = flat_json_secret();
    let store = ParameterStore::new(MockParameterStore::new().with_parameter("/cfg", &raw));

    let value = store.get_secret(&RemoteRef::new("/cfg")).await.unwrap();
    assert_eq!(value.expose_secret(), raw.as_bytes());
}

#[tokio::test]
async fn test_get_secret_unknown_key() {
    let store = ParameterStore::new(MockParameterStore::new());
    let err = store.get_secret(&RemoteRef::new("/nope")).await.unwrap_err();
    assert!(matches!(err, ParameterStoreError::RemoteFetch { ref name, .. } if name == "/nope"));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_get_secret_map_scenarios() {
    let api = MockParameterStore::new()
        .with_parameter("flat", r#"{"a":"1","b":"2"}"#)
        .with_parameter("numeric", r#"{"a":1}"#)
        .with_parameter("text", "plain text");
    let store = ParameterStore::new(api);

    let data = store.get_secret_map(&RemoteRef::new("flat")).await.unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data["a"].expose_secret(), b"1");
    assert_eq!(data["b"].expose_secret(), b"2");

    for key in ["numeric", "text"] {
        let err = store.get_secret_map(&RemoteRef::new(key)).await.unwrap_err();
        assert!(
            err.to_string().starts_with(&format!("unable to unmarshal secret {key}: ")),
            "{err}"
        );
    }
}

#[tokio::test]
async fn test_validate_uses_credentials_only() {
    let store = ParameterStore::new(MockParameterStore::new());
    store.validate().await.unwrap();
    assert_eq!(store.api().calls(), vec![MockCall::CheckCredentials]);

    let store = ParameterStore::new(
        MockParameterStore::new().with_credentials_error("no providers in chain, request id: abc"),
    );
    let err = store.validate().await.unwrap_err();
    assert_eq!(err.to_string(), "credentials unavailable: no providers in chain, ");
}

#[derive(Clone, Default)]
struct SpanRecorder {
    spans: Arc<Mutex<Vec<(String, Option<String>)>>>,
}

impl SpanRecorder {
    fn parents_of(&self, name: &str) -> Vec<Option<String>> {
        self.spans
            .lock()
            .unwrap()
            .iter()
            .filter(|(span, _)| span == name)
            .map(|(_, parent)| parent.clone())
            .collect()
    }
}

impl<S> Layer<S> for SpanRecorder
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, _attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            let parent = span.parent().map(|p| p.name().to_string());
            self.spans
                .lock()
                .unwrap()
                .push((span.name().to_string(), parent));
        }
    }
}

#[test]
fn test_operations_log_under_injected_span() {
    let recorder = SpanRecorder::default();
    let subscriber = tracing_subscriber::registry().with(recorder.clone());

    tracing::subscriber::with_default(subscriber, || {
        let span = tracing::info_span!("sync_run", store = "team-a");
        let store = ParameterStore::new(application_store()).with_span(span);
        tokio_test::block_on(async {
            let data = store
                .get_all_secrets(&FindRequest::by_name("^/prod/"))
                .await
                .unwrap();
            assert_eq!(data.len(), 2);
            store
                .get_all_secrets(&FindRequest::by_tags([("env", "dev")]))
                .await
                .unwrap();
            store
                .get_secret(&RemoteRef::new("/dev/myapp/password"))
                .await
                .unwrap();
            store
                .get_secret_map(&RemoteRef::new("/dev/myapp/config"))
                .await
                .unwrap();
            store.validate().await.unwrap();
            store.close().await.unwrap();
        });
    });

    assert_eq!(recorder.parents_of("get_all_secrets").len(), 2);
    for operation in ["get_all_secrets", "get_secret", "get_secret_map", "validate"] {
        let parents = recorder.parents_of(operation);
        assert!(!parents.is_empty(), "no {operation} span");
        assert!(
            parents.iter().all(|p| p.as_deref() == Some("sync_run")),
            "{operation} spans not under sync_run: {parents:?}"
        );
    }
}
