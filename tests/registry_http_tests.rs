/// HTTP-level tests for the reqwest transport and registry client
///
/// These run against a local mock server; no real registry is contacted.
use meridian_trust::error::VerifierError;
use meridian_trust::registry::locator::RegistryEndpoint;
use meridian_trust::registry::{HttpTransport, RegistryTransport, TrustRegistryClient};
use meridian_trust::VerifierConfig;
use mockito::{mock, server_url, Matcher};
use std::sync::Arc;

fn transport() -> HttpTransport {
    HttpTransport::new(&VerifierConfig::default()).unwrap()
}

fn client() -> TrustRegistryClient {
    TrustRegistryClient::new(
        Arc::new(transport()),
        RegistryEndpoint {
            bootstrap_url: server_url(),
            api_endpoint: server_url(),
        },
    )
}

#[tokio::test]
async fn get_json_parses_success_body() {
    let _m = mock("GET", "/well-formed")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"api_endpoint": "https://registry.example.com"}"#)
        .create();

    let value = transport()
        .get_json(&server_url(), "/well-formed")
        .await
        .unwrap();
    assert_eq!(value["api_endpoint"], "https://registry.example.com");
}

#[tokio::test]
async fn get_json_rejects_error_status() {
    let _m = mock("GET", "/absent").with_status(404).create();

    let err = transport()
        .get_json(&server_url(), "/absent")
        .await
        .unwrap_err();
    assert!(matches!(err, VerifierError::Response(_)));
}

#[tokio::test]
async fn get_json_rejects_non_json_body() {
    let _m = mock("GET", "/html")
        .with_status(200)
        .with_body("<html>not json</html>")
        .create();

    let err = transport().get_json(&server_url(), "/html").await.unwrap_err();
    assert!(matches!(err, VerifierError::Response(_)));
}

#[test]
fn connection_refused_is_a_transport_error() {
    // Port 1 is never listening
    let err = tokio_test::block_on(transport().get_json("http://127.0.0.1:1", "/any"))
        .unwrap_err();
    assert!(matches!(err, VerifierError::Transport(_)));
}

#[tokio::test]
async fn did_document_percent_encodes_the_did() {
    let _m = mock("GET", "/did/identifiers/did%3Aweb%3Aexample.com")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"id": "did:web:example.com",
                "verificationMethod": [{"id": "did:web:example.com#key-1"}]}"#,
        )
        .create();

    let doc = client().did_document("did:web:example.com").await.unwrap();
    assert_eq!(doc.verification_method.len(), 1);
    assert_eq!(doc.verification_method[0].id, "did:web:example.com#key-1");
}

#[tokio::test]
async fn trusted_issuer_absence_is_an_error() {
    let _m = mock("GET", "/did/issuers/did%3Aweb%3Aexample.com%3Agone")
        .with_status(404)
        .create();

    assert!(client()
        .trusted_issuer("did:web:example.com:gone")
        .await
        .is_err());
}

#[tokio::test]
async fn status_history_posts_hash_and_domain() {
    let _m = mock("POST", "/issuer/credential/status/history")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "credential_hash": "cafe",
            "domain": "example.com",
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"items": [{"path": "/issuers", "credential_status": 1}]}"#)
        .create();

    let history = client()
        .credential_status_history("cafe", "example.com")
        .await
        .unwrap();
    assert_eq!(history.items.len(), 1);
    assert_eq!(history.items[0].credential_status, 1);
}
