/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for lens-adapter tests

#![allow(dead_code)]

use std::sync::Arc;

use lens_adapter::{ClientConfig, LensClient, MockWalletSigner, RetryPolicy, WalletSigner};
use serde_json::{Map, Value, json};
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockBuilder, MockServer, Request, Respond, ResponseTemplate};

/// Well-known development key and its checksummed address
pub const TEST_PRIVATE_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const TEST_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

pub const MOCK_ADDRESS: &str = "0x00000000000000000000000000000000000000aa";
pub const MOCK_SIGNATURE: &str = "0xsigned";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server for both API and metadata calls
pub fn test_client(server: &MockServer) -> LensClient {
    let config = ClientConfig {
        retry: RetryPolicy::none(),
        ..ClientConfig::default()
    };
    let metadata_url = format!("{}/metadata", server.uri());
    LensClient::with_config_and_base_urls(config, &server.uri(), &metadata_url)
        .expect("client should build")
}

pub fn mock_signer() -> Arc<dyn WalletSigner> {
    Arc::new(MockWalletSigner::new(MOCK_ADDRESS, MOCK_SIGNATURE))
}

pub fn data(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "data": body }))
}

pub fn graphql_error(message: &str, code: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "errors": [{"message": message, "extensions": {"code": code}}]
    }))
}

pub fn operation(name: &str) -> MockBuilder {
    Mock::given(method("POST")).and(body_partial_json(json!({ "operationName": name })))
}

pub async fn mount_challenge(server: &MockServer, text: &str) {
    operation("Challenge")
        .respond_with(data(json!({"challenge": {"text": text}})))
        .mount(server)
        .await;
}

pub async fn mount_authenticate(server: &MockServer, token: &str) {
    operation("Authenticate")
        .respond_with(data(json!({"authenticate": {"accessToken": token}})))
        .mount(server)
        .await;
}

pub async fn mount_profiles(server: &MockServer, items: Value) {
    operation("UserProfiles")
        .respond_with(data(json!({"profiles": {"items": items}})))
        .mount(server)
        .await;
}

/// Challenge, Authenticate (`tok-1`) and one profile `alice` with id `0x01`
pub async fn mount_handshake(server: &MockServer) {
    mount_challenge(server, "nonce-123").await;
    mount_authenticate(server, "tok-1").await;
    mount_profiles(server, json!([{"id": "0x01", "handle": "alice"}])).await;
}

/// Answers with the request's own variables placed at `data.<root>`
pub struct EchoVariables {
    pub root: &'static str,
}

impl Respond for EchoVariables {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = match serde_json::from_slice(&request.body) {
            Ok(body) => body,
            Err(_) => return ResponseTemplate::new(400),
        };
        let mut data = Map::new();
        data.insert(self.root.to_string(), body["variables"].clone());
        ResponseTemplate::new(200).set_body_json(json!({ "data": Value::Object(data) }))
    }
}
