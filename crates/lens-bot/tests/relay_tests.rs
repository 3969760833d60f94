/*
[INPUT]:  Mock Lens API and metadata endpoints, scripted message input
[OUTPUT]: Relay reply verification
[POS]:    Integration test layer - message relay end to end
[UPDATE]: When changing relay filtering, replies or re-authentication
*/

use std::sync::Arc;

use lens_adapter::{ClientConfig, LensClient, LensSession, MockWalletSigner, RetryPolicy};
use lens_bot::{Command, MessageRelay, run_command};
use serde_json::{Value, json};
use tokio_test::assert_ok;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockBuilder, MockServer, ResponseTemplate};

fn data(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "data": body }))
}

fn operation(name: &str) -> MockBuilder {
    Mock::given(method("POST")).and(body_partial_json(json!({ "operationName": name })))
}

async fn mount_handshake(server: &MockServer) {
    operation("Challenge")
        .respond_with(data(json!({"challenge": {"text": "nonce-123"}})))
        .mount(server)
        .await;
    operation("Authenticate")
        .respond_with(data(json!({"authenticate": {"accessToken": "tok-1"}})))
        .mount(server)
        .await;
    operation("UserProfiles")
        .respond_with(data(json!({"profiles": {"items": [
            {"id": "0x01", "handle": "alice", "stats": {"totalFollowers": 2, "totalFollowing": 1}}
        ]}})))
        .mount(server)
        .await;
}

async fn mount_metadata(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/metadata"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "arw-1"})))
        .mount(server)
        .await;
}

fn relayed() -> ResponseTemplate {
    data(json!({"createPostViaDispatcher": {
        "__typename": "RelayerResult", "txHash": "0xhash", "txId": "tx-1"
    }}))
}

async fn connect(server: &MockServer) -> LensSession {
    let config = ClientConfig {
        retry: RetryPolicy::none(),
        ..ClientConfig::default()
    };
    let metadata_url = format!("{}/metadata", server.uri());
    let client = assert_ok!(LensClient::with_config_and_base_urls(
        config,
        &server.uri(),
        &metadata_url
    ));
    let signer = Arc::new(MockWalletSigner::new(
        "0x00000000000000000000000000000000000000aa",
        "0xsigned",
    ));
    assert_ok!(LensSession::connect(client, signer).await)
}

#[tokio::test]
async fn test_message_is_posted() {
    let server = MockServer::start().await;
    mount_handshake(&server).await;
    mount_metadata(&server).await;
    operation("CreatePostViaDispatcher")
        .respond_with(relayed())
        .expect(1)
        .mount(&server)
        .await;

    let relay = MessageRelay::new(connect(&server).await);
    let reply = relay.handle_message("gm frens").await;
    assert_eq!(reply.as_deref(), Some("alice post: gm frens success"));
}

#[tokio::test]
async fn test_commands_and_blank_lines_are_ignored() {
    let server = MockServer::start().await;
    mount_handshake(&server).await;
    operation("CreatePostViaDispatcher")
        .respond_with(relayed())
        .expect(0)
        .mount(&server)
        .await;

    let relay = MessageRelay::new(connect(&server).await);
    assert!(relay.handle_message("/start").await.is_none());
    assert!(relay.handle_message("   ").await.is_none());
}

#[tokio::test]
async fn test_failed_post_is_reported() {
    let server = MockServer::start().await;
    mount_handshake(&server).await;
    mount_metadata(&server).await;
    operation("CreatePostViaDispatcher")
        .respond_with(data(json!({"createPostViaDispatcher": {
            "__typename": "RelayError", "reason": "REJECTED"
        }})))
        .mount(&server)
        .await;

    let relay = MessageRelay::new(connect(&server).await);
    let reply = relay.handle_message("gm").await;
    assert_eq!(
        reply.as_deref(),
        Some("alice post failed: API error: REJECTED")
    );
}

#[tokio::test]
async fn test_unauthorized_post_reauthenticates_once() {
    let server = MockServer::start().await;
    operation("Authenticate")
        .respond_with(data(json!({"authenticate": {"accessToken": "tok-1"}})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    operation("Authenticate")
        .respond_with(data(json!({"authenticate": {"accessToken": "tok-2"}})))
        .mount(&server)
        .await;
    mount_handshake(&server).await;
    Mock::given(method("POST"))
        .and(path("/metadata"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "arw-1"})))
        .expect(1)
        .mount(&server)
        .await;
    operation("CreatePostViaDispatcher")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{"message": "token expired", "extensions": {"code": "UNAUTHENTICATED"}}]
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    operation("CreatePostViaDispatcher")
        .and(body_partial_json(json!({
            "variables": {"request": {"contentURI": "https://arweave.net/arw-1"}}
        })))
        .respond_with(relayed())
        .expect(1)
        .mount(&server)
        .await;

    let session = connect(&server).await;
    let relay = MessageRelay::new(session.clone());

    let reply = relay.handle_message("gm").await;
    assert_eq!(reply.as_deref(), Some("alice post: gm success"));
    assert_eq!(session.credentials().generation, 1);
    assert_eq!(session.credentials().token.token, "tok-2");
}

#[tokio::test]
async fn test_run_replies_per_message_until_eof() {
    let server = MockServer::start().await;
    mount_handshake(&server).await;
    mount_metadata(&server).await;
    operation("CreatePostViaDispatcher")
        .respond_with(relayed())
        .expect(2)
        .mount(&server)
        .await;

    let relay = MessageRelay::new(connect(&server).await);
    let input: &[u8] = b"gm\n/help\n\nwagmi\n";
    let mut output = Vec::new();

    let replied = assert_ok!(relay.run(input, &mut output, CancellationToken::new()).await);
    assert_eq!(replied, 2);
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "alice post: gm success\nalice post: wagmi success\n"
    );
}

#[tokio::test]
async fn test_run_stops_on_shutdown() {
    let server = MockServer::start().await;
    mount_handshake(&server).await;

    let relay = MessageRelay::new(connect(&server).await);
    let shutdown = CancellationToken::new();
    shutdown.cancel();

    // An open duplex stream never reaches EOF on its own
    let (_writer, reader) = tokio::io::duplex(64);
    let input = tokio::io::BufReader::new(reader);
    let replied = assert_ok!(relay.run(input, tokio::io::sink(), shutdown).await);
    assert_eq!(replied, 0);
}

#[tokio::test]
async fn test_profile_command_uses_session_profile() {
    let server = MockServer::start().await;
    mount_handshake(&server).await;

    let session = connect(&server).await;
    let reply = assert_ok!(run_command(&session, &Command::Profile { handle: None }).await);
    assert_eq!(reply, "alice (0x01): 2 followers, 1 following");

    assert!(run_command(&session, &Command::Relay).await.is_err());
}
