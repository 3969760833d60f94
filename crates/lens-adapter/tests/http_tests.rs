/*
[INPUT]:  Mock GraphQL responses
[OUTPUT]: Test results for the request dispatcher
[POS]:    Integration tests - dispatch, envelope classification, wire format
[UPDATE]: When envelope handling or operation payloads change
*/

mod common;

use common::{
    EchoVariables, data, mock_signer, mount_handshake, operation, setup_mock_server, test_client,
};
use lens_adapter::graphql::catalog;
use lens_adapter::{
    AccessToken, ClientConfig, CollectModuleParams, CreatePublicPostRequest, FeedEventItemType,
    FeedRequest, LensClient, LensError, LensSession, OperationKind, ReactionRequest, ReactionType,
    ReferenceModuleParams, RequestVars,
};
use serde_json::json;
use tokio_test::assert_ok;
use wiremock::matchers::{header, method};
use wiremock::{Mock, ResponseTemplate};

#[test]
fn test_client_with_config() {
    let config = ClientConfig::default();
    let _client = assert_ok!(LensClient::with_config(config));
}

#[test]
fn test_catalog_documents_validate() {
    assert_ok!(catalog::validate_all());
    for op in catalog::ALL {
        assert_eq!(op.is_idempotent(), op.kind == OperationKind::Query);
    }
}

#[tokio::test]
async fn test_authorized_operation_without_token_sends_nothing() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .execute(&catalog::TIMELINE, json!({"request": {}}), None)
        .await
        .unwrap_err();

    assert!(err.is_auth_error());
    assert!(matches!(err, LensError::MissingToken { ref operation } if operation == "Timeline"));
}

#[tokio::test]
async fn test_errors_win_over_data() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"recommendedProfiles": []},
            "errors": [{"message": "partial failure", "extensions": {"code": "INTERNAL"}}]
        })))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .execute(&catalog::RECOMMENDED_PROFILES, json!({}), None)
        .await
        .unwrap_err();

    match err {
        LensError::Api { reason, code } => {
            assert_eq!(reason, "partial failure");
            assert_eq!(code.as_deref(), Some("INTERNAL"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_post_variables_round_trip_through_echo() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .respond_with(EchoVariables {
            root: "createPostViaDispatcher",
        })
        .mount(&server)
        .await;

    let vars = RequestVars::new(CreatePublicPostRequest {
        profile_id: "0x01".to_string(),
        content_uri: "https://arweave.net/abc".to_string(),
        collect_module: CollectModuleParams::default(),
        reference_module: ReferenceModuleParams::post_default(),
    });
    let token = AccessToken::new("tok-1", "0xabc");

    let echoed: RequestVars<CreatePublicPostRequest> = assert_ok!(
        test_client(&server)
            .execute_typed(&catalog::CREATE_POST_VIA_DISPATCHER, &vars, Some(&token))
            .await
    );
    assert_eq!(echoed, vars);
}

#[tokio::test]
async fn test_feed_and_reaction_variables_round_trip() {
    let server = setup_mock_server().await;
    operation("Timeline")
        .respond_with(EchoVariables { root: "feed" })
        .mount(&server)
        .await;
    operation("AddReaction")
        .respond_with(EchoVariables { root: "addReaction" })
        .mount(&server)
        .await;

    let client = test_client(&server);
    let token = AccessToken::new("tok-1", "0xabc");

    let feed = RequestVars::new(FeedRequest {
        profile_id: "0x01".to_string(),
        limit: 10,
        feed_event_item_types: FeedEventItemType::TIMELINE.to_vec(),
    });
    let echoed: RequestVars<FeedRequest> =
        assert_ok!(client.execute_typed(&catalog::TIMELINE, &feed, Some(&token)).await);
    assert_eq!(echoed, feed);

    let reaction = RequestVars::new(ReactionRequest {
        profile_id: "0x01".to_string(),
        reaction: ReactionType::Upvote,
        publication_id: "0x01-0x02".to_string(),
    });
    let echoed: RequestVars<ReactionRequest> = assert_ok!(
        client
            .execute_typed(&catalog::ADD_REACTION, &reaction, Some(&token))
            .await
    );
    assert_eq!(echoed, reaction);
}

#[tokio::test]
async fn test_session_calls_carry_acquired_token() {
    let server = setup_mock_server().await;
    mount_handshake(&server).await;
    operation("Timeline")
        .and(header("x-access-token", "Bearer tok-1"))
        .respond_with(data(json!({"feed": {"items": [{"root": {"id": "0x01-0x0a"}}]}})))
        .expect(1)
        .mount(&server)
        .await;

    let session = assert_ok!(LensSession::connect(test_client(&server), mock_signer()).await);
    let feed = assert_ok!(session.feed(None).await);
    assert_eq!(feed, ["0x01-0x0a"]);
}

#[tokio::test]
async fn test_unparseable_server_error_is_network_error() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .execute(&catalog::CHALLENGE, json!({"request": {"address": "0xabc"}}), None)
        .await
        .unwrap_err();
    assert!(err.is_network_error());
    assert!(matches!(err, LensError::HttpStatus { status: 500, .. }));
}
