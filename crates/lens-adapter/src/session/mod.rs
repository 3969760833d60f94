/*
[INPUT]:  Lens client, wallet signer, optional cancellation token
[OUTPUT]: Authenticated session sharing one set of credentials across tasks
[POS]:    Session layer - ready session, re-authentication, authorized calls
[UPDATE]: When session lifecycle or authorized-call retry rules change
*/

mod actions;

pub use actions::{DEFAULT_FEED_LIMIT, DEFAULT_GRAPH_LIMIT};

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::auth::{AuthSession, CredentialStore, WalletSigner};
use crate::graphql::Operation;
use crate::http::{LensClient, LensError, Result};
use crate::types::{Credentials, ProfileSummary};

/// Authenticated Lens session
///
/// Exists only after a completed handshake, so every authorized call has a
/// token and a profile to work with. Clones share credentials.
#[derive(Clone)]
pub struct LensSession {
    client: LensClient,
    signer: Arc<dyn WalletSigner>,
    credentials: CredentialStore,
    reauth_lock: Arc<Mutex<()>>,
}

impl LensSession {
    /// Run the full handshake and return a ready session
    pub async fn connect(client: LensClient, signer: Arc<dyn WalletSigner>) -> Result<Self> {
        Self::connect_until(client, signer, &CancellationToken::new()).await
    }

    /// Run the handshake unless `cancel` fires first
    ///
    /// On cancellation no credentials are produced and the error names the
    /// state the handshake was left in.
    pub async fn connect_until(
        client: LensClient,
        signer: Arc<dyn WalletSigner>,
        cancel: &CancellationToken,
    ) -> Result<Self> {
        let mut auth = AuthSession::new(client.clone(), signer.clone());

        while !auth.state().is_ready() {
            let cancelled = tokio::select! {
                biased;
                _ = cancel.cancelled() => true,
                result = auth.step() => {
                    result?;
                    false
                }
            };

            // Read after the step future is gone; a dropped step may have moved state
            if cancelled {
                let stage = auth.state().name();
                info!(address = %signer.address(), stage, "handshake cancelled");
                return Err(LensError::Cancelled { stage: stage.to_string() });
            }
        }

        let (token, profile) = auth
            .into_ready()
            .ok_or_else(|| LensError::Protocol("handshake finished without credentials".to_string()))?;

        info!(
            address = %signer.address(),
            profile_id = %profile.profile_id,
            handle = %profile.handle,
            "session ready"
        );

        Ok(Self {
            client,
            signer,
            credentials: CredentialStore::new(token, profile),
            reauth_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn address(&self) -> &str {
        self.signer.address()
    }

    pub fn client(&self) -> &LensClient {
        &self.client
    }

    pub fn profile(&self) -> ProfileSummary {
        self.credentials.profile()
    }

    pub fn credentials(&self) -> Credentials {
        self.credentials.snapshot()
    }

    /// Repeat the whole handshake and swap in the new credentials
    ///
    /// Refreshes whatever generation is current when called.
    pub async fn reauthenticate(&self) -> Result<u64> {
        self.reauthenticate_after(self.credentials.generation()).await
    }

    /// Replace credentials of `failed_generation` after an auth failure
    ///
    /// Concurrent callers are serialized. If the credentials are already
    /// newer than `failed_generation`, no handshake runs and the current
    /// generation is returned.
    pub async fn reauthenticate_after(&self, failed_generation: u64) -> Result<u64> {
        let _guard = self.reauth_lock.lock().await;

        let current = self.credentials.generation();
        if current != failed_generation {
            debug!(address = %self.address(), generation = current, "credentials already refreshed");
            return Ok(current);
        }

        let mut auth = AuthSession::new(self.client.clone(), self.signer.clone());
        let (token, profile) = auth.run_to_ready().await?;
        let generation = self.credentials.replace(token, profile);

        info!(address = %self.address(), generation, "re-authenticated");
        Ok(generation)
    }

    /// Execute an authorized operation with the current token
    ///
    /// An authorization failure is retried once if the credentials were
    /// replaced while the call was in flight.
    pub(crate) async fn execute_authorized<V, T>(&self, operation: &Operation, variables: &V) -> Result<T>
    where
        V: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let snapshot = self.credentials.snapshot();
        match self
            .client
            .execute_typed(operation, variables, Some(&snapshot.token))
            .await
        {
            Err(err) if err.is_auth_error() => {
                let current = self.credentials.snapshot();
                if current.generation == snapshot.generation {
                    return Err(err);
                }
                debug!(
                    operation = operation.name,
                    generation = current.generation,
                    "retrying with refreshed credentials"
                );
                self.client
                    .execute_typed(operation, variables, Some(&current.token))
                    .await
            }
            other => other,
        }
    }
}

impl std::fmt::Debug for LensSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LensSession")
            .field("address", &self.signer.address())
            .field("credentials", &self.credentials.snapshot())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::auth::MockWalletSigner;
    use crate::http::{ClientConfig, RetryPolicy};

    const ADDRESS: &str = "0x00000000000000000000000000000000000000aa";

    fn client_for(server: &MockServer) -> LensClient {
        let config = ClientConfig {
            retry: RetryPolicy::none(),
            ..ClientConfig::default()
        };
        LensClient::with_config_and_base_urls(config, &server.uri(), &server.uri()).unwrap()
    }

    fn signer() -> Arc<dyn WalletSigner> {
        Arc::new(MockWalletSigner::new(ADDRESS, "0xsigned"))
    }

    async fn mount_handshake(server: &MockServer) {
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"operationName": "Challenge"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"challenge": {"text": "sign me"}}
            })))
            .mount(server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"operationName": "Authenticate"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"authenticate": {"accessToken": "tok-1"}}
            })))
            .mount(server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"operationName": "UserProfiles"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"profiles": {"items": [{"id": "0x01", "handle": "alice.lens"}]}}
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_connect_produces_credentials() {
        let server = MockServer::start().await;
        mount_handshake(&server).await;

        let session = LensSession::connect(client_for(&server), signer()).await.unwrap();
        let credentials = session.credentials();
        assert_eq!(credentials.token.token, "tok-1");
        assert_eq!(credentials.profile.handle, "alice.lens");
        assert_eq!(credentials.generation, 0);
        assert_eq!(session.address(), ADDRESS);
    }

    #[tokio::test]
    async fn test_cancelled_connect_produces_nothing() {
        let server = MockServer::start().await;
        mount_handshake(&server).await;

        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = LensSession::connect_until(client_for(&server), signer(), &cancel)
            .await
            .unwrap_err();
        match err {
            LensError::Cancelled { stage } => assert_eq!(stage, "unauthenticated"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_reauthenticate_bumps_generation() {
        let server = MockServer::start().await;
        mount_handshake(&server).await;

        let session = LensSession::connect(client_for(&server), signer()).await.unwrap();
        let other = session.clone();

        assert_eq!(session.reauthenticate().await.unwrap(), 1);
        assert_eq!(other.credentials().generation, 1);
    }

    async fn challenges_sent(server: &MockServer) -> usize {
        server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .filter(|request| {
                let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
                body["operationName"] == "Challenge"
            })
            .count()
    }

    #[tokio::test]
    async fn test_stale_generation_skips_handshake() {
        let server = MockServer::start().await;
        mount_handshake(&server).await;

        let session = LensSession::connect(client_for(&server), signer()).await.unwrap();
        let failed = session.credentials().generation;

        // Another task refreshed after this caller's request failed
        assert_eq!(session.reauthenticate_after(failed).await.unwrap(), 1);
        assert_eq!(challenges_sent(&server).await, 2);

        assert_eq!(session.reauthenticate_after(failed).await.unwrap(), 1);
        assert_eq!(challenges_sent(&server).await, 2);
        assert_eq!(session.credentials().generation, 1);
    }

    #[tokio::test]
    async fn test_cancel_during_authenticate_names_unauthenticated() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"operationName": "Challenge"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"challenge": {"text": "sign me"}}
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"operationName": "Authenticate"})))
            .respond_with(ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(2)))
            .mount(&server)
            .await;

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(200)).await;
            trigger.cancel();
        });

        let err = LensSession::connect_until(client_for(&server), signer(), &cancel)
            .await
            .unwrap_err();
        match err {
            LensError::Cancelled { stage } => assert_eq!(stage, "unauthenticated"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
