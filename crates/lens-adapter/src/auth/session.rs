/*
[INPUT]:  Lens client and wallet signer
[OUTPUT]: Access token and profile summary via an explicit handshake state machine
[POS]:    Auth layer - orchestrates challenge, sign, authenticate, profile resolve
[UPDATE]: When handshake steps or their failure mapping change
*/

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::graphql::catalog;
use crate::http::{AuthStage, LensClient, LensError, Result};
use crate::types::{
    AccessToken, AuthenticationResult, Challenge, Profile, ProfileSummary, RequestVars,
    SignedAuthChallenge, UserProfilesVars,
};

use super::WalletSigner;

/// Handshake progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    ChallengeRequested {
        challenge: Challenge,
    },
    Signed {
        challenge: Challenge,
        signature: String,
    },
    TokenAcquired {
        token: AccessToken,
    },
    Ready {
        token: AccessToken,
        profile: ProfileSummary,
    },
    /// Terminal until `restart()`
    Failed {
        stage: AuthStage,
        reason: String,
    },
}

impl AuthState {
    /// Short state name for logs and cancellation errors
    pub fn name(&self) -> &'static str {
        match self {
            AuthState::Unauthenticated => "unauthenticated",
            AuthState::ChallengeRequested { .. } => "challenge requested",
            AuthState::Signed { .. } => "signed",
            AuthState::TokenAcquired { .. } => "token acquired",
            AuthState::Ready { .. } => "ready",
            AuthState::Failed { .. } => "failed",
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, AuthState::Ready { .. })
    }
}

/// Step-wise authentication handshake for one wallet
pub struct AuthSession {
    client: LensClient,
    signer: Arc<dyn WalletSigner>,
    state: AuthState,
}

impl AuthSession {
    pub fn new(client: LensClient, signer: Arc<dyn WalletSigner>) -> Self {
        Self {
            client,
            signer,
            state: AuthState::Unauthenticated,
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn address(&self) -> &str {
        self.signer.address()
    }

    /// Drop any acquired token and start over from `Unauthenticated`
    pub fn restart(&mut self) {
        debug!(address = %self.address(), from = self.state.name(), "restarting handshake");
        self.state = AuthState::Unauthenticated;
    }

    /// Advance exactly one transition
    ///
    /// The new state is assigned only after the awaited call returns, so
    /// dropping this future leaves the previous state untouched. The one
    /// exception is `Signed`: the signature is consumed before Authenticate
    /// is sent, and a dropped call leaves `Unauthenticated` so the next step
    /// fetches a fresh challenge.
    pub async fn step(&mut self) -> Result<&AuthState> {
        let address = self.signer.address();

        let next = match &self.state {
            AuthState::Unauthenticated => self
                .client
                .request_challenge(address)
                .await
                .map(|challenge| AuthState::ChallengeRequested { challenge })
                .map_err(|e| (AuthStage::Challenge, e)),
            AuthState::ChallengeRequested { challenge } => self
                .signer
                .sign_message(&challenge.text)
                .await
                .map(|signature| AuthState::Signed {
                    challenge: challenge.clone(),
                    signature,
                })
                .map_err(|e| (AuthStage::Sign, e)),
            AuthState::Signed { signature, .. } => {
                // A signed challenge is single-use: leave Signed before it is sent
                let signature = signature.clone();
                self.state = AuthState::Unauthenticated;
                self.client
                    .authenticate(address, &signature)
                    .await
                    .map(|token| AuthState::TokenAcquired { token })
                    .map_err(|e| (AuthStage::Authenticate, e))
            }
            AuthState::TokenAcquired { token } => self
                .client
                .resolve_profile(address, token)
                .await
                .map(|profile| AuthState::Ready {
                    token: token.clone(),
                    profile,
                })
                .map_err(|e| (AuthStage::ProfileResolve, e)),
            AuthState::Ready { .. } => return Ok(&self.state),
            AuthState::Failed { stage, reason } => {
                return Err(LensError::auth(
                    *stage,
                    LensError::Config(format!("handshake already failed ({reason}); restart required")),
                ));
            }
        };

        match next {
            Ok(state) => {
                info!(address = %self.signer.address(), state = state.name(), "handshake advanced");
                self.state = state;
                Ok(&self.state)
            }
            Err((stage, err)) => {
                warn!(address = %self.signer.address(), %stage, error = %err, "handshake failed");
                self.state = AuthState::Failed {
                    stage,
                    reason: err.to_string(),
                };
                Err(match err {
                    err @ LensError::NoProfile { .. } => err,
                    err => LensError::auth(stage, err),
                })
            }
        }
    }

    /// Step until `Ready` and return the acquired token and profile
    pub async fn run_to_ready(&mut self) -> Result<(AccessToken, ProfileSummary)> {
        loop {
            if let AuthState::Ready { token, profile } = self.step().await? {
                return Ok((token.clone(), profile.clone()));
            }
        }
    }

    /// Consume a finished handshake
    pub fn into_ready(self) -> Option<(AccessToken, ProfileSummary)> {
        match self.state {
            AuthState::Ready { token, profile } => Some((token, profile)),
            _ => None,
        }
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("address", &self.signer.address())
            .field("state", &self.state.name())
            .finish()
    }
}

impl LensClient {
    /// Exchange a signed challenge for an access token
    pub async fn authenticate(&self, address: &str, signature: &str) -> Result<AccessToken> {
        let vars = RequestVars::new(SignedAuthChallenge {
            address: address.to_string(),
            signature: signature.to_string(),
        });
        let result: AuthenticationResult = self
            .execute_typed(&catalog::AUTHENTICATE, &vars, None)
            .await?;

        if result.access_token.is_empty() {
            return Err(LensError::Protocol(
                "authenticate returned an empty accessToken".to_string(),
            ));
        }

        Ok(AccessToken {
            refresh_token: result.refresh_token,
            ..AccessToken::new(result.access_token, address)
        })
    }

    /// First profile owned by `address`
    pub async fn resolve_profile(
        &self,
        address: &str,
        token: &AccessToken,
    ) -> Result<ProfileSummary> {
        let vars = UserProfilesVars {
            owned_by: vec![address.to_string()],
        };
        let profiles: Vec<Profile> = self
            .execute_typed(&catalog::USER_PROFILES, &vars, Some(token))
            .await?;

        let profile = profiles.into_iter().next().ok_or_else(|| LensError::NoProfile {
            owner: address.to_string(),
        })?;

        debug!(address, profile_id = %profile.id, handle = %profile.handle, "profile resolved");
        Ok(profile.into())
    }
}
