/*
[INPUT]:  Wallet address
[OUTPUT]: One-time challenge text to be signed
[POS]:    Auth layer - challenge retrieval (step 1 of the handshake)
[UPDATE]: When the challenge operation or its response shape changes
*/

use tracing::debug;

use crate::graphql::catalog;
use crate::http::{LensClient, Result};
use crate::types::{Challenge, ChallengeRequest, ChallengeResponse, RequestVars};

impl LensClient {
    /// Fetch a fresh challenge for `address`
    ///
    /// Every call issues a new request; challenges are never cached.
    pub async fn request_challenge(&self, address: &str) -> Result<Challenge> {
        let vars = RequestVars::new(ChallengeRequest {
            address: address.to_string(),
        });
        let response: ChallengeResponse = self
            .execute_typed(&catalog::CHALLENGE, &vars, None)
            .await?;

        debug!(address, "challenge received");
        Ok(Challenge {
            text: response.text,
            issued_for: address.to_string(),
        })
    }
}
