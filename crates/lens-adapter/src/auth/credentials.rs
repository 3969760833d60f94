/*
[INPUT]:  Access token and resolved profile from a completed handshake
[OUTPUT]: Consistent credential snapshots with a generation counter
[POS]:    Auth layer - shared credential storage for a live session
[UPDATE]: When adding token refresh or changing what a session stores
*/

use std::sync::{Arc, PoisonError, RwLock};

use crate::types::{AccessToken, Credentials, ProfileSummary};

/// Thread-safe credential holder
///
/// Token and profile are always replaced together, so readers never observe a
/// token paired with a profile from a different handshake.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    data: Arc<RwLock<Credentials>>,
}

impl CredentialStore {
    /// Store credentials from the first successful handshake
    pub fn new(token: AccessToken, profile: ProfileSummary) -> Self {
        Self {
            data: Arc::new(RwLock::new(Credentials {
                token,
                profile,
                generation: 0,
            })),
        }
    }

    /// Copy of the current credentials
    pub fn snapshot(&self) -> Credentials {
        let guard = self.data.read().unwrap_or_else(PoisonError::into_inner);
        guard.clone()
    }

    /// Swap in credentials from a newer handshake and return the new generation
    pub fn replace(&self, token: AccessToken, profile: ProfileSummary) -> u64 {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        let generation = guard.generation + 1;
        *guard = Credentials {
            token,
            profile,
            generation,
        };
        generation
    }

    pub fn generation(&self) -> u64 {
        let guard = self.data.read().unwrap_or_else(PoisonError::into_inner);
        guard.generation
    }

    pub fn profile(&self) -> ProfileSummary {
        let guard = self.data.read().unwrap_or_else(PoisonError::into_inner);
        guard.profile.clone()
    }
}
