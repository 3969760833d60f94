/*
[INPUT]:  EVM private key (hex string)
[OUTPUT]: Checksummed wallet address and EIP-191 personal-message signatures
[POS]:    Auth layer - EVM wallet implementation
[UPDATE]: When signing logic or EVM address formatting changes
*/

use std::fmt;

use alloy_signer::{Signature, SignerSync};
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;

use crate::auth::WalletSigner;
use crate::http::{LensError, Result};

/// Signer for EVM wallets (Polygon)
pub struct EvmWalletSigner {
    signer: PrivateKeySigner,
    address: String,
}

impl EvmWalletSigner {
    /// Create a new EVM wallet signer from a hex-encoded private key
    ///
    /// Supports both "0x"-prefixed and non-prefixed hex strings.
    pub fn new(private_key_hex: &str) -> Result<Self> {
        let trimmed = private_key_hex.trim();
        let hex_key = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if hex_key.len() != 64 {
            return Err(LensError::Key(format!(
                "expected 64 hex characters, got {}",
                hex_key.len()
            )));
        }

        let bytes = hex::decode(hex_key).map_err(|e| LensError::Key(e.to_string()))?;
        let signer =
            PrivateKeySigner::from_slice(&bytes).map_err(|e| LensError::Key(e.to_string()))?;
        let address = signer.address().to_checksum(None);

        Ok(Self { signer, address })
    }

    /// Sign with the personal-message prefix; deterministic (RFC 6979)
    pub fn sign(&self, message: &str) -> Result<Signature> {
        self.signer
            .sign_message_sync(message.as_bytes())
            .map_err(|e| LensError::Key(format!("failed to sign message: {e}")))
    }
}

impl fmt::Debug for EvmWalletSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvmWalletSigner")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl WalletSigner for EvmWalletSigner {
    fn address(&self) -> &str {
        &self.address
    }

    async fn sign_message(&self, message: &str) -> Result<String> {
        let signature = self.sign(message)?;
        // r || s || v
        Ok(format!("0x{}", hex::encode(signature.as_bytes())))
    }
}
