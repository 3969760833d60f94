/*
[INPUT]:  Wallet keys, challenges and handshake responses
[OUTPUT]: Signatures, access tokens, resolved profiles and shared credentials
[POS]:    Auth layer - handles Lens wallet authentication
[UPDATE]: When auth flow or signature methods change
*/

pub mod challenge;
pub mod credentials;
pub mod evm_wallet;
pub mod session;
pub mod wallet;

pub use credentials::CredentialStore;
pub use evm_wallet::EvmWalletSigner;
pub use session::{AuthSession, AuthState};
pub use wallet::{MockWalletSigner, WalletSigner};
