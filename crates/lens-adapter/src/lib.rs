/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Lens adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod graphql;
pub mod http;
pub mod session;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{
    AuthSession,
    AuthState,
    CredentialStore,
    EvmWalletSigner,
    MockWalletSigner,
    WalletSigner,
};

// Re-export commonly used types from http
pub use http::{
    AuthStage,
    ClientConfig,
    LensClient,
    LensError,
    MetadataConfig,
    Result,
    RetryPolicy,
};

pub use graphql::{Operation, OperationKind};

pub use session::LensSession;

// Re-export all types
pub use types::*;
