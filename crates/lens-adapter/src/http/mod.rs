/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: Classified GraphQL responses and typed API results
[POS]:    HTTP layer - GraphQL and metadata storage communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod dispatch;
pub mod error;
pub mod metadata;

pub use error::{AuthStage, LensError, Result};

pub use client::{
    ACCESS_TOKEN_HEADER, API_BASE_URL, ClientConfig, LensClient, METADATA_BASE_URL,
    MetadataConfig, RetryPolicy,
};
