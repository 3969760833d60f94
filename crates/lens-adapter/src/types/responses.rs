/*
[INPUT]:  Lens API output schema and serde requirements
[OUTPUT]: Typed response shapes decoded right after the envelope is parsed
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or selected fields change
*/

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeResponse {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationResult {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    pub total_followers: u64,
    pub total_following: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub handle: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub owned_by: Option<String>,
    #[serde(default)]
    pub stats: ProfileStats,
}

/// Outcome of a dispatcher-relayed mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__typename")]
pub enum RelayResult {
    #[serde(rename_all = "camelCase")]
    RelayerResult {
        #[serde(default)]
        tx_hash: Option<String>,
        #[serde(default)]
        tx_id: Option<String>,
    },
    RelayError { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub items: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRef {
    pub id: String,
    pub handle: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowerWallet {
    pub address: String,
    #[serde(default)]
    pub default_profile: Option<ProfileRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Follower {
    pub wallet: FollowerWallet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Following {
    pub profile: ProfileRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicationRef {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedItem {
    pub root: PublicationRef,
}

/// Response of the metadata storage endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataUploadResponse {
    pub id: String,
}
