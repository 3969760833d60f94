/*
[INPUT]:  Decoded API responses and local session data
[OUTPUT]: Domain models held by sessions and returned by actions
[POS]:    Data layer - session and publication models
[UPDATE]: When session state or action results change
*/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::MainContentFocus;
use super::responses::Profile;

/// One-time text issued for an address; signed exactly once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub text: String,
    pub issued_for: String,
}

/// Opaque bearer credential
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub refresh_token: Option<String>,
    pub issued_for: String,
    pub acquired_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(token: impl Into<String>, issued_for: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            refresh_token: None,
            issued_for: issued_for.into(),
            acquired_at: Utc::now(),
        }
    }

    /// Value of the access token header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"<redacted>")
            .field("issued_for", &self.issued_for)
            .field("acquired_at", &self.acquired_at)
            .finish()
    }
}

/// Profile owned by the authenticated address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub profile_id: String,
    pub handle: String,
    pub display_name: Option<String>,
    pub follower_count: u64,
    pub following_count: u64,
}

impl From<Profile> for ProfileSummary {
    fn from(profile: Profile) -> Self {
        Self {
            profile_id: profile.id,
            handle: profile.handle,
            display_name: profile.name,
            follower_count: profile.stats.total_followers,
            following_count: profile.stats.total_following,
        }
    }
}

/// Token and profile, written together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: AccessToken,
    pub profile: ProfileSummary,
    /// Bumped on every successful re-authentication
    pub generation: u64,
}

/// Result of a dispatcher-relayed mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayReceipt {
    pub tx_hash: Option<String>,
    pub tx_id: Option<String>,
}

/// Result of publishing a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostOutcome {
    pub content_uri: String,
    pub receipt: RelayReceipt,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataAttribute {
    pub trait_type: String,
    pub display_type: String,
    pub value: String,
}

/// Publication metadata document stored before posting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationMetadata {
    pub version: String,
    #[serde(rename = "metadata_id")]
    pub metadata_id: String,
    pub description: String,
    pub content: String,
    #[serde(rename = "external_url")]
    pub external_url: String,
    pub image: Option<String>,
    pub image_mime_type: String,
    pub name: String,
    pub tags: Vec<String>,
    #[serde(rename = "animation_url")]
    pub animation_url: Option<String>,
    pub main_content_focus: MainContentFocus,
    pub content_warning: Option<String>,
    pub attributes: Vec<MetadataAttribute>,
    pub media: Vec<serde_json::Value>,
    pub locale: String,
    pub app_id: String,
}

impl PublicationMetadata {
    /// Text-only post metadata attributed to `handle`
    pub fn text_only(
        content: &str,
        handle: &str,
        profile_base_url: &str,
        locale: &str,
        app_id: &str,
    ) -> Self {
        Self {
            version: "2.0.0".to_string(),
            metadata_id: Uuid::new_v4().to_string(),
            description: content.to_string(),
            content: content.to_string(),
            external_url: format!("{}/u/{handle}", profile_base_url.trim_end_matches('/')),
            image: None,
            image_mime_type: "image/svg+xml".to_string(),
            name: format!("Post by @{handle}"),
            tags: Vec::new(),
            animation_url: None,
            main_content_focus: MainContentFocus::TextOnly,
            content_warning: None,
            attributes: vec![MetadataAttribute {
                trait_type: "type".to_string(),
                display_type: "string".to_string(),
                value: "text_only".to_string(),
            }],
            media: Vec::new(),
            locale: locale.to_string(),
            app_id: app_id.to_string(),
        }
    }
}
