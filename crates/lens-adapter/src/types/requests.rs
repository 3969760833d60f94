/*
[INPUT]:  Lens API input schema and serde requirements
[OUTPUT]: Typed GraphQL variables with camelCase wire names
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

use super::enums::{FeedEventItemType, ReactionType};

/// Most Lens operations take their input as `$request`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestVars<T> {
    pub request: T,
}

impl<T> RequestVars<T> {
    pub fn new(request: T) -> Self {
        Self { request }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeRequest {
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedAuthChallenge {
    pub address: String,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfilesVars {
    pub owned_by: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleProfileQueryRequest {
    pub handle: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileVars {
    pub request: SingleProfileQueryRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub who: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedProfilesVars {
    pub options: RecommendedProfileOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendedProfileOptions {
    pub shuffle: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePublicPostRequest {
    pub profile_id: String,
    #[serde(rename = "contentURI")]
    pub content_uri: String,
    pub collect_module: CollectModuleParams,
    pub reference_module: ReferenceModuleParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CollectModuleParams {
    RevertCollectModule(bool),
}

impl Default for CollectModuleParams {
    fn default() -> Self {
        CollectModuleParams::RevertCollectModule(true)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReferenceModuleParams {
    #[serde(rename_all = "camelCase")]
    DegreesOfSeparationReferenceModule {
        comments_restricted: bool,
        mirrors_restricted: bool,
        degrees_of_separation: u8,
    },
    FollowerOnlyReferenceModule(bool),
}

impl ReferenceModuleParams {
    /// Reference settings applied to new posts
    pub fn post_default() -> Self {
        ReferenceModuleParams::DegreesOfSeparationReferenceModule {
            comments_restricted: true,
            mirrors_restricted: true,
            degrees_of_separation: 2,
        }
    }

    /// Reference settings applied to mirrors
    pub fn mirror_default() -> Self {
        ReferenceModuleParams::FollowerOnlyReferenceModule(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxyActionRequest {
    pub follow: FollowProxyAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowProxyAction {
    pub free_follow: FreeFollowProxyAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeFollowProxyAction {
    pub profile_id: String,
}

impl ProxyActionRequest {
    pub fn free_follow(profile_id: impl Into<String>) -> Self {
        Self {
            follow: FollowProxyAction {
                free_follow: FreeFollowProxyAction {
                    profile_id: profile_id.into(),
                },
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionRequest {
    pub profile_id: String,
    pub reaction: ReactionType,
    pub publication_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMirrorRequest {
    pub profile_id: String,
    pub publication_id: String,
    pub reference_module: ReferenceModuleParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowersRequest {
    pub profile_id: String,
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowingRequest {
    pub address: String,
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedRequest {
    pub profile_id: String,
    pub limit: u32,
    pub feed_event_item_types: Vec<FeedEventItemType>,
}
