/*
[INPUT]:  Ready session and action arguments (text, handles, publication ids)
[OUTPUT]: Relay receipts, proxy action ids, handle and publication lists
[POS]:    Session layer - business actions layered on the dispatcher
[UPDATE]: When adding actions or changing their request payloads
*/

use tracing::info;

use crate::graphql::catalog;
use crate::http::{LensError, Result};
use crate::types::{
    CollectModuleParams, CreateMirrorRequest, CreatePublicPostRequest, FeedEventItemType,
    FeedItem, FeedRequest, Follower, FollowersRequest, Following, FollowingRequest, Paginated,
    PostOutcome, Profile, ProfileVars, ProxyActionRequest, PublicationMetadata, ReactionRequest,
    ReactionType, RecommendedProfileOptions, RecommendedProfilesVars, ReferenceModuleParams,
    RelayReceipt, RelayResult, RequestVars, SingleProfileQueryRequest,
};

use super::LensSession;

/// Page size for follower and following lists
pub const DEFAULT_GRAPH_LIMIT: u32 = 30;
/// Page size for the timeline
pub const DEFAULT_FEED_LIMIT: u32 = 10;

impl LensSession {
    /// Store text-only metadata and publish it as a post
    pub async fn post(&self, content: &str) -> Result<PostOutcome> {
        let content_uri = self.prepare_post(content).await?;
        self.publish(&content_uri).await
    }

    /// Upload text-only metadata for a post; returns its `contentURI`
    pub async fn prepare_post(&self, content: &str) -> Result<String> {
        let profile = self.profile();
        let settings = &self.client().config().metadata;
        let metadata = PublicationMetadata::text_only(
            content,
            &profile.handle,
            &settings.profile_base_url,
            &settings.locale,
            &settings.app_id,
        );
        self.client().upload_metadata(&metadata).await
    }

    /// Relay a post for metadata already stored at `content_uri`
    pub async fn publish(&self, content_uri: &str) -> Result<PostOutcome> {
        let profile = self.profile();
        let vars = RequestVars::new(CreatePublicPostRequest {
            profile_id: profile.profile_id,
            content_uri: content_uri.to_string(),
            collect_module: CollectModuleParams::default(),
            reference_module: ReferenceModuleParams::post_default(),
        });
        let result: RelayResult = self
            .execute_authorized(&catalog::CREATE_POST_VIA_DISPATCHER, &vars)
            .await?;

        let receipt = relay_receipt(result)?;
        if receipt.tx_id.as_deref().is_none_or(str::is_empty) {
            return Err(LensError::Api {
                reason: "relay returned an empty txId".to_string(),
                code: None,
            });
        }

        info!(handle = %profile.handle, content_uri, tx_id = ?receipt.tx_id, "post published");
        Ok(PostOutcome {
            content_uri: content_uri.to_string(),
            receipt,
        })
    }

    /// Follow the profile behind `handle`; returns the proxy action id
    pub async fn follow(&self, handle: &str) -> Result<String> {
        let target = self.profile_by_handle(handle).await?;
        let vars = RequestVars::new(ProxyActionRequest::free_follow(target.id));
        let action_id: String = self
            .execute_authorized(&catalog::PROXY_ACTION, &vars)
            .await?;

        info!(handle, %action_id, "follow submitted");
        Ok(action_id)
    }

    /// Upvote a publication
    pub async fn like(&self, publication_id: &str) -> Result<()> {
        self.react(publication_id, ReactionType::Upvote).await
    }

    pub async fn react(&self, publication_id: &str, reaction: ReactionType) -> Result<()> {
        let vars = RequestVars::new(ReactionRequest {
            profile_id: self.profile().profile_id,
            reaction,
            publication_id: publication_id.to_string(),
        });
        let result: serde_json::Value = self
            .execute_authorized(&catalog::ADD_REACTION, &vars)
            .await?;

        if !result.is_null() {
            return Err(LensError::Protocol(format!(
                "unexpected addReaction result: {result}"
            )));
        }
        info!(publication_id, ?reaction, "reaction added");
        Ok(())
    }

    /// Mirror a publication; returns the transaction hash
    pub async fn mirror(&self, publication_id: &str) -> Result<String> {
        let vars = RequestVars::new(CreateMirrorRequest {
            profile_id: self.profile().profile_id,
            publication_id: publication_id.to_string(),
            reference_module: ReferenceModuleParams::mirror_default(),
        });
        let result: RelayResult = self
            .execute_authorized(&catalog::CREATE_MIRROR_VIA_DISPATCHER, &vars)
            .await?;

        let tx_hash = relay_receipt(result)?
            .tx_hash
            .filter(|hash| !hash.is_empty())
            .ok_or_else(|| LensError::Api {
                reason: "relay returned no txHash".to_string(),
                code: None,
            })?;

        info!(publication_id, %tx_hash, "mirror submitted");
        Ok(tx_hash)
    }

    /// Handles following `profile_id`
    ///
    /// Followers without a default profile are listed by wallet address.
    pub async fn followers(&self, profile_id: &str, limit: Option<u32>) -> Result<Vec<String>> {
        let vars = RequestVars::new(FollowersRequest {
            profile_id: profile_id.to_string(),
            limit: limit.unwrap_or(DEFAULT_GRAPH_LIMIT),
        });
        let page: Paginated<Follower> = self
            .client()
            .execute_typed(&catalog::FOLLOWERS, &vars, None)
            .await?;

        Ok(page
            .items
            .into_iter()
            .map(|follower| match follower.wallet.default_profile {
                Some(profile) => profile.handle,
                None => follower.wallet.address,
            })
            .collect())
    }

    /// Handles followed by `address`
    pub async fn following(&self, address: &str, limit: Option<u32>) -> Result<Vec<String>> {
        let vars = RequestVars::new(FollowingRequest {
            address: address.to_string(),
            limit: limit.unwrap_or(DEFAULT_GRAPH_LIMIT),
        });
        let page: Paginated<Following> = self
            .client()
            .execute_typed(&catalog::FOLLOWING, &vars, None)
            .await?;

        Ok(page.items.into_iter().map(|item| item.profile.handle).collect())
    }

    /// Publication ids on the session profile's timeline
    pub async fn feed(&self, limit: Option<u32>) -> Result<Vec<String>> {
        let vars = RequestVars::new(FeedRequest {
            profile_id: self.profile().profile_id,
            limit: limit.unwrap_or(DEFAULT_FEED_LIMIT),
            feed_event_item_types: FeedEventItemType::TIMELINE.to_vec(),
        });
        let page: Paginated<FeedItem> = self.execute_authorized(&catalog::TIMELINE, &vars).await?;

        Ok(page.items.into_iter().map(|item| item.root.id).collect())
    }

    /// Look up a profile by handle
    pub async fn profile_by_handle(&self, handle: &str) -> Result<Profile> {
        let vars = ProfileVars {
            request: SingleProfileQueryRequest {
                handle: handle.to_string(),
            },
            who: Some(self.profile().profile_id),
        };
        let profile: Option<Profile> = self
            .client()
            .execute_typed(&catalog::PROFILE, &vars, None)
            .await?;

        profile.ok_or_else(|| LensError::NoProfile {
            owner: handle.to_string(),
        })
    }

    /// Handles of recommended profiles
    pub async fn recommended_profiles(&self) -> Result<Vec<String>> {
        let vars = RecommendedProfilesVars {
            options: RecommendedProfileOptions { shuffle: false },
        };
        let profiles: Vec<Profile> = self
            .client()
            .execute_typed(&catalog::RECOMMENDED_PROFILES, &vars, None)
            .await?;

        Ok(profiles.into_iter().map(|profile| profile.handle).collect())
    }
}

fn relay_receipt(result: RelayResult) -> Result<RelayReceipt> {
    match result {
        RelayResult::RelayerResult { tx_hash, tx_id } => Ok(RelayReceipt { tx_hash, tx_id }),
        RelayResult::RelayError { reason } => Err(LensError::Api { reason, code: None }),
    }
}
