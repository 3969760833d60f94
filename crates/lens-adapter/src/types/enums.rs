/*
[INPUT]:  Lens API schema enums and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReactionType {
    Upvote,
    Downvote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedEventItemType {
    Post,
    Comment,
    CollectPost,
    CollectComment,
    Mirror,
}

impl FeedEventItemType {
    /// Event types requested for the home timeline
    pub const TIMELINE: [FeedEventItemType; 5] = [
        FeedEventItemType::Post,
        FeedEventItemType::Comment,
        FeedEventItemType::CollectPost,
        FeedEventItemType::CollectComment,
        FeedEventItemType::Mirror,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MainContentFocus {
    TextOnly,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaction_wire_names() {
        assert_eq!(
            serde_json::to_string(&ReactionType::Upvote).unwrap(),
            "\"UPVOTE\""
        );
        assert_eq!(
            serde_json::to_string(&FeedEventItemType::CollectComment).unwrap(),
            "\"COLLECT_COMMENT\""
        );
        assert_eq!(
            serde_json::to_string(&MainContentFocus::TextOnly).unwrap(),
            "\"TEXT_ONLY\""
        );
    }
}
