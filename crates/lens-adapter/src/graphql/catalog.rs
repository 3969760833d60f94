/*
[INPUT]:  Lens API GraphQL schema
[OUTPUT]: Static operation descriptors (name, document, auth flag, response path)
[POS]:    GraphQL layer - operation catalog consumed by the dispatcher
[UPDATE]: When adding operations or changing selected fields
*/

use crate::http::{LensError, Result};

/// Query or mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

impl OperationKind {
    fn keyword(self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
        }
    }
}

/// A named GraphQL operation template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub kind: OperationKind,
    pub document: &'static str,
    pub auth_required: bool,
    /// Key chain under `data` holding the result
    pub response_path: &'static [&'static str],
}

impl Operation {
    /// Queries are side-effect free and may be retried on transient failures
    pub fn is_idempotent(&self) -> bool {
        self.kind == OperationKind::Query
    }

    /// Check that the document declares this operation and selects the response root
    pub fn validate(&self) -> Result<()> {
        let header = format!("{} {}", self.kind.keyword(), self.name);
        let declared = self
            .document
            .trim_start()
            .strip_prefix(header.as_str())
            .is_some_and(|rest| rest.starts_with('(') || rest.starts_with(' ') || rest.starts_with('{'));
        if !declared {
            return Err(LensError::Config(format!(
                "document for {} does not declare `{header}`",
                self.name
            )));
        }

        let root = self.response_path.first().ok_or_else(|| {
            LensError::Config(format!("operation {} has an empty response path", self.name))
        })?;
        if !self.document.contains(root) {
            return Err(LensError::Config(format!(
                "document for {} does not select `{root}`",
                self.name
            )));
        }

        let opens = self.document.matches('{').count();
        let closes = self.document.matches('}').count();
        if opens != closes {
            return Err(LensError::Config(format!(
                "document for {} has unbalanced braces",
                self.name
            )));
        }

        Ok(())
    }
}

pub const CHALLENGE: Operation = Operation {
    name: "Challenge",
    kind: OperationKind::Query,
    document: "query Challenge($request: ChallengeRequest!) {
  challenge(request: $request) {
    text
    __typename
  }
}",
    auth_required: false,
    response_path: &["challenge"],
};

pub const AUTHENTICATE: Operation = Operation {
    name: "Authenticate",
    kind: OperationKind::Mutation,
    document: "mutation Authenticate($request: SignedAuthChallenge!) {
  authenticate(request: $request) {
    accessToken
    refreshToken
    __typename
  }
}",
    auth_required: false,
    response_path: &["authenticate"],
};

pub const USER_PROFILES: Operation = Operation {
    name: "UserProfiles",
    kind: OperationKind::Query,
    document: "query UserProfiles($ownedBy: [EthereumAddress!]) {
  profiles(request: {ownedBy: $ownedBy}) {
    items {
      id
      name
      handle
      ownedBy
      isDefault
      stats {
        totalFollowers
        totalFollowing
        __typename
      }
      __typename
    }
    __typename
  }
}",
    auth_required: true,
    response_path: &["profiles", "items"],
};

pub const PROFILE: Operation = Operation {
    name: "Profile",
    kind: OperationKind::Query,
    document: "query Profile($request: SingleProfileQueryRequest!, $who: ProfileId) {
  profile(request: $request) {
    id
    handle
    ownedBy
    name
    isFollowedByMe
    isFollowing(who: $who)
    stats {
      totalFollowers
      totalFollowing
      __typename
    }
    __typename
  }
}",
    auth_required: false,
    response_path: &["profile"],
};

pub const RECOMMENDED_PROFILES: Operation = Operation {
    name: "RecommendedProfiles",
    kind: OperationKind::Query,
    document: "query RecommendedProfiles($options: RecommendedProfileOptions) {
  recommendedProfiles(options: $options) {
    id
    handle
    name
    stats {
      totalFollowers
      totalFollowing
      __typename
    }
    __typename
  }
}",
    auth_required: false,
    response_path: &["recommendedProfiles"],
};

pub const CREATE_POST_VIA_DISPATCHER: Operation = Operation {
    name: "CreatePostViaDispatcher",
    kind: OperationKind::Mutation,
    document: "mutation CreatePostViaDispatcher($request: CreatePublicPostRequest!) {
  createPostViaDispatcher(request: $request) {
    ... on RelayerResult {
      txHash
      txId
      __typename
    }
    ... on RelayError {
      reason
      __typename
    }
    __typename
  }
}",
    auth_required: true,
    response_path: &["createPostViaDispatcher"],
};

pub const PROXY_ACTION: Operation = Operation {
    name: "ProxyAction",
    kind: OperationKind::Mutation,
    document: "mutation ProxyAction($request: ProxyActionRequest!) {
  proxyAction(request: $request)
}",
    auth_required: true,
    response_path: &["proxyAction"],
};

pub const ADD_REACTION: Operation = Operation {
    name: "AddReaction",
    kind: OperationKind::Mutation,
    document: "mutation AddReaction($request: ReactionRequest!) {
  addReaction(request: $request)
}",
    auth_required: true,
    response_path: &["addReaction"],
};

pub const CREATE_MIRROR_VIA_DISPATCHER: Operation = Operation {
    name: "CreateMirrorViaDispatcher",
    kind: OperationKind::Mutation,
    document: "mutation CreateMirrorViaDispatcher($request: CreateMirrorRequest!) {
  createMirrorViaDispatcher(request: $request) {
    ... on RelayerResult {
      txHash
      txId
      __typename
    }
    ... on RelayError {
      reason
      __typename
    }
    __typename
  }
}",
    auth_required: true,
    response_path: &["createMirrorViaDispatcher"],
};

pub const FOLLOWERS: Operation = Operation {
    name: "Followers",
    kind: OperationKind::Query,
    document: "query Followers($request: FollowersRequest!) {
  followers(request: $request) {
    items {
      wallet {
        address
        defaultProfile {
          id
          handle
          __typename
        }
        __typename
      }
      totalAmountOfTimesFollowed
      __typename
    }
    __typename
  }
}",
    auth_required: false,
    response_path: &["followers"],
};

pub const FOLLOWING: Operation = Operation {
    name: "Following",
    kind: OperationKind::Query,
    document: "query Following($request: FollowingRequest!) {
  following(request: $request) {
    items {
      profile {
        id
        handle
        __typename
      }
      totalAmountOfTimesFollowing
      __typename
    }
    __typename
  }
}",
    auth_required: false,
    response_path: &["following"],
};

pub const TIMELINE: Operation = Operation {
    name: "Timeline",
    kind: OperationKind::Query,
    document: "query Timeline($request: FeedRequest!) {
  feed(request: $request) {
    items {
      root {
        ... on Post {
          id
          __typename
        }
        ... on Comment {
          id
          __typename
        }
        __typename
      }
      __typename
    }
    __typename
  }
}",
    auth_required: true,
    response_path: &["feed"],
};

/// Every operation the client knows about
pub const ALL: &[Operation] = &[
    CHALLENGE,
    AUTHENTICATE,
    USER_PROFILES,
    PROFILE,
    RECOMMENDED_PROFILES,
    CREATE_POST_VIA_DISPATCHER,
    PROXY_ACTION,
    ADD_REACTION,
    CREATE_MIRROR_VIA_DISPATCHER,
    FOLLOWERS,
    FOLLOWING,
    TIMELINE,
];

/// Validate every catalog entry
pub fn validate_all() -> Result<()> {
    ALL.iter().try_for_each(Operation::validate)
}
