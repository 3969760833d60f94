/*
[INPUT]:  Error sources (transport, GraphQL envelope, auth handshake, keys)
[OUTPUT]: Structured error types with classification and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or changing error classification
*/

use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Stage of the authentication handshake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStage {
    Challenge,
    Sign,
    Authenticate,
    ProfileResolve,
}

impl fmt::Display for AuthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AuthStage::Challenge => "challenge",
            AuthStage::Sign => "sign",
            AuthStage::Authenticate => "authenticate",
            AuthStage::ProfileResolve => "profile resolve",
        };
        f.write_str(name)
    }
}

/// Main error type for the Lens adapter
#[derive(Error, Debug)]
pub enum LensError {
    /// Connection failed or the transport broke mid-request
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request did not complete within the configured timeout
    #[error("request timed out after {duration:?}")]
    Timeout { duration: Duration },

    /// Non-success HTTP status without a parseable GraphQL error body
    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Response did not have the expected shape
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Service reported a logical error
    #[error("API error: {reason}")]
    Api { reason: String, code: Option<String> },

    /// Authentication handshake failed at the given stage
    #[error("authentication failed at {stage} stage: {source}")]
    Auth {
        stage: AuthStage,
        #[source]
        source: Box<LensError>,
    },

    /// Authorized operation attempted without an access token
    #[error("operation {operation} requires an access token")]
    MissingToken { operation: String },

    /// No profile exists for the given owner address or handle
    #[error("no profile found for {owner}")]
    NoProfile { owner: String },

    /// Private key is malformed
    #[error("invalid private key: {0}")]
    Key(String),

    /// Serialization of request variables failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Caller cancelled the operation
    #[error("cancelled during {stage}")]
    Cancelled { stage: String },
}

impl LensError {
    /// Connection failures, timeouts and unparseable non-success responses
    pub fn is_network_error(&self) -> bool {
        matches!(
            self,
            LensError::Network(_) | LensError::Timeout { .. } | LensError::HttpStatus { .. }
        )
    }

    /// Check if the error is transient and worth retrying
    pub fn is_retryable(&self) -> bool {
        match self {
            LensError::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            other => other.is_network_error(),
        }
    }

    /// Get retry delay in seconds (if retryable)
    pub fn retry_delay(&self) -> Option<u64> {
        match self {
            LensError::Timeout { .. } => Some(1),
            LensError::HttpStatus { status: 429, .. } => Some(2),
            _ => None,
        }
    }

    /// Check if error indicates the caller should re-authenticate
    pub fn is_auth_error(&self) -> bool {
        match self {
            LensError::Auth { .. } | LensError::MissingToken { .. } => true,
            LensError::Api {
                code: Some(code), ..
            } => matches!(code.as_str(), "UNAUTHENTICATED" | "FORBIDDEN"),
            LensError::HttpStatus { status, .. } => {
                *status == StatusCode::UNAUTHORIZED.as_u16()
                    || *status == StatusCode::FORBIDDEN.as_u16()
            }
            _ => false,
        }
    }

    /// Wrap an error raised while the handshake was at `stage`
    pub(crate) fn auth(stage: AuthStage, source: LensError) -> Self {
        LensError::Auth {
            stage,
            source: Box::new(source),
        }
    }

    pub(crate) fn http_status(status: StatusCode, body: &[u8]) -> Self {
        const MAX_BODY: usize = 256;
        let text = String::from_utf8_lossy(body);
        let body = if text.len() > MAX_BODY {
            let mut end = MAX_BODY;
            while !text.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}...", &text[..end])
        } else {
            text.into_owned()
        };
        LensError::HttpStatus {
            status: status.as_u16(),
            body,
        }
    }
}

/// Result type alias for Lens operations
pub type Result<T> = std::result::Result<T, LensError>;
