/*
[INPUT]:  Incoming chat messages (one per line) and a ready Lens session
[OUTPUT]: One reply line per posted message
[POS]:    Bot layer - message-to-post relay with shutdown handling
[UPDATE]: When changing which messages are posted or the reply format
*/

use anyhow::Context;
use lens_adapter::{LensError, LensSession, PostOutcome};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Posts each incoming message from one session
#[derive(Debug, Clone)]
pub struct MessageRelay {
    session: LensSession,
}

impl MessageRelay {
    pub fn new(session: LensSession) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &LensSession {
        &self.session
    }

    /// Post `message` and return the reply, or `None` for ignored input
    ///
    /// Blank lines and `/commands` are ignored. An authorization failure
    /// triggers one re-authentication and one more relay of the already
    /// stored metadata.
    pub async fn handle_message(&self, message: &str) -> Option<String> {
        let text = message.trim();
        if text.is_empty() || text.starts_with('/') {
            debug!(message = text, "ignoring message");
            return None;
        }

        let result = self.post(text).await;

        let handle = self.session.profile().handle;
        Some(match result {
            Ok(outcome) => {
                info!(%handle, content_uri = %outcome.content_uri, "message posted");
                post_success(&handle, text)
            }
            Err(err) => {
                warn!(%handle, error = %err, "message post failed");
                post_failure(&handle, &err)
            }
        })
    }

    async fn post(&self, text: &str) -> lens_adapter::Result<PostOutcome> {
        let generation = self.session.credentials().generation;
        let content_uri = self.session.prepare_post(text).await?;

        match self.session.publish(&content_uri).await {
            Err(err) if err.is_auth_error() => {
                warn!(error = %err, "post unauthorized; re-authenticating");
                self.session.reauthenticate_after(generation).await?;
                self.session.publish(&content_uri).await
            }
            other => other,
        }
    }

    /// Relay lines from `input` until EOF or cancellation
    ///
    /// Returns the number of messages that produced a reply.
    pub async fn run<R, W>(
        &self,
        input: R,
        mut output: W,
        shutdown: CancellationToken,
    ) -> anyhow::Result<usize>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        let mut replied = 0;

        loop {
            let line = tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("relay shutdown requested");
                    break;
                }
                line = lines.next_line() => line.context("read message")?,
            };

            let Some(line) = line else {
                info!("input closed");
                break;
            };

            if let Some(reply) = self.handle_message(&line).await {
                output
                    .write_all(format!("{reply}\n").as_bytes())
                    .await
                    .context("write reply")?;
                output.flush().await.context("flush reply")?;
                replied += 1;
            }
        }

        Ok(replied)
    }
}

pub fn post_success(handle: &str, text: &str) -> String {
    format!("{handle} post: {text} success")
}

pub fn post_failure(handle: &str, err: &LensError) -> String {
    format!("{handle} post failed: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_formats() {
        assert_eq!(post_success("alice", "gm"), "alice post: gm success");

        let err = LensError::Api {
            reason: "REJECTED".to_string(),
            code: None,
        };
        assert_eq!(
            post_failure("alice", &err),
            "alice post failed: API error: REJECTED"
        );
    }
}
