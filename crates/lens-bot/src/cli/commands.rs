/*
[INPUT]:  Ready Lens session and a parsed one-shot command
[OUTPUT]: Human-readable reply text
[POS]:    CLI layer - one-shot command execution
[UPDATE]: When adding subcommands or changing their output
*/

use anyhow::{Context, Result, bail};
use lens_adapter::LensSession;

use super::Command;
use crate::relay::{post_failure, post_success};

/// Run one command and format its result
///
/// A failed post is reported in the reply rather than as an error, matching
/// what the relay prints for the same failure.
pub async fn run_command(session: &LensSession, command: &Command) -> Result<String> {
    let me = session.profile();

    let reply = match command {
        Command::Post { text } => match session.post(text).await {
            Ok(_) => post_success(&me.handle, text),
            Err(err) => post_failure(&me.handle, &err),
        },
        Command::Follow { handle } => {
            let action_id = session
                .follow(handle)
                .await
                .with_context(|| format!("follow {handle}"))?;
            format!("{} followed {handle} ({action_id})", me.handle)
        }
        Command::Like { publication_id } => {
            session
                .like(publication_id)
                .await
                .with_context(|| format!("like {publication_id}"))?;
            format!("{} liked {publication_id}", me.handle)
        }
        Command::Mirror { publication_id } => {
            let tx_hash = session
                .mirror(publication_id)
                .await
                .with_context(|| format!("mirror {publication_id}"))?;
            format!("{} mirrored {publication_id}: {tx_hash}", me.handle)
        }
        Command::Feed { limit } => session.feed(*limit).await.context("read feed")?.join("\n"),
        Command::Followers { profile_id, limit } => {
            let profile_id = profile_id.as_deref().unwrap_or(&me.profile_id);
            session
                .followers(profile_id, *limit)
                .await
                .context("list followers")?
                .join("\n")
        }
        Command::Following { address, limit } => {
            let address = address.as_deref().unwrap_or(session.address());
            session
                .following(address, *limit)
                .await
                .context("list following")?
                .join("\n")
        }
        Command::Profile { handle: None } => format!(
            "{} ({}): {} followers, {} following",
            me.handle, me.profile_id, me.follower_count, me.following_count
        ),
        Command::Profile {
            handle: Some(handle),
        } => {
            let profile = session
                .profile_by_handle(handle)
                .await
                .with_context(|| format!("look up {handle}"))?;
            format!(
                "{} ({}): {} followers, {} following",
                profile.handle,
                profile.id,
                profile.stats.total_followers,
                profile.stats.total_following
            )
        }
        Command::Recommended => session
            .recommended_profiles()
            .await
            .context("list recommended profiles")?
            .join("\n"),
        Command::Relay => bail!("relay reads from stdin and is not a one-shot command"),
    };

    Ok(reply)
}
