/*
[INPUT]:  Command-line arguments and environment
[OUTPUT]: Parsed CLI options and subcommands
[POS]:    CLI layer - argument definitions
[UPDATE]: When adding subcommands or global flags
*/

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::run_command;

#[derive(Parser, Debug)]
#[command(name = "lens-bot", version, about = "Post to Lens from the command line or a message stream")]
pub struct Cli {
    /// Optional YAML configuration file
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info", global = true)]
    pub log_level: String,
    /// Hex-encoded wallet private key
    #[arg(
        long = "private-key",
        env = "LENS_PRIVATE_KEY",
        hide_env_values = true,
        value_name = "HEX"
    )]
    pub private_key: String,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Publish a text post
    Post { text: String },
    /// Follow the profile behind a handle
    Follow { handle: String },
    /// Upvote a publication
    Like { publication_id: String },
    /// Mirror a publication
    Mirror { publication_id: String },
    /// List publication ids on your timeline
    Feed {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// List followers of a profile (defaults to yours)
    Followers {
        profile_id: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// List profiles followed by an address (defaults to yours)
    Following {
        address: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show a profile (defaults to yours)
    Profile { handle: Option<String> },
    /// List recommended profiles
    Recommended,
    /// Post every line read from stdin until EOF or a shutdown signal
    Relay,
}
