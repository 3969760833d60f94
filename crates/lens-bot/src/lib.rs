/*
[INPUT]:  Public API exports for lens-bot crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod cli;
pub mod config;
pub mod relay;

// Re-export main types for convenience
pub use cli::{Cli, Command, run_command};
pub use config::BotConfig;
pub use relay::MessageRelay;
