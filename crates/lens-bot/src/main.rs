/*
[INPUT]:  CLI arguments, optional YAML configuration file, OS shutdown signals
[OUTPUT]: One command's reply, or a stdin relay with graceful shutdown
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or shutdown handling
*/

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use lens_adapter::{EvmWalletSigner, LensSession, WalletSigner};
use lens_bot::{BotConfig, Cli, Command, MessageRelay, run_command};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let config = load_config(args.config_path.as_deref())?;
    info!(api_url = %config.api_url, command = ?args.command, "starting lens-bot");

    let wallet = EvmWalletSigner::new(&args.private_key).context("load wallet key")?;
    info!(address = %wallet.address(), "wallet loaded");
    let signer: Arc<dyn WalletSigner> = Arc::new(wallet);

    let shutdown = CancellationToken::new();
    setup_signal_handlers(shutdown.clone());

    let client = config.client()?;
    let session = LensSession::connect_until(client, signer, &shutdown)
        .await
        .context("authenticate with lens")?;

    match args.command {
        Command::Relay => {
            let relay = MessageRelay::new(session);
            let stdin = BufReader::new(tokio::io::stdin());
            let replied = relay
                .run(stdin, tokio::io::stdout(), shutdown)
                .await
                .context("relay messages")?;
            info!(replied, "relay stopped");
        }
        command => {
            let reply = run_command(&session, &command).await?;
            println!("{reply}");
        }
    }

    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<BotConfig> {
    let Some(path) = path else {
        return Ok(BotConfig::default());
    };
    let path_str = path.to_str().context("config path must be valid utf-8")?;
    BotConfig::from_file(path_str).context("load config")
}

fn setup_signal_handlers(shutdown: CancellationToken) {
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT");
        shutdown_clone.cancel();
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let shutdown_clone = shutdown.clone();
        tokio::spawn(async move {
            match signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                    info!("received SIGTERM");
                    shutdown_clone.cancel();
                }
                Err(err) => {
                    warn!(error = %err, "failed to install SIGTERM handler");
                }
            }
        });
    }
}
