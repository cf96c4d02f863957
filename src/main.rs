//! # Bridger
//!
//! Moves native test ETH from Sepolia into L2 rollup testnets for every
//! wallet in a key file, via each rollup's official bridge contract.

use bridger::{batch::BatchOrchestrator, cli::Args, config::BridgeConfig, wallets};
use clap::Parser;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

async fn run(args: Args) -> eyre::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = if args.config.exists() {
        BridgeConfig::load_from_file(&args.config)?
    } else {
        let config = BridgeConfig::default();
        config.save_to_file(&args.config)?;
        info!(path = %args.config.display(), "wrote default configuration");
        config
    };

    let keys = wallets::load_keys(&args.keys)?;
    if keys.is_empty() {
        eyre::bail!("no private keys found in {}", args.keys.display());
    }
    info!(wallets = keys.len(), destination = %args.destination, "starting batch bridge");

    let result = BatchOrchestrator::new(&config)
        .run(&keys, args.destination, args.amount, args.delay)
        .await;

    info!(
        succeeded = result.succeeded,
        failed = result.failed,
        success_rate = format!("{:.1}%", result.success_rate()),
        "batch complete"
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    // Enable backtraces unless a RUST_BACKTRACE value has already been explicitly provided.
    if std::env::var_os("RUST_BACKTRACE").is_none() {
        std::env::set_var("RUST_BACKTRACE", "1");
    }

    let args = Args::parse();
    if let Err(err) = run(args).await {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}
