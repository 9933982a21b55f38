use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use jupswap::{app, config::Config};

#[derive(Parser, Debug)]
#[command(version, about = "Single-endpoint Jupiter swap service for Solana")]
struct Args {
    /// Path to a .env file (defaults to ./.env when present)
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Listen port (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Run a single swap, print the JSON result and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Variables already set in the environment win over the file
    match &args.env_file {
        Some(path) => {
            dotenvy::from_path(path).with_context(|| format!("Failed to load {}", path.display()))?;
        }
        None => {
            let _ = dotenvy::dotenv();
        }
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut cfg = Config::from_env()?;
    if let Some(port) = args.port {
        cfg.port = port;
    }

    if args.once {
        let outcome = app::run_once(cfg).await?;
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    app::run(cfg).await
}
