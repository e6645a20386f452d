//! `matrix-convert` binary.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use matrix_cli::config::load_dotenv;
use matrix_cli::{Args, CliConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Before tracing, so RUST_LOG may come from .env
    let env_file = load_dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Some(path) = env_file {
        tracing::debug!(path = %path.display(), "Loaded .env");
    }

    let config = CliConfig::from_env().with_args(&args);
    tracing::debug!(?config, "Configuration loaded");

    matrix_cli::run(args, config).await
}
