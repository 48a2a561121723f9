use clap::Parser;
use shoppin_api::cli::{self, Cli};
use shoppin_api::config::AppConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so MONGODB_URI, PORT and ACCESS_TOKEN_SECRET can live there
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.default_log_filter())),
        )
        .init();

    cli::run(cli, config).await
}
