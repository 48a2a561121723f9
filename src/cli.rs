use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::database::MongoStore;
use crate::fixture::Fixture;
use crate::server;

#[derive(Parser)]
#[command(name = "shoppin")]
#[command(about = "Shoppin catalog API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Port to listen on, overrides PORT")]
        port: Option<u16>,
    },

    #[command(about = "Insert categories, products and users from a JSON fixture")]
    Seed {
        #[arg(help = "Path to the fixture file")]
        file: PathBuf,
    },
}

pub async fn run(cli: Cli, mut config: AppConfig) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            server::serve(config).await
        }
        Commands::Seed { file } => {
            let fixture = Fixture::from_path(&file)
                .with_context(|| format!("failed to load fixture {}", file.display()))?;
            let store = MongoStore::connect(&config.database.uri, &config.database.name).await?;
            let report = fixture.load_into(&store).await?;
            tracing::info!(
                "Seeded {} documents ({} categories, {} products, {} users)",
                report.total(),
                report.categories,
                report.products,
                report.users
            );
            Ok(())
        }
    }
}
