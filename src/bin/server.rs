//! sheetsync CLI
//!
//! `serve` runs the HTTP sync endpoint; `sync-all` is the one-shot
//! admin export for running without a browser.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use sheetsync::{
    config::{ContentConfig, SheetsConfig},
    error::Result,
    http::{self, AppState},
    pipeline,
    services::{ContentClient, SheetsClient, TokenProvider},
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// sheetsync - Google Sheets sync service for club submissions
#[derive(Parser, Debug)]
#[command(
    name = "sheetsync",
    version,
    about = "Syncs club form submissions to Google Sheets"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP sync endpoint
    Serve {
        /// Address to bind
        #[arg(long, default_value = "0.0.0.0:3000")]
        bind: SocketAddr,
    },

    /// Pull all submissions from the content API and replace every worksheet
    SyncAll,

    /// Validate environment configuration
    Check,
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { bind } => {
            let config = SheetsConfig::from_env()?;
            let store = build_store(&config)?;
            let state = AppState {
                store: Arc::new(store),
                spreadsheet_id: config.spreadsheet_id.clone(),
            };

            let listener = tokio::net::TcpListener::bind(bind).await?;
            info!(%bind, spreadsheet = %config.spreadsheet_id, "sheetsync listening");
            axum::serve(listener, http::router(state)).await?;
        }

        Command::SyncAll => {
            let sheets_config = SheetsConfig::from_env()?;
            let content_config = ContentConfig::from_env()?;
            let store = build_store(&sheets_config)?;
            let content = ContentClient::new(&content_config)?;

            let report = pipeline::run_export(&content, &store).await?;
            info!(
                contacts = report.contacts.count,
                registrations = report.registrations.count,
                stats = report.stats.count,
                "export complete"
            );
        }

        Command::Check => {
            match SheetsConfig::from_env() {
                Ok(config) => info!(
                    spreadsheet = %config.spreadsheet_id,
                    account = %config.service_account_email,
                    "sheets configuration OK"
                ),
                Err(e) => info!("sheets configuration incomplete: {e}"),
            }
            match ContentConfig::from_env() {
                Ok(config) => info!(base_url = %config.base_url, "content API configuration OK"),
                Err(e) => info!("content API configuration incomplete: {e}"),
            }
        }
    }

    Ok(())
}

fn build_store(config: &SheetsConfig) -> Result<SheetsClient> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?;
    let tokens = Arc::new(TokenProvider::new(client.clone(), config)?);
    Ok(SheetsClient::new(client, tokens, config))
}
