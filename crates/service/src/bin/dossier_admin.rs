//! Dossier maintenance binary.
//!
//! The request layer is deployed separately; this binary covers the
//! operational tasks that need the same wiring: migrations, health checks,
//! and recency snapshot inspection.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dossier_core::config::AppConfig;
use dossier_service::CaseService;
use dossier_tracker::AccessTracker;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Dossier - case backend maintenance tool
#[derive(Parser, Debug)]
#[command(name = "dossier-admin")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "DOSSIER_CONFIG",
        default_value = "config/dossier.toml"
    )]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run database migrations and exit.
    Migrate,
    /// Check storage and metadata connectivity.
    Check,
    /// Print the recently requested cases, most-recent-first.
    Recent {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        size: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::new("info,sqlx=warn")
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = load_config(&args.config)?;

    match args.command {
        Command::Migrate => {
            // Opening the store runs migrations.
            let metadata = dossier_metadata::from_config(&config.metadata)
                .await
                .context("failed to initialize metadata store")?;
            metadata.health_check().await?;
            tracing::info!("migrations applied");
        }
        Command::Check => {
            let storage = dossier_storage::from_config(&config.storage)
                .await
                .context("failed to initialize storage")?;
            storage
                .health_check()
                .await
                .context("storage health check failed")?;
            tracing::info!(backend = storage.backend_name(), "storage ok");

            let metadata = dossier_metadata::from_config(&config.metadata)
                .await
                .context("failed to initialize metadata store")?;
            metadata
                .health_check()
                .await
                .context("metadata health check failed")?;
            tracing::info!("metadata ok");
        }
        Command::Recent { page, size } => {
            let metadata = dossier_metadata::from_config(&config.metadata)
                .await
                .context("failed to initialize metadata store")?;
            let tracker = Arc::new(AccessTracker::start(&config.tracker).await);
            let service = CaseService::new(metadata, tracker.clone());

            let result = service.recent_by_request(page, size).await;
            tracker.shutdown().await;
            let recent = result.context("failed to list recent cases")?;

            println!("page {} of {} total", recent.page, recent.total);
            for case in &recent.items {
                println!("{}\t{}", case.number, case.upload_date);
            }
        }
    }

    Ok(())
}

fn load_config(path: &str) -> Result<AppConfig> {
    let has_config_file = std::path::Path::new(path).exists();
    let mut figment = Figment::new();

    if has_config_file {
        tracing::info!(config_path = %path, "Loading configuration from file");
        figment = figment.merge(Toml::file(path));
    } else {
        tracing::debug!("No config file found at {path}");
    }

    let has_env_config =
        std::env::vars().any(|(key, _)| key.starts_with("DOSSIER_") && key != "DOSSIER_CONFIG");

    if !has_config_file && !has_env_config {
        anyhow::bail!(
            "No configuration provided.\n\n\
             Provide configuration via one of:\n  \
             1. Config file: dossier-admin --config /path/to/dossier.toml <command>\n  \
             2. Environment variables: DOSSIER_STORAGE__TYPE=filesystem \
             DOSSIER_STORAGE__PATH=/var/lib/dossier/files … dossier-admin <command>\n\n\
             Set DOSSIER_CONFIG to specify a default config file path."
        );
    }

    figment
        .merge(Env::prefixed("DOSSIER_").split("__"))
        .extract()
        .context("failed to load configuration")
}
