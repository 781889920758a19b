use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use capacity_planner::api::{AppState, create_router};
use capacity_planner::calculation::enrich_pis_with_limits;
use capacity_planner::config::{ConfigLoader, Settings, StorageBackend};
use capacity_planner::storage::{InMemoryStore, JsonFileStore, PiStore};

#[derive(Parser)]
#[command(name = "capacity-planner")]
#[command(about = "Sprint capacity planning for Program Increments")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve {
        /// YAML settings file
        #[arg(short, long)]
        settings: Option<PathBuf>,
    },
    /// Print the enriched view of the stored PIs as JSON
    Report {
        /// YAML settings file
        #[arg(short, long)]
        settings: Option<PathBuf>,
    },
}

/// Logs go to stderr so `report` output stays clean JSON.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "capacity_planner=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    match path {
        Some(path) => Ok(ConfigLoader::load_settings(path)?),
        None => Ok(Settings::default()),
    }
}

fn open_store(settings: &Settings) -> Arc<dyn PiStore> {
    match settings.storage {
        StorageBackend::File => Arc::new(JsonFileStore::new(settings.pis_path())),
        StorageBackend::Memory => Arc::new(InMemoryStore::new()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Commands::Serve { settings } => {
            let settings = load_settings(settings.as_deref())?;
            let config = ConfigLoader::load_or_default(settings.config_dir())?.into_config();
            let state = AppState::new(open_store(&settings), config, settings.limits())
                .with_config_dir(settings.config_dir());
            let app = create_router(state);

            let listener = tokio::net::TcpListener::bind(&settings.bind_address)
                .await
                .with_context(|| format!("cannot bind {}", settings.bind_address))?;
            tracing::info!(
                "Capacity planner listening on http://{}",
                settings.bind_address
            );

            axum::serve(listener, app).await?;
        }
        Commands::Report { settings } => {
            let settings = load_settings(settings.as_deref())?;
            let config = ConfigLoader::load_or_default(settings.config_dir())?.into_config();
            let pis = open_store(&settings).load()?;
            let enriched = enrich_pis_with_limits(&pis, &config, &settings.limits());
            println!("{}", serde_json::to_string_pretty(&enriched)?);
        }
    }

    Ok(())
}
