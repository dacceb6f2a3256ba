//! prdesk - a self-hosted PR and release-campaign desk for music labels
//!
//! Tracks contacts, the track registry, release plans, quick links and
//! headline metrics, and drafts pitches and imports records with AI help.

mod api;
mod config;
mod db;
mod models;
mod plugins;
mod storage;
mod stores;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::{Paths, StorageKind, UserConfig};
use crate::storage::{LocalStorage, RemoteStorage, StorageBackend};
use crate::stores::{DashboardData, DashboardStore};

/// prdesk - PR and release desk for music labels
#[derive(Parser, Debug)]
#[command(name = "prdesk")]
#[command(version)]
#[command(about = "A self-hosted PR and release-campaign desk for music labels")]
struct Args {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 1980)]
    port: u16,

    /// Enable debug mode
    #[arg(long)]
    debug: bool,

    /// Path to config directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// Storage backend, overriding settings.json
    #[arg(long, value_enum)]
    storage: Option<StorageKind>,

    /// Write the whole dashboard to a JSON file and exit
    #[arg(long, value_name = "FILE", conflicts_with = "import")]
    export: Option<PathBuf>,

    /// Replace the stored dashboard with a JSON export and exit
    #[arg(long, value_name = "FILE")]
    import: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };

    // sqlx logs every statement at info
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("{},sqlx=warn", log_level))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    info!("prdesk v{} starting...", env!("CARGO_PKG_VERSION"));

    // Initialize paths
    let paths = Paths::init(args.config)?;
    info!("Config directory: {:?}", paths.config_dir());

    let mut user_config = UserConfig::load()?;
    if let Some(kind) = args.storage {
        user_config.storage = kind;
    }

    let backend = open_backend(&user_config, &paths).await?;

    if let Some(path) = args.import {
        return import_file(backend.as_ref(), &path).await;
    }

    let store = DashboardStore::open(backend, user_config.seed_sample_data).await;

    if let Some(path) = args.export {
        return export_file(&store, &path);
    }

    start_prdesk(args.host, args.port, store, &user_config, &paths).await
}

async fn open_backend(config: &UserConfig, paths: &Paths) -> Result<Arc<dyn StorageBackend>> {
    let backend: Arc<dyn StorageBackend> = match config.storage {
        StorageKind::Local => {
            let db_path = paths.app_db_path();
            info!("Local storage: {:?}", db_path);
            Arc::new(LocalStorage::open(&db_path).await?)
        }
        StorageKind::Remote => {
            let remote = RemoteStorage::from_config(config)?;
            info!("Remote storage: {}", remote.document_url());
            Arc::new(remote)
        }
    };
    Ok(backend)
}

fn export_file(store: &DashboardStore, path: &Path) -> Result<()> {
    let data = store.snapshot();
    let content = serde_json::to_string_pretty(&data).context("Failed to serialize dashboard")?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write export to {}", path.display()))?;

    info!("Exported {} records to {:?}", data.stats().total(), path);
    Ok(())
}

async fn import_file(backend: &dyn StorageBackend, path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read import file {}", path.display()))?;
    let mut data: DashboardData =
        serde_json::from_str(&content).context("Import file is not a dashboard export")?;

    let moved = data.normalize_partitions();
    if moved > 0 {
        warn!("Moved {} contacts into their category's list", moved);
    }

    backend
        .save(&data)
        .await
        .with_context(|| format!("Failed to write to {} storage", backend.name()))?;

    info!(
        "Imported {} records into {} storage",
        data.stats().total(),
        backend.name()
    );
    Ok(())
}

async fn start_prdesk(
    host: String,
    port: u16,
    store: DashboardStore,
    config: &UserConfig,
    paths: &Paths,
) -> Result<()> {
    use actix_cors::Cors;
    use actix_web::{middleware, web, App, HttpServer};

    use crate::api::AppState;
    use crate::plugins::Gemini;

    if config.ai_api_key.trim().is_empty() {
        warn!("No AI API key configured. Pitches and smart import will return fallbacks.");
    }

    let gemini = Gemini::from_config(config);
    info!("AI model: {}", gemini.model());

    let state = web::Data::new(AppState {
        store,
        ai: Arc::new(gemini),
        backups_dir: paths.backups_dir(),
    });

    let addr = format!("{}:{}", host, port);
    info!("Server listening on http://{}", addr);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(api::configure)
    })
    .bind(addr)?
    .run()
    .await?;

    Ok(())
}
