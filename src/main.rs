use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use person_api::config;
use person_api::database::{MemoryPersonStore, PersonStore, PgPersonStore};
use person_api::{app, AppState};

#[derive(Parser, Debug)]
#[command(name = "person-api")]
#[command(about = "Person CRUD API with a JWT-gated v2")]
#[command(version)]
struct Args {
    /// Directory holding database.yml and jwt.json
    #[arg(long, env = "PERSON_API_CONFIG_DIR", default_value = "config")]
    config_dir: PathBuf,

    /// Listener port
    #[arg(long, env = "PERSON_API_PORT", default_value_t = 8080)]
    port: u16,

    /// Keep persons in process memory instead of PostgreSQL
    #[arg(long)]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up PERSON_API_* settings
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let config = config::init(&args.config_dir)
        .with_context(|| format!("failed to load config from {}", args.config_dir.display()))?;

    let store: Arc<dyn PersonStore> = if args.in_memory {
        tracing::info!("Using in-memory person store");
        Arc::new(MemoryPersonStore::new())
    } else {
        Arc::new(
            PgPersonStore::connect(&config.database)
                .await
                .context("failed to open database")?,
        )
    };

    let state = AppState::from_config(config, store).context("failed to set up token service")?;

    let bind_addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Person API listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
