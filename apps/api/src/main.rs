mod config;
mod errors;
mod routes;
mod screening;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::screening::engine::ScreeningEngine;
use crate::screening::tables::ScreeningTables;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting screener v{}", env!("CARGO_PKG_VERSION"));

    let tables = load_tables(&config)?;
    info!(
        skills = tables.skill_synonyms.len(),
        experience_patterns = tables.experience_patterns.len(),
        cultural_values = tables.cultural_indicators.len(),
        "Screening tables loaded"
    );

    let engine = ScreeningEngine::new(tables.clone()).context("Invalid screening tables")?;

    let state = AppState {
        config: config.clone(),
        screener: Arc::new(engine),
        tables: Arc::new(tables),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Built-in tables unless `SCREENING_TABLES_PATH` points at a JSON override.
fn load_tables(config: &Config) -> Result<ScreeningTables> {
    match &config.tables_path {
        Some(path) => {
            info!("Loading screening tables from {}", path.display());
            Ok(ScreeningTables::from_json_file(path)?)
        }
        None => Ok(ScreeningTables::default()),
    }
}
