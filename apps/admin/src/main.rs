mod config;
mod errors;
mod models;
mod routes;
mod state;
mod store;
mod upload;

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::documents::PgDocumentStore;
use crate::store::postgres::{PgConnector, PgRecordStore};
use crate::store::supervisor::{RetryPolicy, Supervisor};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting recruit admin v{}", env!("CARGO_PKG_VERSION"));
    info!("Database: {:?}", config.db);

    // Relational store: the supervisor owns the pool and replaces it after drops
    let (supervisor, link) = Supervisor::new(
        PgConnector::new(&config.db),
        RetryPolicy::fixed(config.reconnect_delay),
        config.health_check_interval,
    );
    let supervisor = tokio::spawn(supervisor.run());

    // Document store: optional, stays disconnected if unreachable
    if std::env::var_os("MONGO_URI").is_some() && config.document_store_url.is_none() {
        warn!("MONGO_URI is not read; point DOCUMENT_STORE_URL at the resume database");
    }
    let documents = PgDocumentStore::connect(config.document_store_url.as_deref()).await;

    let state = AppState {
        records: Arc::new(PgRecordStore::new(link)),
        documents: Arc::new(documents),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Admin server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tokio::select! {
        served = axum::serve(listener, app).into_future() => served?,
        supervised = supervisor => {
            supervised.context("relational supervisor panicked")??;
        }
    }

    Ok(())
}
