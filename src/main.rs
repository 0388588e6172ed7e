//! STOUSH API server

use std::sync::Arc;

use anyhow::Result;
use stoush_api::api::{self, AppState, EnvPresence};
use stoush_api::storage::{DocumentStore, MemoryDocumentStore, PgDocumentStore};
use stoush_api::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store: Arc<dyn DocumentStore> = match &config.database_url {
        Some(url) => {
            let store = PgDocumentStore::connect_lazy(url, config.database_name.as_deref(), config.max_connections)?;
            if let Err(err) = store.migrate().await {
                tracing::warn!(error = %err, "collections not migrated yet; retrying on first use");
            }
            Arc::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; documents are kept in memory only");
            Arc::new(MemoryDocumentStore::new())
        }
    };

    let app = api::router(AppState::new(store, EnvPresence::from(&config)));
    let addr = config.socket_addr();
    tracing::info!("🚀 STOUSH API listening on {}", addr);
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}
