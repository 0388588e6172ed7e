//! HTTP surface.

pub mod error;
pub mod extract;
pub mod handlers;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::storage::DocumentStore;

pub use error::{ApiError, ApiResult};

/// Which connection settings were supplied, without their values.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvPresence {
    pub database_url: bool,
    pub database_name: bool,
}

impl From<&Config> for EnvPresence {
    fn from(config: &Config) -> Self {
        Self { database_url: config.database_url.is_some(), database_name: config.database_name.is_some() }
    }
}

#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn DocumentStore>,
    pub env: EnvPresence,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, env: EnvPresence) -> Self { Self { store, env } }

    pub fn store(&self) -> &dyn DocumentStore { self.store.as_ref() }

    /// False when running on the in-memory fallback.
    pub fn database_configured(&self) -> bool { self.env.database_url }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/test", get(handlers::diagnostics))
        .route("/products", get(handlers::list_products).post(handlers::create_product))
        .route("/products/:handle", get(handlers::get_product))
        .route("/newsletter", post(handlers::subscribe))
        .route("/orders", post(handlers::create_order))
        .route("/orders/:id", get(handlers::get_order))
        .route("/shipping/calc", get(handlers::calc_shipping))
        .route("/blog", get(handlers::list_posts).post(handlers::create_post))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
