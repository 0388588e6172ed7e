//! STOUSH storefront backend
//!
//! Catalog, orders, newsletter signups and the journal, stored as JSON
//! documents, plus flat-rate shipping quotes.
//!
//! ## Layout
//! - [`domain`] - schemas, payload validation, shipping rule
//! - [`storage`] - document store contract, PostgreSQL and in-memory backends
//! - [`api`] - axum router and handlers
//! - [`config`] - environment configuration

pub mod api;
pub mod config;
pub mod domain;
pub mod storage;

pub use api::{router, ApiError, AppState};
pub use config::{Config, ConfigError};
pub use storage::{DocumentStore, MemoryDocumentStore, PgDocumentStore, StoreError};
