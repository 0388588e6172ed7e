//! Route handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::instrument;
use uuid::Uuid;

use super::error::{ApiError, ApiResult};
use super::extract::{ValidJson, ValidQuery};
use super::AppState;
use crate::domain::aggregates::{BlogPost, NewsletterSubscriber, Order, Product};
use crate::domain::shipping::{self, ShippingQuote, DOMESTIC_COUNTRY};
use crate::storage::{self, BlogPostQuery, ProductQuery};

const DIAGNOSTIC_COLLECTION_LIMIT: usize = 10;
const DIAGNOSTIC_ERROR_CHARS: usize = 60;

#[derive(Debug, Serialize, Deserialize)]
pub struct Created {
    pub id: String,
}

fn created(id: String) -> (StatusCode, Json<Created>) { (StatusCode::CREATED, Json(Created { id })) }

pub async fn root() -> Json<Value> { Json(json!({"brand": "STOUSH", "tagline": "Start Something"})) }

pub async fn health() -> Json<Value> { Json(json!({"status": "healthy", "service": "stoush-api"})) }

// Catalog

#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<ProductQuery>,
) -> ApiResult<Json<Vec<Product>>> {
    let products = storage::list(state.store(), &params.filter()).await?;
    Ok(Json(products))
}

#[instrument(skip(state))]
pub async fn get_product(State(state): State<AppState>, Path(handle): Path<String>) -> ApiResult<Json<Product>> {
    storage::find_first::<Product>(state.store(), &ProductQuery::handle(&handle))
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Product"))
}

#[instrument(skip_all, fields(handle = %product.handle))]
pub async fn create_product(State(state): State<AppState>, ValidJson(product): ValidJson<Product>) -> ApiResult<(StatusCode, Json<Created>)> {
    let id = storage::create(state.store(), &product).await?;
    tracing::info!(%id, "product created");
    Ok(created(id))
}

// Newsletter

#[instrument(skip_all, fields(source = ?subscriber.source))]
pub async fn subscribe(
    State(state): State<AppState>,
    ValidJson(subscriber): ValidJson<NewsletterSubscriber>,
) -> ApiResult<(StatusCode, Json<Created>)> {
    let id = storage::create(state.store(), &subscriber).await?;
    tracing::info!(%id, "newsletter subscription stored");
    Ok(created(id))
}

// Orders. Payment happens client-side; the order is stored as submitted.

#[instrument(skip_all, fields(items = order.items.len(), status = ?order.status))]
pub async fn create_order(State(state): State<AppState>, ValidJson(order): ValidJson<Order>) -> ApiResult<(StatusCode, Json<Created>)> {
    let id = storage::create(state.store(), &order).await?;
    tracing::info!(%id, "order created");
    Ok(created(id))
}

#[instrument(skip(state))]
pub async fn get_order(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Order>> {
    let id = Uuid::parse_str(&id).map_err(|_| ApiError::InvalidId)?;
    storage::get::<Order>(state.store(), id).await?.map(Json).ok_or(ApiError::NotFound("Order"))
}

// Shipping

#[derive(Debug, Deserialize)]
pub struct ShippingParams {
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default)]
    pub subtotal: f64,
}

fn default_country() -> String { DOMESTIC_COUNTRY.to_string() }

pub async fn calc_shipping(ValidQuery(params): ValidQuery<ShippingParams>) -> ApiResult<Json<ShippingQuote>> {
    shipping::quote(&params.country, params.subtotal).map(Json).map_err(ApiError::Validation)
}

// Blog

#[instrument(skip(state))]
pub async fn list_posts(State(state): State<AppState>) -> ApiResult<Json<Vec<BlogPost>>> {
    let posts = storage::list(state.store(), &BlogPostQuery::published().filter()).await?;
    Ok(Json(posts))
}

#[instrument(skip_all, fields(slug = %post.slug))]
pub async fn create_post(State(state): State<AppState>, ValidJson(post): ValidJson<BlogPost>) -> ApiResult<(StatusCode, Json<Created>)> {
    let id = storage::create(state.store(), &post).await?;
    tracing::info!(%id, "blog post created");
    Ok(created(id))
}

// Diagnostics

#[derive(Debug, Serialize, Deserialize)]
pub struct Diagnostics {
    pub backend: String,
    pub database: String,
    pub collections: Vec<String>,
    pub database_url: String,
    pub database_name: String,
}

/// Always answers; store failures are folded into the `database` field.
pub async fn diagnostics(State(state): State<AppState>) -> Json<Diagnostics> {
    let (database, collections) = if !state.database_configured() {
        ("not connected".to_string(), Vec::new())
    } else {
        match state.store().list_collections(DIAGNOSTIC_COLLECTION_LIMIT).await {
            Ok(collections) => ("connected".to_string(), collections),
            Err(err) => {
                tracing::warn!(error = %err, "diagnostic store check failed");
                (format!("error: {}", truncate(&err.to_string(), DIAGNOSTIC_ERROR_CHARS)), Vec::new())
            }
        }
    };
    Json(Diagnostics {
        backend: "running".to_string(),
        database,
        collections,
        database_url: presence(state.env.database_url),
        database_name: presence(state.env.database_name),
    })
}

fn presence(set: bool) -> String { (if set { "set" } else { "not set" }).to_string() }

fn truncate(s: &str, max_chars: usize) -> String { s.chars().take(max_chars).collect() }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("abcdef", 3), "abc");
        assert_eq!(truncate("ab", 3), "ab");
        assert_eq!(truncate("ééé", 2), "éé");
    }
}
