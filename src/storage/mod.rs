//! Document persistence.
//!
//! Every entity is stored as a JSON document in its own collection. The
//! store assigns each inserted document an identifier which is kept beside
//! the document, never inside it, so documents read back carry no id.

pub mod memory;
pub mod postgres;
pub mod query;

use std::fmt;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::aggregates::{BlogPost, NewsletterSubscriber, Order, Product};

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;
pub use query::{BlogPostQuery, ProductQuery};

/// A stored document: field name to value, nesting preserved.
pub type Document = Map<String, Value>;

/// Storage location for each persisted entity kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection { Product, Order, NewsletterSubscriber, BlogPost }

impl Collection {
    pub const ALL: [Collection; 4] = [Self::Product, Self::Order, Self::NewsletterSubscriber, Self::BlogPost];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Order => "order",
            Self::NewsletterSubscriber => "newslettersubscriber",
            Self::BlogPost => "blogpost",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

/// Conjunction of exact field matches. An empty filter matches everything.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filter(Vec<(&'static str, Value)>);

impl Filter {
    pub fn new() -> Self { Self::default() }

    pub fn equals(mut self, field: &'static str, value: impl Into<Value>) -> Self {
        self.0.push((field, value.into()));
        self
    }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn matches(&self, document: &Document) -> bool {
        self.0.iter().all(|(field, value)| document.get(*field) == Some(value))
    }

    /// The filter as a JSON object, suitable for containment queries.
    pub fn to_json(&self) -> Value {
        Value::Object(self.0.iter().map(|(k, v)| ((*k).to_string(), v.clone())).collect())
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached at all.
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store query failed: {0}")]
    Query(String),
    #[error("document encoding failed: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("{0} entity did not serialize to a JSON object")]
    NotADocument(Collection),
}

impl StoreError {
    pub fn is_unavailable(&self) -> bool { matches!(self, Self::Unavailable(_)) }
}

/// Backend holding the collections.
///
/// Implementations keep insertion order for `find` and never deduplicate:
/// inserting the same document twice yields two documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert `document` and return the identifier assigned to it.
    async fn insert(&self, collection: Collection, document: Document) -> Result<Uuid, StoreError>;

    /// All documents matching `filter`, in insertion order, without identifiers.
    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Document>, StoreError>;

    async fn find_by_id(&self, collection: Collection, id: Uuid) -> Result<Option<Document>, StoreError>;

    /// Names of collections that exist, at most `limit` of them.
    async fn list_collections(&self, limit: usize) -> Result<Vec<String>, StoreError>;
}

/// A schema type persisted in its own collection.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: Collection;
}

impl Entity for Product { const COLLECTION: Collection = Collection::Product; }
impl Entity for Order { const COLLECTION: Collection = Collection::Order; }
impl Entity for NewsletterSubscriber { const COLLECTION: Collection = Collection::NewsletterSubscriber; }
impl Entity for BlogPost { const COLLECTION: Collection = Collection::BlogPost; }

/// Persist `entity`, returning its identifier as an opaque string.
pub async fn create<E: Entity>(store: &dyn DocumentStore, entity: &E) -> Result<String, StoreError> {
    let document = match serde_json::to_value(entity)? {
        Value::Object(document) => document,
        _ => return Err(StoreError::NotADocument(E::COLLECTION)),
    };
    let id = store.insert(E::COLLECTION, document).await?;
    Ok(id.to_string())
}

pub async fn list<E: Entity>(store: &dyn DocumentStore, filter: &Filter) -> Result<Vec<E>, StoreError> {
    store
        .find(E::COLLECTION, filter)
        .await?
        .into_iter()
        .map(|document| serde_json::from_value(Value::Object(document)).map_err(StoreError::from))
        .collect()
}

/// First match for `filter`; with duplicate keys the earliest insert wins.
pub async fn find_first<E: Entity>(store: &dyn DocumentStore, filter: &Filter) -> Result<Option<E>, StoreError> {
    Ok(list(store, filter).await?.into_iter().next())
}

pub async fn get<E: Entity>(store: &dyn DocumentStore, id: Uuid) -> Result<Option<E>, StoreError> {
    store
        .find_by_id(E::COLLECTION, id)
        .await?
        .map(|document| serde_json::from_value(Value::Object(document)))
        .transpose()
        .map_err(StoreError::from)
}
