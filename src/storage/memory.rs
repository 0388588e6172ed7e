//! In-process document store.
//!
//! Used when no database is configured and by the HTTP tests. Contents are
//! lost when the process exits.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Collection, Document, DocumentStore, Filter, StoreError};

#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    collections: Arc<RwLock<BTreeMap<Collection, Vec<(Uuid, Document)>>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(&self, collection: Collection, document: Document) -> Result<Uuid, StoreError> {
        let id = Uuid::now_v7();
        self.collections.write().await.entry(collection).or_default().push((id, document));
        Ok(id)
    }

    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .map(|docs| docs.iter().filter(|(_, d)| filter.matches(d)).map(|(_, d)| d.clone()).collect())
            .unwrap_or_default())
    }

    async fn find_by_id(&self, collection: Collection, id: Uuid) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|(doc_id, _)| *doc_id == id))
            .map(|(_, d)| d.clone()))
    }

    async fn list_collections(&self, limit: usize) -> Result<Vec<String>, StoreError> {
        let collections = self.collections.read().await;
        let mut names: Vec<String> = collections.keys().map(|c| c.name().to_string()).collect();
        names.sort();
        names.truncate(limit);
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn test_find_keeps_insertion_order() {
        let store = MemoryDocumentStore::new();
        for n in 0..5 {
            store.insert(Collection::BlogPost, doc(json!({"n": n, "published": n % 2 == 0}))).await.unwrap();
        }
        let found = store.find(Collection::BlogPost, &Filter::new().equals("published", true)).await.unwrap();
        let ns: Vec<_> = found.iter().map(|d| d["n"].clone()).collect();
        assert_eq!(ns, vec![json!(0), json!(2), json!(4)]);
    }

    #[tokio::test]
    async fn test_empty_collection_is_not_an_error() {
        let store = MemoryDocumentStore::new();
        assert!(store.find(Collection::Order, &Filter::new()).await.unwrap().is_empty());
        assert!(store.list_collections(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_collections() {
        let store = MemoryDocumentStore::new();
        store.insert(Collection::Product, doc(json!({}))).await.unwrap();
        store.insert(Collection::BlogPost, doc(json!({}))).await.unwrap();
        store.insert(Collection::Product, doc(json!({}))).await.unwrap();
        assert_eq!(store.list_collections(10).await.unwrap(), vec!["blogpost", "product"]);
        assert_eq!(store.list_collections(1).await.unwrap(), vec!["blogpost"]);
    }

    #[tokio::test]
    async fn test_find_by_id_scoped_to_collection() {
        let store = MemoryDocumentStore::new();
        let id = store.insert(Collection::Order, doc(json!({"email": "a@b.co"}))).await.unwrap();
        assert!(store.find_by_id(Collection::Order, id).await.unwrap().is_some());
        assert!(store.find_by_id(Collection::Product, id).await.unwrap().is_none());
    }
}
