use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{Collection, Document, DocumentStore, RecordId, StoreError, StoreQuery, ID_FIELD};

/// In-process document store with natural (insertion) ordering.
///
/// Used by the integration tests and by anything that wants the HTTP surface
/// without a MongoDB server. Identifiers are kept in their hex string form,
/// which is also what the Mongo store hands back to handlers.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate an outage: every operation fails with `StoreError::Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn len(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .await
            .get(&collection)
            .map_or(0, Vec::len)
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store marked unavailable".to_string()));
        }
        Ok(())
    }
}

fn document_id(document: &Document) -> Option<&Value> {
    document.get(ID_FIELD)
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_one(&self, collection: Collection, id: &RecordId) -> Result<Option<Document>, StoreError> {
        self.check_available()?;
        let wanted = Value::String(id.to_hex());
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|documents| documents.iter().find(|doc| document_id(doc) == Some(&wanted)))
            .cloned())
    }

    async fn find(&self, collection: Collection, query: &StoreQuery) -> Result<Vec<Document>, StoreError> {
        self.check_available()?;
        let collections = self.collections.read().await;
        let mut matched: Vec<Document> = collections
            .get(&collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|doc| query.filter.matches(doc))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if query.sort_by_id {
            // Hex object ids sort the same as their bytes
            matched.sort_by(|a, b| {
                let a = document_id(a).and_then(Value::as_str).unwrap_or_default();
                let b = document_id(b).and_then(Value::as_str).unwrap_or_default();
                a.cmp(b)
            });
        }

        let skip = usize::try_from(query.skip.unwrap_or(0)).unwrap_or(usize::MAX);
        let limit = query
            .limit
            .map_or(usize::MAX, |limit| usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(matched.into_iter().skip(skip).take(limit).collect())
    }

    async fn insert_one(&self, collection: Collection, mut document: Document) -> Result<Value, StoreError> {
        self.check_available()?;

        let id = match document.remove(ID_FIELD) {
            Some(given) => match RecordId::from_json(&given) {
                Some(id) => Value::String(id.to_hex()),
                None => given,
            },
            None => Value::String(RecordId::generate().to_hex()),
        };

        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection).or_default();
        if documents.iter().any(|doc| document_id(doc) == Some(&id)) {
            return Err(StoreError::Query(format!(
                "E11000 duplicate key error collection: {} index: _id_ dup key: {}",
                collection, id
            )));
        }

        document.insert(ID_FIELD.to_string(), id.clone());
        documents.push(document);
        Ok(id)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}
