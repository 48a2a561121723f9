pub mod memory;
pub mod mongo;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde_json::{Map, Value};
use thiserror::Error;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// A loosely-typed document as it crosses the HTTP boundary.
pub type Document = Map<String, Value>;

/// Name of the identifier field in every collection.
pub const ID_FIELD: &str = "_id";

/// Errors from the document store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Encoding error: {0}")]
    Encoding(String),
}

/// The three collections the catalog knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Categories,
    Products,
    Users,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Categories => "categories",
            Collection::Products => "products",
            Collection::Users => "users",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Store-native document identifier (a 12-byte object id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId(ObjectId);

impl RecordId {
    pub fn generate() -> Self {
        RecordId(ObjectId::new())
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }

    /// Reads an identifier from its JSON forms: a 24-character hex string or
    /// extended JSON `{"$oid": "..."}`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(hex) => hex.parse().ok(),
            Value::Object(map) if map.len() == 1 => map.get("$oid").and_then(Self::from_json),
            _ => None,
        }
    }
}

impl FromStr for RecordId {
    type Err = mongodb::bson::oid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s).map(RecordId)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

/// Predicate applied to a collection scan.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Filter {
    #[default]
    All,
    /// Field equals value, compared without coercion.
    Eq { field: String, value: Value },
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn matches(&self, document: &Document) -> bool {
        match self {
            Filter::All => true,
            Filter::Eq { field, value } => document.get(field) == Some(value),
        }
    }
}

/// A multi-document read: filter plus optional skip/limit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StoreQuery {
    pub filter: Filter,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
    /// Order by identifier ascending instead of natural order
    pub sort_by_id: bool,
}

impl StoreQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn matching(filter: Filter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn paged(mut self, skip: u64, limit: u64) -> Self {
        self.skip = Some(skip);
        self.limit = Some(limit);
        self.sort_by_id = true;
        self
    }
}

/// Document store consumed by the request handlers.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch one document by identifier; `None` when absent.
    async fn find_one(&self, collection: Collection, id: &RecordId) -> Result<Option<Document>, StoreError>;

    async fn find(&self, collection: Collection, query: &StoreQuery) -> Result<Vec<Document>, StoreError>;

    /// Insert a document as-is and return the identifier it was stored under.
    async fn insert_one(&self, collection: Collection, document: Document) -> Result<Value, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_id_reads_hex_and_extended_json() {
        let hex = "65a1b2c3d4e5f60718293a4b";
        let id: RecordId = hex.parse().unwrap();
        assert_eq!(id.to_hex(), hex);
        assert_eq!(RecordId::from_json(&json!(hex)), Some(id));
        assert_eq!(RecordId::from_json(&json!({ "$oid": hex })), Some(id));
        assert_eq!(RecordId::from_json(&json!(42)), None);
        assert!("not-an-id".parse::<RecordId>().is_err());
    }

    #[test]
    fn eq_filter_does_not_coerce() {
        let doc = json!({ "category_id": "1", "featured": true });
        let doc = doc.as_object().unwrap();
        assert!(Filter::eq("category_id", "1").matches(doc));
        assert!(!Filter::eq("category_id", 1).matches(doc));
        assert!(Filter::eq("featured", true).matches(doc));
        assert!(!Filter::eq("discount", true).matches(doc));
        assert!(Filter::All.matches(doc));
    }

    #[test]
    fn paged_query_sorts_by_id() {
        let query = StoreQuery::all().paged(10, 10);
        assert_eq!(query.skip, Some(10));
        assert_eq!(query.limit, Some(10));
        assert!(query.sort_by_id);
        assert_eq!(query.filter, Filter::All);
    }
}
