//! Seed data loading.
//!
//! A fixture is one JSON file with an optional array per collection:
//!
//! ```json
//! { "categories": [...], "products": [...], "users": [...] }
//! ```
//!
//! Every entry is checked before anything is written, so a bad file leaves
//! the store untouched.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::database::{Collection, Document, DocumentStore, StoreError};

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read fixture: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse fixture: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Entry {index} in {collection} is not a JSON object")]
    NotAnObject { collection: Collection, index: usize },

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Default, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub categories: Vec<Value>,
    #[serde(default)]
    pub products: Vec<Value>,
    #[serde(default)]
    pub users: Vec<Value>,
}

/// Number of documents inserted per collection.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub categories: usize,
    pub products: usize,
    pub users: usize,
}

impl SeedReport {
    pub fn total(&self) -> usize {
        self.categories + self.products + self.users
    }
}

impl Fixture {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(text)?)
    }

    pub async fn load_into(self, store: &dyn DocumentStore) -> Result<SeedReport, FixtureError> {
        let batches = [
            (Collection::Categories, validate(Collection::Categories, self.categories)?),
            (Collection::Products, validate(Collection::Products, self.products)?),
            (Collection::Users, validate(Collection::Users, self.users)?),
        ];

        let mut report = SeedReport::default();
        for (collection, documents) in batches {
            let count = documents.len();
            for document in documents {
                store.insert_one(collection, document).await?;
            }
            tracing::info!("Seeded {} document(s) into {}", count, collection);

            match collection {
                Collection::Categories => report.categories = count,
                Collection::Products => report.products = count,
                Collection::Users => report.users = count,
            }
        }
        Ok(report)
    }
}

fn validate(collection: Collection, entries: Vec<Value>) -> Result<Vec<Document>, FixtureError> {
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Value::Object(document) => Ok(document),
            _ => Err(FixtureError::NotAnObject { collection, index }),
        })
        .collect()
}
