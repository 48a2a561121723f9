use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, doc, Bson};
use mongodb::error::ErrorKind;
use mongodb::options::{ClientOptions, FindOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Database};
use serde_json::Value;
use tracing::{debug, info};

use super::{Collection, Document, DocumentStore, Filter, RecordId, StoreError, StoreQuery, ID_FIELD};

const APP_NAME: &str = "shoppin-api";

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        match err.kind.as_ref() {
            ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(_)
            | ErrorKind::ConnectionPoolCleared { .. }
            | ErrorKind::DnsResolve { .. } => StoreError::Unavailable(err.to_string()),
            _ => StoreError::Query(err.to_string()),
        }
    }
}

/// MongoDB-backed document store. The driver pools connections internally,
/// so one instance is shared by every request.
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    database: Database,
}

impl MongoStore {
    /// Build a client against `uri` using the stable v1 server API.
    ///
    /// No round trip happens here; the driver connects lazily, so an
    /// unreachable server only surfaces on the first operation or `ping`.
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(uri).await?;
        options.app_name = Some(APP_NAME.to_string());
        options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );

        let client = Client::with_options(options)?;
        let database = client.database(database);
        info!("Configured MongoDB client for database: {}", database.name());

        Ok(Self { client, database })
    }

    fn collection(&self, collection: Collection) -> mongodb::Collection<bson::Document> {
        self.database.collection(collection.name())
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find_one(&self, collection: Collection, id: &RecordId) -> Result<Option<Document>, StoreError> {
        debug!(%collection, %id, "find_one");
        let found = self
            .collection(collection)
            .find_one(doc! { "_id": id.object_id() }, None)
            .await?;
        Ok(found.map(document_to_json))
    }

    async fn find(&self, collection: Collection, query: &StoreQuery) -> Result<Vec<Document>, StoreError> {
        debug!(%collection, ?query, "find");
        let limit = query
            .limit
            .map(i64::try_from)
            .transpose()
            .map_err(|_| StoreError::Query("limit out of range".to_string()))?;
        let options = FindOptions::builder()
            .skip(query.skip)
            .limit(limit)
            .sort(query.sort_by_id.then(|| doc! { "_id": 1 }))
            .build();

        let cursor = self
            .collection(collection)
            .find(filter_to_bson(&query.filter)?, options)
            .await?;
        let documents: Vec<bson::Document> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(document_to_json).collect())
    }

    async fn insert_one(&self, collection: Collection, document: Document) -> Result<Value, StoreError> {
        let result = self
            .collection(collection)
            .insert_one(json_to_document(document)?, None)
            .await?;
        debug!(%collection, inserted_id = %result.inserted_id, "insert_one");
        Ok(bson_to_json(result.inserted_id))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await?;
        Ok(())
    }
}

fn filter_to_bson(filter: &Filter) -> Result<bson::Document, StoreError> {
    match filter {
        Filter::All => Ok(bson::Document::new()),
        Filter::Eq { field, value } => {
            let mut document = bson::Document::new();
            document.insert(field.clone(), json_to_bson(value.clone())?);
            Ok(document)
        }
    }
}

fn json_to_bson(value: Value) -> Result<Bson, StoreError> {
    Bson::try_from(value).map_err(|e| StoreError::Encoding(e.to_string()))
}

/// Identifiers given as hex strings are stored as object ids so later
/// lookups by `id` can find them; everything else goes through extended JSON.
fn json_to_document(document: Document) -> Result<bson::Document, StoreError> {
    let mut out = bson::Document::new();
    for (key, value) in document {
        let converted = match (key.as_str(), RecordId::from_json(&value)) {
            (ID_FIELD, Some(id)) => Bson::ObjectId(id.object_id()),
            _ => json_to_bson(value)?,
        };
        out.insert(key, converted);
    }
    Ok(out)
}

fn document_to_json(document: bson::Document) -> Document {
    document
        .into_iter()
        .map(|(key, value)| (key, bson_to_json(value)))
        .collect()
}

/// Object ids and dates render the way clients expect them (hex string, RFC 3339).
fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(text) => Value::String(text),
            Err(_) => Bson::DateTime(dt).into_relaxed_extjson(),
        },
        Bson::Document(document) => Value::Object(document_to_json(document)),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}
