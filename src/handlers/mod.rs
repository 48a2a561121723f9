// handlers/mod.rs - Route handlers
//
// Public: /, /health, /categories, /products*, POST /users, POST /jwt
// Gated:  GET /users (bearer token, see middleware::auth)

pub mod categories;
pub mod products;
pub mod root;
pub mod token;
pub mod users;

use axum::Json;
use serde_json::Value;

use crate::database::Document;

/// Single lookups answer `null` rather than 404 when nothing matches.
fn document_or_null(document: Option<Document>) -> Json<Value> {
    Json(document.map_or(Value::Null, Value::Object))
}

fn document_list(documents: Vec<Document>) -> Json<Value> {
    Json(Value::Array(documents.into_iter().map(Value::Object).collect()))
}
