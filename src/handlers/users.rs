// handlers/users.rs - GET /users (gated), POST /users

use axum::{
    extract::{rejection::JsonRejection, Extension, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::TokenClaims;
use crate::database::{Collection, RecordId};
use crate::error::ApiError;
use crate::filter::parse_id;
use crate::state::AppState;

pub const NOT_FOUND_TEXT: &str = "No value exist!";

#[derive(Debug, Default, Deserialize)]
pub struct UserParams {
    pub id: Option<String>,
}

/// Body returned when no user matches. Sent with HTTP 200; clients key off
/// the `error` flag rather than the status line.
pub fn not_found_body() -> Value {
    json!({
        "error": true,
        "status": 500,
        "statusText": NOT_FOUND_TEXT,
    })
}

/// GET /users?id= - one user by id, behind the bearer-token gate
pub async fn show(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Query(params): Query<UserParams>,
) -> Result<Json<Value>, ApiError> {
    tracing::debug!(subject = ?claims.payload.get("id"), "user lookup");

    // Without an id nothing can match
    let Some(raw_id) = params.id.as_deref() else {
        return Ok(Json(not_found_body()));
    };
    let id: RecordId = parse_id(raw_id)?;

    match state.store.find_one(Collection::Users, &id).await? {
        Some(user) => Ok(Json(Value::Object(user))),
        None => Ok(Json(not_found_body())),
    }
}

/// POST /users - store the body as-is and acknowledge with the new id
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = body?;
    let Value::Object(user) = body else {
        return Err(ApiError::bad_request("User must be a JSON object"));
    };

    let inserted_id = state.store.insert_one(Collection::Users, user).await?;
    tracing::info!("Created user {}", inserted_id);

    Ok(Json(json!({
        "acknowledged": true,
        "insertedId": inserted_id,
    })))
}
