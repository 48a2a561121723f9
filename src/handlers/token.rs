// handlers/token.rs - POST /jwt

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

/// POST /jwt - sign the request body into a bearer token.
///
/// The body is expected to identify a user (`{"id": ...}`) but is not
/// checked beyond being a JSON object.
pub async fn issue(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(payload) = payload?;
    let token = state.tokens.issue(payload)?;
    Ok(Json(json!({ "token": token })))
}
