// handlers/categories.rs - GET /categories

use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::Value;

use super::{document_list, document_or_null};
use crate::database::{Collection, StoreQuery};
use crate::error::ApiError;
use crate::filter::{CategoryParams, CategoryQuery};
use crate::state::AppState;

/// GET /categories[?id=] - one category by id, or all of them
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<CategoryParams>,
) -> Result<Json<Value>, ApiError> {
    let query = CategoryQuery::try_from(&params)?;
    tracing::debug!(?query, "categories");

    match query {
        CategoryQuery::ById(id) => {
            let found = state.store.find_one(Collection::Categories, &id).await?;
            Ok(document_or_null(found))
        }
        CategoryQuery::All => {
            let all = state
                .store
                .find(Collection::Categories, &StoreQuery::all())
                .await?;
            Ok(document_list(all))
        }
    }
}
