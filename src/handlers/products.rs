// handlers/products.rs - GET /products, /products/featured, /products/discount

use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::Value;

use super::{document_list, document_or_null};
use crate::database::{Collection, Filter, StoreQuery};
use crate::error::ApiError;
use crate::filter::products::CATEGORY_FIELD;
use crate::filter::{ProductFlag, ProductParams, ProductQuery};
use crate::shuffle::shuffle_in_place;
use crate::state::AppState;

/// GET /products - dispatches on `id`, `cid`, `page`+`limit` in that order.
///
/// Category listings come back in a fresh random order on every call.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ProductParams>,
) -> Result<Json<Value>, ApiError> {
    let query = ProductQuery::try_from(&params)?;
    tracing::debug!(?query, "products");

    let store_query = match &query {
        ProductQuery::ById(id) => {
            let found = state.store.find_one(Collection::Products, id).await?;
            return Ok(document_or_null(found));
        }
        ProductQuery::ByCategory(cid) => StoreQuery::matching(Filter::eq(CATEGORY_FIELD, cid.as_str())),
        ProductQuery::Page { skip, limit } => StoreQuery::all().paged(*skip, *limit),
        ProductQuery::All => StoreQuery::all(),
    };

    let mut products = state.store.find(Collection::Products, &store_query).await?;
    if matches!(query, ProductQuery::ByCategory(_)) {
        shuffle_in_place(&mut products);
    }

    Ok(document_list(products))
}

/// GET /products/featured
pub async fn featured(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    flagged(&state, ProductFlag::Featured).await
}

/// GET /products/discount
pub async fn discount(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    flagged(&state, ProductFlag::Discount).await
}

async fn flagged(state: &AppState, flag: ProductFlag) -> Result<Json<Value>, ApiError> {
    let products = state
        .store
        .find(Collection::Products, &flag.store_query())
        .await?;
    Ok(document_list(products))
}
