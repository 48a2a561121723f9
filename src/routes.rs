use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::error::ApiError;
use crate::handlers::{categories, products, root, token, users};
use crate::middleware::require_bearer_token;
use crate::state::AppState;

/// Full router with permissive CORS.
pub fn app(state: AppState) -> Router {
    router(state, CorsLayer::permissive())
}

pub fn router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        // Public
        .route("/", get(root::index))
        .route("/health", get(root::health))
        .merge(catalog_routes())
        .merge(user_routes(state.clone()))
        .route("/jwt", post(token::issue))
        .fallback(fallback)
        // Global middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(categories::list))
        .route("/products", get(products::list))
        .route("/products/featured", get(products::featured))
        .route("/products/discount", get(products::discount))
}

fn user_routes(state: AppState) -> Router<AppState> {
    // The gate only wraps GET: method routes added after route_layer stay public
    Router::new().route(
        "/users",
        get(users::show)
            .route_layer(middleware::from_fn_with_state(state, require_bearer_token))
            .post(users::create),
    )
}

async fn fallback() -> ApiError {
    ApiError::not_found("Route not found")
}

/// CORS layer for a list of allowed origins; an empty list or `*` allows any origin.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::permissive().allow_origin(AllowOrigin::list(origins))
}
