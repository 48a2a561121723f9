use std::sync::Arc;

use crate::auth::TokenService;
use crate::database::DocumentStore;

/// Shared handles injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, tokens: Arc<TokenService>) -> Self {
        Self { store, tokens }
    }
}
