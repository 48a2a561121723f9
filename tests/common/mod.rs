#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde_json::{json, Value};

use shoppin_api::auth::TokenService;
use shoppin_api::database::{Collection, Document, DocumentStore, MemoryStore};
use shoppin_api::AppState;

pub const TEST_SECRET: &str = "integration-test-secret";

/// A live server on a free port, backed by an in-memory store.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub store: Arc<MemoryStore>,
    pub tokens: Arc<TokenService>,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get_json(&self, path: &str) -> Result<Value> {
        Ok(self.client.get(self.url(path)).send().await?.json::<Value>().await?)
    }

    /// Token signed with the server's own secret
    pub fn token_for(&self, user_id: &str) -> String {
        self.tokens
            .issue(json!({ "id": user_id }))
            .expect("token issue")
    }

    pub async fn insert(&self, collection: Collection, value: Value) -> String {
        let id = self
            .store
            .insert_one(collection, document(value))
            .await
            .expect("insert");
        id.as_str().expect("hex id").to_string()
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/")).send().await {
                if resp.status().is_success() {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

pub async fn spawn_server() -> Result<TestServer> {
    // Pick an unused port for isolation
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let base_url = format!("http://127.0.0.1:{}", port);

    let store = Arc::new(MemoryStore::new());
    let tokens = Arc::new(TokenService::new(TEST_SECRET, 6)?);
    let state = AppState::new(store.clone(), tokens.clone());

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test listener")?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, shoppin_api::app(state)).await;
    });

    let server = TestServer {
        port,
        base_url,
        store,
        tokens,
        client: reqwest::Client::new(),
    };
    server.wait_ready(Duration::from_secs(5)).await?;
    Ok(server)
}

pub fn document(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}
