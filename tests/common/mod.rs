#![allow(dead_code)]

use axum::body::Body;
use http::{Method, Request};
use requestbox::routes;
use requestbox::state::AppState;
use requestbox::store::{create_pool, Store};

pub const TEST_ADMIN_KEY: &str = "test-admin-key";

/// Test server owning an isolated in-memory store. Safe for parallel tests.
pub struct TestServer {
    pub state: AppState,
}

impl TestServer {
    /// Server with an in-memory database and a configured admin key.
    pub async fn new() -> Self {
        Self::with_admin_key(Some(TEST_ADMIN_KEY)).await
    }

    /// Server with an in-memory database and the given admin key (or none).
    pub async fn with_admin_key(admin_key: Option<&str>) -> Self {
        let pool = create_pool("sqlite::memory:")
            .await
            .expect("failed to create test pool");
        let state = AppState {
            store: Store::from_pool(pool),
            admin_key: admin_key.map(|k| k.to_string()),
        };
        Self { state }
    }

    /// Server whose store has no connection URL configured; any store
    /// access fails with a configuration error.
    pub fn without_database(admin_key: Option<&str>) -> Self {
        let state = AppState {
            store: Store::new(None),
            admin_key: admin_key.map(|k| k.to_string()),
        };
        Self { state }
    }

    /// Returns a Router wired to this server's state for `oneshot()` calls.
    pub fn router(&self) -> axum::Router {
        routes::router(self.state.clone())
    }

    /// Binds a TCP listener on port 0, spawns the server, and returns the
    /// base URL.
    pub async fn spawn(&self) -> String {
        let app = self.router();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://127.0.0.1:{}", addr.port())
    }
}

pub fn json_request(method: Method, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn admin_request(method: Method, uri: &str, key: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("x-admin-key", key)
        .body(Body::empty())
        .unwrap()
}

pub async fn parse_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
}
