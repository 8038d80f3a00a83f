//! In-process mock of the payments API.
//!
//! Records every request it receives and answers with canned responses keyed
//! by `"<METHOD> <path>"`. Unknown routes get the API's 404 error body.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::IntoResponse,
};
use kassa_client::{Kassa, KassaConfig};
use tokio::net::TcpListener;

pub const SHOP_ID: &str = "shop-42";
pub const SECRET: &str = "test_secret";
/// `base64("shop-42:test_secret")`
pub const BASIC_AUTH: &str = "Basic c2hvcC00Mjp0ZXN0X3NlY3JldA==";

/// A request as the mock server saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

#[derive(Clone, Default)]
pub struct MockApi {
    routes: Arc<Mutex<HashMap<String, (StatusCode, String)>>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
    delay: Option<Duration>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.routes.lock().unwrap().insert(
            format!("{} {}", method, path),
            (StatusCode::from_u16(status).unwrap(), body.to_string()),
        );
        self
    }

    /// Holds every response back for `delay`.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Recorded {
        self.requests().pop().expect("no request reached the mock API")
    }

    /// Serves the mock on an ephemeral port and returns a client pointed at it.
    pub async fn start(&self) -> Kassa {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().fallback(handle).with_state(self.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let config = KassaConfig::new(SHOP_ID, SECRET).with_api_url(format!("http://{}/v3", addr));
        Kassa::from_config(config).unwrap()
    }
}

async fn handle(
    State(mock): State<MockApi>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let path = uri.path().to_string();
    let key = format!("{} {}", method, path);
    mock.requests.lock().unwrap().push(Recorded {
        method,
        path,
        headers,
        body,
    });

    if let Some(delay) = mock.delay {
        tokio::time::sleep(delay).await;
    }

    let (status, body) = mock.routes.lock().unwrap().get(&key).cloned().unwrap_or((
        StatusCode::NOT_FOUND,
        r#"{"type":"error","code":"not_found","description":"Route not found"}"#.to_string(),
    ));
    (status, [(header::CONTENT_TYPE, "application/json")], body)
}
