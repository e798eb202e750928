// Test-only HTTP server standing in for the chart data source
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::Value;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone)]
enum MockBody {
    Json(Value),
    Text(String),
    Empty,
}

#[derive(Debug, Clone)]
pub struct MockResponse {
    status: StatusCode,
    body: MockBody,
    delay: Duration,
}

impl MockResponse {
    pub fn json(value: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: MockBody::Json(value),
            delay: Duration::ZERO,
        }
    }

    pub fn text(text: &str) -> Self {
        Self {
            status: StatusCode::OK,
            body: MockBody::Text(text.to_string()),
            delay: Duration::ZERO,
        }
    }

    pub fn status(code: u16) -> Self {
        Self {
            status: StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body: MockBody::Empty,
            delay: Duration::ZERO,
        }
    }

    /// Hold the response back, to leave time for a cancellation.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl IntoResponse for MockResponse {
    fn into_response(self) -> Response {
        match self.body {
            MockBody::Json(value) => (self.status, Json(value)).into_response(),
            MockBody::Text(text) => (self.status, text).into_response(),
            MockBody::Empty => self.status.into_response(),
        }
    }
}

/// Serves one canned response at `/data.json` on an ephemeral local port.
pub struct MockServer {
    addr: SocketAddr,
    task: tokio::task::JoinHandle<()>,
}

impl MockServer {
    pub async fn start(response: MockResponse) -> Self {
        let router = Router::new().route(
            "/data.json",
            get(move || {
                let response = response.clone();
                async move {
                    tokio::time::sleep(response.delay).await;
                    response
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock server");
        let addr = listener.local_addr().expect("mock server address");
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Self { addr, task }
    }

    /// Fixture payload mirroring a typical data source.
    pub async fn with_fixture() -> Self {
        let fixture: Value =
            serde_json::from_str(include_str!("../../fixtures/data.json")).expect("fixture is JSON");
        Self::start(MockResponse::json(fixture)).await
    }

    pub fn url(&self) -> String {
        format!("http://{}/data.json", self.addr)
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
