//! Test utilities for finix-core
//!
//! This module provides a mock OpenAI-compatible chat completions server
//! that can be used for development and integration tests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Json, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::oneshot;

/// Scripted behaviour shared with the handlers
struct MockState {
    content: String,
    status: StatusCode,
    delay: Option<Duration>,
    requests: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
    last_authorization: Mutex<Option<String>>,
}

/// Mock chat completions server for testing and development
pub struct MockChatServer {
    addr: SocketAddr,
    state: Arc<MockState>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockChatServer {
    /// Start a server whose single choice has `content` as the message text
    pub async fn start(content: &str) -> Self {
        Self::spawn(MockState {
            content: content.to_string(),
            status: StatusCode::OK,
            delay: None,
            requests: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
            last_authorization: Mutex::new(None),
        })
        .await
    }

    /// Start a server that answers every chat request with `status`
    pub async fn failing(status: u16) -> Self {
        Self::spawn(MockState {
            content: String::new(),
            status: StatusCode::from_u16(status).unwrap(),
            delay: None,
            requests: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
            last_authorization: Mutex::new(None),
        })
        .await
    }

    /// Start a server that waits `delay` before answering
    pub async fn slow(content: &str, delay: Duration) -> Self {
        Self::spawn(MockState {
            content: content.to_string(),
            status: StatusCode::OK,
            delay: Some(delay),
            requests: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
            last_authorization: Mutex::new(None),
        })
        .await
    }

    async fn spawn(state: MockState) -> Self {
        let state = Arc::new(state);
        let app = Router::new()
            .route("/v1/models", get(handle_models))
            .route("/v1/chat/completions", post(handle_chat))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of chat completion requests received
    pub fn request_count(&self) -> usize {
        self.state.requests.load(Ordering::SeqCst)
    }

    /// Prompt text of the most recent chat request
    pub fn last_prompt(&self) -> Option<String> {
        self.state.last_prompt.lock().unwrap().clone()
    }

    /// Authorization header of the most recent chat request
    pub fn last_authorization(&self) -> Option<String> {
        self.state.last_authorization.lock().unwrap().clone()
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockChatServer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

/// Model list endpoint (health check)
async fn handle_models() -> Json<serde_json::Value> {
    Json(json!({
        "object": "list",
        "data": [{"id": "mock-model", "object": "model"}]
    }))
}

/// Chat completions endpoint
async fn handle_chat(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(request): Json<ChatRequest>,
) -> Response {
    state.requests.fetch_add(1, Ordering::SeqCst);
    *state.last_prompt.lock().unwrap() = request.messages.last().map(|m| m.content.clone());
    *state.last_authorization.lock().unwrap() = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }

    if !state.status.is_success() {
        return (state.status, "mock failure").into_response();
    }

    Json(json!({
        "id": "chatcmpl-mock",
        "object": "chat.completion",
        "model": request.model,
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": state.content},
            "finish_reason": "stop"
        }]
    }))
    .into_response()
}
