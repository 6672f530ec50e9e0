//! Shared helpers for integration tests
#![allow(dead_code)]

use axum::extract::State;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use mailbreeze::{MailBreeze, RetryConfig};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const TEST_API_KEY: &str = "sk_test_integration123";

/// Retry policy with millisecond delays so tests stay fast
pub fn fast_retries() -> RetryConfig {
    RetryConfig {
        max_retries: 3,
        base_delay_ms: 5,
        max_delay_ms: 20,
    }
}

/// Client pointed at a local server
pub fn client_for(base_url: &str) -> MailBreeze {
    MailBreeze::builder()
        .api_key(TEST_API_KEY)
        .base_url(base_url)
        .retry_config(fast_retries())
        .build()
        .expect("Failed to create test client")
}

/// Successful envelope around `data`
pub fn ok(data: Value) -> Value {
    json!({ "success": true, "data": data })
}

/// Error envelope
pub fn api_error(code: &str, message: &str) -> Value {
    json!({
        "success": false,
        "error": { "code": code, "message": message }
    })
}

/// One canned response of the sequencing server
#[derive(Clone)]
pub struct Canned {
    pub status: u16,
    pub body: Value,
    pub retry_after: Option<u64>,
}

impl Canned {
    pub fn new(status: u16, body: Value) -> Self {
        Self {
            status,
            body,
            retry_after: None,
        }
    }

    pub fn retry_after(mut self, seconds: u64) -> Self {
        self.retry_after = Some(seconds);
        self
    }
}

#[derive(Clone)]
struct Sequence {
    responses: Arc<Mutex<VecDeque<Canned>>>,
    hits: Arc<AtomicUsize>,
}

/// Server answering every request with the next queued response
///
/// The last response repeats once the queue is down to one entry.
pub struct SequenceServer {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl SequenceServer {
    pub async fn start(responses: Vec<Canned>) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let state = Sequence {
            responses: Arc::new(Mutex::new(responses.into())),
            hits: hits.clone(),
        };

        let app = Router::new().fallback(respond).with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test server");
        let addr = listener.local_addr().expect("Failed to read local address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            base_url: format!("http://{}", addr),
            hits,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn respond(State(state): State<Sequence>) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);

    let canned = {
        let mut queue = state.responses.lock().expect("queue poisoned");
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    };

    let Some(canned) = canned else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let status = StatusCode::from_u16(canned.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut response = (status, Json(canned.body)).into_response();
    if let Some(seconds) = canned.retry_after {
        response
            .headers_mut()
            .insert(header::RETRY_AFTER, HeaderValue::from(seconds));
    }
    response
}
