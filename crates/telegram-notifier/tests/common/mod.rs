//! Local Bot API stand-in for integration tests.
//!
//! An axum server on a loopback port that records every request and answers
//! with a fixed reply, optionally overridden per path prefix.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::task::JoinHandle;

/// How the stub answers.
#[derive(Debug, Clone, Copy)]
pub enum Reply {
    Status(u16, &'static str),
    /// Send the status line and part of the body, then fail the body stream.
    BrokenBody(u16),
    /// Record the request, then never answer.
    Hang,
}

pub const OK_BODY: &str = r#"{"ok":true,"result":{"message_id":1}}"#;
pub const CHAT_NOT_FOUND_BODY: &str =
    r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

impl RecordedRequest {
    /// The form body, decoded.
    pub fn form(&self) -> HashMap<String, String> {
        url::form_urlencoded::parse(self.body.as_bytes())
            .into_owned()
            .collect()
    }
}

#[derive(Clone)]
struct StubState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    default: Reply,
    overrides: Arc<Vec<(String, Reply)>>,
}

impl StubState {
    fn reply_for(&self, path: &str) -> Reply {
        self.overrides
            .iter()
            .find(|(prefix, _)| path.starts_with(prefix.as_str()))
            .map(|(_, reply)| *reply)
            .unwrap_or(self.default)
    }
}

pub struct StubServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl StubServer {
    pub async fn start(reply: Reply) -> Self {
        Self::with_overrides(reply, &[]).await
    }

    /// Answer paths starting with one of `overrides`' prefixes with its reply,
    /// everything else with `default`.
    pub async fn with_overrides(default: Reply, overrides: &[(&str, Reply)]) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind stub server");
        let addr = listener.local_addr().expect("failed to get local addr");

        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            requests: Arc::clone(&requests),
            default,
            overrides: Arc::new(
                overrides
                    .iter()
                    .map(|(prefix, reply)| (prefix.to_string(), *reply))
                    .collect(),
            ),
        };
        let router = Router::new().fallback(record).with_state(state);

        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.expect("stub server error");
        });

        StubServer {
            addr,
            requests,
            handle,
        }
    }

    /// Base URL to hand to `TelegramApiConfig::with_api_url`.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// URL of a loopback port nothing listens on.
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{}", addr)
}

async fn record(State(state): State<StubState>, method: Method, uri: Uri, body: Bytes) -> Response {
    let path = uri.path().to_string();
    let reply = state.reply_for(&path);

    state
        .requests
        .lock()
        .expect("requests lock")
        .push(RecordedRequest {
            method: method.to_string(),
            path,
            body: String::from_utf8_lossy(&body).into_owned(),
        });

    match reply {
        Reply::Status(code, payload) => (
            status(code),
            [(header::CONTENT_TYPE, "application/json")],
            payload,
        )
            .into_response(),
        Reply::BrokenBody(code) => {
            let chunks = futures::stream::unfold(0u8, |step| async move {
                match step {
                    0 => Some((Ok(Bytes::from_static(b"{\"ok\":false,")), 1)),
                    1 => {
                        // Let the head and first chunk reach the client first.
                        tokio::time::sleep(Duration::from_millis(100)).await;
                        Some((Err(std::io::Error::other("stub body failure")), 2))
                    }
                    _ => None,
                }
            });
            (
                status(code),
                [(header::CONTENT_TYPE, "application/json")],
                Body::from_stream(chunks),
            )
                .into_response()
        }
        Reply::Hang => {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            StatusCode::OK.into_response()
        }
    }
}

fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).expect("valid status code")
}
