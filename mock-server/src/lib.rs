//! A fake Kongregate server API for integration tests.
//!
//! # Design
//! A few routes answer like the real service (badges, authenticate). Every
//! other path falls through to an echo handler that reports what arrived
//! (method, path, query, content type, JSON body) so tests can check the
//! exact wire shape of each endpoint. The `/test/*` routes produce the odd
//! responses a client must survive: arbitrary statuses, non-JSON bodies,
//! broken JSON, slow replies, redirects and oversized payloads.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const VALID_AUTH_TOKEN: &str = "valid-token";

/// Size of the `/test/large` payload, above ureq's default 10 MiB read limit.
pub const LARGE_BODY_LEN: usize = 11 * 1024 * 1024;

/// Requests that reached `/test/redirected`.
pub type Hits = Arc<AtomicUsize>;

/// What the echo handler saw.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Echo {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub content_type: Option<String>,
    /// The request body parsed as JSON, or as a JSON string when it is not
    /// valid JSON. `None` for an empty body.
    pub body: Option<Value>,
}

#[derive(Deserialize)]
pub struct AuthQuery {
    pub api_key: String,
    pub user_id: u64,
    pub game_auth_token: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/badges.json", get(badges))
        .route("/api/authenticate.json", get(authenticate))
        .route("/test/status/{code}", get(status))
        .route("/test/text", get(text))
        .route("/test/malformed", get(malformed))
        .route("/test/slow", get(slow))
        .route("/test/redirect", get(redirect))
        .route("/test/redirected", get(redirected))
        .route("/test/hits", get(hits))
        .route("/test/large", get(large))
        .fallback(echo)
        .with_state(Hits::default())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn badges() -> Json<Value> {
    Json(json!([
        {
            "id": 1,
            "name": "Sharpshooter",
            "description": "Hit 100 targets",
            "points": 15,
            "difficulty": "easy"
        },
        {
            "id": 2,
            "name": "Marathon",
            "description": "Play for 10 hours",
            "points": 30,
            "difficulty": "medium"
        }
    ]))
}

async fn authenticate(Query(query): Query<AuthQuery>) -> (StatusCode, Json<Value>) {
    if query.game_auth_token == VALID_AUTH_TOKEN && !query.api_key.is_empty() {
        (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "username": format!("user{}", query.user_id),
                "user_id": query.user_id
            })),
        )
    } else {
        (
            StatusCode::FORBIDDEN,
            Json(json!({
                "success": false,
                "error": 403,
                "error_description": "Invalid game_auth_token"
            })),
        )
    }
}

async fn status(Path(code): Path<u16>) -> Response {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST);
    (status, Json(json!({"status": status.as_u16()}))).into_response()
}

async fn text() -> Response {
    ([(header::CONTENT_TYPE, "text/plain")], "plain text body").into_response()
}

async fn malformed() -> Response {
    ([(header::CONTENT_TYPE, "application/json")], "{not json").into_response()
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(2)).await;
    Json(json!({"slow": true}))
}

async fn redirect() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, "/test/redirected")]).into_response()
}

async fn redirected(State(hits): State<Hits>) -> &'static str {
    hits.fetch_add(1, Ordering::SeqCst);
    "redirected"
}

async fn hits(State(hits): State<Hits>) -> Json<Value> {
    Json(json!({"hits": hits.load(Ordering::SeqCst)}))
}

async fn large() -> Response {
    let body = format!("\"{}\"", "a".repeat(LARGE_BODY_LEN - 2));
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: String) -> Json<Echo> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = if body.is_empty() {
        None
    } else {
        Some(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    };
    log::debug!("echo {method} {uri}");
    Json(Echo {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        content_type,
        body,
    })
}
