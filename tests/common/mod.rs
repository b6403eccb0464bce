// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared test harness: an in-memory stub of the platform API served on an
//! ephemeral port, plus builders for clients and the gateway app.
//!
//! The stub speaks the real wire format (snake_case JSON, bearer auth,
//! rotating credential pairs on refresh) and records what it saw so tests
//! can assert on refresh counts, attached headers, and received bodies.

use axum::{
    extract::{RawQuery, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use companion_gateway::client::{ApiClient, ClientConfig};
use companion_gateway::config::Config;
use companion_gateway::routes::create_router;
use companion_gateway::token::{MemoryTokenStore, StoredTokens};
use companion_gateway::AppState;

#[allow(dead_code)]
pub const TEST_EMAIL: &str = "kai@example.com";
#[allow(dead_code)]
pub const TEST_PASSWORD: &str = "password123";
#[allow(dead_code)]
pub const ACCESS_EXPIRY: i64 = 900;
#[allow(dead_code)]
pub const REFRESH_EXPIRY: i64 = 604_800;

/// Observable state of the stub platform.
pub struct StubState {
    generation: AtomicUsize,
    /// Access token the stub currently accepts.
    pub valid_access: Mutex<String>,
    /// Refresh token the stub currently accepts.
    pub valid_refresh: Mutex<String>,
    /// Hits on the refresh endpoint.
    pub refresh_calls: AtomicUsize,
    /// Hits on /conversations (the private resource).
    pub private_calls: AtomicUsize,
    /// When set, the refresh endpoint rejects every call.
    pub fail_refresh: AtomicBool,
    /// When set, /conversations answers with this status regardless of auth.
    pub private_failure: Mutex<Option<u16>>,
    /// Bodies received by the echo endpoint, verbatim (wire format).
    pub received_bodies: Mutex<Vec<Value>>,
    /// Authorization header seen by each /agents call.
    pub agent_auth_headers: Mutex<Vec<Option<String>>>,
    /// Raw query string seen by each /agents call.
    pub agent_queries: Mutex<Vec<String>>,
}

impl StubState {
    fn new() -> Self {
        Self {
            generation: AtomicUsize::new(0),
            valid_access: Mutex::new("access-0".to_string()),
            valid_refresh: Mutex::new("refresh-0".to_string()),
            refresh_calls: AtomicUsize::new(0),
            private_calls: AtomicUsize::new(0),
            fail_refresh: AtomicBool::new(false),
            private_failure: Mutex::new(None),
            received_bodies: Mutex::new(Vec::new()),
            agent_auth_headers: Mutex::new(Vec::new()),
            agent_queries: Mutex::new(Vec::new()),
        }
    }

    /// Issue a new credential pair and make it the only one accepted.
    fn rotate(&self) -> (String, String) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let access = format!("access-{generation}");
        let refresh = format!("refresh-{generation}");
        *self.valid_access.lock().unwrap() = access.clone();
        *self.valid_refresh.lock().unwrap() = refresh.clone();
        (access, refresh)
    }

    pub fn refresh_count(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn private_count(&self) -> usize {
        self.private_calls.load(Ordering::SeqCst)
    }
}

/// The stub platform server, listening on an ephemeral local port.
pub struct StubPlatform {
    pub base_url: String,
    pub state: Arc<StubState>,
}

/// Spawn the stub platform API.
pub async fn spawn_stub() -> StubPlatform {
    let state = Arc::new(StubState::new());

    let app = Router::new()
        .route("/agents", get(list_agents))
        .route("/conversations", get(list_conversations))
        .route("/users/me", get(me))
        .route("/echo", post(echo))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/refresh", post(refresh))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub listener addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve stub");
    });

    StubPlatform {
        base_url: format!("http://{addr}"),
        state,
    }
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.to_string())
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "detail": "token_invalid" })),
    )
        .into_response()
}

fn credential_pair_json(access: &str, refresh: &str) -> Value {
    json!({
        "access_token": access,
        "refresh_token": refresh,
        "access_expiry": ACCESS_EXPIRY,
        "refresh_expiry": REFRESH_EXPIRY,
    })
}

async fn list_agents(
    State(state): State<Arc<StubState>>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Json<Value> {
    state.agent_auth_headers.lock().unwrap().push(
        headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .map(|h| h.to_string()),
    );
    state
        .agent_queries
        .lock()
        .unwrap()
        .push(query.unwrap_or_default());

    Json(json!({
        "items": [{
            "id": "a1",
            "name": "Nova",
            "tagline": "your stargazing companion",
            "avatar_url": "https://cdn.example.com/nova.png",
            "is_premium": false,
            "tags": ["space"],
            "message_count": 4200,
        }],
        "page": 1,
        "per_page": 20,
        "total": 1,
    }))
}

async fn list_conversations(State(state): State<Arc<StubState>>, headers: HeaderMap) -> Response {
    state.private_calls.fetch_add(1, Ordering::SeqCst);

    if let Some(status) = *state.private_failure.lock().unwrap() {
        let status = StatusCode::from_u16(status).expect("valid status");
        return (status, Json(json!({ "detail": "forced_failure" }))).into_response();
    }

    let valid = state.valid_access.lock().unwrap().clone();
    if bearer(&headers).as_deref() != Some(valid.as_str()) {
        return unauthorized();
    }

    Json(json!([{
        "id": "c1",
        "agent_id": "a1",
        "agent_name": "Nova",
        "last_message": "hello again",
        "unread_count": 1,
    }]))
    .into_response()
}

async fn me(State(state): State<Arc<StubState>>, headers: HeaderMap) -> Response {
    let valid = state.valid_access.lock().unwrap().clone();
    if bearer(&headers).as_deref() != Some(valid.as_str()) {
        return unauthorized();
    }
    Json(json!({
        "id": "u1",
        "email": TEST_EMAIL,
        "display_name": "Kai",
        "avatar_url": null,
        "created_at": "2026-01-01T00:00:00Z",
        "credits": 120,
    }))
    .into_response()
}

async fn echo(State(state): State<Arc<StubState>>, Json(body): Json<Value>) -> Json<Value> {
    state.received_bodies.lock().unwrap().push(body.clone());
    Json(body)
}

async fn login(State(state): State<Arc<StubState>>, Json(body): Json<Value>) -> Response {
    if body["email"] != TEST_EMAIL || body["password"] != TEST_PASSWORD {
        return unauthorized();
    }
    let (access, refresh) = state.rotate();
    let mut response = json!({
        "user": {
            "id": "u1",
            "email": TEST_EMAIL,
            "display_name": "Kai",
            "created_at": "2026-01-01T00:00:00Z",
            "credits": 120,
        }
    });
    if let Value::Object(map) = &mut response {
        if let Value::Object(pair) = credential_pair_json(&access, &refresh) {
            map.extend(pair);
        }
    }
    Json(response).into_response()
}

async fn logout(State(state): State<Arc<StubState>>, headers: HeaderMap) -> Response {
    let valid = state.valid_access.lock().unwrap().clone();
    if bearer(&headers).as_deref() != Some(valid.as_str()) {
        return unauthorized();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn refresh(State(state): State<Arc<StubState>>, headers: HeaderMap) -> Response {
    state.refresh_calls.fetch_add(1, Ordering::SeqCst);

    if state.fail_refresh.load(Ordering::SeqCst) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "refresh_rejected" })),
        )
            .into_response();
    }

    let valid = state.valid_refresh.lock().unwrap().clone();
    if bearer(&headers).as_deref() != Some(valid.as_str()) {
        return unauthorized();
    }

    let (access, refresh) = state.rotate();
    Json(credential_pair_json(&access, &refresh)).into_response()
}

// ─── Builders ────────────────────────────────────────────────

/// Build a client over a seeded in-memory store.
#[allow(dead_code)]
pub fn seeded_client(
    base_url: &str,
    access: Option<&str>,
    refresh: Option<&str>,
) -> (ApiClient, Arc<MemoryTokenStore>) {
    let store = Arc::new(MemoryTokenStore::seeded(StoredTokens {
        access_token: access.map(str::to_string),
        refresh_token: refresh.map(str::to_string),
        access_expiry: None,
        refresh_expiry: None,
    }));
    let client = ApiClient::new(
        ClientConfig::new(base_url),
        reqwest::Client::new(),
        store.clone(),
    );
    (client, store)
}

/// Build the gateway app pointed at a stub platform.
#[allow(dead_code)]
pub fn create_gateway_app(platform_url: &str) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(Config::test_default(platform_url)));
    (create_router(state.clone()), state)
}
