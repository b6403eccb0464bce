// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authenticated platform API client.
//!
//! One request pipeline shared by every client instance: bodies and query
//! keys go out in wire format (snake_case), responses come back in app
//! format (camelCase), and an authorization failure triggers at most one
//! transparent token refresh before the request is resent.
//!
//! Instances differ only in [`ClientConfig`]; the token store is an
//! explicit, injectable dependency so request-scoped and long-lived clients
//! share the same code path.

use crate::casing::{camel_to_snake, to_app_format, to_wire_format};
use crate::error::ClientError;
use crate::token::{CredentialPair, TokenStore};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Configuration for one client instance. The three deployment variants
/// (browser-direct, gateway-proxied, server-side) differ only in these
/// fields.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the platform API, without a trailing slash.
    pub base_url: String,
    /// Path of the token refresh endpoint, relative to `base_url`.
    pub refresh_path: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            refresh_path: "/auth/refresh".to_string(),
        }
    }
}

/// Whether a route requires credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No Authorization header is ever attached.
    Public,
    /// Bearer credentials are attached when available.
    Private,
}

/// One outbound request.
///
/// `retried` is the loop guard: set right before the post-refresh resend and
/// never cleared, so a second authorization failure surfaces instead of
/// looping.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Value>,
    access: Access,
    retried: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            access: Access::Private,
            retried: false,
        }
    }

    pub fn access(mut self, access: Access) -> Self {
        self.access = access;
        self
    }

    /// Append a query parameter. Keys may be given in app format; the
    /// pipeline converts them to wire format along with the body.
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn queries(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    /// Attach an app-format JSON body.
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Gate serializing refresh attempts. Shareable across client instances so
/// concurrent expiries coalesce into a single refresh call.
pub type RefreshGate = Arc<Mutex<()>>;

/// Upstream status plus app-format body, for callers that need to see the
/// status (the proxy routes).
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Authenticated client for the platform API.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    store: Arc<dyn TokenStore>,
    refresh_gate: RefreshGate,
}

impl ApiClient {
    pub fn new(config: ClientConfig, http: reqwest::Client, store: Arc<dyn TokenStore>) -> Self {
        Self {
            http,
            config,
            store,
            refresh_gate: Arc::new(Mutex::new(())),
        }
    }

    /// Replace the refresh gate with one shared across client instances.
    pub fn with_refresh_gate(mut self, gate: RefreshGate) -> Self {
        self.refresh_gate = gate;
        self
    }

    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder<'_> {
        RequestBuilder {
            client: self,
            request: ApiRequest::new(method, path),
        }
    }

    pub fn get(&self, path: &str) -> RequestBuilder<'_> {
        self.request(Method::GET, path)
    }

    pub fn post(&self, path: &str) -> RequestBuilder<'_> {
        self.request(Method::POST, path)
    }

    pub fn put(&self, path: &str) -> RequestBuilder<'_> {
        self.request(Method::PUT, path)
    }

    pub fn patch(&self, path: &str) -> RequestBuilder<'_> {
        self.request(Method::PATCH, path)
    }

    pub fn delete(&self, path: &str) -> RequestBuilder<'_> {
        self.request(Method::DELETE, path)
    }

    /// Run a request through the pipeline and return the app-format body.
    pub async fn send(&self, request: ApiRequest) -> Result<Value, ClientError> {
        self.execute(request).await.map(|response| response.body)
    }

    /// Run a request through the full pipeline.
    pub async fn execute(&self, mut request: ApiRequest) -> Result<ApiResponse, ClientError> {
        // Wire-format conversion happens exactly once, for the whole
        // envelope; a resend must not convert again.
        if let Some(body) = request.body.take() {
            request.body = Some(to_wire_format(body));
        }
        for entry in &mut request.query {
            entry.0 = camel_to_snake(&entry.0);
        }

        loop {
            let bearer = self.bearer_for(&request);
            let response = self.transmit(&request, bearer.as_deref()).await?;
            let status = response.status();

            if status == StatusCode::UNAUTHORIZED
                && !request.retried
                && !self.is_refresh_route(&request.path)
            {
                let body = response.text().await.unwrap_or_default();
                let denied = ClientError::Status { status, body };
                self.refresh_tokens(bearer.as_deref(), denied).await?;
                request.retried = true;
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(ClientError::Status { status, body });
            }

            let bytes = response.bytes().await?;
            let body = if bytes.is_empty() {
                Value::Null
            } else {
                to_app_format(serde_json::from_slice(&bytes)?)
            };
            return Ok(ApiResponse { status, body });
        }
    }

    /// Explicit refresh, for callers that own the refresh flow (the
    /// gateway's /auth/refresh route). Stores and returns the new pair; on
    /// any failure the store is cleared.
    pub async fn refresh_session(&self) -> Result<CredentialPair, ClientError> {
        let _guard = self.refresh_gate.lock().await;
        let Some(refresh_token) = self.store.get().refresh_token else {
            self.store.clear();
            return Err(ClientError::Status {
                status: StatusCode::UNAUTHORIZED,
                body: String::new(),
            });
        };
        match self.request_refresh(&refresh_token).await {
            Ok(pair) => {
                self.store.set(pair.clone());
                Ok(pair)
            }
            Err(err) => {
                self.store.clear();
                Err(err)
            }
        }
    }

    /// Pick the credential for this request, if any.
    ///
    /// Private routes get the access token. The refresh endpoint is the one
    /// route allowed to authenticate with the refresh token when no access
    /// token is present.
    fn bearer_for(&self, request: &ApiRequest) -> Option<String> {
        if request.access == Access::Public {
            return None;
        }
        let tokens = self.store.get();
        if tokens.access_token.is_some() {
            return tokens.access_token;
        }
        if self.is_refresh_route(&request.path) {
            return tokens.refresh_token;
        }
        None
    }

    fn is_refresh_route(&self, path: &str) -> bool {
        path.trim_end_matches('/') == self.config.refresh_path
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    async fn transmit(
        &self,
        request: &ApiRequest,
        bearer: Option<&str>,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let mut builder = self
            .http
            .request(request.method.clone(), self.endpoint(&request.path));
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(token) = bearer {
            builder = builder.bearer_auth(token);
        }
        builder.send().await
    }

    /// Single-flight token refresh.
    ///
    /// `sent_access` is the token the failing request went out with. If the
    /// stored token already differs once the gate is acquired, another
    /// request refreshed while we waited and the refresh call is skipped —
    /// the caller resends with the rotated token. On any unrecoverable
    /// outcome the store is cleared and an error is returned: the original
    /// authorization failure when no refresh token exists, the refresh
    /// endpoint's own error when it rejects.
    async fn refresh_tokens(
        &self,
        sent_access: Option<&str>,
        denied: ClientError,
    ) -> Result<(), ClientError> {
        let _guard = self.refresh_gate.lock().await;

        let tokens = self.store.get();
        if let Some(current) = tokens.access_token.as_deref() {
            if Some(current) != sent_access {
                tracing::debug!("skipping refresh, pair already rotated");
                return Ok(());
            }
        }

        let Some(refresh_token) = tokens.refresh_token else {
            self.store.clear();
            return Err(denied);
        };

        tracing::debug!("access token rejected, refreshing");
        match self.request_refresh(&refresh_token).await {
            Ok(pair) => {
                self.store.set(pair);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "token refresh failed, clearing session");
                self.store.clear();
                Err(err)
            }
        }
    }

    /// POST to the refresh endpoint with the refresh token as the bearer
    /// credential and parse the new pair.
    async fn request_refresh(&self, refresh_token: &str) -> Result<CredentialPair, ClientError> {
        let response = self
            .http
            .post(self.endpoint(&self.config.refresh_path))
            .bearer_auth(refresh_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }

        let value: Value = response.json().await?;
        Ok(serde_json::from_value(to_app_format(value))?)
    }
}

/// Builder tying an [`ApiRequest`] to the client that will send it.
pub struct RequestBuilder<'a> {
    client: &'a ApiClient,
    request: ApiRequest,
}

impl RequestBuilder<'_> {
    /// Mark the request as targeting a public route.
    pub fn public(mut self) -> Self {
        self.request = self.request.access(Access::Public);
        self
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.request = self.request.query(key, value);
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.request = self.request.body(body);
        self
    }

    pub async fn send(self) -> Result<Value, ClientError> {
        self.client.send(self.request).await
    }

    /// Send and deserialize the app-format body.
    pub async fn send_json<T: DeserializeOwned>(self) -> Result<T, ClientError> {
        let value = self.client.send(self.request).await?;
        Ok(serde_json::from_value(value)?)
    }
}
