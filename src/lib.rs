// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Companion Gateway: backend-for-frontend for the companion chat app.
//!
//! This crate wraps the external platform API (agents, chat, billing,
//! payments) behind cookie-terminated auth: the browser holds the
//! credential pair in HttpOnly cookies, the gateway attaches bearer tokens
//! upstream and transparently refreshes them, and all JSON crosses the
//! gateway in camelCase while the platform wire stays snake_case.

pub mod casing;
pub mod client;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod token;

use client::{ApiClient, ClientConfig, RefreshGate};
use config::Config;
use dashmap::DashMap;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use token::{MemoryTokenStore, StoredTokens};

/// In-flight refresh gates keyed by refresh-token digest, shared across all
/// requests in this process. Concurrent requests carrying the same refresh
/// token serialize their refresh attempts through one gate.
pub type RefreshGates = Arc<DashMap<String, RefreshGate>>;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    /// One transport shared by every request-scoped client.
    pub http: reqwest::Client,
    pub refresh_gates: RefreshGates,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            refresh_gates: Arc::new(DashMap::new()),
        }
    }

    /// Build a client scoped to one request's tokens. The store is seeded
    /// from the cookie values; routes write cookie changes back after the
    /// handler runs.
    pub fn client_for(&self, tokens: StoredTokens) -> (ApiClient, Arc<MemoryTokenStore>) {
        let store = Arc::new(MemoryTokenStore::seeded(tokens.clone()));
        let mut client = ApiClient::new(
            ClientConfig::new(&self.config.platform_api_url),
            self.http.clone(),
            store.clone(),
        );
        if let Some(refresh_token) = tokens.refresh_token.as_deref() {
            let gate = self
                .refresh_gates
                .entry(gate_key(refresh_token))
                .or_default()
                .clone();
            client = client.with_refresh_gate(gate);
        }
        (client, store)
    }
}

/// Gates are keyed by token digest so the map never holds raw tokens.
fn gate_key(refresh_token: &str) -> String {
    hex::encode(Sha256::digest(refresh_token.as_bytes()))
}
