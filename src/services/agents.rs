// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Agent catalog endpoints.
//!
//! All of these are public routes: the platform serves the catalog without
//! credentials so logged-out visitors can browse.

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::models::{Agent, AgentPage};

#[derive(Clone)]
pub struct AgentsService {
    client: ApiClient,
}

impl AgentsService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// List the catalog, paginated, optionally filtered by category.
    pub async fn list(
        &self,
        category: Option<&str>,
        page: u32,
        per_page: u32,
    ) -> Result<AgentPage, ClientError> {
        let mut request = self
            .client
            .get("/agents")
            .public()
            .query("page", page)
            .query("perPage", per_page);
        if let Some(category) = category {
            request = request.query("category", category);
        }
        request.send_json().await
    }

    /// Fetch one agent by id.
    pub async fn get(&self, agent_id: &str) -> Result<Agent, ClientError> {
        self.client
            .get(&format!("/agents/{agent_id}"))
            .public()
            .send_json()
            .await
    }

    /// Agents similar to the given one, for detail pages.
    pub async fn similar(&self, agent_id: &str) -> Result<Vec<Agent>, ClientError> {
        self.client
            .get(&format!("/agents/{agent_id}/similar"))
            .public()
            .send_json()
            .await
    }
}
