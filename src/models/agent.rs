// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Agent catalog models.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A chat agent character from the platform catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Agent {
    pub id: String,
    pub name: String,
    /// Short hook line shown on catalog cards
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub avatar_url: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Total messages exchanged with this agent, for popularity sorting
    #[cfg_attr(feature = "binding-generation", ts(type = "number | null"))]
    pub message_count: Option<u64>,
    /// Requires an active subscription to chat with
    #[serde(default)]
    pub is_premium: bool,
}

/// One page of the agent catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AgentPage {
    pub items: Vec<Agent>,
    pub page: u32,
    pub per_page: u32,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total: u64,
}
