// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Conversation and message models.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum MessageRole {
    User,
    Agent,
    System,
}

/// A conversation between the user and one agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Conversation {
    pub id: String,
    pub agent_id: String,
    pub agent_name: Option<String>,
    pub title: Option<String>,
    /// Preview of the most recent message
    pub last_message: Option<String>,
    /// Last activity timestamp (ISO 8601)
    pub updated_at: Option<String>,
    #[serde(default)]
    pub unread_count: u32,
}

/// One message within a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ChatMessage {
    pub id: String,
    pub conversation_id: String,
    pub role: MessageRole,
    pub content: String,
    /// Creation timestamp (ISO 8601)
    pub created_at: Option<String>,
}

/// A cursor-paginated slice of a conversation's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MessagePage {
    pub items: Vec<ChatMessage>,
    /// Opaque cursor for the next (older) page, absent on the last page
    pub next_cursor: Option<String>,
}

/// Result of sending a message: the agent's reply plus the caller's
/// remaining credit balance when the platform reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SendMessageResponse {
    pub reply: ChatMessage,
    #[cfg_attr(feature = "binding-generation", ts(type = "number | null"))]
    pub credits_remaining: Option<i64>,
}
