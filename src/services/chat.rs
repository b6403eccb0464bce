// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Conversation and messaging endpoints.

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::models::{ChatMessage, Conversation, MessagePage, SendMessageResponse};
use serde_json::json;

#[derive(Clone)]
pub struct ChatService {
    client: ApiClient,
}

impl ChatService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list_conversations(&self) -> Result<Vec<Conversation>, ClientError> {
        self.client.get("/conversations").send_json().await
    }

    pub async fn get_conversation(&self, conversation_id: &str) -> Result<Conversation, ClientError> {
        self.client
            .get(&format!("/conversations/{conversation_id}"))
            .send_json()
            .await
    }

    /// Start a conversation with an agent.
    pub async fn create_conversation(&self, agent_id: &str) -> Result<Conversation, ClientError> {
        self.client
            .post("/conversations")
            .body(json!({ "agentId": agent_id }))
            .send_json()
            .await
    }

    pub async fn delete_conversation(&self, conversation_id: &str) -> Result<(), ClientError> {
        self.client
            .delete(&format!("/conversations/{conversation_id}"))
            .send()
            .await?;
        Ok(())
    }

    /// One page of a conversation's history, newest first. `before` is the
    /// opaque cursor from the previous page.
    pub async fn messages(
        &self,
        conversation_id: &str,
        before: Option<&str>,
    ) -> Result<MessagePage, ClientError> {
        let mut request = self
            .client
            .get(&format!("/conversations/{conversation_id}/messages"));
        if let Some(cursor) = before {
            request = request.query("before", cursor);
        }
        request.send_json().await
    }

    /// Send a message and wait for the agent's reply.
    pub async fn send_message(
        &self,
        conversation_id: &str,
        content: &str,
    ) -> Result<SendMessageResponse, ClientError> {
        self.client
            .post(&format!("/conversations/{conversation_id}/messages"))
            .body(json!({ "content": content }))
            .send_json()
            .await
    }

    /// Regenerate the agent's last reply.
    pub async fn regenerate_reply(
        &self,
        conversation_id: &str,
        message_id: &str,
    ) -> Result<ChatMessage, ClientError> {
        self.client
            .post(&format!(
                "/conversations/{conversation_id}/messages/{message_id}/regenerate"
            ))
            .send_json()
            .await
    }
}
