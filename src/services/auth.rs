// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Platform auth endpoints.
//!
//! Successful login-like calls write the returned credential pair into the
//! client's token store, so a request-scoped store ends up holding exactly
//! what the cookie layer should persist.

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::models::{AuthSession, UserProfile};
use crate::token::{CredentialPair, TokenStore};
use serde_json::json;

#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ClientError> {
        let session: AuthSession = self
            .client
            .post("/auth/login")
            .public()
            .body(json!({ "email": email, "password": password }))
            .send_json()
            .await?;
        self.client.store().set(session.tokens.clone());
        Ok(session)
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<AuthSession, ClientError> {
        let session: AuthSession = self
            .client
            .post("/auth/register")
            .public()
            .body(json!({
                "email": email,
                "password": password,
                "displayName": display_name
            }))
            .send_json()
            .await?;
        self.client.store().set(session.tokens.clone());
        Ok(session)
    }

    /// Exchange a provider-issued identity token (Google, Apple, ...) for a
    /// platform session.
    pub async fn social_login(
        &self,
        provider: &str,
        provider_token: &str,
    ) -> Result<AuthSession, ClientError> {
        let session: AuthSession = self
            .client
            .post("/auth/social")
            .public()
            .body(json!({ "provider": provider, "token": provider_token }))
            .send_json()
            .await?;
        self.client.store().set(session.tokens.clone());
        Ok(session)
    }

    pub async fn me(&self) -> Result<UserProfile, ClientError> {
        self.client.get("/users/me").send_json().await
    }

    /// Revoke the session upstream. The caller decides what happens to the
    /// local pair; revocation failures are its to handle.
    pub async fn logout(&self) -> Result<(), ClientError> {
        self.client.post("/auth/logout").send().await?;
        Ok(())
    }

    /// Force a refresh of the credential pair.
    pub async fn refresh(&self) -> Result<CredentialPair, ClientError> {
        self.client.refresh_session().await
    }
}
