// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User and session models.

use crate::token::CredentialPair;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// The authenticated user's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserProfile {
    pub id: String,
    pub email: Option<String>,
    pub display_name: String,
    pub avatar_url: Option<String>,
    /// Account creation timestamp (ISO 8601)
    pub created_at: Option<String>,
    #[cfg_attr(feature = "binding-generation", ts(type = "number | null"))]
    pub credits: Option<i64>,
}

/// What the platform's login/register/social endpoints return: the profile
/// plus the credential pair, flattened alongside it on the wire.
///
/// The pair never reaches the frontend — the gateway moves it into cookies
/// and forwards only the profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub user: UserProfile,
    #[serde(flatten)]
    pub tokens: CredentialPair,
}
