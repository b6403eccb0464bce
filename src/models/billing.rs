// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Credit and subscription models.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// The user's current credit balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CreditBalance {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub balance: i64,
    /// Timestamp of the last balance change (ISO 8601)
    pub updated_at: Option<String>,
}

/// A purchasable credit package.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CreditPackage {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub credits: i64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub price_cents: i64,
    pub currency: String,
}

/// The user's subscription, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Subscription {
    pub id: String,
    pub plan_id: String,
    /// Platform-defined status string (active, past_due, canceled, ...)
    pub status: String,
    /// Next renewal timestamp (ISO 8601)
    pub renews_at: Option<String>,
    #[serde(default)]
    pub cancel_at_period_end: bool,
}

/// A payment-provider checkout handoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CheckoutSession {
    pub id: String,
    /// Provider-hosted page the frontend redirects to
    pub checkout_url: String,
    pub provider: String,
}
