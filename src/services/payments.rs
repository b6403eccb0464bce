// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Payment flow endpoints.

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::models::{CheckoutSession, Subscription};
use serde_json::json;

#[derive(Clone)]
pub struct PaymentsService {
    client: ApiClient,
}

impl PaymentsService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Open a provider checkout for a credit package.
    pub async fn create_checkout(&self, package_id: &str) -> Result<CheckoutSession, ClientError> {
        self.client
            .post("/payments/checkout")
            .body(json!({ "packageId": package_id }))
            .send_json()
            .await
    }

    /// Open a provider checkout for a subscription plan.
    pub async fn subscribe(&self, plan_id: &str) -> Result<CheckoutSession, ClientError> {
        self.client
            .post("/payments/subscribe")
            .body(json!({ "planId": plan_id }))
            .send_json()
            .await
    }

    /// Cancel at period end; returns the updated subscription.
    pub async fn cancel_subscription(&self) -> Result<Subscription, ClientError> {
        self.client
            .post("/payments/subscription/cancel")
            .send_json()
            .await
    }
}
