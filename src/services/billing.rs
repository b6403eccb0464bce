// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Credit balance and subscription endpoints.

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::models::{CreditBalance, CreditPackage, Subscription};

#[derive(Clone)]
pub struct BillingService {
    client: ApiClient,
}

impl BillingService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn balance(&self) -> Result<CreditBalance, ClientError> {
        self.client.get("/billing/balance").send_json().await
    }

    /// Purchasable packages; browsable while logged out.
    pub async fn packages(&self) -> Result<Vec<CreditPackage>, ClientError> {
        self.client
            .get("/billing/packages")
            .public()
            .send_json()
            .await
    }

    /// The caller's subscription. The platform answers 404 when there is
    /// none; that surfaces as a `Status` error like any other.
    pub async fn subscription(&self) -> Result<Subscription, ClientError> {
        self.client.get("/billing/subscription").send_json().await
    }
}
