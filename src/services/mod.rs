// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-resource wrappers over the platform API.
//!
//! These are deliberately thin: route and payload shapes live here, all
//! credential and casing mechanics live in the client pipeline, and errors
//! pass through untouched.

pub mod agents;
pub mod auth;
pub mod billing;
pub mod chat;
pub mod payments;

pub use agents::AgentsService;
pub use auth::AuthService;
pub use billing::BillingService;
pub use chat::ChatService;
pub use payments::PaymentsService;
