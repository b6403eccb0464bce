// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! App-format data models for the platform API.
//!
//! Every type here serializes with camelCase keys — the shape the frontend
//! consumes and the client pipeline produces.

pub mod agent;
pub mod billing;
pub mod chat;
pub mod user;

pub use agent::{Agent, AgentPage};
pub use billing::{CheckoutSession, CreditBalance, CreditPackage, Subscription};
pub use chat::{ChatMessage, Conversation, MessagePage, MessageRole, SendMessageResponse};
pub use user::{AuthSession, UserProfile};
