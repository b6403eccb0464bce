// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session routes.
//!
//! Login-like routes exchange credentials with the platform, then move the
//! returned credential pair into HttpOnly cookies; the response body carries
//! only the user profile. Logout and refresh manage the pair in place. Every
//! route writes its cookie changes even when the upstream call fails, so the
//! browser's copy of the pair always tracks the store.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::error::AppError;
use crate::models::UserProfile;
use crate::services::AuthService;
use crate::token::{cookies, TokenStore};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/social", post(social))
        .route("/auth/refresh", post(refresh))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email)]
    email: String,
    #[validate(length(min = 8))]
    password: String,
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email)]
    email: String,
    #[validate(length(min = 8))]
    password: String,
    #[validate(length(min = 1, max = 64))]
    display_name: String,
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SocialLoginRequest {
    #[validate(length(min = 1))]
    provider: String,
    #[validate(length(min = 1))]
    token: String,
}

async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<UserProfile>), AppError> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let (client, _store) = state.client_for(cookies::read(&jar));
    let session = AuthService::new(client)
        .login(&payload.email, &payload.password)
        .await?;

    tracing::info!(user_id = %session.user.id, "login succeeded");

    let jar = cookies::store(jar, &session.tokens, state.config.cookies_secure());
    Ok((jar, Json(session.user)))
}

async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(payload): Json<RegisterRequest>,
) -> Result<(CookieJar, Json<UserProfile>), AppError> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let (client, _store) = state.client_for(cookies::read(&jar));
    let session = AuthService::new(client)
        .register(&payload.email, &payload.password, &payload.display_name)
        .await?;

    tracing::info!(user_id = %session.user.id, "registration succeeded");

    let jar = cookies::store(jar, &session.tokens, state.config.cookies_secure());
    Ok((jar, Json(session.user)))
}

async fn social(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(payload): Json<SocialLoginRequest>,
) -> Result<(CookieJar, Json<UserProfile>), AppError> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let (client, _store) = state.client_for(cookies::read(&jar));
    let session = AuthService::new(client)
        .social_login(&payload.provider, &payload.token)
        .await?;

    tracing::info!(user_id = %session.user.id, provider = %payload.provider, "social login succeeded");

    let jar = cookies::store(jar, &session.tokens, state.config.cookies_secure());
    Ok((jar, Json(session.user)))
}

/// Rotate the credential pair using the refresh cookie.
async fn refresh(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode), (CookieJar, AppError)> {
    let secure = state.config.cookies_secure();
    let (client, _store) = state.client_for(cookies::read(&jar));

    match client.refresh_session().await {
        Ok(pair) => Ok((cookies::store(jar, &pair, secure), StatusCode::NO_CONTENT)),
        // The pair is gone either way; make the browser drop its copy too
        Err(err) => Err((cookies::remove(jar, secure), err.into())),
    }
}

/// Revoke upstream (best effort) and drop the cookies.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, StatusCode) {
    let tokens = cookies::read(&jar);
    if tokens.access_token.is_some() {
        let (client, _store) = state.client_for(tokens);
        if let Err(err) = AuthService::new(client).logout().await {
            tracing::warn!(error = %err, "upstream logout failed");
        }
    }
    (
        cookies::remove(jar, state.config.cookies_secure()),
        StatusCode::NO_CONTENT,
    )
}

/// Current user profile. A mid-flight refresh rotates the cookies.
async fn me(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<UserProfile>), (CookieJar, AppError)> {
    let secure = state.config.cookies_secure();
    let before = cookies::read(&jar);
    let (client, store) = state.client_for(before.clone());

    let result = AuthService::new(client).me().await;
    let jar = cookies::sync(jar, &before, &store.get(), secure);

    match result {
        Ok(profile) => Ok((jar, Json(profile))),
        Err(err) => Err((jar, err.into())),
    }
}
