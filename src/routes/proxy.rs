// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pass-through resource routes.
//!
//! Everything under `/api/` forwards to the platform API through the client
//! pipeline: query keys and JSON bodies are snake_cased on the way out,
//! responses camelized on the way back, and the bearer credential comes
//! from the request's token cookies. A mid-flight refresh rotates the
//! cookies in the response; an unrecoverable auth failure removes them.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::Value;
use std::sync::Arc;

use crate::client::{Access, ApiRequest};
use crate::error::AppError;
use crate::token::{cookies, TokenStore};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/{*path}", any(forward))
}

fn forwardable(method: &Method) -> bool {
    *method == Method::GET
        || *method == Method::POST
        || *method == Method::PUT
        || *method == Method::PATCH
        || *method == Method::DELETE
}

async fn forward(
    State(state): State<Arc<AppState>>,
    method: Method,
    Path(path): Path<String>,
    Query(query): Query<Vec<(String, String)>>,
    jar: CookieJar,
    body: Bytes,
) -> Response {
    if !forwardable(&method) {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let payload = if body.is_empty() {
        None
    } else {
        match serde_json::from_slice::<Value>(&body) {
            Ok(value) => Some(value),
            Err(err) => {
                return AppError::BadRequest(format!("invalid JSON body: {err}")).into_response()
            }
        }
    };

    let secure = state.config.cookies_secure();
    let before = cookies::read(&jar);
    let (client, store) = state.client_for(before.clone());

    // A session-less request is public-route traffic: no Authorization
    // header is ever attached upstream.
    let access = if before.is_empty() {
        Access::Public
    } else {
        Access::Private
    };

    let mut request = ApiRequest::new(method, format!("/{path}"))
        .access(access)
        .queries(query);
    if let Some(payload) = payload {
        request = request.body(payload);
    }

    let outcome = client.execute(request).await;
    let jar = cookies::sync(jar, &before, &store.get(), secure);

    match outcome {
        // Bodyless upstream success (e.g. DELETE -> 204)
        Ok(response) if response.body.is_null() => (response.status, jar).into_response(),
        Ok(response) => (response.status, jar, Json(response.body)).into_response(),
        Err(err) => (jar, AppError::from(err)).into_response(),
    }
}
