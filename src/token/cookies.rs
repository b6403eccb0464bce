// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cookie persistence for the credential pair.
//!
//! The browser holds both tokens in HttpOnly cookies named after their wire
//! fields. Each cookie's `Max-Age` matches its own token's lifetime, so the
//! jar forgets an expired access token on its own while the refresh token
//! survives. Removal cookies carry the same attributes as creation cookies
//! or browsers keep the original.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use super::{CredentialPair, StoredTokens};

pub const ACCESS_COOKIE: &str = "access_token";
pub const REFRESH_COOKIE: &str = "refresh_token";

/// Read whatever token cookies the request carried.
pub fn read(jar: &CookieJar) -> StoredTokens {
    StoredTokens {
        access_token: jar.get(ACCESS_COOKIE).map(|c| c.value().to_string()),
        refresh_token: jar.get(REFRESH_COOKIE).map(|c| c.value().to_string()),
        access_expiry: None,
        refresh_expiry: None,
    }
}

fn token_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, value);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Strict);
    cookie.set_secure(secure);
    cookie
}

/// Write both token cookies, each with its own lifetime.
pub fn store(jar: CookieJar, pair: &CredentialPair, secure: bool) -> CookieJar {
    let mut access = token_cookie(ACCESS_COOKIE, pair.access_token.clone(), secure);
    access.set_max_age(Duration::seconds(pair.access_expiry));
    let mut refresh = token_cookie(REFRESH_COOKIE, pair.refresh_token.clone(), secure);
    refresh.set_max_age(Duration::seconds(pair.refresh_expiry));
    jar.add(access).add(refresh)
}

/// Expire both token cookies immediately.
pub fn remove(jar: CookieJar, secure: bool) -> CookieJar {
    let mut access = token_cookie(ACCESS_COOKIE, String::new(), secure);
    access.set_max_age(Duration::ZERO);
    let mut refresh = token_cookie(REFRESH_COOKIE, String::new(), secure);
    refresh.set_max_age(Duration::ZERO);
    jar.add(access).add(refresh)
}

/// Write back whatever a request-scoped store did to the pair.
///
/// A mid-flight refresh leaves the store holding a full new pair (rotate the
/// cookies); an unrecoverable auth failure leaves it empty (drop them); an
/// untouched store changes nothing.
pub fn sync(jar: CookieJar, before: &StoredTokens, after: &StoredTokens, secure: bool) -> CookieJar {
    if after == before {
        return jar;
    }
    if after.is_empty() {
        return remove(jar, secure);
    }
    match after.as_pair() {
        Some(pair) => store(jar, &pair, secure),
        // Partial state can only mean the seeded values survived untouched
        None => jar,
    }
}
