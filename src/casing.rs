// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Key-casing normalization between the platform wire format and the
//! application format.
//!
//! The platform API speaks snake_case JSON; everything on our side of the
//! wire (frontend payloads, typed models) is camelCase. Conversion touches
//! keys only, recursively through objects and arrays, and leaves values
//! untouched. Keys already in the target case pass through unchanged, so
//! both directions are idempotent and mutually inverse on single-case
//! structures.

use serde_json::{Map, Value};

/// Convert a camelCase key to snake_case.
pub fn camel_to_snake(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Convert a snake_case key to camelCase.
///
/// Leading underscores are preserved (sentinel keys like `_id` round-trip),
/// and an underscore is only folded when it precedes a lowercase letter, so
/// digit segments like `line_2` survive a round trip.
pub fn snake_to_camel(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut chars = key.chars().peekable();
    let mut at_start = true;
    while let Some(c) = chars.next() {
        if c == '_' && !at_start {
            match chars.peek() {
                Some(next) if next.is_ascii_lowercase() => {
                    let upper = next.to_ascii_uppercase();
                    out.push(upper);
                    chars.next();
                }
                _ => out.push('_'),
            }
        } else {
            out.push(c);
            if c != '_' {
                at_start = false;
            }
        }
    }
    out
}

/// Convert every object key in `value` to the wire format (snake_case).
pub fn to_wire_format(value: Value) -> Value {
    transform_keys(value, &camel_to_snake)
}

/// Convert every object key in `value` to the application format (camelCase).
pub fn to_app_format(value: Value) -> Value {
    transform_keys(value, &snake_to_camel)
}

fn transform_keys(value: Value, convert: &dyn Fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = Map::new();
            for (key, inner) in map {
                out.insert(convert(&key), transform_keys(inner, convert));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| transform_keys(item, convert))
                .collect(),
        ),
        other => other,
    }
}
