// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared-secret authentication for scheduler and admin endpoints.

use tracing::warn;

use crate::error::ApiError;

/// Checks a presented bearer token against the configured cron secret.
///
/// An unset or blank secret rejects every request.
///
/// # Arguments
///
/// * `expected` - The configured secret, if any
/// * `presented` - The token from `Authorization: Bearer <token>`, if any
///
/// # Errors
///
/// Returns `ApiError::AuthenticationFailed` when no secret is configured,
/// no token is presented, or the token does not match.
pub fn verify_cron_secret(expected: Option<&str>, presented: Option<&str>) -> Result<(), ApiError> {
    let Some(expected) = expected.filter(|s| !s.is_empty()) else {
        warn!("Cron secret not configured, rejecting request");
        return Err(unauthorized());
    };
    let Some(presented) = presented else {
        return Err(unauthorized());
    };

    if constant_time_eq(expected.as_bytes(), presented.as_bytes()) {
        Ok(())
    } else {
        warn!("Cron request presented an invalid secret");
        Err(unauthorized())
    }
}

/// Extracts the token from an `Authorization` header value.
#[must_use]
pub fn bearer_token(header: &str) -> Option<&str> {
    header.strip_prefix("Bearer ").map(str::trim)
}

fn unauthorized() -> ApiError {
    ApiError::AuthenticationFailed {
        reason: String::from("Unauthorized"),
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
