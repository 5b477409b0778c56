// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared-secret authentication for scheduler and admin routes.
//!
//! This module provides an Axum extractor that checks the cron secret at
//! the server boundary, before any handler work runs.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use fleetdash_api::{bearer_token, verify_cron_secret};
use tracing::debug;

use crate::{AppState, HttpError};

/// Extractor for requests carrying the cron secret.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     _auth: CronAuth,
///     AxumState(app_state): AxumState<AppState>,
/// ) -> Result<Json<Response>, HttpError> {
///     ...
/// }
/// ```
///
/// # Errors
///
/// Rejects with HTTP 401 if:
/// - No cron secret is configured
/// - The Authorization header is missing or not `Bearer <token>`
/// - The token does not match the secret
pub struct CronAuth;

impl FromRequestParts<AppState> for CronAuth {
    type Rejection = HttpError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let presented: Option<&str> = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token);
        if presented.is_none() {
            debug!(path = %parts.uri.path(), "Missing or malformed Authorization header");
        }

        verify_cron_secret(state.services.cron_secret.as_deref(), presented)?;
        debug!(path = %parts.uri.path(), "Cron secret accepted");
        Ok(Self)
    }
}
