// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The API boundary of the dashboard.
//!
//! Endpoint operations here are transport-agnostic: they take the shared
//! `Services`, a parsed request and the request clock, and return response
//! DTOs or an `ApiError`. The server crate maps them onto HTTP.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod request_response;
mod services;

#[cfg(test)]
mod tests;

pub use auth::{bearer_token, verify_cron_secret};
pub use error::{ApiError, translate_domain_error};
pub use handlers::{
    check_email_connection, compile_report, create_monthly_sheet, get_bot_info, get_config,
    handle_telegram_update, list_trips, log_trip, run_bot_action, run_period_report,
    send_email_report, send_notification, trip_from_payload, update_config, webhook_status,
};
pub use request_response::{
    BotActionRequest, BotActionResponse, ConfigUpdateResponse, CustomEmail,
    EmailConnectionResponse, EmailDispatchResponse, EmailReportRequest, ListTripsQuery,
    ListTripsResponse, LogTripResponse, MonthlySheetResponse, NotificationResponse, Period,
    PeriodReportResponse, SendNotificationRequest, StatusSummary, TripPayload, WebhookAck,
    WebhookStatus,
};
pub use services::Services;
