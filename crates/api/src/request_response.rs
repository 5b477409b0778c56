// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response data transfer objects.
//!
//! These types are distinct from domain types. They carry the JSON casing
//! of the HTTP contract and leave validation to the handlers.

use chrono::{DateTime, Utc};
use fleetdash_domain::{Performance, Product, Report, ReportPeriod, Summary, Trip, TripStatus};
use fleetdash_notify::AlertPriority;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// Body of `POST /trips`.
///
/// Every field is optional on the wire so missing identifiers can be
/// reported as a validation error instead of a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPayload {
    pub id: Option<String>,
    pub vehicle_id: Option<String>,
    pub driver_name: Option<String>,
    pub route: Option<String>,
    /// Defaults to `started`.
    pub status: Option<String>,
    pub products: Option<Vec<Product>>,
    /// Estimated from the line items when absent.
    pub cost: Option<f64>,
    pub distance: Option<f64>,
    pub fuel_consumption: Option<f64>,
    /// Defaults to the time of the request.
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Result of logging a trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogTripResponse {
    pub trip_id: String,
    pub status: TripStatus,
    pub logged: bool,
    /// True if at least one completion notification was delivered.
    pub notifications_sent: bool,
}

/// Query string of `GET /trips`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTripsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Trip counts bucketed by status, plus totals.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    pub total: usize,
    pub completed: usize,
    pub in_transit: usize,
    pub started: usize,
    pub cancelled: usize,
    pub total_cost: f64,
    pub total_distance: f64,
}

impl StatusSummary {
    /// Buckets `trips` by status.
    #[must_use]
    pub fn from_trips(trips: &[Trip]) -> Self {
        let count = |status: TripStatus| trips.iter().filter(|t| t.status == status).count();
        Self {
            total: trips.len(),
            completed: count(TripStatus::Completed),
            in_transit: count(TripStatus::InTransit),
            started: count(TripStatus::Started),
            cancelled: count(TripStatus::Cancelled),
            total_cost: trips.iter().map(|t| t.cost).sum(),
            total_distance: trips.iter().map(|t| t.distance).sum(),
        }
    }
}

/// The resolved bounds of a trip listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListTripsResponse {
    pub trips: Vec<Trip>,
    pub summary: StatusSummary,
    pub period: Period,
}

/// Processing summary of a scheduled report run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReportResponse {
    pub period: ReportPeriod,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub trips_processed: usize,
    pub email_sent: bool,
    /// Only the daily report goes to chat.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram_sent: Option<bool>,
    pub summary: Summary,
    pub performance: Performance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySheetResponse {
    pub sheet: String,
    pub created: bool,
}

/// Data of a `custom` mail request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CustomEmail {
    pub subject: String,
    pub message: String,
    #[serde(default, rename = "isHTML")]
    pub is_html: bool,
}

/// Body of `POST /email/send-report`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum EmailReportRequest {
    Daily(Report),
    Weekly(Report),
    Quarterly(Report),
    Yearly(Report),
    TripCompletion(Trip),
    Custom(CustomEmail),
}

const EMAIL_REPORT_TYPES: [&str; 6] = [
    "daily",
    "weekly",
    "quarterly",
    "yearly",
    "trip_completion",
    "custom",
];

impl EmailReportRequest {
    /// Parses a request body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` on `type` when it is missing or not
    /// one of the known report types, and on `data` when it does not match
    /// the shape the type requires.
    pub fn from_json(body: Value) -> Result<Self, ApiError> {
        let known: bool = body
            .get("type")
            .and_then(Value::as_str)
            .is_some_and(|kind| EMAIL_REPORT_TYPES.contains(&kind));
        if !known {
            return Err(ApiError::InvalidInput {
                field: String::from("type"),
                message: String::from("Invalid report type"),
            });
        }

        serde_json::from_value(body).map_err(|e| ApiError::InvalidInput {
            field: String::from("data"),
            message: format!("Malformed report data: {e}"),
        })
    }

    /// The wire name of the report type.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Daily(_) => "daily",
            Self::Weekly(_) => "weekly",
            Self::Quarterly(_) => "quarterly",
            Self::Yearly(_) => "yearly",
            Self::TripCompletion(_) => "trip_completion",
            Self::Custom(_) => "custom",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailDispatchResponse {
    pub success: bool,
    #[serde(rename = "type")]
    pub report_type: &'static str,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailConnectionResponse {
    pub success: bool,
    pub connected: bool,
    pub service: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// Body of `POST /telegram/bot-info`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BotActionRequest {
    pub action: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BotActionResponse {
    pub success: bool,
    pub action: String,
    pub timestamp: DateTime<Utc>,
}

/// Body of `POST /telegram/send-notification`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendNotificationRequest {
    pub message: Option<String>,
    #[serde(default)]
    pub priority: AlertPriority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationResponse {
    pub success: bool,
    pub timestamp: DateTime<Utc>,
}

/// Acknowledgement returned to Telegram for every update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WebhookAck {
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookStatus {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConfigUpdateResponse {
    pub updated: bool,
}
