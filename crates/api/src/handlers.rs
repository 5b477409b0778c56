// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Endpoint operations.
//!
//! Each operation takes the shared `Services` and the request clock and
//! returns a response DTO or an `ApiError`. Delivery failures are reported
//! in the response flags; only invalid input, a rejected transition, or a
//! trip that could not be persisted become errors.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use fleetdash_domain::{
    DashboardConfig, DomainError, Product, Report, ReportPeriod, ReportWindow, Trip, TripStatus,
    TripWarning, build_report, estimate_cost, validate_required_fields, validate_trip,
};
use fleetdash_notify::{BotInfo, Update};
use fleetdash_persistence::TripRow;
use tracing::{info, warn};

use crate::error::{ApiError, translate_domain_error};
use crate::request_response::{
    BotActionRequest, BotActionResponse, ConfigUpdateResponse, EmailConnectionResponse,
    EmailDispatchResponse, EmailReportRequest, ListTripsQuery, ListTripsResponse,
    LogTripResponse, MonthlySheetResponse, NotificationResponse, Period, PeriodReportResponse,
    SendNotificationRequest, StatusSummary, TripPayload, WebhookAck, WebhookStatus,
};
use crate::services::Services;

/// Builds a trip from a request body, filling defaults.
///
/// # Errors
///
/// Returns an error if an identifying field is blank or the status is
/// unknown.
pub fn trip_from_payload(payload: TripPayload, now: DateTime<Utc>) -> Result<Trip, DomainError> {
    validate_required_fields(
        payload.id.as_deref(),
        payload.vehicle_id.as_deref(),
        payload.driver_name.as_deref(),
    )?;

    let status: TripStatus = match payload.status.as_deref() {
        Some(status) => status.parse()?,
        None => TripStatus::Started,
    };
    let products: Vec<Product> = payload.products.unwrap_or_default();
    let cost: f64 = payload.cost.unwrap_or_else(|| estimate_cost(&products));

    Ok(Trip {
        id: payload.id.unwrap_or_default(),
        vehicle_id: payload.vehicle_id.unwrap_or_default(),
        driver_name: payload.driver_name.unwrap_or_default(),
        route: payload.route.unwrap_or_default(),
        status,
        products,
        cost,
        distance: payload.distance.unwrap_or(0.0),
        fuel_consumption: payload.fuel_consumption.unwrap_or(0.0),
        start_time: payload.start_time.unwrap_or(now),
        end_time: payload.end_time,
        notes: payload.notes,
    })
}

/// Logs a trip and, when it is completed, announces it by mail and chat.
///
/// # Arguments
///
/// * `services` - The shared adapters
/// * `payload` - The request body
/// * `now` - The request time, used when `startTime` is absent
///
/// # Errors
///
/// Returns an error if:
/// - An identifying field is missing or a field is invalid
/// - Strict lifecycle mode is on and the status change is not allowed, or
///   the trip's history cannot be read
/// - The trip could not be persisted
pub async fn log_trip(
    services: &Services,
    payload: TripPayload,
    now: DateTime<Utc>,
) -> Result<LogTripResponse, ApiError> {
    let trip: Trip = trip_from_payload(payload, now).map_err(translate_domain_error)?;
    let warnings: Vec<TripWarning> = validate_trip(&trip).map_err(translate_domain_error)?;
    for warning in &warnings {
        warn!(trip_id = %trip.id, warning = %warning, "Accepting trip with warning");
    }

    // Lifecycle enforcement reads the latest stored row for this id and
    // fails closed when the history cannot be read
    let previous: Option<TripRow> = if services.strict_lifecycle {
        services
            .trip_store
            .try_find_latest(&trip.id)
            .await
            .map_err(|e| {
                warn!(trip_id = %trip.id, error = %e, "Cannot read trip history");
                ApiError::ServiceUnavailable {
                    service: String::from("trip_store"),
                    message: String::from("Failed to read trip history"),
                }
            })?
    } else {
        None
    };
    if let Some(previous) = previous {
        previous
            .trip
            .status
            .validate_transition(trip.status)
            .map_err(translate_domain_error)?;
    }

    if !services.trip_store.append(&trip).await {
        return Err(ApiError::Internal {
            message: String::from("Failed to log trip"),
        });
    }

    let notifications_sent: bool = if trip.is_completed() {
        let (mail_sent, chat_sent): (bool, bool) = tokio::join!(
            services.mailer.send_trip_completion_notification(&trip),
            services.telegram.notify_trip_completed(&trip)
        );
        mail_sent || chat_sent
    } else {
        false
    };

    info!(
        trip_id = %trip.id,
        status = %trip.status,
        notifications_sent,
        "Trip logged"
    );

    Ok(LogTripResponse {
        trip_id: trip.id,
        status: trip.status,
        logged: true,
        notifications_sent,
    })
}

#[derive(Clone, Copy)]
enum Bound {
    Start,
    End,
}

/// Parses a listing bound as RFC 3339, or as a local `YYYY-MM-DD` date
/// covering that whole day.
fn parse_bound(value: &str, bound: Bound, tz: Tz) -> Option<DateTime<Utc>> {
    let value: &str = value.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.with_timezone(&Utc));
    }

    let day: NaiveDate = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    let window: ReportWindow = ReportWindow::from_local_days(day, day, tz).ok()?;
    Some(match bound {
        Bound::Start => window.start,
        Bound::End => window.end,
    })
}

/// Lists the trips starting in a period, with a status breakdown.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if either bound is missing or cannot be
/// parsed, or if the end precedes the start.
pub async fn list_trips(
    services: &Services,
    query: ListTripsQuery,
) -> Result<ListTripsResponse, ApiError> {
    let present = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
    let (Some(start_raw), Some(end_raw)) = (present(query.start_date), present(query.end_date))
    else {
        return Err(ApiError::InvalidInput {
            field: String::from("startDate"),
            message: String::from("Start date and end date are required"),
        });
    };

    let start: DateTime<Utc> = parse_bound(&start_raw, Bound::Start, services.timezone)
        .ok_or_else(|| ApiError::InvalidInput {
            field: String::from("startDate"),
            message: format!("Invalid start date '{start_raw}'"),
        })?;
    let end: DateTime<Utc> = parse_bound(&end_raw, Bound::End, services.timezone)
        .ok_or_else(|| ApiError::InvalidInput {
            field: String::from("endDate"),
            message: format!("Invalid end date '{end_raw}'"),
        })?;
    if end < start {
        return Err(ApiError::InvalidInput {
            field: String::from("endDate"),
            message: String::from("End date is before start date"),
        });
    }

    let trips: Vec<Trip> = services.trip_store.query(start, end).await;
    let summary: StatusSummary = StatusSummary::from_trips(&trips);

    Ok(ListTripsResponse {
        trips,
        summary,
        period: Period {
            start_date: start,
            end_date: end,
        },
    })
}

/// Builds the report for the current `period` from stored trips.
///
/// Stored rows carry a product unit total in place of line items, so the
/// product count is taken from those totals. The returned trips have empty
/// product lists, so `summary.total_products` is not their line-item sum.
///
/// # Errors
///
/// Returns an error if the window cannot be computed.
pub async fn compile_report(
    services: &Services,
    period: ReportPeriod,
    now: DateTime<Utc>,
) -> Result<Report, ApiError> {
    let window: ReportWindow =
        period.window(now, services.timezone).map_err(translate_domain_error)?;
    let rows: Vec<TripRow> = services
        .trip_store
        .query_rows(window.start, window.end)
        .await;

    let stored_units: u64 = rows.iter().map(|r| r.total_product_units).sum();
    let trips: Vec<Trip> = rows.into_iter().map(|r| r.trip).collect();
    let mut report: Report = build_report(period, window, trips, services.scorer.as_ref());
    report.summary.total_products = stored_units;
    Ok(report)
}

/// Compiles and dispatches a scheduled report.
///
/// Daily reports go to mail and chat concurrently; the other periods go to
/// mail only.
///
/// # Errors
///
/// Returns an error if the window cannot be computed, or for the monthly
/// period, which has no report of its own.
pub async fn run_period_report(
    services: &Services,
    period: ReportPeriod,
    now: DateTime<Utc>,
) -> Result<PeriodReportResponse, ApiError> {
    let report: Report = compile_report(services, period, now).await?;

    let (email_sent, telegram_sent): (bool, Option<bool>) = match period {
        ReportPeriod::Daily => {
            let (mail_sent, chat_sent): (bool, bool) = tokio::join!(
                services.mailer.send_daily_report(&report),
                services.telegram.send_daily_report(&report)
            );
            (mail_sent, Some(chat_sent))
        }
        ReportPeriod::Weekly => (services.mailer.send_weekly_report(&report).await, None),
        ReportPeriod::Quarterly => (services.mailer.send_quarterly_report(&report).await, None),
        ReportPeriod::Yearly => (services.mailer.send_yearly_report(&report).await, None),
        ReportPeriod::Monthly => {
            return Err(ApiError::InvalidInput {
                field: String::from("period"),
                message: String::from("Monthly reports are not dispatched"),
            });
        }
    };

    info!(
        period = %period.as_str(),
        trips = report.trips.len(),
        email_sent,
        telegram_sent = ?telegram_sent,
        "Scheduled report processed"
    );

    Ok(PeriodReportResponse {
        period,
        start_date: report.start_date,
        end_date: report.end_date,
        trips_processed: report.trips.len(),
        email_sent,
        telegram_sent,
        summary: report.summary,
        performance: report.performance,
    })
}

/// Creates the `YYYY-MM` sheet for the current local month.
pub async fn create_monthly_sheet(
    services: &Services,
    now: DateTime<Utc>,
) -> MonthlySheetResponse {
    let local: NaiveDate = now.with_timezone(&services.timezone).date_naive();
    let created: bool = services
        .trip_store
        .create_monthly_sheet(local.year(), local.month())
        .await;

    MonthlySheetResponse {
        sheet: format!("{}-{:02}", local.year(), local.month()),
        created,
    }
}

/// Renders and mails a caller-supplied report.
pub async fn send_email_report(
    services: &Services,
    request: EmailReportRequest,
    now: DateTime<Utc>,
) -> EmailDispatchResponse {
    let report_type: &'static str = request.type_name();
    let success: bool = match request {
        EmailReportRequest::Daily(report) => services.mailer.send_daily_report(&report).await,
        EmailReportRequest::Weekly(report) => services.mailer.send_weekly_report(&report).await,
        EmailReportRequest::Quarterly(report) => {
            services.mailer.send_quarterly_report(&report).await
        }
        EmailReportRequest::Yearly(report) => services.mailer.send_yearly_report(&report).await,
        EmailReportRequest::TripCompletion(trip) => {
            services.mailer.send_trip_completion_notification(&trip).await
        }
        EmailReportRequest::Custom(mail) => {
            services
                .mailer
                .send_custom_email(&mail.subject, &mail.message, mail.is_html)
                .await
        }
    };

    EmailDispatchResponse {
        success,
        report_type,
        timestamp: now,
    }
}

/// Checks that the mail transport accepts our credentials.
pub async fn check_email_connection(
    services: &Services,
    now: DateTime<Utc>,
) -> EmailConnectionResponse {
    let connected: bool = services.mailer.test_connection().await;
    EmailConnectionResponse {
        success: true,
        connected,
        service: services.mailer.service_name(),
        timestamp: now,
    }
}

/// Returns the bot's identity.
///
/// # Errors
///
/// Returns `ApiError::ServiceUnavailable` if no bot is configured or the
/// Bot API cannot be reached.
pub async fn get_bot_info(services: &Services) -> Result<BotInfo, ApiError> {
    services
        .telegram
        .get_bot_info()
        .await
        .ok_or_else(|| ApiError::ServiceUnavailable {
            service: String::from("telegram"),
            message: String::from("Bot not configured or unreachable"),
        })
}

/// Registers or removes the bot's webhook.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for any action other than
/// `set_webhook` or `delete_webhook`.
pub async fn run_bot_action(
    services: &Services,
    request: BotActionRequest,
    now: DateTime<Utc>,
) -> Result<BotActionResponse, ApiError> {
    let action: String = request.action.unwrap_or_default();
    let success: bool = match action.as_str() {
        "set_webhook" => services.telegram.set_webhook().await,
        "delete_webhook" => services.telegram.delete_webhook().await,
        _ => {
            return Err(ApiError::InvalidInput {
                field: String::from("action"),
                message: String::from("Invalid action"),
            });
        }
    };

    Ok(BotActionResponse {
        success,
        action,
        timestamp: now,
    })
}

/// Posts an alert to the chat.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the message is missing or blank.
pub async fn send_notification(
    services: &Services,
    request: SendNotificationRequest,
    now: DateTime<Utc>,
) -> Result<NotificationResponse, ApiError> {
    let Some(message) = request.message.filter(|m| !m.trim().is_empty()) else {
        return Err(ApiError::InvalidInput {
            field: String::from("message"),
            message: String::from("Message is required"),
        });
    };

    let success: bool = services.telegram.send_alert(&message, request.priority).await;
    Ok(NotificationResponse {
        success,
        timestamp: now,
    })
}

/// Answers one inbound Telegram update.
///
/// Telegram retries updates that are not acknowledged, so every update is
/// acknowledged whether or not a reply was delivered.
pub async fn handle_telegram_update(services: &Services, update: &Update) -> WebhookAck {
    let replied: bool = services.telegram.handle_webhook(update, services).await;
    info!(update_id = update.update_id, replied, "Telegram update handled");
    WebhookAck { success: true }
}

#[must_use]
pub const fn webhook_status(now: DateTime<Utc>) -> WebhookStatus {
    WebhookStatus {
        status: "Telegram webhook endpoint is active",
        timestamp: now,
    }
}

/// Loads the dashboard configuration, or `None` when it has never been
/// written or the store is unavailable.
pub async fn get_config(services: &Services) -> Option<DashboardConfig> {
    services.config_store.get_config().await
}

/// Replaces the dashboard configuration.
pub async fn update_config(
    services: &Services,
    config: &DashboardConfig,
) -> ConfigUpdateResponse {
    ConfigUpdateResponse {
        updated: services.config_store.update_config(config).await,
    }
}
