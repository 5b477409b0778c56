// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod session;
mod settings;

#[cfg(test)]
mod tests;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State as AxumState, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use clap::Parser;
use fleetdash_api::{
    ApiError, BotActionRequest, BotActionResponse, ConfigUpdateResponse, EmailConnectionResponse,
    EmailDispatchResponse, EmailReportRequest, ListTripsQuery, ListTripsResponse,
    LogTripResponse, MonthlySheetResponse, NotificationResponse, PeriodReportResponse,
    SendNotificationRequest, Services, TripPayload, WebhookAck, WebhookStatus,
    check_email_connection, create_monthly_sheet, get_bot_info, get_config,
    handle_telegram_update, list_trips, log_trip, run_bot_action, run_period_report,
    send_email_report, send_notification, update_config, webhook_status,
};
use fleetdash_domain::{DashboardConfig, ReportPeriod};
use fleetdash_notify::{BotInfo, Update, WEBHOOK_PATH};
use serde::Serialize;
use tracing::{error, info};

use crate::session::CronAuth;
use crate::settings::{Args, build_services};

/// Application state shared across handlers.
///
/// Adapters are built once at startup; handlers only read them.
#[derive(Clone)]
struct AppState {
    services: Arc<Services>,
}

/// Envelope for successful responses.
#[derive(Debug, Serialize)]
struct SuccessResponse<T> {
    success: bool,
    data: T,
    timestamp: DateTime<Utc>,
}

impl<T: Serialize> SuccessResponse<T> {
    fn json(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
            timestamp: Utc::now(),
        })
    }
}

/// Envelope for error responses.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    timestamp: DateTime<Utc>,
}

/// HTTP error wrapper.
#[derive(Debug)]
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            success: false,
            error: self.message,
            timestamp: Utc::now(),
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ServiceUnavailable { .. } | ApiError::Internal { .. } => {
                error!(error = %err, "Request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.message().to_string(),
        }
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: format!("Invalid request body: {}", rejection.body_text()),
        }
    }
}

type Envelope<T> = Result<Json<SuccessResponse<T>>, HttpError>;

/// Handler for POST /trips endpoint.
async fn handle_log_trip(
    AxumState(app_state): AxumState<AppState>,
    payload: Result<Json<TripPayload>, JsonRejection>,
) -> Envelope<LogTripResponse> {
    let Json(payload) = payload?;
    let response: LogTripResponse = log_trip(&app_state.services, payload, Utc::now()).await?;
    Ok(SuccessResponse::json(response))
}

/// Handler for GET /trips endpoint.
async fn handle_list_trips(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListTripsQuery>,
) -> Envelope<ListTripsResponse> {
    let response: ListTripsResponse = list_trips(&app_state.services, query).await?;
    Ok(SuccessResponse::json(response))
}

async fn period_report(
    app_state: &AppState,
    period: ReportPeriod,
) -> Envelope<PeriodReportResponse> {
    info!(period = period.as_str(), "Running scheduled report");
    let response: PeriodReportResponse =
        run_period_report(&app_state.services, period, Utc::now()).await?;
    Ok(SuccessResponse::json(response))
}

/// Handler for POST /cron/daily-report endpoint.
async fn handle_daily_report(
    _auth: CronAuth,
    AxumState(app_state): AxumState<AppState>,
) -> Envelope<PeriodReportResponse> {
    period_report(&app_state, ReportPeriod::Daily).await
}

/// Handler for POST /cron/weekly-report endpoint.
async fn handle_weekly_report(
    _auth: CronAuth,
    AxumState(app_state): AxumState<AppState>,
) -> Envelope<PeriodReportResponse> {
    period_report(&app_state, ReportPeriod::Weekly).await
}

/// Handler for POST /cron/quarterly-report endpoint.
async fn handle_quarterly_report(
    _auth: CronAuth,
    AxumState(app_state): AxumState<AppState>,
) -> Envelope<PeriodReportResponse> {
    period_report(&app_state, ReportPeriod::Quarterly).await
}

/// Handler for POST /cron/yearly-report endpoint.
async fn handle_yearly_report(
    _auth: CronAuth,
    AxumState(app_state): AxumState<AppState>,
) -> Envelope<PeriodReportResponse> {
    period_report(&app_state, ReportPeriod::Yearly).await
}

/// Handler for POST /cron/monthly-sheet endpoint.
async fn handle_monthly_sheet(
    _auth: CronAuth,
    AxumState(app_state): AxumState<AppState>,
) -> Json<SuccessResponse<MonthlySheetResponse>> {
    SuccessResponse::json(create_monthly_sheet(&app_state.services, Utc::now()).await)
}

/// Handler for POST /email/send-report endpoint.
async fn handle_send_email_report(
    AxumState(app_state): AxumState<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<EmailDispatchResponse>, HttpError> {
    let Json(body) = body?;
    let request: EmailReportRequest = EmailReportRequest::from_json(body)?;
    Ok(Json(
        send_email_report(&app_state.services, request, Utc::now()).await,
    ))
}

/// Handler for GET /email/send-report endpoint.
async fn handle_check_email(
    AxumState(app_state): AxumState<AppState>,
) -> Json<EmailConnectionResponse> {
    Json(check_email_connection(&app_state.services, Utc::now()).await)
}

/// Handler for GET /telegram/bot-info endpoint.
async fn handle_get_bot_info(AxumState(app_state): AxumState<AppState>) -> Envelope<BotInfo> {
    let info: BotInfo = get_bot_info(&app_state.services).await?;
    Ok(SuccessResponse::json(info))
}

/// Handler for POST /telegram/bot-info endpoint.
async fn handle_bot_action(
    AxumState(app_state): AxumState<AppState>,
    request: Result<Json<BotActionRequest>, JsonRejection>,
) -> Result<Json<BotActionResponse>, HttpError> {
    let Json(request) = request?;
    Ok(Json(
        run_bot_action(&app_state.services, request, Utc::now()).await?,
    ))
}

/// Handler for POST /telegram/send-notification endpoint.
async fn handle_send_notification(
    AxumState(app_state): AxumState<AppState>,
    request: Result<Json<SendNotificationRequest>, JsonRejection>,
) -> Result<Json<NotificationResponse>, HttpError> {
    let Json(request) = request?;
    Ok(Json(
        send_notification(&app_state.services, request, Utc::now()).await?,
    ))
}

/// Handler for POST /telegram/webhook endpoint.
async fn handle_telegram_webhook(
    AxumState(app_state): AxumState<AppState>,
    update: Result<Json<Update>, JsonRejection>,
) -> Result<Json<WebhookAck>, HttpError> {
    let Json(update) = update?;
    Ok(Json(
        handle_telegram_update(&app_state.services, &update).await,
    ))
}

/// Handler for GET /telegram/webhook endpoint.
async fn handle_webhook_status() -> Json<WebhookStatus> {
    Json(webhook_status(Utc::now()))
}

/// Handler for GET /config endpoint.
async fn handle_get_config(
    AxumState(app_state): AxumState<AppState>,
) -> Json<SuccessResponse<Option<DashboardConfig>>> {
    SuccessResponse::json(get_config(&app_state.services).await)
}

/// Handler for PUT /config endpoint.
async fn handle_update_config(
    _auth: CronAuth,
    AxumState(app_state): AxumState<AppState>,
    config: Result<Json<DashboardConfig>, JsonRejection>,
) -> Envelope<ConfigUpdateResponse> {
    let Json(config) = config?;
    Ok(SuccessResponse::json(
        update_config(&app_state.services, &config).await,
    ))
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/trips", get(handle_list_trips).post(handle_log_trip))
        .route("/cron/daily-report", post(handle_daily_report))
        .route("/cron/weekly-report", post(handle_weekly_report))
        .route("/cron/quarterly-report", post(handle_quarterly_report))
        .route("/cron/yearly-report", post(handle_yearly_report))
        .route("/cron/monthly-sheet", post(handle_monthly_sheet))
        .route(
            "/email/send-report",
            get(handle_check_email).post(handle_send_email_report),
        )
        .route(
            "/telegram/bot-info",
            get(handle_get_bot_info).post(handle_bot_action),
        )
        .route(
            "/telegram/send-notification",
            post(handle_send_notification),
        )
        .route(
            WEBHOOK_PATH,
            get(handle_webhook_status).post(handle_telegram_webhook),
        )
        .route("/config", get(handle_get_config).put(handle_update_config))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing fleetdash server");

    let services: Services = build_services(&args)?;
    let app_state: AppState = AppState {
        services: Arc::new(services),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: SocketAddr = SocketAddr::new(args.host, args.port);
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
