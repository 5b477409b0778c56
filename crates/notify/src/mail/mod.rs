// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The mail dispatcher.
//!
//! Every public `Mailer` operation renders one HTML template and funnels
//! into a single delivery path. A mailer without a transport, or with no
//! recipients, logs a warning and reports `false` without touching the
//! transport.

pub mod sendgrid;
pub mod smtp;
mod templates;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use chrono_tz::Tz;
use fleetdash_domain::{Report, Trip};
use tracing::{error, info, warn};

use crate::error::NotifyError;
use crate::format::format_date;
use templates::TemplateContext;

/// One rendered message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// A mail delivery backend.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Short name of the backend (`smtp`, `sendgrid`).
    fn service_name(&self) -> &'static str;

    /// Delivers `mail` to every recipient.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the message or cannot be
    /// reached.
    async fn deliver(&self, mail: &OutgoingMail) -> Result<(), NotifyError>;

    /// Checks that the backend accepts our credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached.
    async fn verify(&self) -> Result<bool, NotifyError>;
}

/// Addressing and branding shared by every message.
#[derive(Debug, Clone)]
pub struct MailSettings {
    pub from: String,
    pub recipients: Vec<String>,
    pub app_name: String,
    pub app_url: String,
    pub timezone: Tz,
}

/// Splits a comma-separated recipient list, dropping blank entries.
#[must_use]
pub fn parse_recipients(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|address| !address.is_empty())
        .map(String::from)
        .collect()
}

/// Renders reports and trip events as HTML mail.
#[derive(Clone)]
pub struct Mailer {
    transport: Option<Arc<dyn MailTransport>>,
    settings: MailSettings,
}

impl Mailer {
    /// Creates a mailer delivering through `transport`.
    #[must_use]
    pub fn new(transport: Arc<dyn MailTransport>, settings: MailSettings) -> Self {
        Self {
            transport: Some(transport),
            settings,
        }
    }

    /// Creates a mailer with no transport; every send reports `false`.
    #[must_use]
    pub const fn unconfigured(settings: MailSettings) -> Self {
        Self {
            transport: None,
            settings,
        }
    }

    /// Returns true if a transport is attached.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.transport.is_some()
    }

    /// Name of the attached transport, or `none`.
    #[must_use]
    pub fn service_name(&self) -> &'static str {
        self.transport.as_ref().map_or("none", |t| t.service_name())
    }

    /// The configured recipients.
    #[must_use]
    pub fn recipients(&self) -> &[String] {
        &self.settings.recipients
    }

    fn context(&self) -> TemplateContext<'_> {
        TemplateContext {
            app_name: &self.settings.app_name,
            app_url: &self.settings.app_url,
            timezone: self.settings.timezone,
            sent_at: Utc::now(),
        }
    }

    /// Sends the daily report.
    pub async fn send_daily_report(&self, report: &Report) -> bool {
        let subject: String = format!(
            "📊 Daily report - {}",
            format_date(report.start_date, self.settings.timezone)
        );
        let html: String = templates::daily_report(report, &self.context());
        self.send(subject, html).await
    }

    /// Sends the weekly report.
    pub async fn send_weekly_report(&self, report: &Report) -> bool {
        let tz: Tz = self.settings.timezone;
        let subject: String = format!(
            "📈 Weekly report - {} to {}",
            format_date(report.start_date, tz),
            format_date(report.end_date, tz)
        );
        let html: String = templates::weekly_report(report, &self.context());
        self.send(subject, html).await
    }

    /// Sends the quarterly report. The quarter is taken from the local
    /// start date of the report.
    pub async fn send_quarterly_report(&self, report: &Report) -> bool {
        let start = report.start_date.with_timezone(&self.settings.timezone);
        let quarter: u32 = start.month0() / 3 + 1;
        let subject: String = format!("📊 Quarterly report Q{quarter}/{}", start.year());
        let html: String =
            templates::quarterly_report(report, quarter, start.year(), &self.context());
        self.send(subject, html).await
    }

    /// Sends the yearly report.
    pub async fn send_yearly_report(&self, report: &Report) -> bool {
        let year: i32 = report
            .start_date
            .with_timezone(&self.settings.timezone)
            .year();
        let subject: String = format!("🎊 Yearly report {year}");
        let html: String = templates::yearly_report(report, year, &self.context());
        self.send(subject, html).await
    }

    /// Announces a completed trip.
    pub async fn send_trip_completion_notification(&self, trip: &Trip) -> bool {
        let subject: String = format!("✅ Trip {} completed", trip.id);
        let html: String = templates::trip_completion(trip, &self.context());
        self.send(subject, html).await
    }

    /// Sends a free-form message.
    ///
    /// Plain text is escaped and wrapped in the standard layout with line
    /// breaks preserved; `is_html` messages are sent as given.
    pub async fn send_custom_email(&self, subject: &str, message: &str, is_html: bool) -> bool {
        let html: String = if is_html {
            message.to_string()
        } else {
            templates::wrap_plain_text(message, &self.context())
        };
        self.send(subject.to_string(), html).await
    }

    /// Checks that the transport accepts our credentials.
    pub async fn test_connection(&self) -> bool {
        let Some(transport) = &self.transport else {
            warn!("Mail transport not configured, connection test skipped");
            return false;
        };

        match transport.verify().await {
            Ok(ok) => {
                info!(service = transport.service_name(), ok, "Mail connection test finished");
                ok
            }
            Err(e) => {
                error!(service = transport.service_name(), error = %e, "Mail connection test failed");
                false
            }
        }
    }

    async fn send(&self, subject: String, html: String) -> bool {
        if self.settings.recipients.is_empty() {
            warn!(subject = %subject, "No mail recipients configured, skipping mail");
            return false;
        }
        let Some(transport) = &self.transport else {
            warn!(subject = %subject, "Mail transport not configured, skipping mail");
            return false;
        };

        let mail: OutgoingMail = OutgoingMail {
            from: self.settings.from.clone(),
            to: self.settings.recipients.clone(),
            subject,
            html,
        };
        match transport.deliver(&mail).await {
            Ok(()) => {
                info!(
                    subject = %mail.subject,
                    recipients = mail.to.len(),
                    service = transport.service_name(),
                    "Mail sent"
                );
                true
            }
            Err(e) => {
                error!(subject = %mail.subject, error = %e, "Failed to send mail");
                false
            }
        }
    }
}
