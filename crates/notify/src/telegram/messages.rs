// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Chat message texts, in Telegram's legacy `Markdown`.
//!
//! Text that comes from trips or API callers is escaped so it cannot break
//! the entity parser.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use fleetdash_domain::{Report, Trip, TripStatus};

use super::{AlertPriority, CustomNotification, SystemStatus, TripDetail};
use crate::format::{
    escape_markdown, format_amount, format_count, format_date, format_datetime, status_label,
};

/// Trips listed individually in the daily chat report.
pub const DAILY_TRIP_LIMIT: usize = 5;

pub const START_TEXT: &str = "Welcome to the logistics dashboard bot! 🚛\n\n\
Available commands:\n\
/status - System status\n\
/today - Today's report\n\
/help - Help";

pub const HELP_TEXT: &str = "Help:\n\
• /status - Show which services are connected\n\
• /today - Show today's trip summary\n\
• /help - Show this message";

pub const UNKNOWN_COMMAND_TEXT: &str = "Unknown command. Type /help to see the available commands.";

pub const STORE_UNAVAILABLE_TEXT: &str = "Trip store is not configured, no report available.";

fn trip_lines(trip: &Trip, product_units: u64, tz: Tz) -> String {
    let mut text: String = format!(
        "📋 *Trip:*\n\
         • ID: {}\n\
         • Vehicle: {}\n\
         • Driver: {}\n\
         • Route: {}\n\n\
         📊 *Details:*\n\
         • Products: {} units\n\
         • Cost: {} ₫\n\
         • Distance: {} km\n\
         • Duration: {}h\n\n\
         ⏰ *Timing:*\n\
         • Started: {}\n\
         • Completed: {}\n",
        escape_markdown(&trip.id),
        escape_markdown(&trip.vehicle_id),
        escape_markdown(&trip.driver_name),
        escape_markdown(&trip.route),
        format_count(product_units),
        format_amount(trip.cost),
        format_amount(trip.distance),
        trip.duration_hours(),
        format_datetime(trip.start_time, tz),
        trip.end_time
            .map_or_else(|| String::from("n/a"), |end| format_datetime(end, tz)),
    );
    if let Some(notes) = trip.notes.as_deref().filter(|n| !n.is_empty()) {
        let _ = write!(text, "\n📝 *Notes:* {}\n", escape_markdown(notes));
    }
    text
}

fn summary_lines(report: &Report) -> String {
    let summary = &report.summary;
    format!(
        "📊 *Summary:*\n\
         • Trips: {}\n\
         • Products: {}\n\
         • Total cost: {} ₫\n\
         • Distance: {} km\n\
         • Cost/km: {} ₫",
        summary.total_trips,
        format_count(summary.total_products),
        format_amount(summary.total_cost),
        format_amount(summary.total_distance),
        format_amount(summary.average_cost_per_km),
    )
}

pub fn trip_completed(trip: &Trip, tz: Tz) -> String {
    format!(
        "🚛 *TRIP COMPLETED*\n\n{}\n✅ Trip recorded in the log.",
        trip_lines(trip, trip.product_units(), tz)
    )
}

pub fn trip_detail(detail: &TripDetail, tz: Tz) -> String {
    format!(
        "📋 *TRIP {}*\nStatus: {}\n\n{}",
        escape_markdown(&detail.trip.id),
        status_label(detail.trip.status),
        trip_lines(&detail.trip, detail.product_units, tz)
    )
}

pub fn trip_not_found(trip_id: &str) -> String {
    format!("Trip {} was not found.", escape_markdown(trip_id))
}

pub fn daily_report(report: &Report, app_url: &str, tz: Tz) -> String {
    let mut text: String = format!(
        "📈 *DAILY REPORT*\n📅 {}\n\n{}\n\n🚛 *Trips:*\n",
        format_date(report.start_date, tz),
        summary_lines(report)
    );

    if report.trips.is_empty() {
        text.push_str("No trips recorded.\n");
    }
    for trip in report.trips.iter().take(DAILY_TRIP_LIMIT) {
        let marker: &str = if trip.status == TripStatus::Completed {
            "✅"
        } else {
            "🔄"
        };
        let _ = writeln!(
            text,
            "• {} - {} ({marker})",
            escape_markdown(&trip.vehicle_id),
            escape_markdown(&trip.route)
        );
    }
    if report.trips.len() > DAILY_TRIP_LIMIT {
        let _ = writeln!(
            text,
            "\n... and {} more trips",
            report.trips.len() - DAILY_TRIP_LIMIT
        );
    }

    let _ = write!(text, "\n📊 Dashboard: {app_url}");
    text
}

pub fn today(report: &Report, app_url: &str, tz: Tz) -> String {
    format!(
        "📈 *TODAY'S REPORT*\n📅 {}\n\n{}\n\nOpen {app_url} for details.",
        format_date(report.start_date, tz),
        summary_lines(report)
    )
}

pub fn alert(message: &str, priority: AlertPriority, now: DateTime<Utc>, tz: Tz) -> String {
    format!(
        "{} *ALERT*\n\n{}\n\n⏰ Time: {}",
        priority.icon(),
        escape_markdown(message),
        format_datetime(now, tz)
    )
}

pub fn custom(notification: &CustomNotification, tz: Tz) -> String {
    format!(
        "{} *{}*\n\n{}\n\n⏰ {}",
        notification.kind.icon(),
        escape_markdown(&notification.title.to_uppercase()),
        escape_markdown(&notification.message),
        format_datetime(notification.timestamp, tz)
    )
}

pub fn status(status: &SystemStatus, now: DateTime<Utc>, tz: Tz) -> String {
    let line = |name: &str, backend: Option<&str>| match backend {
        Some(backend) => format!("🟢 {name}: {backend}"),
        None => format!("🔴 {name}: not configured"),
    };
    format!(
        "📊 *SYSTEM STATUS*\n\n\
         🟢 Dashboard: running\n\
         {}\n\
         🟢 Telegram bot: running\n\
         {}\n\n\
         ⏰ Updated: {}",
        line("Trip store", status.store),
        line("Email", status.mail),
        format_datetime(now, tz)
    )
}
