// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTML mail templates.
//!
//! Every template is a full document built from `layout`. Text taken from
//! trips or callers is escaped before it is embedded.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use fleetdash_domain::{Report, Trip};

use crate::format::{
    escape_html, format_amount, format_count, format_date, format_datetime, format_millions,
    status_label,
};

const STYLE: &str = "\
body { font-family: Arial, sans-serif; color: #333; margin: 0; padding: 0; }
.container { max-width: 800px; margin: 0 auto; padding: 20px; }
.header { color: #fff; padding: 24px; border-radius: 8px 8px 0 0; text-align: center; }
.content { background: #f9fafb; padding: 24px; border-radius: 0 0 8px 8px; }
.cards { display: flex; flex-wrap: wrap; gap: 12px; margin-bottom: 20px; }
.card { flex: 1; min-width: 150px; background: #fff; padding: 16px; border-radius: 8px; text-align: center; }
.card-value { font-size: 24px; font-weight: bold; }
.card-label { font-size: 12px; color: #6b7280; }
table { width: 100%; border-collapse: collapse; background: #fff; }
th, td { padding: 8px 12px; border-bottom: 1px solid #e5e7eb; text-align: left; }
th { background: #f3f4f6; }
.footer { text-align: center; color: #6b7280; font-size: 12px; margin-top: 20px; }
";

/// Branding and clock shared by one rendering.
pub struct TemplateContext<'a> {
    pub app_name: &'a str,
    pub app_url: &'a str,
    pub timezone: Tz,
    pub sent_at: DateTime<Utc>,
}

impl TemplateContext<'_> {
    fn dashboard_url(&self) -> String {
        format!("{}/dashboard", self.app_url.trim_end_matches('/'))
    }
}

fn layout(
    title: &str,
    accent: &str,
    subtitle: &str,
    body: &str,
    ctx: &TemplateContext<'_>,
) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         <style>\n{STYLE}</style>\n</head>\n<body>\n<div class=\"container\">\n\
         <div class=\"header\" style=\"background: {accent};\">\n<h1>{title}</h1>\n<p>{subtitle}</p>\n</div>\n\
         <div class=\"content\">\n{body}\n</div>\n\
         <div class=\"footer\">\n<p>Sent automatically by {app} at {sent}</p>\n\
         <p><a href=\"{dashboard}\">Open dashboard</a></p>\n</div>\n</div>\n</body>\n</html>\n",
        app = escape_html(ctx.app_name),
        sent = format_datetime(ctx.sent_at, ctx.timezone),
        dashboard = escape_html(&ctx.dashboard_url()),
    )
}

fn card(value: &str, label: &str) -> String {
    format!(
        "<div class=\"card\"><div class=\"card-value\">{value}</div>\
         <div class=\"card-label\">{label}</div></div>"
    )
}

fn summary_cards(report: &Report) -> String {
    let summary = &report.summary;
    format!(
        "<div class=\"cards\">{}{}{}{}</div>",
        card(&summary.total_trips.to_string(), "Trips"),
        card(&format_count(summary.total_products), "Products"),
        card(&format_millions(summary.total_cost), "Total cost (VND)"),
        card(&format_amount(summary.total_distance), "Distance (km)"),
    )
}

fn trips_table(trips: &[Trip]) -> String {
    if trips.is_empty() {
        return String::from("<p>No trips in this period.</p>");
    }

    let mut rows: String = String::new();
    for trip in trips {
        let _ = write!(
            rows,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{} ₫</td></tr>",
            escape_html(&trip.id),
            escape_html(&trip.vehicle_id),
            escape_html(&trip.driver_name),
            escape_html(&trip.route),
            status_label(trip.status),
            format_amount(trip.cost),
        );
    }
    format!(
        "<table>\n<tr><th>Trip</th><th>Vehicle</th><th>Driver</th><th>Route</th>\
         <th>Status</th><th>Cost</th></tr>\n{rows}\n</table>"
    )
}

pub fn daily_report(report: &Report, ctx: &TemplateContext<'_>) -> String {
    let body: String = format!(
        "<h2>Summary</h2>\n{}\n<h2>Trips</h2>\n{}",
        summary_cards(report),
        trips_table(&report.trips)
    );
    layout(
        "📊 Daily Report",
        "#2563eb",
        &format_date(report.start_date, ctx.timezone),
        &body,
        ctx,
    )
}

pub fn weekly_report(report: &Report, ctx: &TemplateContext<'_>) -> String {
    let performance = &report.performance;
    let body: String = format!(
        "<h2>Summary</h2>\n{}\n<h2>Performance</h2>\n<div class=\"cards\">{}{}{}</div>\n\
         <p>Average cost: {} ₫/km</p>",
        summary_cards(report),
        card(&format!("{:.1}%", performance.on_time_delivery), "On-time delivery"),
        card(&format!("{:.1}%", performance.cost_efficiency), "Cost efficiency"),
        card(&format!("{:.1}%", performance.fuel_efficiency), "Fuel efficiency"),
        format_amount(report.summary.average_cost_per_km),
    );
    let subtitle: String = format!(
        "{} - {}",
        format_date(report.start_date, ctx.timezone),
        format_date(report.end_date, ctx.timezone)
    );
    layout("📈 Weekly Report", "#059669", &subtitle, &body, ctx)
}

pub fn quarterly_report(
    report: &Report,
    quarter: u32,
    year: i32,
    ctx: &TemplateContext<'_>,
) -> String {
    let summary = &report.summary;
    let body: String = format!(
        "<h2>Summary</h2>\n{}\n<h2>Insights</h2>\n\
         <p>Trips this quarter: {}</p>\n\
         <p>Average cost: {} ₫/km</p>\n\
         <p>Total cost: {} ₫</p>\n\
         <p>On-time delivery: {:.1}%</p>",
        summary_cards(report),
        summary.total_trips,
        format_amount(summary.average_cost_per_km),
        format_amount(summary.total_cost),
        report.performance.on_time_delivery,
    );
    layout(
        "📊 Quarterly Report",
        "#7c3aed",
        &format!("Q{quarter}/{year}"),
        &body,
        ctx,
    )
}

pub fn yearly_report(report: &Report, year: i32, ctx: &TemplateContext<'_>) -> String {
    let summary = &report.summary;
    let body: String = format!(
        "<h2>Highlights of {year}</h2>\n{}\n\
         <p>Total trips: {}</p>\n\
         <p>Products delivered: {}</p>\n\
         <p>Total cost: {} ₫</p>\n\
         <p>Distance covered: {} km</p>\n\
         <p>On-time delivery: {:.1}%</p>",
        summary_cards(report),
        summary.total_trips,
        format_count(summary.total_products),
        format_amount(summary.total_cost),
        format_amount(summary.total_distance),
        report.performance.on_time_delivery,
    );
    layout("🎊 Yearly Report", "#dc2626", &year.to_string(), &body, ctx)
}

pub fn trip_completion(trip: &Trip, ctx: &TemplateContext<'_>) -> String {
    let end_time: String = trip
        .end_time
        .map_or_else(|| String::from("n/a"), |end| format_datetime(end, ctx.timezone));
    let notes: String = trip
        .notes
        .as_deref()
        .map(|n| format!("<p><strong>Notes:</strong> {}</p>\n", escape_html(n)))
        .unwrap_or_default();

    let body: String = format!(
        "<h2>Trip details</h2>\n\
         <p><strong>Trip:</strong> {}</p>\n\
         <p><strong>Vehicle:</strong> {}</p>\n\
         <p><strong>Driver:</strong> {}</p>\n\
         <p><strong>Route:</strong> {}</p>\n\
         <p><strong>Products:</strong> {} units</p>\n\
         <p><strong>Cost:</strong> {} ₫</p>\n\
         <p><strong>Distance:</strong> {} km</p>\n\
         <p><strong>Started:</strong> {}</p>\n\
         <p><strong>Completed:</strong> {}</p>\n\
         <p><strong>Duration:</strong> {}h</p>\n{notes}",
        escape_html(&trip.id),
        escape_html(&trip.vehicle_id),
        escape_html(&trip.driver_name),
        escape_html(&trip.route),
        trip.product_units(),
        format_amount(trip.cost),
        format_amount(trip.distance),
        format_datetime(trip.start_time, ctx.timezone),
        end_time,
        trip.duration_hours(),
    );
    layout(
        "✅ Trip Completed",
        "#16a34a",
        &escape_html(&trip.id),
        &body,
        ctx,
    )
}

pub fn wrap_plain_text(message: &str, ctx: &TemplateContext<'_>) -> String {
    let body: String = escape_html(message).replace('\n', "<br>\n");
    layout(
        &escape_html(ctx.app_name),
        "#2563eb",
        &format_date(ctx.sent_at, ctx.timezone),
        &format!("<p>{body}</p>"),
        ctx,
    )
}
