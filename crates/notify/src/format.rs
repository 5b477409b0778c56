// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Display formatting shared by the mail and chat templates.
//!
//! Amounts follow the Vietnamese locale: `.` groups thousands and `,`
//! separates decimals (`1.234.567,5`). Dates are rendered in the
//! reporting timezone as `dd/mm/yyyy`.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use fleetdash_domain::TripStatus;
use num_traits::ToPrimitive;

/// Formats `value` with `.` thousands separators and up to three decimals.
///
/// # Example
///
/// ```text
/// 1000000.0 -> "1.000.000"
/// 10000.5   -> "10.000,5"
/// ```
#[must_use]
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let thousandths: u128 = (value.abs() * 1000.0).round().to_u128().unwrap_or(0);
    let fraction: u128 = thousandths % 1000;

    let mut out: String = String::new();
    if value < 0.0 && thousandths > 0 {
        out.push('-');
    }
    out.push_str(&group_digits(&(thousandths / 1000).to_string()));
    if fraction > 0 {
        let decimals: String = format!("{fraction:03}");
        out.push(',');
        out.push_str(decimals.trim_end_matches('0'));
    }
    out
}

/// Formats a count with `.` thousands separators.
#[must_use]
pub fn format_count(value: u64) -> String {
    group_digits(&value.to_string())
}

fn group_digits(digits: &str) -> String {
    let mut out: String = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push('.');
        }
        out.push(digit);
    }
    out
}

/// Formats `value` in millions with one decimal (`12.3M`).
#[must_use]
pub fn format_millions(value: f64) -> String {
    format!("{:.1}M", value / 1_000_000.0)
}

/// Formats the local date of `instant` as `dd/mm/yyyy`.
#[must_use]
pub fn format_date(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%d/%m/%Y").to_string()
}

/// Formats the local time of `instant` as `HH:MM:SS dd/mm/yyyy`.
#[must_use]
pub fn format_datetime(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%H:%M:%S %d/%m/%Y").to_string()
}

/// Human-readable label for a trip status.
#[must_use]
pub const fn status_label(status: TripStatus) -> &'static str {
    match status {
        TripStatus::Started => "Started",
        TripStatus::InTransit => "In transit",
        TripStatus::Completed => "Completed",
        TripStatus::Cancelled => "Cancelled",
    }
}

/// Escapes text for inclusion in HTML element content or attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out: String = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Escapes the entity markers of Telegram's legacy `Markdown` parse mode.
#[must_use]
pub fn escape_markdown(text: &str) -> String {
    let mut out: String = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '_' | '*' | '`' | '[') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
