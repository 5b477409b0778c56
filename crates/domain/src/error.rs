// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{DateTime, Utc};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A required trip field is absent or blank.
    MissingField(&'static str),
    /// A status string does not name a known trip status.
    InvalidTripStatus {
        /// The rejected status string.
        status: String,
    },
    /// A status transition is not permitted by the trip lifecycle.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition was rejected.
        reason: String,
    },
    /// A monetary or distance amount is negative or not finite.
    InvalidAmount {
        /// The field holding the amount.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The trip ends before it starts.
    EndBeforeStart {
        /// The trip start time.
        start: DateTime<Utc>,
        /// The trip end time.
        end: DateTime<Utc>,
    },
    /// A line item is malformed.
    InvalidProduct {
        /// Zero-based position of the line item within the trip.
        index: usize,
        /// Description of the problem.
        reason: String,
    },
    /// A report period label is not recognised.
    InvalidReportPeriod(String),
    /// A timezone name is not a valid IANA identifier.
    InvalidTimezone(String),
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// A configuration key is not part of the dashboard schema.
    UnknownConfigKey(String),
    /// A configuration value could not be parsed for its key.
    InvalidConfigValue {
        /// The flattened configuration key.
        key: String,
        /// The rejected raw value.
        value: String,
        /// The parsing error message.
        reason: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "Missing required field: {field}"),
            Self::InvalidTripStatus { status } => {
                write!(f, "Invalid trip status: '{status}'")
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Invalid status transition from {from} to {to}: {reason}")
            }
            Self::InvalidAmount { field, value } => {
                write!(f, "Invalid {field}: {value} (must be a non-negative number)")
            }
            Self::EndBeforeStart { start, end } => {
                write!(
                    f,
                    "Trip end time {} is before its start time {}",
                    end.to_rfc3339(),
                    start.to_rfc3339()
                )
            }
            Self::InvalidProduct { index, reason } => {
                write!(f, "Invalid product at position {index}: {reason}")
            }
            Self::InvalidReportPeriod(period) => write!(f, "Invalid report period: '{period}'"),
            Self::InvalidTimezone(tz) => write!(f, "Invalid timezone: '{tz}'"),
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::UnknownConfigKey(key) => write!(f, "Unknown configuration key: '{key}'"),
            Self::InvalidConfigValue { key, value, reason } => {
                write!(f, "Invalid value '{value}' for configuration key '{key}': {reason}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
