// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use fleetdash_domain::DomainError;

/// API-level errors.
///
/// These are distinct from domain errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The caller could not be authenticated.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A backend the operation needs is unconfigured or unreachable.
    ServiceUnavailable {
        /// The backend that could not be used.
        service: String,
        /// A human-readable description of the failure.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// The message shown to HTTP callers.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::AuthenticationFailed { reason } => reason,
            Self::DomainRuleViolation { message, .. }
            | Self::InvalidInput { message, .. }
            | Self::ServiceUnavailable { message, .. }
            | Self::Internal { message } => message,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ServiceUnavailable { service, message } => {
                write!(f, "Service '{service}' unavailable: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::MissingField(field) => ApiError::InvalidInput {
            field: field.to_string(),
            message: String::from("Missing required fields"),
        },
        DomainError::InvalidTripStatus { status } => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown trip status '{status}'"),
        },
        DomainError::InvalidStatusTransition { from, to, reason } => {
            ApiError::DomainRuleViolation {
                rule: String::from("trip_lifecycle"),
                message: format!("Cannot move trip from {from} to {to}: {reason}"),
            }
        }
        DomainError::InvalidAmount { field, value } => ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("{field} must be a non-negative number, got {value}"),
        },
        DomainError::EndBeforeStart { start, end } => ApiError::InvalidInput {
            field: String::from("endTime"),
            message: format!("End time {end} is before start time {start}"),
        },
        DomainError::InvalidProduct { index, reason } => ApiError::InvalidInput {
            field: format!("products[{index}]"),
            message: format!("Invalid product at position {index}: {reason}"),
        },
        DomainError::InvalidReportPeriod(period) => ApiError::InvalidInput {
            field: String::from("period"),
            message: format!("Unknown report period '{period}'"),
        },
        DomainError::InvalidTimezone(name) => ApiError::Internal {
            message: format!("Reporting timezone '{name}' is not valid"),
        },
        DomainError::DateArithmeticOverflow { operation } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Date arithmetic overflow while {operation}"),
        },
        DomainError::UnknownConfigKey(key) => ApiError::InvalidInput {
            field: key.clone(),
            message: format!("Unknown configuration key '{key}'"),
        },
        DomainError::InvalidConfigValue { key, value, reason } => ApiError::InvalidInput {
            field: key.clone(),
            message: format!("Invalid value '{value}' for '{key}': {reason}"),
        },
    }
}
