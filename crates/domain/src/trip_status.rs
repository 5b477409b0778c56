// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Trip status states and lifecycle transitions.
//!
//! ```text
//! started ──► in_transit ──► completed
//!    │             │
//!    └─────────────┴──────► cancelled
//! ```
//!
//! `completed` and `cancelled` are terminal. Status is asserted by the
//! caller; nothing in the store enforces these rules. Callers that want
//! lifecycle correctness check `validate_transition` before persisting.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle state of a vehicle trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    /// The trip has been dispatched. Initial state.
    Started,
    /// The vehicle is on the road.
    InTransit,
    /// The cargo was delivered.
    Completed,
    /// The trip was abandoned.
    Cancelled,
}

impl TripStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Started,
        Self::InTransit,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::InTransit => "in_transit",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s.trim() {
            "started" => Ok(Self::Started),
            "in_transit" => Ok(Self::InTransit),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidTripStatus {
                status: s.to_string(),
            }),
        }
    }

    /// Returns true if no further transition is possible from this status.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Validates a transition from this status to `new_status`.
    ///
    /// Resubmitting the current status is accepted so that a client
    /// retrying the same update is not rejected.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` when the lifecycle
    /// does not permit the move, including any move out of a terminal state.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if *self == new_status {
            return Ok(());
        }

        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: String::from("cannot transition from terminal state"),
            });
        }

        let valid: bool = match self {
            Self::Started => matches!(new_status, Self::InTransit | Self::Cancelled),
            Self::InTransit => matches!(new_status, Self::Completed | Self::Cancelled),
            Self::Completed | Self::Cancelled => false,
        };

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: String::from("transition not permitted by trip lifecycle rules"),
            })
        }
    }
}

impl FromStr for TripStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for TripStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
