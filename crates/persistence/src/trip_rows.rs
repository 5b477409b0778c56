// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Positional row mapping for the `Trips` sheet.
//!
//! | Column | Content             |
//! |--------|---------------------|
//! | A      | append timestamp    |
//! | B      | trip id             |
//! | C      | vehicle id          |
//! | D      | driver name         |
//! | E      | route               |
//! | F      | status              |
//! | G      | total product units |
//! | H      | cost                |
//! | I      | distance            |
//! | J      | start time          |
//! | K      | end time            |
//! | L      | notes               |
//!
//! Line items have no column. A trip read back from a row always has an
//! empty product list; only the unit total survives, on `TripRow`.

use chrono::{DateTime, SecondsFormat, Utc};
use fleetdash_domain::{Trip, TripStatus};

use crate::error::PersistenceError;
use crate::tabular::Row;

/// The trip log range.
pub const TRIPS_RANGE: &str = "Trips!A:L";

/// Header cells of a trip sheet.
pub const TRIP_HEADERS: [&str; 12] = [
    "Timestamp",
    "Trip ID",
    "Vehicle ID",
    "Driver",
    "Route",
    "Status",
    "Products",
    "Cost",
    "Distance",
    "Start Time",
    "End Time",
    "Notes",
];

/// One stored trip row.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRow {
    /// When the row was appended.
    pub logged_at: Option<DateTime<Utc>>,
    /// The trip scalars. `products` is always empty.
    pub trip: Trip,
    /// Sum of line-item quantities at the time of logging.
    pub total_product_units: u64,
}

/// Formats an instant the way rows store it (`2026-10-17T03:00:00.000Z`).
#[must_use]
pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_instant(cell: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(cell.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn cell_at(cells: &[String], index: usize) -> &str {
    cells.get(index).map_or("", String::as_str)
}

fn parse_amount(cell: &str) -> f64 {
    cell.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

impl TripRow {
    /// Builds the row for `trip` logged at `logged_at`.
    #[must_use]
    pub fn from_trip(trip: &Trip, logged_at: DateTime<Utc>) -> Self {
        Self {
            logged_at: Some(logged_at),
            trip: Trip {
                products: Vec::new(),
                ..trip.clone()
            },
            total_product_units: trip.product_units(),
        }
    }

    /// Encodes the row as its 12 cells.
    #[must_use]
    pub fn to_cells(&self) -> Row {
        let trip: &Trip = &self.trip;
        vec![
            self.logged_at.map(format_instant).unwrap_or_default(),
            trip.id.clone(),
            trip.vehicle_id.clone(),
            trip.driver_name.clone(),
            trip.route.clone(),
            trip.status.as_str().to_string(),
            self.total_product_units.to_string(),
            trip.cost.to_string(),
            trip.distance.to_string(),
            format_instant(trip.start_time),
            trip.end_time.map(format_instant).unwrap_or_default(),
            trip.notes.clone().unwrap_or_default(),
        ]
    }

    /// Decodes a stored row.
    ///
    /// Missing trailing cells read as empty. Numeric cells that do not
    /// parse read as 0, and an empty or unparseable end time reads as
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the status is unknown or the start time does not
    /// parse, since such a row cannot be placed in a report window.
    pub fn from_cells(cells: &[String]) -> Result<Self, PersistenceError> {
        let cell = |index: usize| cell_at(cells, index);

        let status: TripStatus = cell(5)
            .parse()
            .map_err(|e: fleetdash_domain::DomainError| {
                PersistenceError::SerializationError(e.to_string())
            })?;
        let start_time: DateTime<Utc> = parse_instant(cell(9)).ok_or_else(|| {
            PersistenceError::SerializationError(format!("Invalid start time: '{}'", cell(9)))
        })?;
        let notes: Option<String> = Some(cell(11))
            .filter(|n| !n.is_empty())
            .map(String::from);

        Ok(Self {
            logged_at: parse_instant(cell(0)),
            trip: Trip {
                id: cell(1).to_string(),
                vehicle_id: cell(2).to_string(),
                driver_name: cell(3).to_string(),
                route: cell(4).to_string(),
                status,
                products: Vec::new(),
                cost: parse_amount(cell(7)),
                distance: parse_amount(cell(8)),
                fuel_consumption: 0.0,
                start_time,
                end_time: parse_instant(cell(10)),
                notes,
            },
            total_product_units: cell(6).trim().parse::<u64>().unwrap_or(0),
        })
    }
}

/// The header row of a trip sheet.
#[must_use]
pub fn trip_header_row() -> Row {
    TRIP_HEADERS.iter().map(|h| (*h).to_string()).collect()
}
