// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The trip store adapter.
//!
//! Public operations other than `try_find_latest` never return errors. An
//! unconfigured store logs a warning and degrades (`false` / empty); a
//! backend failure logs an error and degrades the same way.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use fleetdash_domain::Trip;
use tracing::{debug, error, info, warn};

use crate::error::PersistenceError;
use crate::tabular::{Row, TabularStore};
use crate::trip_rows::{TRIPS_RANGE, TripRow, trip_header_row};

/// Trip persistence over an optional tabular backend.
#[derive(Clone, Default)]
pub struct TripStore {
    backend: Option<Arc<dyn TabularStore>>,
}

impl TripStore {
    /// Creates a store writing to `backend`.
    #[must_use]
    pub fn new(backend: Arc<dyn TabularStore>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Creates a store with no backend; every operation is a no-op.
    #[must_use]
    pub const fn unconfigured() -> Self {
        Self { backend: None }
    }

    /// Returns true if a backend is attached.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    /// Name of the attached backend, if any.
    #[must_use]
    pub fn backend_name(&self) -> Option<&'static str> {
        self.backend.as_ref().map(|b| b.backend_name())
    }

    /// Appends `trip` as one row of the trip log.
    ///
    /// Returns `false` when the store is unconfigured or the backend
    /// fails; nothing is persisted in that case.
    pub async fn append(&self, trip: &Trip) -> bool {
        let Some(backend) = &self.backend else {
            warn!(trip_id = %trip.id, "Trip store not configured, skipping trip logging");
            return false;
        };

        let row: TripRow = TripRow::from_trip(trip, Utc::now());
        match backend.append_rows(TRIPS_RANGE, vec![row.to_cells()]).await {
            Ok(()) => {
                info!(trip_id = %trip.id, status = %trip.status, "Logged trip");
                true
            }
            Err(e) => {
                error!(trip_id = %trip.id, error = %e, "Failed to log trip");
                false
            }
        }
    }

    /// Returns the stored rows whose start time lies in `[start, end]`,
    /// in store order.
    pub async fn query_rows(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<TripRow> {
        let Some(backend) = &self.backend else {
            warn!("Trip store not configured, returning no trips");
            return Vec::new();
        };

        match Self::load_rows(backend.as_ref()).await {
            Ok(rows) => rows
                .into_iter()
                .filter(|r| start <= r.trip.start_time && r.trip.start_time <= end)
                .collect(),
            Err(e) => {
                error!(error = %e, "Failed to read trips");
                Vec::new()
            }
        }
    }

    /// Returns the trips whose start time lies in `[start, end]`, in store
    /// order. Returned trips carry no line items.
    pub async fn query(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<Trip> {
        self.query_rows(start, end)
            .await
            .into_iter()
            .map(|r| r.trip)
            .collect()
    }

    /// Returns the most recently appended row for trip `id`.
    pub async fn find_latest(&self, id: &str) -> Option<TripRow> {
        match self.try_find_latest(id).await {
            Ok(row) => row,
            Err(e) => {
                error!(trip_id = id, error = %e, "Failed to look up trip");
                None
            }
        }
    }

    /// Like [`Self::find_latest`], but reports a backend read failure
    /// instead of treating it as "no such trip". An unconfigured store has
    /// no history and yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the trip log cannot be read.
    pub async fn try_find_latest(&self, id: &str) -> Result<Option<TripRow>, PersistenceError> {
        let Some(backend) = &self.backend else {
            warn!(trip_id = id, "Trip store not configured, cannot look up trip");
            return Ok(None);
        };

        let rows: Vec<TripRow> = Self::load_rows(backend.as_ref()).await?;
        Ok(rows.into_iter().rev().find(|r| r.trip.id == id))
    }

    /// Creates a `YYYY-MM` sheet headed like the trip log.
    pub async fn create_monthly_sheet(&self, year: i32, month: u32) -> bool {
        let Some(backend) = &self.backend else {
            warn!("Trip store not configured, skipping monthly sheet creation");
            return false;
        };

        let title: String = format!("{year}-{month:02}");
        match backend.add_sheet(&title, trip_header_row()).await {
            Ok(()) => {
                info!(sheet = %title, "Created monthly sheet");
                true
            }
            Err(e) => {
                error!(sheet = %title, error = %e, "Failed to create monthly sheet");
                false
            }
        }
    }

    /// Reads and decodes every data row, dropping rows that cannot be
    /// decoded.
    async fn load_rows(backend: &dyn TabularStore) -> Result<Vec<TripRow>, PersistenceError> {
        let rows: Vec<Row> = backend.read_rows(TRIPS_RANGE).await?;

        let decoded: Vec<TripRow> = rows
            .iter()
            .enumerate()
            .skip(1)
            .filter_map(|(index, cells)| match TripRow::from_cells(cells) {
                Ok(row) => Some(row),
                Err(e) => {
                    warn!(row = index + 1, error = %e, "Skipping unreadable trip row");
                    None
                }
            })
            .collect();

        debug!(rows = decoded.len(), "Loaded trip rows");
        Ok(decoded)
    }
}
