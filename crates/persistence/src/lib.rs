// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for fleetdash.
//!
//! Trips and dashboard configuration live in a single spreadsheet with two
//! sheets:
//!
//! - `Trips` - append-only trip log, 12 fixed columns (see `trip_rows`)
//! - `Config` - flattened `Key | Value | Description | Last Updated` rows
//!
//! ## Backends
//!
//! Both sheets are reached through the `TabularStore` trait:
//!
//! - **Google Sheets** - the production store, authenticated with a
//!   service account
//! - **`SQLite`** - a local mirror of the same layout, used for
//!   development, unit tests, and handler tests. In-memory instances are
//!   isolated per call.
//!
//! ## Failure policy
//!
//! `TripStore` and `ConfigStore` do not return errors to callers, apart from
//! `TripStore::try_find_latest`, which lets a caller tell a read failure
//! from a missing trip. Missing configuration degrades to a logged no-op;
//! backend failures are logged and reported as `false` or an empty result.
//! There are no retries.
//!
//! ## Lossy trip rows
//!
//! Product line items are not persisted. Trips read back from the store
//! always have an empty product list; the per-trip unit total is kept on
//! `TripRow`.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod backend;
mod config_store;
mod diesel_schema;
mod error;
mod tabular;
mod trip_rows;
mod trip_store;

#[cfg(test)]
mod tests;

pub use backend::service_account::ServiceAccount;
pub use backend::sheets::SheetsTabularStore;
pub use backend::sqlite::SqliteTabularStore;
pub use config_store::{CONFIG_HEADERS, CONFIG_RANGE, ConfigStore};
pub use error::PersistenceError;
pub use tabular::{Row, TabularStore, sheet_name};
pub use trip_rows::{TRIP_HEADERS, TRIPS_RANGE, TripRow, format_instant, trip_header_row};
pub use trip_store::TripStore;
