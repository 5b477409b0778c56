// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain model for the fleetdash logistics dashboard.
//!
//! This crate owns the trip record, its lifecycle rules, and the pure
//! reporting computations derived from collections of trips. It performs
//! no I/O.

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

mod config;
mod error;
mod estimate;
mod report;
mod report_window;
mod scoring;
mod trip_status;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use config::{
    CarrierCapacity, CarrierContact, CarrierInfo, CarrierKind, Carriers, ConfigEntry,
    CostSettings, DashboardConfig, EmailSchedules, EmailService, EmailSettings,
    NotificationSettings, SizeConfig, SizeTable, TelegramSettings, TelegramToggles,
};
pub use error::DomainError;
pub use estimate::{
    COST_PER_CUBIC_METER, HEAVY_LOAD_FACTOR, HEAVY_LOAD_THRESHOLD_KG, estimate_cost,
    total_units, total_volume_cbm, total_weight,
};
pub use report::{Performance, Report, ReportPeriod, Summary, build_report, summarize};
pub use report_window::{ReportWindow, parse_timezone, report_window};
pub use scoring::{BaselineScorer, PerformanceScorer, measure_performance};
pub use trip_status::TripStatus;
pub use types::{Brand, Dimensions, PackageType, Product, ProductSize, Trip};
pub use validation::{TripWarning, validate_required_fields, validate_trip};
