// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Report aggregation.
//!
//! A report is derived on demand from the trips whose start time falls in
//! a window. It is never persisted and never mutated after construction.
//!
//! ## Invariants
//!
//! - `total_products` sums line-item quantities of the trips passed in.
//!   Trips loaded back from the store carry no line items, so callers that
//!   need an accurate figure must supply fully populated trips.
//! - `average_cost_per_km` is 0 when `total_distance` is 0.

use crate::error::DomainError;
use crate::report_window::ReportWindow;
use crate::scoring::{PerformanceScorer, measure_performance};
use crate::types::Trip;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Aggregation window label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportPeriod {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl ReportPeriod {
    /// Returns the string representation of the period.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }
}

impl FromStr for ReportPeriod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(DomainError::InvalidReportPeriod(s.to_string())),
        }
    }
}

impl std::fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Totals over the trips in a report window.
///
/// `total_products` is the line-item quantity sum as computed by
/// [`summarize`]. Reports built from stored trips replace it with the
/// stored per-trip unit totals, because trips read back from the store
/// carry no line items; in that case it does not equal the sum over
/// `Report::trips`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_trips: usize,
    pub total_products: u64,
    pub total_cost: f64,
    pub total_distance: f64,
    pub average_cost_per_km: f64,
}

/// Performance percentages for a report window.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Performance {
    pub on_time_delivery: f64,
    pub cost_efficiency: f64,
    pub fuel_efficiency: f64,
}

/// A derived report over one window.
///
/// See [`Summary`] for how `total_products` relates to `trips`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub period: ReportPeriod,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub summary: Summary,
    #[serde(default)]
    pub trips: Vec<Trip>,
    #[serde(default)]
    pub performance: Performance,
}

/// Computes the summary totals for a set of trips.
#[must_use]
pub fn summarize(trips: &[Trip]) -> Summary {
    let total_cost: f64 = trips.iter().map(|t| t.cost).sum();
    let total_distance: f64 = trips.iter().map(|t| t.distance).sum();
    let average_cost_per_km: f64 = if total_distance > 0.0 {
        total_cost / total_distance
    } else {
        0.0
    };

    Summary {
        total_trips: trips.len(),
        total_products: trips.iter().map(Trip::product_units).sum(),
        total_cost,
        total_distance,
        average_cost_per_km,
    }
}

/// Builds a report for `trips` over `window`.
///
/// The trips are taken as given; callers obtain them by querying the store
/// for the same window.
#[must_use]
pub fn build_report(
    period: ReportPeriod,
    window: ReportWindow,
    trips: Vec<Trip>,
    scorer: &dyn PerformanceScorer,
) -> Report {
    let summary: Summary = summarize(&trips);
    let performance: Performance = measure_performance(&trips, scorer);

    Report {
        period,
        start_date: window.start,
        end_date: window.end,
        summary,
        trips,
        performance,
    }
}
