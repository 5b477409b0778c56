// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Performance scoring for reports.
//!
//! On-time delivery is measured over completed trips using a pluggable
//! predicate. Cost and fuel efficiency need a historical baseline that the
//! store does not yet record, so the default scorer reports configured
//! constants for them.

use crate::report::Performance;
use crate::types::Trip;
use num_traits::ToPrimitive;

/// Scoring functions used to derive the performance block of a report.
pub trait PerformanceScorer: Send + Sync {
    /// Whether a completed trip counts as delivered on time.
    fn is_on_time(&self, trip: &Trip) -> bool;

    /// Cost efficiency percentage for the trips in a window.
    fn cost_efficiency(&self, trips: &[Trip]) -> f64;

    /// Fuel efficiency percentage for the trips in a window.
    fn fuel_efficiency(&self, trips: &[Trip]) -> f64;
}

/// Scorer that treats every completed trip as on time and reports fixed
/// efficiency baselines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaselineScorer {
    cost_efficiency: f64,
    fuel_efficiency: f64,
}

impl BaselineScorer {
    /// Creates a scorer reporting the given efficiency percentages.
    #[must_use]
    pub const fn new(cost_efficiency: f64, fuel_efficiency: f64) -> Self {
        Self {
            cost_efficiency,
            fuel_efficiency,
        }
    }
}

impl Default for BaselineScorer {
    fn default() -> Self {
        Self::new(88.0, 92.0)
    }
}

impl PerformanceScorer for BaselineScorer {
    fn is_on_time(&self, _trip: &Trip) -> bool {
        true
    }

    fn cost_efficiency(&self, _trips: &[Trip]) -> f64 {
        self.cost_efficiency
    }

    fn fuel_efficiency(&self, _trips: &[Trip]) -> f64 {
        self.fuel_efficiency
    }
}

/// Computes the performance block for a set of trips.
///
/// `on_time_delivery` is `100 * on_time / completed`, or 0 when no trip in
/// the set is completed.
#[must_use]
pub fn measure_performance(trips: &[Trip], scorer: &dyn PerformanceScorer) -> Performance {
    let completed: Vec<&Trip> = trips.iter().filter(|t| t.is_completed()).collect();
    let on_time: usize = completed.iter().filter(|t| scorer.is_on_time(t)).count();

    let on_time_delivery: f64 = if completed.is_empty() {
        0.0
    } else {
        let on_time: f64 = on_time.to_f64().unwrap_or_default();
        let completed: f64 = completed.len().to_f64().unwrap_or_default();
        on_time / completed * 100.0
    };

    Performance {
        on_time_delivery,
        cost_efficiency: scorer.cost_efficiency(trips),
        fuel_efficiency: scorer.fuel_efficiency(trips),
    }
}
