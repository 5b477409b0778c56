// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_product, create_test_start_time, create_test_trip};
use crate::{
    BaselineScorer, PerformanceScorer, Report, ReportPeriod, ReportWindow, Trip, TripStatus,
    build_report, measure_performance, summarize,
};
use chrono::Duration;

/// Scorer that only counts trips with an even-length id as on time.
struct EvenIdScorer;

impl PerformanceScorer for EvenIdScorer {
    fn is_on_time(&self, trip: &Trip) -> bool {
        trip.id.len() % 2 == 0
    }

    fn cost_efficiency(&self, _trips: &[Trip]) -> f64 {
        50.0
    }

    fn fuel_efficiency(&self, _trips: &[Trip]) -> f64 {
        60.0
    }
}

fn create_test_window() -> ReportWindow {
    let start = create_test_start_time() - Duration::hours(3);
    ReportWindow::new(start, start + Duration::days(1) - Duration::milliseconds(1))
}

#[test]
fn test_summary_for_single_completed_trip() {
    let mut trip: Trip = create_test_trip("t1", TripStatus::Completed);
    trip.products = vec![create_test_product(3), create_test_product(2)];
    trip.cost = 1_000_000.0;
    trip.distance = 100.0;

    let report: Report = build_report(
        ReportPeriod::Daily,
        create_test_window(),
        vec![trip],
        &BaselineScorer::default(),
    );

    assert_eq!(report.summary.total_trips, 1);
    assert_eq!(report.summary.total_products, 5);
    assert!((report.summary.average_cost_per_km - 10_000.0).abs() < f64::EPSILON);
    assert!((report.performance.on_time_delivery - 100.0).abs() < f64::EPSILON);
}

#[test]
fn test_zero_trips_yield_all_zero_summary() {
    let report: Report = build_report(
        ReportPeriod::Weekly,
        create_test_window(),
        Vec::new(),
        &BaselineScorer::default(),
    );

    assert_eq!(report.summary.total_trips, 0);
    assert_eq!(report.summary.total_products, 0);
    assert!(report.summary.total_cost.abs() < f64::EPSILON);
    assert!(report.summary.total_distance.abs() < f64::EPSILON);
    assert!(report.summary.average_cost_per_km.abs() < f64::EPSILON);
    assert!(report.performance.on_time_delivery.abs() < f64::EPSILON);
    assert!(report.trips.is_empty());
}

#[test]
fn test_average_cost_is_zero_without_distance() {
    let mut trip: Trip = create_test_trip("t2", TripStatus::Started);
    trip.cost = 500_000.0;

    let summary = summarize(&[trip]);

    assert!((summary.total_cost - 500_000.0).abs() < f64::EPSILON);
    assert!(summary.average_cost_per_km.abs() < f64::EPSILON);
}

#[test]
fn test_average_cost_matches_ratio_of_totals() {
    let costs: [(f64, f64); 3] = [(120_000.0, 12.0), (300_000.0, 48.5), (0.0, 7.25)];
    let trips: Vec<Trip> = costs
        .iter()
        .enumerate()
        .map(|(i, (cost, distance))| {
            let mut trip: Trip = create_test_trip(&format!("t{i}"), TripStatus::InTransit);
            trip.cost = *cost;
            trip.distance = *distance;
            trip
        })
        .collect();

    let summary = summarize(&trips);

    let expected: f64 = 420_000.0 / 67.75;
    assert!((summary.average_cost_per_km - expected).abs() < 1e-9);
}

#[test]
fn test_total_products_sums_all_line_items() {
    let mut first: Trip = create_test_trip("a", TripStatus::Started);
    first.products = vec![create_test_product(4)];
    let mut second: Trip = create_test_trip("b", TripStatus::Cancelled);
    second.products = vec![create_test_product(1), create_test_product(6)];
    let third: Trip = create_test_trip("c", TripStatus::Completed);

    let summary = summarize(&[first, second, third]);

    assert_eq!(summary.total_products, 11);
}

#[test]
fn test_on_time_is_zero_without_completed_trips() {
    let trips: Vec<Trip> = vec![
        create_test_trip("a", TripStatus::Started),
        create_test_trip("b", TripStatus::InTransit),
    ];

    let performance = measure_performance(&trips, &BaselineScorer::default());

    assert!(performance.on_time_delivery.abs() < f64::EPSILON);
    assert!((performance.cost_efficiency - 88.0).abs() < f64::EPSILON);
    assert!((performance.fuel_efficiency - 92.0).abs() < f64::EPSILON);
}

#[test]
fn test_on_time_uses_scorer_predicate_over_completed_trips() {
    let trips: Vec<Trip> = vec![
        create_test_trip("ab", TripStatus::Completed),
        create_test_trip("abc", TripStatus::Completed),
        create_test_trip("abcd", TripStatus::Completed),
        create_test_trip("abcdef", TripStatus::Completed),
        // Not completed, so ignored even though the predicate would accept it.
        create_test_trip("xy", TripStatus::InTransit),
    ];

    let performance = measure_performance(&trips, &EvenIdScorer);

    assert!((performance.on_time_delivery - 75.0).abs() < f64::EPSILON);
    assert!((performance.cost_efficiency - 50.0).abs() < f64::EPSILON);
    assert!((performance.fuel_efficiency - 60.0).abs() < f64::EPSILON);
}

#[test]
fn test_baseline_scorer_constants_are_configurable() {
    let scorer: BaselineScorer = BaselineScorer::new(70.0, 81.5);

    let performance = measure_performance(&[], &scorer);

    assert!((performance.cost_efficiency - 70.0).abs() < f64::EPSILON);
    assert!((performance.fuel_efficiency - 81.5).abs() < f64::EPSILON);
}

#[test]
fn test_report_carries_window_bounds() {
    let window: ReportWindow = create_test_window();

    let report: Report = build_report(
        ReportPeriod::Monthly,
        window,
        Vec::new(),
        &BaselineScorer::default(),
    );

    assert_eq!(report.period, ReportPeriod::Monthly);
    assert_eq!(report.start_date, window.start);
    assert_eq!(report.end_date, window.end);
}

#[test]
fn test_report_serializes_camel_case() {
    let report: Report = build_report(
        ReportPeriod::Daily,
        create_test_window(),
        Vec::new(),
        &BaselineScorer::default(),
    );

    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["period"], "daily");
    assert!(json["summary"]["averageCostPerKm"].is_number());
    assert!(json["performance"]["onTimeDelivery"].is_number());
    assert!(json["startDate"].is_string());
}

#[test]
fn test_report_period_parses_known_labels() {
    for label in ["daily", "weekly", "monthly", "quarterly", "yearly"] {
        let period: ReportPeriod = label.parse().unwrap();
        assert_eq!(period.as_str(), label);
    }
    assert!("hourly".parse::<ReportPeriod>().is_err());
}
