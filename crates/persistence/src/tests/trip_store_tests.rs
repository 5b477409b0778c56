// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

use chrono::Duration;
use fleetdash_domain::{Trip, TripStatus};

use super::{FailingBackend, create_test_backend, create_test_start_time, create_test_trip};
use crate::{TRIPS_RANGE, TripRow, TripStore};

#[tokio::test]
async fn test_append_then_query_keeps_scalars_and_drops_products() {
    let store: TripStore = TripStore::new(create_test_backend());
    let mut trip: Trip = create_test_trip("t1", TripStatus::Completed, create_test_start_time());
    trip.end_time = Some(trip.start_time + Duration::hours(4));

    assert!(store.append(&trip).await);

    let start = trip.start_time - Duration::hours(1);
    let end = trip.start_time + Duration::hours(1);
    let trips: Vec<Trip> = store.query(start, end).await;

    assert_eq!(trips.len(), 1);
    let loaded: &Trip = &trips[0];
    assert_eq!(loaded.id, trip.id);
    assert_eq!(loaded.vehicle_id, trip.vehicle_id);
    assert_eq!(loaded.driver_name, trip.driver_name);
    assert_eq!(loaded.route, trip.route);
    assert_eq!(loaded.status, trip.status);
    assert!((loaded.cost - trip.cost).abs() < f64::EPSILON);
    assert!((loaded.distance - trip.distance).abs() < f64::EPSILON);
    assert_eq!(loaded.start_time, trip.start_time);
    assert_eq!(loaded.end_time, trip.end_time);
    assert_eq!(loaded.notes, trip.notes);
    // Line items are not persisted.
    assert!(!trip.products.is_empty());
    assert!(loaded.products.is_empty());
}

#[tokio::test]
async fn test_row_keeps_product_unit_total() {
    let store: TripStore = TripStore::new(create_test_backend());
    let trip: Trip = create_test_trip("t1", TripStatus::Started, create_test_start_time());
    assert!(store.append(&trip).await);

    let rows: Vec<TripRow> = store
        .query_rows(trip.start_time, trip.start_time)
        .await;

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].total_product_units, 5);
    assert!(rows[0].logged_at.is_some());
}

#[tokio::test]
async fn test_query_includes_start_and_excludes_after_end() {
    let store: TripStore = TripStore::new(create_test_backend());
    let start = create_test_start_time();
    let end = start + Duration::days(1) - Duration::milliseconds(1);

    let at_start: Trip = create_test_trip("at-start", TripStatus::Started, start);
    let at_end: Trip = create_test_trip("at-end", TripStatus::Started, end);
    let after_end: Trip = create_test_trip(
        "after-end",
        TripStatus::Started,
        end + Duration::milliseconds(1),
    );
    let before_start: Trip = create_test_trip(
        "before-start",
        TripStatus::Started,
        start - Duration::milliseconds(1),
    );
    for trip in [&at_start, &at_end, &after_end, &before_start] {
        assert!(store.append(trip).await);
    }

    let ids: Vec<String> = store
        .query(start, end)
        .await
        .into_iter()
        .map(|t| t.id)
        .collect();

    assert_eq!(ids, vec![String::from("at-start"), String::from("at-end")]);
}

#[tokio::test]
async fn test_query_preserves_store_order() {
    let store: TripStore = TripStore::new(create_test_backend());
    let base = create_test_start_time();
    let late: Trip = create_test_trip("late", TripStatus::Started, base + Duration::hours(2));
    let early: Trip = create_test_trip("early", TripStatus::Started, base);
    assert!(store.append(&late).await);
    assert!(store.append(&early).await);

    let ids: Vec<String> = store
        .query(base, base + Duration::hours(3))
        .await
        .into_iter()
        .map(|t| t.id)
        .collect();

    assert_eq!(ids, vec![String::from("late"), String::from("early")]);
}

#[tokio::test]
async fn test_unreadable_rows_are_skipped() {
    let backend = create_test_backend();
    let store: TripStore = TripStore::new(Arc::clone(&backend));
    let trip: Trip = create_test_trip("good", TripStatus::Started, create_test_start_time());
    assert!(store.append(&trip).await);

    let mut bad_status: Vec<String> = TripRow::from_trip(&trip, trip.start_time).to_cells();
    bad_status[1] = String::from("bad-status");
    bad_status[5] = String::from("lost");
    let mut bad_start: Vec<String> = TripRow::from_trip(&trip, trip.start_time).to_cells();
    bad_start[1] = String::from("bad-start");
    bad_start[9] = String::from("yesterday");
    backend
        .append_rows(TRIPS_RANGE, vec![bad_status, bad_start])
        .await
        .unwrap();

    let trips: Vec<Trip> = store
        .query(trip.start_time, trip.start_time)
        .await;

    assert_eq!(trips.len(), 1);
    assert_eq!(trips[0].id, "good");
}

#[tokio::test]
async fn test_find_latest_returns_last_appended_row() {
    let store: TripStore = TripStore::new(create_test_backend());
    let start = create_test_start_time();
    assert!(store.append(&create_test_trip("t1", TripStatus::Started, start)).await);
    assert!(store.append(&create_test_trip("t2", TripStatus::Started, start)).await);
    assert!(store.append(&create_test_trip("t1", TripStatus::InTransit, start)).await);

    let latest: TripRow = store.find_latest("t1").await.unwrap();

    assert_eq!(latest.trip.status, TripStatus::InTransit);
    assert!(store.find_latest("missing").await.is_none());
}

#[tokio::test]
async fn test_adapter_does_not_enforce_lifecycle() {
    let store: TripStore = TripStore::new(create_test_backend());
    let start = create_test_start_time();
    assert!(store.append(&create_test_trip("t1", TripStatus::Completed, start)).await);

    assert!(store.append(&create_test_trip("t1", TripStatus::Started, start)).await);

    let latest: TripRow = store.find_latest("t1").await.unwrap();
    assert_eq!(latest.trip.status, TripStatus::Started);
}

#[tokio::test]
async fn test_create_monthly_sheet_once() {
    let store: TripStore = TripStore::new(create_test_backend());

    assert!(store.create_monthly_sheet(2026, 3).await);
    assert!(!store.create_monthly_sheet(2026, 3).await);
}

#[tokio::test]
async fn test_unconfigured_store_degrades() {
    let store: TripStore = TripStore::unconfigured();
    let trip: Trip = create_test_trip("t1", TripStatus::Started, create_test_start_time());

    assert!(!store.is_configured());
    assert!(store.backend_name().is_none());
    assert!(!store.append(&trip).await);
    assert!(store.query(trip.start_time, trip.start_time).await.is_empty());
    assert!(store.find_latest("t1").await.is_none());
    assert!(!store.create_monthly_sheet(2026, 1).await);
}

#[tokio::test]
async fn test_backend_failure_degrades() {
    let store: TripStore = TripStore::new(Arc::new(FailingBackend));
    let trip: Trip = create_test_trip("t1", TripStatus::Started, create_test_start_time());

    assert!(store.is_configured());
    assert!(!store.append(&trip).await);
    assert!(store.query(trip.start_time, trip.start_time).await.is_empty());
    assert!(store.find_latest("t1").await.is_none());
}

#[tokio::test]
async fn test_try_find_latest_reports_read_failure() {
    let failing: TripStore = TripStore::new(Arc::new(FailingBackend));
    assert!(failing.try_find_latest("t1").await.is_err());

    let unconfigured: TripStore = TripStore::unconfigured();
    assert!(unconfigured.try_find_latest("t1").await.unwrap().is_none());
}
