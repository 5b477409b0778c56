// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{Duration, TimeZone, Utc};
use fleetdash_domain::TripStatus;
use fleetdash_persistence::TripRow;

use super::helpers::{
    RecordingMail, create_harness_with_mail, create_test_harness, create_test_now,
    create_test_payload, create_unconfigured_services,
};
use crate::error::ApiError;
use crate::handlers::{list_trips, log_trip};
use crate::request_response::{ListTripsQuery, TripPayload};

fn query(start: &str, end: &str) -> ListTripsQuery {
    ListTripsQuery {
        start_date: Some(start.to_string()),
        end_date: Some(end.to_string()),
    }
}

#[tokio::test]
async fn test_started_trip_is_logged_without_notifications() {
    let harness = create_test_harness();

    let response = log_trip(
        &harness.services,
        create_test_payload("T-1", "started"),
        create_test_now(),
    )
    .await
    .unwrap();

    assert_eq!(response.trip_id, "T-1");
    assert_eq!(response.status, TripStatus::Started);
    assert!(response.logged);
    assert!(!response.notifications_sent);
    assert!(harness.mail.sent().is_empty());
    assert!(harness.bot.messages().is_empty());

    let row: TripRow = harness.services.trip_store.find_latest("T-1").await.unwrap();
    assert_eq!(row.total_product_units, 5);
    assert!(row.trip.products.is_empty());
}

#[tokio::test]
async fn test_completed_trip_notifies_mail_and_chat() {
    let harness = create_test_harness();
    let mut payload: TripPayload = create_test_payload("T-2", "completed");
    payload.end_time = Some(create_test_now() + Duration::hours(3));

    let response = log_trip(&harness.services, payload, create_test_now())
        .await
        .unwrap();

    assert!(response.notifications_sent);
    let mails = harness.mail.sent();
    assert_eq!(mails.len(), 1);
    assert_eq!(mails[0].subject, "✅ Trip T-2 completed");
    let messages = harness.bot.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].text.contains("TRIP COMPLETED"));
}

#[tokio::test]
async fn test_one_delivered_channel_counts_as_notified() {
    let harness = create_harness_with_mail(RecordingMail::failing());

    let response = log_trip(
        &harness.services,
        create_test_payload("T-3", "completed"),
        create_test_now(),
    )
    .await
    .unwrap();

    assert!(response.notifications_sent);
    assert_eq!(harness.bot.messages().len(), 1);
}

#[tokio::test]
async fn test_missing_identifier_is_rejected() {
    let harness = create_test_harness();
    let mut payload: TripPayload = create_test_payload("T-4", "started");
    payload.driver_name = Some(String::from("  "));

    let err = log_trip(&harness.services, payload, create_test_now())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::InvalidInput {
            field: String::from("driverName"),
            message: String::from("Missing required fields"),
        }
    );
    assert!(harness.services.trip_store.find_latest("T-4").await.is_none());
}

#[tokio::test]
async fn test_unknown_status_is_rejected() {
    let harness = create_test_harness();

    let err = log_trip(
        &harness.services,
        create_test_payload("T-5", "delivered"),
        create_test_now(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "status"));
}

#[tokio::test]
async fn test_end_before_start_is_rejected() {
    let harness = create_test_harness();
    let mut payload: TripPayload = create_test_payload("T-6", "completed");
    payload.end_time = Some(create_test_now() - Duration::minutes(1));

    let err = log_trip(&harness.services, payload, create_test_now())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "endTime"));
}

#[tokio::test]
async fn test_defaults_are_filled() {
    let harness = create_test_harness();
    let payload: TripPayload = TripPayload {
        id: Some(String::from("T-7")),
        vehicle_id: Some(String::from("51C-999.99")),
        driver_name: Some(String::from("Tran Thi B")),
        products: Some(vec![super::helpers::create_test_product(5)]),
        ..TripPayload::default()
    };

    log_trip(&harness.services, payload, create_test_now())
        .await
        .unwrap();

    let row: TripRow = harness.services.trip_store.find_latest("T-7").await.unwrap();
    assert_eq!(row.trip.status, TripStatus::Started);
    assert_eq!(row.trip.start_time, create_test_now());
    assert!((row.trip.distance - 0.0).abs() < f64::EPSILON);
    // 5 x 0.2 m3 at 300.000 VND per m3
    assert!((row.trip.cost - 300_000.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_unpersisted_trip_is_an_internal_error() {
    let services = create_unconfigured_services();

    let err = log_trip(
        &services,
        create_test_payload("T-8", "completed"),
        create_test_now(),
    )
    .await
    .unwrap_err();

    assert_eq!(
        err,
        ApiError::Internal {
            message: String::from("Failed to log trip"),
        }
    );
}

#[tokio::test]
async fn test_list_requires_both_dates() {
    let harness = create_test_harness();

    let err = list_trips(
        &harness.services,
        ListTripsQuery {
            start_date: Some(String::from("2026-10-17")),
            end_date: None,
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.message(), "Start date and end date are required");
}

#[tokio::test]
async fn test_list_rejects_unparseable_and_reversed_dates() {
    let harness = create_test_harness();

    let err = list_trips(&harness.services, query("17/10/2026", "2026-10-18"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "startDate"));

    let err = list_trips(&harness.services, query("2026-10-18", "2026-10-17"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "endDate"));
}

#[tokio::test]
async fn test_bare_dates_cover_whole_local_days() {
    let harness = create_test_harness();
    // 23:30 local on the 17th
    let late: chrono::DateTime<Utc> = Utc.with_ymd_and_hms(2026, 10, 17, 16, 30, 0).unwrap();
    // 00:30 local on the 18th
    let next_day: chrono::DateTime<Utc> = Utc.with_ymd_and_hms(2026, 10, 17, 17, 30, 0).unwrap();

    for (id, start) in [("T-A", late), ("T-B", next_day)] {
        let mut payload: TripPayload = create_test_payload(id, "started");
        payload.start_time = Some(start);
        log_trip(&harness.services, payload, create_test_now())
            .await
            .unwrap();
    }

    let response = list_trips(&harness.services, query("2026-10-17", "2026-10-17"))
        .await
        .unwrap();

    assert_eq!(response.trips.len(), 1);
    assert_eq!(response.trips[0].id, "T-A");
    assert_eq!(
        response.period.start_date,
        Utc.with_ymd_and_hms(2026, 10, 16, 17, 0, 0).unwrap()
    );
}

#[tokio::test]
async fn test_list_accepts_rfc3339_and_buckets_statuses() {
    let harness = create_test_harness();
    for (id, status) in [
        ("T-1", "started"),
        ("T-2", "in_transit"),
        ("T-3", "completed"),
        ("T-4", "completed"),
        ("T-5", "cancelled"),
    ] {
        log_trip(
            &harness.services,
            create_test_payload(id, status),
            create_test_now(),
        )
        .await
        .unwrap();
    }

    let response = list_trips(
        &harness.services,
        query("2026-10-17T00:00:00Z", "2026-10-17T23:59:59Z"),
    )
    .await
    .unwrap();

    let summary = response.summary;
    assert_eq!(summary.total, 5);
    assert_eq!(summary.started, 1);
    assert_eq!(summary.in_transit, 1);
    assert_eq!(summary.completed, 2);
    assert_eq!(summary.cancelled, 1);
    assert!((summary.total_cost - 5_000_000.0).abs() < f64::EPSILON);
    assert!((summary.total_distance - 500.0).abs() < f64::EPSILON);
}
