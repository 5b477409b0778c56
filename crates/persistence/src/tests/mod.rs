// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod sqlite_tests;
mod trip_store_tests;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use fleetdash_domain::{
    Brand, Dimensions, PackageType, Product, ProductSize, Trip, TripStatus,
};

use crate::{PersistenceError, Row, SqliteTabularStore, TabularStore};

pub fn create_test_backend() -> Arc<dyn TabularStore> {
    Arc::new(SqliteTabularStore::new_in_memory().expect("in-memory store"))
}

pub fn create_test_start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 17, 3, 0, 0).unwrap()
}

pub fn create_test_product(quantity: u32) -> Product {
    Product {
        id: Some(String::from("p-1")),
        name: String::from("Carry-on"),
        brand: Brand::Larita,
        size: ProductSize::S,
        quantity,
        weight: 1.8,
        dimensions: Dimensions {
            length: 50.0,
            width: 35.0,
            height: 20.0,
        },
        package_type: PackageType::BagSmall,
    }
}

pub fn create_test_trip(id: &str, status: TripStatus, start_time: DateTime<Utc>) -> Trip {
    Trip {
        id: String::from(id),
        vehicle_id: String::from("51H-1"),
        driver_name: String::from("Nguyen"),
        route: String::from("Tan Binh -> Thu Duc"),
        status,
        products: vec![create_test_product(3), create_test_product(2)],
        cost: 1_000_000.0,
        distance: 100.0,
        fuel_consumption: 0.0,
        start_time,
        end_time: None,
        notes: Some(String::from("Fragile")),
    }
}

/// Backend whose every call fails, for exercising degrade paths.
pub struct FailingBackend;

#[async_trait]
impl TabularStore for FailingBackend {
    fn backend_name(&self) -> &'static str {
        "failing"
    }

    async fn append_rows(&self, _range: &str, _rows: Vec<Row>) -> Result<(), PersistenceError> {
        Err(PersistenceError::TransportFailed(String::from("offline")))
    }

    async fn read_rows(&self, _range: &str) -> Result<Vec<Row>, PersistenceError> {
        Err(PersistenceError::TransportFailed(String::from("offline")))
    }

    async fn write_rows(&self, _range: &str, _rows: Vec<Row>) -> Result<(), PersistenceError> {
        Err(PersistenceError::TransportFailed(String::from("offline")))
    }

    async fn add_sheet(&self, _title: &str, _headers: Row) -> Result<(), PersistenceError> {
        Err(PersistenceError::TransportFailed(String::from("offline")))
    }
}
