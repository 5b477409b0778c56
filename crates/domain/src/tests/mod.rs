// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod report;

use crate::{Brand, Dimensions, PackageType, Product, ProductSize, Trip, TripStatus};
use chrono::{DateTime, TimeZone, Utc};

pub fn create_test_start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 17, 3, 0, 0).unwrap()
}

pub fn create_test_product(quantity: u32) -> Product {
    Product {
        id: None,
        name: String::from("Carry-on"),
        brand: Brand::Heys,
        size: ProductSize::M,
        quantity,
        weight: 2.5,
        dimensions: Dimensions {
            length: 60.0,
            width: 40.0,
            height: 25.0,
        },
        package_type: PackageType::Carton,
    }
}

pub fn create_test_trip(id: &str, status: TripStatus) -> Trip {
    Trip {
        id: String::from(id),
        vehicle_id: String::from("51H-1"),
        driver_name: String::from("Nguyen"),
        route: String::from("Warehouse -> District 1"),
        status,
        products: Vec::new(),
        cost: 0.0,
        distance: 0.0,
        fuel_consumption: 0.0,
        start_time: create_test_start_time(),
        end_time: None,
        notes: None,
    }
}
