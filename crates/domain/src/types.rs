// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::trip_status::TripStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Product brands carried by the fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Brand {
    Heys,
    Larita,
    Pisani,
    Beatas,
    #[serde(rename = "Austin Reed")]
    AustinReed,
    Herschel,
}

impl Brand {
    /// Returns the display name of the brand.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Heys => "Heys",
            Self::Larita => "Larita",
            Self::Pisani => "Pisani",
            Self::Beatas => "Beatas",
            Self::AustinReed => "Austin Reed",
            Self::Herschel => "Herschel",
        }
    }
}

/// Product size class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductSize {
    S,
    M,
    L,
}

impl ProductSize {
    /// Returns the single-letter size code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
        }
    }
}

/// How a line item is packed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageType {
    Carton,
    BagSmall,
    BagLarge,
}

/// Package dimensions in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    /// Volume of one package in cubic metres.
    #[must_use]
    pub fn volume_cbm(&self) -> f64 {
        self.length * self.width * self.height / 1_000_000.0
    }
}

/// A cargo line item within a trip.
///
/// Line items have no identity beyond the trip that owns them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Client-generated identifier, used only by the intake form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    pub brand: Brand,
    pub size: ProductSize,
    /// Number of packages. Must be positive.
    pub quantity: u32,
    /// Weight of one package in kilograms.
    pub weight: f64,
    pub dimensions: Dimensions,
    pub package_type: PackageType,
}

/// One vehicle journey.
///
/// Trips are value objects: they are owned by the external store and
/// passed by value between components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    /// Unique identifier assigned by the intake client.
    pub id: String,
    pub vehicle_id: String,
    pub driver_name: String,
    #[serde(default)]
    pub route: String,
    pub status: TripStatus,
    /// Line items, in entry order.
    #[serde(default)]
    pub products: Vec<Product>,
    /// Total cost in VND.
    #[serde(default)]
    pub cost: f64,
    /// Total distance in kilometres.
    #[serde(default)]
    pub distance: f64,
    /// Not yet populated by any source; always zero.
    #[serde(default)]
    pub fuel_consumption: f64,
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Trip {
    /// Total number of packages across all line items.
    #[must_use]
    pub fn product_units(&self) -> u64 {
        crate::estimate::total_units(&self.products)
    }

    /// Whole hours between start and end, rounded to nearest.
    ///
    /// Returns 0 when the trip has no end time.
    #[must_use]
    pub fn duration_hours(&self) -> i64 {
        self.end_time.map_or(0, |end| {
            let minutes: i64 = (end - self.start_time).num_minutes();
            (minutes + 30).div_euclid(60)
        })
    }

    /// Returns true if the trip has been delivered.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == TripStatus::Completed
    }
}
