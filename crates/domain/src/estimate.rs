// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Freight cost estimation from line items.
//!
//! Used when a trip is submitted without an explicit cost. The estimate
//! charges by volume and applies a surcharge to heavy loads.

use crate::types::Product;

/// Freight rate in VND per cubic metre.
pub const COST_PER_CUBIC_METER: f64 = 300_000.0;

/// Total load weight above which the heavy-load surcharge applies.
pub const HEAVY_LOAD_THRESHOLD_KG: f64 = 1000.0;

/// Multiplier applied to the base cost of heavy loads.
pub const HEAVY_LOAD_FACTOR: f64 = 1.2;

/// Sum of package counts across line items.
#[must_use]
pub fn total_units(products: &[Product]) -> u64 {
    products.iter().map(|p| u64::from(p.quantity)).sum()
}

/// Total load weight in kilograms.
#[must_use]
pub fn total_weight(products: &[Product]) -> f64 {
    products
        .iter()
        .map(|p| f64::from(p.quantity) * p.weight)
        .sum()
}

/// Total load volume in cubic metres.
#[must_use]
pub fn total_volume_cbm(products: &[Product]) -> f64 {
    products
        .iter()
        .map(|p| f64::from(p.quantity) * p.dimensions.volume_cbm())
        .sum()
}

/// Estimates the freight cost of a set of line items, rounded to whole VND.
#[must_use]
pub fn estimate_cost(products: &[Product]) -> f64 {
    let base: f64 = total_volume_cbm(products) * COST_PER_CUBIC_METER;
    let factor: f64 = if total_weight(products) > HEAVY_LOAD_THRESHOLD_KG {
        HEAVY_LOAD_FACTOR
    } else {
        1.0
    };
    (base * factor).round()
}
