// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::Trip;

/// A trip property that is expected but not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripWarning {
    /// The trip is completed but carries no end time, so duration-based
    /// notifications cannot be computed.
    CompletedWithoutEndTime,
}

impl std::fmt::Display for TripWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CompletedWithoutEndTime => write!(f, "completed trip has no end time"),
        }
    }
}

/// Validates that the identifying fields of a trip are present.
///
/// # Arguments
///
/// * `id` - The trip identifier
/// * `vehicle_id` - The vehicle identifier
/// * `driver_name` - The driver's name
///
/// # Errors
///
/// Returns `DomainError::MissingField` naming the first blank field.
pub fn validate_required_fields(
    id: Option<&str>,
    vehicle_id: Option<&str>,
    driver_name: Option<&str>,
) -> Result<(), DomainError> {
    let fields: [(&'static str, Option<&str>); 3] = [
        ("id", id),
        ("vehicleId", vehicle_id),
        ("driverName", driver_name),
    ];
    for (name, value) in fields {
        if value.is_none_or(|v| v.trim().is_empty()) {
            return Err(DomainError::MissingField(name));
        }
    }
    Ok(())
}

/// Validates the invariants of a trip record.
///
/// Hard invariants (rejected):
/// - required identifiers are present
/// - cost and distance are finite and non-negative
/// - end time, if present, is not before start time
/// - every line item has a positive quantity and non-negative measures
///
/// Soft invariants (returned as warnings):
/// - a completed trip should carry an end time
///
/// # Errors
///
/// Returns the first hard invariant violation found.
pub fn validate_trip(trip: &Trip) -> Result<Vec<TripWarning>, DomainError> {
    validate_required_fields(
        Some(&trip.id),
        Some(&trip.vehicle_id),
        Some(&trip.driver_name),
    )?;

    for (field, value) in [("cost", trip.cost), ("distance", trip.distance)] {
        if !value.is_finite() || value < 0.0 {
            return Err(DomainError::InvalidAmount { field, value });
        }
    }

    match trip.end_time {
        Some(end) if end < trip.start_time => {
            return Err(DomainError::EndBeforeStart {
                start: trip.start_time,
                end,
            });
        }
        _ => {}
    }

    for (index, product) in trip.products.iter().enumerate() {
        if product.quantity == 0 {
            return Err(DomainError::InvalidProduct {
                index,
                reason: String::from("quantity must be positive"),
            });
        }
        let measures: [f64; 4] = [
            product.weight,
            product.dimensions.length,
            product.dimensions.width,
            product.dimensions.height,
        ];
        if measures.iter().any(|m| !m.is_finite() || *m < 0.0) {
            return Err(DomainError::InvalidProduct {
                index,
                reason: String::from("weight and dimensions must be non-negative"),
            });
        }
    }

    let mut warnings: Vec<TripWarning> = Vec::new();
    if trip.is_completed() && trip.end_time.is_none() {
        warnings.push(TripWarning::CompletedWithoutEndTime);
    }
    Ok(warnings)
}
