// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Report window calculation.
//!
//! Windows are calendar units in the reporting timezone, converted to UTC.
//!
//! ## Invariants
//!
//! - Both bounds are inclusive; `end` is one millisecond before the start
//!   of the next unit, so adjacent windows never share an instant
//! - Weeks run Monday to Sunday
//! - Quarters start in January, April, July, and October
//! - When local midnight does not exist (DST gap), the window starts at the
//!   first valid instant after it

use crate::error::DomainError;
use crate::report::ReportPeriod;
use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// An inclusive UTC time range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ReportWindow {
    /// Creates a window from explicit bounds.
    #[must_use]
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Returns true if `instant` lies within the window, bounds included.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Window covering whole local days `first..=last` in `tz`.
    ///
    /// # Errors
    ///
    /// Returns an error if date arithmetic overflows.
    pub fn from_local_days(first: NaiveDate, last: NaiveDate, tz: Tz) -> Result<Self, DomainError> {
        let next: NaiveDate = last
            .succ_opt()
            .ok_or_else(|| overflow("advancing past the last day"))?;
        Ok(Self {
            start: local_midnight(first, tz)?,
            end: local_midnight(next, tz)? - Duration::milliseconds(1),
        })
    }
}

impl ReportPeriod {
    /// The window of this period containing `now`. See [`report_window`].
    ///
    /// # Errors
    ///
    /// Returns an error if date arithmetic overflows.
    pub fn window(self, now: DateTime<Utc>, tz: Tz) -> Result<ReportWindow, DomainError> {
        report_window(self, now, tz)
    }
}

/// Parses an IANA timezone name.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimezone` if the name is unknown.
pub fn parse_timezone(name: &str) -> Result<Tz, DomainError> {
    name.parse::<Tz>()
        .map_err(|_| DomainError::InvalidTimezone(name.to_string()))
}

/// Computes the window of `period` containing `now`, in `tz`.
///
/// # Arguments
///
/// * `period` - The calendar unit
/// * `now` - The reference instant
/// * `tz` - The reporting timezone
///
/// # Errors
///
/// Returns an error if date arithmetic overflows.
///
/// # Example
///
/// ```text
/// period = weekly
/// now    = 2026-10-17T03:00:00Z (Saturday, 10:00 in Asia/Ho_Chi_Minh)
/// tz     = Asia/Ho_Chi_Minh
///
/// start  = 2026-10-11T17:00:00Z     (Monday 2026-10-12 00:00 local)
/// end    = 2026-10-18T16:59:59.999Z (Sunday 2026-10-18 23:59:59.999 local)
/// ```
pub fn report_window(
    period: ReportPeriod,
    now: DateTime<Utc>,
    tz: Tz,
) -> Result<ReportWindow, DomainError> {
    let today: NaiveDate = now.with_timezone(&tz).date_naive();

    let (first, next): (NaiveDate, NaiveDate) = match period {
        ReportPeriod::Daily => (
            today,
            today
                .succ_opt()
                .ok_or_else(|| overflow("computing the next day"))?,
        ),
        ReportPeriod::Weekly => {
            let monday: NaiveDate = today
                - Duration::days(i64::from(today.weekday().num_days_from_monday()));
            (
                monday,
                monday
                    .checked_add_signed(Duration::days(7))
                    .ok_or_else(|| overflow("computing the next week"))?,
            )
        }
        ReportPeriod::Monthly => {
            let first: NaiveDate = first_of_month(today.year(), today.month())?;
            (first, add_months(first, 1)?)
        }
        ReportPeriod::Quarterly => {
            let quarter_month: u32 = (today.month0() / 3) * 3 + 1;
            let first: NaiveDate = first_of_month(today.year(), quarter_month)?;
            (first, add_months(first, 3)?)
        }
        ReportPeriod::Yearly => {
            let first: NaiveDate = first_of_month(today.year(), 1)?;
            (first, add_months(first, 12)?)
        }
    };

    Ok(ReportWindow {
        start: local_midnight(first, tz)?,
        end: local_midnight(next, tz)? - Duration::milliseconds(1),
    })
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, DomainError> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| overflow("computing the first day of the month"))
}

fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate, DomainError> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| overflow("adding months"))
}

/// The first instant of `date` in `tz`, as UTC.
fn local_midnight(date: NaiveDate, tz: Tz) -> Result<DateTime<Utc>, DomainError> {
    let midnight = date.and_time(NaiveTime::MIN);
    // Advance in 30 minute increments past a DST gap at midnight.
    for step in 0..=4 {
        let candidate = midnight + Duration::minutes(30 * step);
        if let Some(local) = tz.from_local_datetime(&candidate).earliest() {
            return Ok(local.with_timezone(&Utc));
        }
    }
    Err(overflow("resolving local midnight"))
}

fn overflow(operation: &str) -> DomainError {
    DomainError::DateArithmeticOverflow {
        operation: operation.to_string(),
    }
}
