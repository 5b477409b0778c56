// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The tabular store seam.
//!
//! Ranges use spreadsheet A1 notation (`Trips!A:L`). Backends address
//! whole sheets by the part before `!`; the column span only matters to
//! the remote spreadsheet service.

use async_trait::async_trait;

use crate::error::PersistenceError;

/// One row of string cells.
pub type Row = Vec<String>;

/// A backend holding named sheets of ordered string rows.
#[async_trait]
pub trait TabularStore: Send + Sync {
    /// Short backend name, for logs and status replies.
    fn backend_name(&self) -> &'static str;

    /// Appends rows after the last non-empty row of the range.
    ///
    /// # Errors
    ///
    /// Returns an error if the sheet does not exist or the backend fails.
    async fn append_rows(&self, range: &str, rows: Vec<Row>) -> Result<(), PersistenceError>;

    /// Reads every row of the range, header included, in sheet order.
    ///
    /// # Errors
    ///
    /// Returns an error if the sheet does not exist or the backend fails.
    async fn read_rows(&self, range: &str) -> Result<Vec<Row>, PersistenceError>;

    /// Replaces the contents of the range with `rows`, starting at row 1.
    ///
    /// # Errors
    ///
    /// Returns an error if the sheet does not exist or the backend fails.
    async fn write_rows(&self, range: &str, rows: Vec<Row>) -> Result<(), PersistenceError>;

    /// Creates a new sheet whose first row is `headers`.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::SheetExists` if the title is taken, or an
    /// error if the backend fails.
    async fn add_sheet(&self, title: &str, headers: Row) -> Result<(), PersistenceError>;
}

/// Returns the sheet name of an A1 range (`Trips!A:L` -> `Trips`).
#[must_use]
pub fn sheet_name(range: &str) -> &str {
    let name: &str = range.split_once('!').map_or(range, |(sheet, _)| sheet);
    name.trim_matches('\'')
}
