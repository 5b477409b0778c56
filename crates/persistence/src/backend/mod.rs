// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tabular store backends.
//!
//! - `sheets` - Google Sheets, the production store
//! - `sqlite` - local `SQLite` mirror of the same layout, used for
//!   development and tests

pub mod service_account;
pub mod sheets;
pub mod sqlite;
