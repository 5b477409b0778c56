// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Local `SQLite` tabular backend.
//!
//! Mirrors the spreadsheet layout in two tables: `sheets` (one row per
//! named sheet) and `sheet_rows` (ordered rows, cells stored as a JSON
//! array). The initial migration creates the `Trips` and `Config` sheets
//! with their header rows, so a fresh database matches a freshly prepared
//! spreadsheet.
//!
//! Diesel calls are blocking; the connection sits behind a tokio mutex and
//! each operation holds it for a single short statement batch.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::Integer;
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::diesel_schema::{sheet_rows, sheets};
use crate::error::PersistenceError;
use crate::tabular::{Row, TabularStore, sheet_name};

/// `SQLite` migrations.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Helper row struct for PRAGMA queries.
#[derive(QueryableByName)]
struct PragmaRow {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// Verifies that foreign key enforcement is enabled.
///
/// # Errors
///
/// Returns an error if foreign key enforcement is not enabled.
fn verify_foreign_key_enforcement(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    // NOTE: PRAGMA is raw SQL (Diesel has no PRAGMA DSL)
    let foreign_keys_enabled: i32 = diesel::sql_query("PRAGMA foreign_keys")
        .get_result::<PragmaRow>(conn)?
        .foreign_keys;

    if foreign_keys_enabled == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }

    debug!("SQLite foreign key enforcement is enabled");
    Ok(())
}

/// Initialize a `SQLite` database at the given URL and run migrations.
///
/// # Arguments
///
/// * `database_url` - The `SQLite` database URL (e.g., `":memory:"` or file path)
///
/// # Errors
///
/// Returns an error if connection or migration fails.
fn initialize_database(database_url: &str) -> Result<SqliteConnection, PersistenceError> {
    info!(database_url, "Initializing SQLite tabular store");

    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)?;

    // NOTE: PRAGMA is raw SQL (Diesel has no PRAGMA DSL)
    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;

    verify_foreign_key_enforcement(&mut conn)?;

    Ok(conn)
}

/// Tabular store backed by a local `SQLite` database.
pub struct SqliteTabularStore {
    conn: Mutex<SqliteConnection>,
}

impl SqliteTabularStore {
    /// Creates a store over a fresh, isolated in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String =
            format!("file:memdb_fleetdash_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection = initialize_database(&shared_memory_url)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Creates a store over a file-based database, creating it if needed.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError(String::from("Invalid database path"))
        })?;

        let mut conn: SqliteConnection = initialize_database(path_str)?;

        // NOTE: PRAGMA is raw SQL (Diesel has no PRAGMA DSL)
        diesel::sql_query("PRAGMA journal_mode = WAL")
            .execute(&mut conn)
            .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

fn ensure_sheet(conn: &mut SqliteConnection, name: &str) -> Result<(), PersistenceError> {
    let count: i64 = sheets::table
        .filter(sheets::sheet_name.eq(name))
        .count()
        .get_result(conn)?;
    if count == 0 {
        return Err(PersistenceError::SheetNotFound(name.to_string()));
    }
    Ok(())
}

fn insert_rows(
    conn: &mut SqliteConnection,
    name: &str,
    rows: &[Row],
) -> Result<(), PersistenceError> {
    for row in rows {
        let cells_json: String = serde_json::to_string(row)?;
        diesel::insert_into(sheet_rows::table)
            .values((
                sheet_rows::sheet_name.eq(name),
                sheet_rows::cells_json.eq(&cells_json),
            ))
            .execute(conn)?;
    }
    Ok(())
}

#[async_trait]
impl TabularStore for SqliteTabularStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn append_rows(&self, range: &str, rows: Vec<Row>) -> Result<(), PersistenceError> {
        let name: &str = sheet_name(range);
        let mut conn = self.conn.lock().await;

        conn.transaction(|conn| {
            ensure_sheet(conn, name)?;
            insert_rows(conn, name, &rows)
        })?;

        debug!(sheet = name, rows = rows.len(), "Appended rows");
        Ok(())
    }

    async fn read_rows(&self, range: &str) -> Result<Vec<Row>, PersistenceError> {
        let name: &str = sheet_name(range);
        let mut conn = self.conn.lock().await;

        ensure_sheet(&mut conn, name)?;
        let encoded: Vec<String> = sheet_rows::table
            .filter(sheet_rows::sheet_name.eq(name))
            .order(sheet_rows::row_id.asc())
            .select(sheet_rows::cells_json)
            .load(&mut *conn)?;

        let rows: Vec<Row> = encoded
            .iter()
            .map(|cells| serde_json::from_str::<Row>(cells))
            .collect::<Result<_, _>>()?;
        Ok(rows)
    }

    async fn write_rows(&self, range: &str, rows: Vec<Row>) -> Result<(), PersistenceError> {
        let name: &str = sheet_name(range);
        let mut conn = self.conn.lock().await;

        conn.transaction(|conn| {
            ensure_sheet(conn, name)?;
            diesel::delete(sheet_rows::table.filter(sheet_rows::sheet_name.eq(name)))
                .execute(conn)?;
            insert_rows(conn, name, &rows)
        })?;

        debug!(sheet = name, rows = rows.len(), "Replaced rows");
        Ok(())
    }

    async fn add_sheet(&self, title: &str, headers: Row) -> Result<(), PersistenceError> {
        let mut conn = self.conn.lock().await;

        conn.transaction(|conn| {
            if ensure_sheet(conn, title).is_ok() {
                return Err(PersistenceError::SheetExists(title.to_string()));
            }
            diesel::insert_into(sheets::table)
                .values(sheets::sheet_name.eq(title))
                .execute(conn)?;
            insert_rows(conn, title, &[headers])
        })?;

        info!(sheet = title, "Created sheet");
        Ok(())
    }
}
