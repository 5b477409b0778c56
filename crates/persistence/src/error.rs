// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during persistence operations.
///
/// These never leave the public `TripStore` and `ConfigStore` operations,
/// which log them and collapse to `false` or an empty result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Serialization/deserialization error.
    SerializationError(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The addressed sheet does not exist.
    SheetNotFound(String),
    /// A sheet with the requested title already exists.
    SheetExists(String),
    /// Service account credentials were rejected or could not be signed.
    AuthenticationFailed(String),
    /// The remote spreadsheet service could not be reached.
    TransportFailed(String),
    /// The remote spreadsheet service answered with an error status.
    RemoteRejected {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned.
        body: String,
    },
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::SheetNotFound(name) => write!(f, "Sheet not found: {name}"),
            Self::SheetExists(name) => write!(f, "Sheet already exists: {name}"),
            Self::AuthenticationFailed(msg) => write!(f, "Authentication failed: {msg}"),
            Self::TransportFailed(msg) => write!(f, "Spreadsheet request failed: {msg}"),
            Self::RemoteRejected { status, body } => {
                write!(f, "Spreadsheet service returned {status}: {body}")
            }
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        Self::DatabaseError(err.to_string())
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<reqwest::Error> for PersistenceError {
    fn from(err: reqwest::Error) -> Self {
        Self::TransportFailed(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for PersistenceError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Self::AuthenticationFailed(err.to_string())
    }
}
