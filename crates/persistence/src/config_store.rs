// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Dashboard configuration stored as `Key | Value | Description | Last
//! Updated` rows in the `Config` sheet.

use std::sync::Arc;

use chrono::Utc;
use fleetdash_domain::{ConfigEntry, DashboardConfig, DomainError};
use tracing::{error, info, warn};

use crate::error::PersistenceError;
use crate::tabular::{Row, TabularStore};
use crate::trip_rows::format_instant;

/// The configuration range.
pub const CONFIG_RANGE: &str = "Config!A:D";

/// Header cells of the configuration sheet.
pub const CONFIG_HEADERS: [&str; 4] = ["Key", "Value", "Description", "Last Updated"];

/// Configuration persistence over an optional tabular backend.
#[derive(Clone, Default)]
pub struct ConfigStore {
    backend: Option<Arc<dyn TabularStore>>,
}

impl ConfigStore {
    /// Creates a store reading and writing `backend`.
    #[must_use]
    pub fn new(backend: Arc<dyn TabularStore>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Creates a store with no backend.
    #[must_use]
    pub const fn unconfigured() -> Self {
        Self { backend: None }
    }

    /// Loads the configuration.
    ///
    /// Returns `None` when the store is unconfigured, the backend fails, or
    /// the sheet holds no data rows. Rows that cannot be applied are logged
    /// and skipped; the remaining fields keep their defaults.
    pub async fn get_config(&self) -> Option<DashboardConfig> {
        let Some(backend) = &self.backend else {
            warn!("Config store not configured, skipping config read");
            return None;
        };

        let rows: Vec<Row> = match backend.read_rows(CONFIG_RANGE).await {
            Ok(rows) => rows,
            Err(e) => {
                error!(error = %e, "Failed to read configuration");
                return None;
            }
        };
        if rows.len() <= 1 {
            return None;
        }

        let (config, rejected): (DashboardConfig, Vec<DomainError>) =
            DashboardConfig::from_entries(rows.iter().skip(1).map(|row| {
                (
                    row.first().map_or("", String::as_str),
                    row.get(1).map_or("", String::as_str),
                )
            }));
        for e in &rejected {
            warn!(error = %e, "Ignoring configuration row");
        }
        Some(config)
    }

    /// Replaces the stored configuration with `config`.
    ///
    /// Returns `false` when the store is unconfigured or the write fails.
    pub async fn update_config(&self, config: &DashboardConfig) -> bool {
        let Some(backend) = &self.backend else {
            warn!("Config store not configured, skipping config update");
            return false;
        };

        match Self::write(backend.as_ref(), config).await {
            Ok(count) => {
                info!(entries = count, "Updated configuration");
                true
            }
            Err(e) => {
                error!(error = %e, "Failed to update configuration");
                false
            }
        }
    }

    async fn write(
        backend: &dyn TabularStore,
        config: &DashboardConfig,
    ) -> Result<usize, PersistenceError> {
        let entries: Vec<ConfigEntry> = config
            .to_entries()
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        let updated_at: String = format_instant(Utc::now());

        let mut rows: Vec<Row> = Vec::with_capacity(entries.len() + 1);
        rows.push(CONFIG_HEADERS.iter().map(|h| (*h).to_string()).collect());
        rows.extend(entries.iter().map(|entry| {
            vec![
                entry.key.clone(),
                entry.value.clone(),
                entry.description.clone(),
                updated_at.clone(),
            ]
        }));

        backend.write_rows(CONFIG_RANGE, rows).await?;
        Ok(entries.len())
    }
}
