// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The adapters every endpoint operation works against.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use chrono_tz::Tz;
use fleetdash_domain::{PerformanceScorer, Report, ReportPeriod};
use fleetdash_notify::{BotCommandSource, Mailer, SystemStatus, TelegramNotifier, TripDetail};
use fleetdash_persistence::{ConfigStore, TripStore};
use tracing::error;

use crate::handlers::compile_report;

/// Adapters and settings shared by all requests.
///
/// Built once at startup and shared behind an `Arc`; nothing in here is
/// mutated after construction.
#[derive(Clone)]
pub struct Services {
    pub trip_store: TripStore,
    pub config_store: ConfigStore,
    pub mailer: Mailer,
    pub telegram: TelegramNotifier,
    pub scorer: Arc<dyn PerformanceScorer>,
    /// Timezone report windows and bare query dates are resolved in.
    pub timezone: Tz,
    /// Bearer secret for scheduler and admin endpoints.
    pub cron_secret: Option<String>,
    /// Reject illegal status transitions on `POST /trips`.
    pub strict_lifecycle: bool,
}

#[async_trait]
impl BotCommandSource for Services {
    async fn system_status(&self) -> SystemStatus {
        SystemStatus {
            store: self.trip_store.backend_name(),
            mail: self
                .mailer
                .is_configured()
                .then(|| self.mailer.service_name()),
        }
    }

    async fn today_report(&self) -> Option<Report> {
        if !self.trip_store.is_configured() {
            return None;
        }

        match compile_report(self, ReportPeriod::Daily, Utc::now()).await {
            Ok(report) => Some(report),
            Err(e) => {
                error!(error = %e, "Failed to compile today's report");
                None
            }
        }
    }

    async fn trip_detail(&self, trip_id: &str) -> Option<TripDetail> {
        self.trip_store
            .find_latest(trip_id)
            .await
            .map(|row| TripDetail {
                trip: row.trip,
                product_units: row.total_product_units,
            })
    }
}
