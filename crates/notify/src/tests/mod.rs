// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use fleetdash_domain::{
    BaselineScorer, Brand, Dimensions, PackageType, Product, ProductSize, Report, ReportPeriod,
    ReportWindow, Trip, TripStatus, build_report,
};

use crate::error::NotifyError;
use crate::mail::{MailTransport, OutgoingMail};
use crate::telegram::bot_api::{BotApi, BotInfo, OutgoingMessage};
use crate::telegram::{BotCommandSource, SystemStatus, TripDetail};

pub const TEST_TIMEZONE: Tz = chrono_tz::Asia::Ho_Chi_Minh;

/// Saturday 2026-10-17, 10:00 in Ho Chi Minh City.
pub fn create_test_start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 17, 3, 0, 0).unwrap()
}

pub fn create_test_product(quantity: u32) -> Product {
    Product {
        id: None,
        name: String::from("Carry-on 20\""),
        brand: Brand::Heys,
        size: ProductSize::S,
        quantity,
        weight: 1.8,
        dimensions: Dimensions {
            length: 50.0,
            width: 35.0,
            height: 20.0,
        },
        package_type: PackageType::Carton,
    }
}

pub fn create_test_trip(id: &str, status: TripStatus) -> Trip {
    Trip {
        id: id.to_string(),
        vehicle_id: String::from("51C-123.45"),
        driver_name: String::from("Nguyen Van A"),
        route: String::from("Tan Binh -> Thu Duc"),
        status,
        products: vec![create_test_product(3), create_test_product(2)],
        cost: 1_000_000.0,
        distance: 100.0,
        fuel_consumption: 0.0,
        start_time: create_test_start_time(),
        end_time: None,
        notes: None,
    }
}

pub fn create_test_report(period: ReportPeriod, start: DateTime<Utc>, trips: Vec<Trip>) -> Report {
    let end: DateTime<Utc> = start + chrono::Duration::days(1) - chrono::Duration::milliseconds(1);
    build_report(
        period,
        ReportWindow::new(start, end),
        trips,
        &BaselineScorer::default(),
    )
}

/// Mail transport that records deliveries.
pub struct RecordingTransport {
    pub sent: Mutex<Vec<OutgoingMail>>,
    pub fail: bool,
    pub verified: bool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: false,
            verified: true,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransport for RecordingTransport {
    fn service_name(&self) -> &'static str {
        "recording"
    }

    async fn deliver(&self, mail: &OutgoingMail) -> Result<(), NotifyError> {
        if self.fail {
            return Err(NotifyError::RemoteRejected {
                status: 503,
                body: String::from("unavailable"),
            });
        }
        self.sent.lock().unwrap().push(mail.clone());
        Ok(())
    }

    async fn verify(&self) -> Result<bool, NotifyError> {
        if self.fail {
            return Err(NotifyError::Initialization(String::from("offline")));
        }
        Ok(self.verified)
    }
}

/// Bot API double that records every call.
#[derive(Default)]
pub struct RecordingBot {
    pub messages: Mutex<Vec<OutgoingMessage>>,
    pub webhooks: Mutex<Vec<String>>,
    pub deleted_webhooks: Mutex<usize>,
    pub answered: Mutex<Vec<String>>,
    pub fail: bool,
}

impl RecordingBot {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn messages(&self) -> Vec<OutgoingMessage> {
        self.messages.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), NotifyError> {
        if self.fail {
            return Err(NotifyError::BotApi(String::from("Bad Request: chat not found")));
        }
        Ok(())
    }
}

#[async_trait]
impl BotApi for RecordingBot {
    async fn send_message(&self, message: &OutgoingMessage) -> Result<(), NotifyError> {
        self.check()?;
        self.messages.lock().unwrap().push(message.clone());
        Ok(())
    }

    async fn set_webhook(&self, url: &str) -> Result<(), NotifyError> {
        self.check()?;
        self.webhooks.lock().unwrap().push(url.to_string());
        Ok(())
    }

    async fn delete_webhook(&self) -> Result<(), NotifyError> {
        self.check()?;
        *self.deleted_webhooks.lock().unwrap() += 1;
        Ok(())
    }

    async fn get_me(&self) -> Result<BotInfo, NotifyError> {
        self.check()?;
        Ok(BotInfo {
            id: 7_001,
            username: Some(String::from("fleet_bot")),
            first_name: String::from("Fleet"),
            is_bot: true,
        })
    }

    async fn answer_callback_query(&self, callback_query_id: &str) -> Result<(), NotifyError> {
        self.check()?;
        self.answered
            .lock()
            .unwrap()
            .push(callback_query_id.to_string());
        Ok(())
    }
}

/// Command source with canned answers.
#[derive(Default)]
pub struct StaticCommandSource {
    pub status: SystemStatus,
    pub today: Option<Report>,
    pub trips: Vec<TripDetail>,
}

#[async_trait]
impl BotCommandSource for StaticCommandSource {
    async fn system_status(&self) -> SystemStatus {
        self.status
    }

    async fn today_report(&self) -> Option<Report> {
        self.today.clone()
    }

    async fn trip_detail(&self, trip_id: &str) -> Option<TripDetail> {
        self.trips.iter().find(|d| d.trip.id == trip_id).cloned()
    }
}
