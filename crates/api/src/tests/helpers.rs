// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use fleetdash_domain::{BaselineScorer, Brand, Dimensions, PackageType, Product, ProductSize};
use fleetdash_notify::{
    BotApi, BotInfo, ChatSettings, MailSettings, MailTransport, Mailer, NotifyError,
    OutgoingMail, OutgoingMessage, TelegramNotifier,
};
use fleetdash_persistence::{ConfigStore, SqliteTabularStore, TabularStore, TripStore};

use crate::request_response::TripPayload;
use crate::services::Services;

pub const TEST_TIMEZONE: Tz = chrono_tz::Asia::Ho_Chi_Minh;
pub const TEST_CHAT_ID: &str = "-1001";

/// Saturday 2026-10-17, 10:00 in Ho Chi Minh City.
pub fn create_test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 17, 3, 0, 0).unwrap()
}

#[derive(Default)]
pub struct RecordingMail {
    fail: bool,
    sent: Mutex<Vec<OutgoingMail>>,
}

impl RecordingMail {
    pub fn failing() -> Self {
        Self {
            fail: true,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransport for RecordingMail {
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
        Ok(!self.fail)
    }
}

#[derive(Default)]
pub struct RecordingBot {
    pub messages: Mutex<Vec<OutgoingMessage>>,
    pub webhooks: Mutex<Vec<String>>,
    pub answered: Mutex<Vec<String>>,
}

impl RecordingBot {
    pub fn messages(&self) -> Vec<OutgoingMessage> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl BotApi for RecordingBot {
    async fn send_message(&self, message: &OutgoingMessage) -> Result<(), NotifyError> {
        self.messages.lock().unwrap().push(message.clone());
        Ok(())
    }

    async fn set_webhook(&self, url: &str) -> Result<(), NotifyError> {
        self.webhooks.lock().unwrap().push(url.to_string());
        Ok(())
    }

    async fn delete_webhook(&self) -> Result<(), NotifyError> {
        Ok(())
    }

    async fn get_me(&self) -> Result<BotInfo, NotifyError> {
        Ok(BotInfo {
            id: 7,
            username: Some(String::from("fleet_bot")),
            first_name: String::from("Fleet"),
            is_bot: true,
        })
    }

    async fn answer_callback_query(&self, callback_query_id: &str) -> Result<(), NotifyError> {
        self.answered
            .lock()
            .unwrap()
            .push(callback_query_id.to_string());
        Ok(())
    }
}

pub struct TestHarness {
    pub services: Services,
    pub mail: Arc<RecordingMail>,
    pub bot: Arc<RecordingBot>,
}

pub fn create_mail_settings(recipients: &[&str]) -> MailSettings {
    MailSettings {
        from: String::from("dashboard@example.com"),
        recipients: recipients.iter().map(ToString::to_string).collect(),
        app_name: String::from("Fleet Dashboard"),
        app_url: String::from("https://fleet.example.com"),
        timezone: TEST_TIMEZONE,
    }
}

pub fn create_chat_settings() -> ChatSettings {
    ChatSettings {
        chat_id: String::from(TEST_CHAT_ID),
        app_url: String::from("https://fleet.example.com"),
        timezone: TEST_TIMEZONE,
    }
}

pub fn create_harness_with_mail(mail: RecordingMail) -> TestHarness {
    let backend: Arc<dyn TabularStore> =
        Arc::new(SqliteTabularStore::new_in_memory().expect("in-memory store"));
    let mail: Arc<RecordingMail> = Arc::new(mail);
    let bot: Arc<RecordingBot> = Arc::new(RecordingBot::default());

    let services: Services = Services {
        trip_store: TripStore::new(Arc::clone(&backend)),
        config_store: ConfigStore::new(backend),
        mailer: Mailer::new(mail.clone(), create_mail_settings(&["ops@example.com"])),
        telegram: TelegramNotifier::new(bot.clone(), create_chat_settings()),
        scorer: Arc::new(BaselineScorer::default()),
        timezone: TEST_TIMEZONE,
        cron_secret: Some(String::from("cron-secret")),
        strict_lifecycle: false,
    };

    TestHarness {
        services,
        mail,
        bot,
    }
}

pub fn create_test_harness() -> TestHarness {
    create_harness_with_mail(RecordingMail::default())
}

/// Services with no backend, no mail transport and no bot.
pub fn create_unconfigured_services() -> Services {
    Services {
        trip_store: TripStore::unconfigured(),
        config_store: ConfigStore::unconfigured(),
        mailer: Mailer::unconfigured(create_mail_settings(&[])),
        telegram: TelegramNotifier::unconfigured(create_chat_settings()),
        scorer: Arc::new(BaselineScorer::default()),
        timezone: TEST_TIMEZONE,
        cron_secret: None,
        strict_lifecycle: false,
    }
}

pub fn create_test_product(quantity: u32) -> Product {
    Product {
        id: None,
        name: String::from("Cabin case"),
        brand: Brand::Pisani,
        size: ProductSize::M,
        quantity,
        weight: 4.0,
        dimensions: Dimensions {
            length: 100.0,
            width: 50.0,
            height: 40.0,
        },
        package_type: PackageType::Carton,
    }
}

pub fn create_test_payload(id: &str, status: &str) -> TripPayload {
    TripPayload {
        id: Some(id.to_string()),
        vehicle_id: Some(String::from("51C-123.45")),
        driver_name: Some(String::from("Nguyen Van A")),
        route: Some(String::from("Tan Binh -> Thu Duc")),
        status: Some(status.to_string()),
        products: Some(vec![create_test_product(3), create_test_product(2)]),
        cost: Some(1_000_000.0),
        distance: Some(100.0),
        fuel_consumption: None,
        start_time: Some(create_test_now()),
        end_time: None,
        notes: None,
    }
}
