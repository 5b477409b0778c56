// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use fleetdash_api::Services;
use fleetdash_domain::BaselineScorer;
use fleetdash_notify::{
    BotApi, BotInfo, ChatSettings, MailSettings, MailTransport, Mailer, NotifyError,
    OutgoingMail, OutgoingMessage, TelegramNotifier,
};
use fleetdash_persistence::{ConfigStore, SqliteTabularStore, TabularStore, TripStore};
use serde_json::Value;
use tower::ServiceExt;

use crate::{AppState, build_router};

pub const TEST_SECRET: &str = "cron-secret";

#[derive(Default)]
pub struct RecordingMail {
    sent: Mutex<Vec<OutgoingMail>>,
}

impl RecordingMail {
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
        self.sent.lock().unwrap().push(mail.clone());
        Ok(())
    }

    async fn verify(&self) -> Result<bool, NotifyError> {
        Ok(true)
    }
}

#[derive(Default)]
pub struct RecordingBot {
    messages: Mutex<Vec<OutgoingMessage>>,
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

    async fn set_webhook(&self, _url: &str) -> Result<(), NotifyError> {
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

    async fn answer_callback_query(&self, _callback_query_id: &str) -> Result<(), NotifyError> {
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub mail: Arc<RecordingMail>,
    pub bot: Arc<RecordingBot>,
}

fn create_test_services(with_bot: bool) -> (Services, Arc<RecordingMail>, Arc<RecordingBot>) {
    let backend: Arc<dyn TabularStore> = Arc::new(
        SqliteTabularStore::new_in_memory().expect("Failed to create in-memory store"),
    );
    let mail: Arc<RecordingMail> = Arc::new(RecordingMail::default());
    let bot: Arc<RecordingBot> = Arc::new(RecordingBot::default());
    let timezone = chrono_tz::Asia::Ho_Chi_Minh;

    let mail_settings: MailSettings = MailSettings {
        from: String::from("dashboard@example.com"),
        recipients: vec![String::from("ops@example.com")],
        app_name: String::from("Fleet Dashboard"),
        app_url: String::from("https://fleet.example.com"),
        timezone,
    };
    let chat_settings: ChatSettings = ChatSettings {
        chat_id: String::from("-1001"),
        app_url: String::from("https://fleet.example.com"),
        timezone,
    };
    let telegram: TelegramNotifier = if with_bot {
        TelegramNotifier::new(bot.clone(), chat_settings)
    } else {
        TelegramNotifier::unconfigured(chat_settings)
    };

    let services: Services = Services {
        trip_store: TripStore::new(Arc::clone(&backend)),
        config_store: ConfigStore::new(backend),
        mailer: Mailer::new(mail.clone(), mail_settings),
        telegram,
        scorer: Arc::new(BaselineScorer::default()),
        timezone,
        cron_secret: Some(String::from(TEST_SECRET)),
        strict_lifecycle: false,
    };
    (services, mail, bot)
}

/// Helper to create a test app backed by in-memory storage and recording
/// transports.
pub fn create_test_app() -> TestApp {
    create_app(true)
}

/// Same as `create_test_app`, without a Telegram bot.
pub fn create_test_app_without_bot() -> TestApp {
    create_app(false)
}

/// Same as `create_test_app`, with no trip or config store.
pub fn create_test_app_without_store() -> TestApp {
    let (mut services, mail, bot) = create_test_services(true);
    services.trip_store = TripStore::unconfigured();
    services.config_store = ConfigStore::unconfigured();
    into_app(services, mail, bot)
}

fn create_app(with_bot: bool) -> TestApp {
    let (services, mail, bot) = create_test_services(with_bot);
    into_app(services, mail, bot)
}

fn into_app(services: Services, mail: Arc<RecordingMail>, bot: Arc<RecordingBot>) -> TestApp {
    let app_state: AppState = AppState {
        services: Arc::new(services),
    };
    TestApp {
        router: build_router(app_state),
        mail,
        bot,
    }
}

/// Sends one request and returns the status and parsed JSON body.
pub async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    bearer: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request: Request<Body> = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status: StatusCode = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
