// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The Telegram dispatcher.
//!
//! Outbound notifications go to the configured chat. Webhook updates are
//! answered in the chat they came from; commands that need live data
//! (`/status`, `/today`, trip details) ask a `BotCommandSource`.

pub mod bot_api;
mod messages;
pub mod update;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use fleetdash_domain::{Report, Trip};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::error::NotifyError;
use bot_api::{BotApi, BotInfo, InlineKeyboardButton, OutgoingMessage};
use update::{CallbackQuery, Message, Update};

/// Route the webhook is served on, relative to the public base URL.
pub const WEBHOOK_PATH: &str = "/telegram/webhook";

const TRIP_DETAIL_PREFIX: &str = "trip_detail_";

/// Urgency of an alert; selects its icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertPriority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

impl AlertPriority {
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Low => "💡",
            Self::Normal => "⚠️",
            Self::High => "🚨",
            Self::Urgent => "🔴",
        }
    }
}

/// Category of a custom notification; selects its icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    TripCompleted,
    DailyReport,
    Alert,
    Custom,
}

impl NotificationKind {
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::TripCompleted => "🚛",
            Self::DailyReport => "📊",
            Self::Alert => "⚠️",
            Self::Custom => "📢",
        }
    }
}

/// A titled free-form chat notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomNotification {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

/// Which backends are configured, as reported by `/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SystemStatus {
    /// Name of the trip store backend, if any.
    pub store: Option<&'static str>,
    /// Name of the mail transport, if any.
    pub mail: Option<&'static str>,
}

/// The latest stored state of one trip.
#[derive(Debug, Clone, PartialEq)]
pub struct TripDetail {
    pub trip: Trip,
    pub product_units: u64,
}

/// Live data behind the bot's commands.
#[async_trait]
pub trait BotCommandSource: Send + Sync {
    async fn system_status(&self) -> SystemStatus;

    /// Today's report, or `None` when no trip store is configured.
    async fn today_report(&self) -> Option<Report>;

    /// The latest stored row for `trip_id`.
    async fn trip_detail(&self, trip_id: &str) -> Option<TripDetail>;
}

/// Destination and rendering settings for chat messages.
#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub chat_id: String,
    pub app_url: String,
    pub timezone: Tz,
}

/// Sends notifications to a Telegram chat and answers webhook updates.
#[derive(Clone)]
pub struct TelegramNotifier {
    bot: Option<Arc<dyn BotApi>>,
    settings: ChatSettings,
}

impl TelegramNotifier {
    /// Creates a notifier posting through `bot`.
    ///
    /// A blank chat id leaves the notifier unconfigured.
    #[must_use]
    pub fn new(bot: Arc<dyn BotApi>, settings: ChatSettings) -> Self {
        let bot: Option<Arc<dyn BotApi>> = if settings.chat_id.trim().is_empty() {
            None
        } else {
            Some(bot)
        };
        Self { bot, settings }
    }

    /// Creates a notifier with no bot; every operation reports `false`.
    #[must_use]
    pub const fn unconfigured(settings: ChatSettings) -> Self {
        Self {
            bot: None,
            settings,
        }
    }

    /// Returns true if both a bot and a chat are configured.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.bot.is_some()
    }

    fn base_url(&self) -> &str {
        self.settings.app_url.trim_end_matches('/')
    }

    /// Announces a completed trip with a dashboard link and a details
    /// button.
    pub async fn notify_trip_completed(&self, trip: &Trip) -> bool {
        let message: OutgoingMessage = OutgoingMessage::markdown(
            &self.settings.chat_id,
            messages::trip_completed(trip, self.settings.timezone),
        )
        .with_keyboard(vec![vec![
            InlineKeyboardButton::link("📊 Dashboard", &format!("{}/dashboard", self.base_url())),
            InlineKeyboardButton::callback("📋 Details", &format!("{TRIP_DETAIL_PREFIX}{}", trip.id)),
        ]]);
        self.post(&message, "trip_completed").await
    }

    /// Posts the daily report, listing at most five trips.
    pub async fn send_daily_report(&self, report: &Report) -> bool {
        let message: OutgoingMessage = OutgoingMessage::markdown(
            &self.settings.chat_id,
            messages::daily_report(report, self.base_url(), self.settings.timezone),
        );
        self.post(&message, "daily_report").await
    }

    pub async fn send_alert(&self, text: &str, priority: AlertPriority) -> bool {
        let message: OutgoingMessage = OutgoingMessage::markdown(
            &self.settings.chat_id,
            messages::alert(text, priority, Utc::now(), self.settings.timezone),
        );
        self.post(&message, "alert").await
    }

    pub async fn send_custom_notification(&self, notification: &CustomNotification) -> bool {
        let message: OutgoingMessage = OutgoingMessage::markdown(
            &self.settings.chat_id,
            messages::custom(notification, self.settings.timezone),
        );
        self.post(&message, "custom").await
    }

    /// Registers `{app_url}/telegram/webhook` as the bot's webhook.
    pub async fn set_webhook(&self) -> bool {
        let Some(bot) = &self.bot else {
            warn!("Telegram not configured, skipping webhook registration");
            return false;
        };

        let url: String = format!("{}{WEBHOOK_PATH}", self.base_url());
        match bot.set_webhook(&url).await {
            Ok(()) => {
                info!(url = %url, "Telegram webhook registered");
                true
            }
            Err(e) => {
                error!(url = %url, error = %e, "Failed to register Telegram webhook");
                false
            }
        }
    }

    pub async fn delete_webhook(&self) -> bool {
        let Some(bot) = &self.bot else {
            warn!("Telegram not configured, skipping webhook removal");
            return false;
        };

        match bot.delete_webhook().await {
            Ok(()) => {
                info!("Telegram webhook removed");
                true
            }
            Err(e) => {
                error!(error = %e, "Failed to remove Telegram webhook");
                false
            }
        }
    }

    /// Returns the bot identity, or `None` when unconfigured or unreachable.
    pub async fn get_bot_info(&self) -> Option<BotInfo> {
        let Some(bot) = &self.bot else {
            warn!("Telegram not configured, no bot info available");
            return None;
        };

        match bot.get_me().await {
            Ok(info) => Some(info),
            Err(e) => {
                error!(error = %e, "Failed to fetch Telegram bot info");
                None
            }
        }
    }

    /// Answers one inbound update.
    ///
    /// Text messages get a command reply in their own chat. A
    /// `trip_detail_<id>` callback gets the trip's latest stored state, and
    /// every callback query is acknowledged. Returns true if at least one
    /// reply was delivered.
    pub async fn handle_webhook(&self, update: &Update, source: &dyn BotCommandSource) -> bool {
        let Some(bot) = &self.bot else {
            warn!(update_id = update.update_id, "Telegram not configured, ignoring update");
            return false;
        };

        let mut replied: bool = false;
        if let Some(message) = &update.message {
            replied |= self.answer_message(bot.as_ref(), message, source).await;
        }
        if let Some(query) = &update.callback_query {
            replied |= self.answer_callback(bot.as_ref(), query, source).await;
        }
        replied
    }

    async fn answer_message(
        &self,
        bot: &dyn BotApi,
        message: &Message,
        source: &dyn BotCommandSource,
    ) -> bool {
        let Some(command) = message.command() else {
            debug!(message_id = message.message_id, "Ignoring message without text");
            return false;
        };

        let tz: Tz = self.settings.timezone;
        let text: String = match command {
            "/start" => String::from(messages::START_TEXT),
            "/help" => String::from(messages::HELP_TEXT),
            "/status" => messages::status(&source.system_status().await, Utc::now(), tz),
            "/today" => source.today_report().await.map_or_else(
                || String::from(messages::STORE_UNAVAILABLE_TEXT),
                |report| messages::today(&report, self.base_url(), tz),
            ),
            _ => String::from(messages::UNKNOWN_COMMAND_TEXT),
        };

        let reply: OutgoingMessage = OutgoingMessage::markdown(&message.chat.id.to_string(), text);
        Self::deliver(bot, &reply, "command_reply").await
    }

    async fn answer_callback(
        &self,
        bot: &dyn BotApi,
        query: &CallbackQuery,
        source: &dyn BotCommandSource,
    ) -> bool {
        let mut replied: bool = false;

        let trip_id: Option<&str> = query
            .data
            .as_deref()
            .and_then(|data| data.strip_prefix(TRIP_DETAIL_PREFIX));
        if let (Some(trip_id), Some(message)) = (trip_id, &query.message) {
            let text: String = source.trip_detail(trip_id).await.map_or_else(
                || messages::trip_not_found(trip_id),
                |detail| messages::trip_detail(&detail, self.settings.timezone),
            );
            let reply: OutgoingMessage =
                OutgoingMessage::markdown(&message.chat.id.to_string(), text);
            replied = Self::deliver(bot, &reply, "trip_detail").await;
        }

        if let Err(e) = bot.answer_callback_query(&query.id).await {
            error!(callback_query_id = %query.id, error = %e, "Failed to answer callback query");
        }
        replied
    }

    async fn post(&self, message: &OutgoingMessage, kind: &str) -> bool {
        let Some(bot) = &self.bot else {
            warn!(kind, "Telegram not configured, skipping message");
            return false;
        };
        Self::deliver(bot.as_ref(), message, kind).await
    }

    async fn deliver(bot: &dyn BotApi, message: &OutgoingMessage, kind: &str) -> bool {
        let result: Result<(), NotifyError> = bot.send_message(message).await;
        match result {
            Ok(()) => {
                info!(kind, chat_id = %message.chat_id, "Telegram message sent");
                true
            }
            Err(e) => {
                error!(kind, chat_id = %message.chat_id, error = %e, "Failed to send Telegram message");
                false
            }
        }
    }
}
