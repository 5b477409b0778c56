// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Telegram Bot API client.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::update::User;
use crate::error::NotifyError;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// One inline keyboard button; exactly one of `url` or `callback_data` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
}

impl InlineKeyboardButton {
    #[must_use]
    pub fn link(text: &str, url: &str) -> Self {
        Self {
            text: text.to_string(),
            url: Some(url.to_string()),
            callback_data: None,
        }
    }

    #[must_use]
    pub fn callback(text: &str, data: &str) -> Self {
        Self {
            text: text.to_string(),
            url: None,
            callback_data: Some(data.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

/// A `sendMessage` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingMessage {
    pub chat_id: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl OutgoingMessage {
    /// A message rendered with the legacy `Markdown` parse mode.
    #[must_use]
    pub fn markdown(chat_id: &str, text: String) -> Self {
        Self {
            chat_id: chat_id.to_string(),
            text,
            parse_mode: Some("Markdown"),
            reply_markup: None,
        }
    }

    #[must_use]
    pub fn with_keyboard(mut self, rows: Vec<Vec<InlineKeyboardButton>>) -> Self {
        self.reply_markup = Some(InlineKeyboardMarkup {
            inline_keyboard: rows,
        });
        self
    }
}

/// Identity of the bot as reported by `getMe`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotInfo {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: String,
    pub is_bot: bool,
}

impl From<User> for BotInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            is_bot: user.is_bot,
        }
    }
}

/// The Bot API methods the notifier calls.
#[async_trait]
pub trait BotApi: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the API rejects the message or cannot be reached.
    async fn send_message(&self, message: &OutgoingMessage) -> Result<(), NotifyError>;

    /// Points the bot's webhook at `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request or cannot be reached.
    async fn set_webhook(&self, url: &str) -> Result<(), NotifyError>;

    /// # Errors
    ///
    /// Returns an error if the API rejects the request or cannot be reached.
    async fn delete_webhook(&self) -> Result<(), NotifyError>;

    /// # Errors
    ///
    /// Returns an error if the API rejects the request or cannot be reached.
    async fn get_me(&self) -> Result<BotInfo, NotifyError>;

    /// Stops the client-side spinner on a pressed inline button.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request or cannot be reached.
    async fn answer_callback_query(&self, callback_query_id: &str) -> Result<(), NotifyError>;
}

#[derive(Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

/// `BotApi` over HTTPS.
pub struct TelegramBotApi {
    http: reqwest::Client,
    token: String,
}

impl std::fmt::Debug for TelegramBotApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramBotApi")
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl TelegramBotApi {
    /// Creates a client for the bot identified by `token`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(token: &str, timeout: Duration) -> Result<Self, NotifyError> {
        let http: reqwest::Client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            token: token.to_string(),
        })
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        body: &impl Serialize,
    ) -> Result<T, NotifyError> {
        let url: String = format!("{TELEGRAM_API_BASE}/bot{}/{method}", self.token);
        let response: reqwest::Response = self.http.post(url).json(body).send().await?;
        let status = response.status();
        let envelope: ApiResponse<T> = response.json().await?;

        if !envelope.ok {
            return Err(NotifyError::BotApi(envelope.description.unwrap_or_else(|| {
                format!("{method} failed with status {}", status.as_u16())
            })));
        }
        envelope
            .result
            .ok_or_else(|| NotifyError::BotApi(format!("{method} returned no result")))
    }
}

#[async_trait]
impl BotApi for TelegramBotApi {
    async fn send_message(&self, message: &OutgoingMessage) -> Result<(), NotifyError> {
        let _: serde_json::Value = self.call("sendMessage", message).await?;
        Ok(())
    }

    async fn set_webhook(&self, url: &str) -> Result<(), NotifyError> {
        let _: bool = self.call("setWebhook", &json!({ "url": url })).await?;
        Ok(())
    }

    async fn delete_webhook(&self) -> Result<(), NotifyError> {
        let _: bool = self.call("deleteWebhook", &json!({})).await?;
        Ok(())
    }

    async fn get_me(&self) -> Result<BotInfo, NotifyError> {
        let user: User = self.call("getMe", &json!({})).await?;
        Ok(user.into())
    }

    async fn answer_callback_query(&self, callback_query_id: &str) -> Result<(), NotifyError> {
        let _: bool = self
            .call(
                "answerCallbackQuery",
                &json!({ "callback_query_id": callback_query_id }),
            )
            .await?;
        Ok(())
    }
}
