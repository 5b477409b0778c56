// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The subset of Telegram `Update` objects the webhook understands.
//!
//! Fields we never read are ignored on decode.

use serde::{Deserialize, Serialize};

/// One inbound webhook update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    pub from: Option<User>,
    pub text: Option<String>,
    #[serde(default)]
    pub date: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub first_name: String,
    pub username: Option<String>,
}

/// A press on an inline keyboard button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: Option<User>,
    /// The message carrying the keyboard, when still available.
    pub message: Option<Message>,
    pub data: Option<String>,
}

impl Message {
    /// The command word of a text message, without any `@botname` suffix.
    ///
    /// Returns `None` for messages without text.
    #[must_use]
    pub fn command(&self) -> Option<&str> {
        let first: &str = self.text.as_deref()?.split_whitespace().next()?;
        Some(first.split('@').next().unwrap_or(first))
    }
}
