// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification dispatch for fleetdash.
//!
//! Two dispatchers turn reports and trips into human-readable messages:
//!
//! - `Mailer` renders HTML mail and hands it to a `MailTransport`
//!   (SMTP via `lettre`, or the `SendGrid` v3 API)
//! - `TelegramNotifier` renders Markdown chat messages and sends them
//!   through a `BotApi` (the Telegram Bot HTTP API)
//!
//! ## Failure policy
//!
//! Dispatcher operations return `bool` (or `Option` for bot info) and never
//! return errors. An unconfigured dispatcher or an empty recipient list is
//! logged as a warning; a transport failure is logged as an error. Each
//! call delivers at most once. There are no retries.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod format;
mod mail;
mod telegram;

#[cfg(test)]
mod tests;

pub use error::NotifyError;
pub use format::{
    escape_html, escape_markdown, format_amount, format_count, format_date, format_datetime,
    format_millions, status_label,
};
pub use mail::sendgrid::SendGridTransport;
pub use mail::smtp::{SmtpSettings, SmtpTransport};
pub use mail::{MailSettings, MailTransport, Mailer, OutgoingMail, parse_recipients};
pub use telegram::bot_api::{
    BotApi, BotInfo, InlineKeyboardButton, InlineKeyboardMarkup, OutgoingMessage, TelegramBotApi,
};
pub use telegram::update::{CallbackQuery, Chat, Message, Update, User};
pub use telegram::{
    AlertPriority, BotCommandSource, ChatSettings, CustomNotification, NotificationKind, SystemStatus,
    TelegramNotifier, TripDetail, WEBHOOK_PATH,
};
