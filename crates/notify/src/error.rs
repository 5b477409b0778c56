// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Errors raised by mail and chat transports.
///
/// Dispatchers log these and report `false`; they never reach HTTP callers.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// A sender or recipient address could not be parsed.
    #[error("Invalid mail address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    /// The mail message could not be assembled.
    #[error("Failed to build mail message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// The SMTP relay rejected the connection or the message.
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// An HTTP request could not be sent or its body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A remote API answered with a non-success status.
    #[error("Remote service rejected the request with status {status}: {body}")]
    RemoteRejected { status: u16, body: String },

    /// The Telegram Bot API answered with `ok: false`.
    #[error("Telegram API error: {0}")]
    BotApi(String),

    /// A payload could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A transport could not be constructed.
    #[error("Initialization error: {0}")]
    Initialization(String),
}
