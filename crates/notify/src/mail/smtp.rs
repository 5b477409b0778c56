// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! SMTP delivery through `lettre`.
//!
//! Port 465 uses implicit TLS; any other port upgrades with STARTTLS.
//! Credentials are optional so an unauthenticated relay can be used.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::AsyncSmtpTransportBuilder;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{MailTransport, OutgoingMail};
use crate::error::NotifyError;

const IMPLICIT_TLS_PORT: u16 = 465;

/// Connection settings for an SMTP relay.
#[derive(Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Mail transport speaking SMTP to a relay.
pub struct SmtpTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpTransport {
    /// Creates a transport for the relay described by `settings`.
    ///
    /// No connection is opened until the first delivery.
    ///
    /// # Errors
    ///
    /// Returns an error if the relay host name is invalid.
    pub fn new(settings: &SmtpSettings) -> Result<Self, NotifyError> {
        let builder: AsyncSmtpTransportBuilder = if settings.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
        };
        let mut builder: AsyncSmtpTransportBuilder =
            builder.port(settings.port).timeout(Some(settings.timeout));
        if !settings.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
        })
    }
}

fn mailbox(address: &str) -> Result<Mailbox, NotifyError> {
    address
        .parse::<Mailbox>()
        .map_err(|e| NotifyError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })
}

/// Builds one HTML message addressed to every recipient of `mail`.
pub fn build_message(mail: &OutgoingMail) -> Result<Message, NotifyError> {
    let mut builder = Message::builder()
        .from(mailbox(&mail.from)?)
        .subject(mail.subject.clone());
    for recipient in &mail.to {
        builder = builder.to(mailbox(recipient)?);
    }
    Ok(builder
        .header(ContentType::TEXT_HTML)
        .body(mail.html.clone())?)
}

#[async_trait]
impl MailTransport for SmtpTransport {
    fn service_name(&self) -> &'static str {
        "smtp"
    }

    async fn deliver(&self, mail: &OutgoingMail) -> Result<(), NotifyError> {
        let message: Message = build_message(mail)?;
        self.transport.send(message).await?;
        Ok(())
    }

    async fn verify(&self) -> Result<bool, NotifyError> {
        Ok(self.transport.test_connection().await?)
    }
}
