// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Delivery through the `SendGrid` v3 HTTP API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use super::{MailTransport, OutgoingMail};
use crate::error::NotifyError;

const SENDGRID_API_BASE: &str = "https://api.sendgrid.com/v3";

#[derive(Serialize)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct Personalization<'a> {
    to: [Address<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    value: &'a str,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: Address<'a>,
    subject: &'a str,
    content: [Content<'a>; 1],
}

/// Builds the `mail/send` body. Each recipient gets its own
/// personalization so addresses are not disclosed to each other.
fn send_request(mail: &OutgoingMail) -> SendRequest<'_> {
    SendRequest {
        personalizations: mail
            .to
            .iter()
            .map(|email| Personalization {
                to: [Address {
                    email: email.as_str(),
                }],
            })
            .collect(),
        from: Address { email: &mail.from },
        subject: &mail.subject,
        content: [Content {
            kind: "text/html",
            value: &mail.html,
        }],
    }
}

/// Mail transport posting to the `SendGrid` API.
pub struct SendGridTransport {
    http: reqwest::Client,
    api_key: String,
}

impl std::fmt::Debug for SendGridTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SendGridTransport")
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl SendGridTransport {
    /// Creates a transport authenticating with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: &str, timeout: Duration) -> Result<Self, NotifyError> {
        let http: reqwest::Client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl MailTransport for SendGridTransport {
    fn service_name(&self) -> &'static str {
        "sendgrid"
    }

    async fn deliver(&self, mail: &OutgoingMail) -> Result<(), NotifyError> {
        let response: reqwest::Response = self
            .http
            .post(format!("{SENDGRID_API_BASE}/mail/send"))
            .bearer_auth(&self.api_key)
            .json(&send_request(mail))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: String = response.text().await.unwrap_or_default();
            return Err(NotifyError::RemoteRejected {
                status: status.as_u16(),
                body,
            });
        }
        debug!(recipients = mail.to.len(), "SendGrid accepted message");
        Ok(())
    }

    /// Lists the API key's scopes; a key that cannot be used answers 401.
    async fn verify(&self) -> Result<bool, NotifyError> {
        let response: reqwest::Response = self
            .http
            .get(format!("{SENDGRID_API_BASE}/scopes"))
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        Ok(response.status().is_success())
    }
}
