// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Google service account authentication.
//!
//! Access tokens are obtained with the JWT bearer grant: a short-lived
//! RS256 assertion signed with the account's private key is exchanged at
//! the token endpoint. Tokens are cached until shortly before expiry.

use std::time::{Duration, Instant};

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::PersistenceError;

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const EXPIRY_BUFFER: Duration = Duration::from_secs(60);

/// Service account identity.
#[derive(Clone)]
pub struct ServiceAccount {
    client_email: String,
    private_key: String,
}

impl ServiceAccount {
    /// Builds credentials from environment-style values.
    ///
    /// Escaped `\n` sequences in the key are expanded. Returns `None` when
    /// either value is blank or still holds a template placeholder.
    #[must_use]
    pub fn from_parts(client_email: &str, private_key: &str) -> Option<Self> {
        let client_email: &str = client_email.trim();
        let private_key: String = private_key.replace("\\n", "\n");
        if client_email.is_empty()
            || private_key.trim().is_empty()
            || client_email.contains("your-")
            || private_key.contains("Your-Private-Key-Here")
        {
            return None;
        }
        Some(Self {
            client_email: client_email.to_string(),
            private_key,
        })
    }

    /// The service account email.
    #[must_use]
    pub fn client_email(&self) -> &str {
        &self.client_email
    }
}

impl std::fmt::Debug for ServiceAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccount")
            .field("client_email", &self.client_email)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

struct CachedToken {
    access_token: String,
    obtained_at: Instant,
    expires_in: Duration,
}

impl CachedToken {
    fn is_expired(&self) -> bool {
        self.obtained_at.elapsed() + EXPIRY_BUFFER > self.expires_in
    }
}

/// Fetches and caches access tokens for one service account.
pub struct TokenSource {
    account: ServiceAccount,
    http: reqwest::Client,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenSource {
    /// Creates a token source for `account` using `http` for the exchange.
    #[must_use]
    pub const fn new(account: ServiceAccount, http: reqwest::Client) -> Self {
        Self {
            account,
            http,
            cached: Mutex::const_new(None),
        }
    }

    /// Returns a valid access token, refreshing it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if signing fails or the token endpoint rejects the
    /// assertion.
    pub async fn access_token(&self) -> Result<String, PersistenceError> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref().filter(|t| !t.is_expired()) {
            return Ok(token.access_token.clone());
        }

        let fresh: CachedToken = self.fetch().await?;
        let access_token: String = fresh.access_token.clone();
        *cached = Some(fresh);
        Ok(access_token)
    }

    async fn fetch(&self) -> Result<CachedToken, PersistenceError> {
        let iat: i64 = Utc::now().timestamp();
        let claims: AssertionClaims<'_> = AssertionClaims {
            iss: &self.account.client_email,
            scope: SHEETS_SCOPE,
            aud: TOKEN_URL,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };
        let key: EncodingKey = EncodingKey::from_rsa_pem(self.account.private_key.as_bytes())?;
        let assertion: String = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key)?;

        debug!(
            client_email = %self.account.client_email,
            "Requesting spreadsheet access token"
        );

        let response = self
            .http
            .post(TOKEN_URL)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", &assertion)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: String = response.text().await.unwrap_or_default();
            return Err(PersistenceError::AuthenticationFailed(format!(
                "token endpoint returned {status}: {body}"
            )));
        }

        let token: TokenResponse = response.json().await?;
        Ok(CachedToken {
            access_token: token.access_token,
            obtained_at: Instant::now(),
            expires_in: Duration::from_secs(token.expires_in.unwrap_or(3600)),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::ServiceAccount;

    #[test]
    fn test_placeholder_credentials_are_unconfigured() {
        assert!(ServiceAccount::from_parts("your-service@project.iam", "KEY").is_none());
        assert!(
            ServiceAccount::from_parts("svc@project.iam", "-----Your-Private-Key-Here-----")
                .is_none()
        );
        assert!(ServiceAccount::from_parts("", "KEY").is_none());
        assert!(ServiceAccount::from_parts("svc@project.iam", "  ").is_none());
    }

    #[test]
    fn test_escaped_newlines_are_expanded() {
        let account = ServiceAccount::from_parts("svc@project.iam", "line1\\nline2").unwrap();

        assert_eq!(account.client_email(), "svc@project.iam");
        assert!(format!("{account:?}").contains("[REDACTED]"));
    }
}
