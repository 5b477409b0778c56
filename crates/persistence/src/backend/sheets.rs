// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Google Sheets tabular backend (Sheets REST API v4).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use super::service_account::{ServiceAccount, TokenSource};
use crate::error::PersistenceError;
use crate::tabular::{Row, TabularStore};

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const NEW_SHEET_ROWS: u32 = 1000;
const NEW_SHEET_COLUMNS: u32 = 20;

#[derive(Serialize)]
struct ValueRange<'a> {
    values: &'a [Row],
}

#[derive(Deserialize)]
struct ValueRangeResponse {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/// Tabular store backed by one Google spreadsheet.
pub struct SheetsTabularStore {
    spreadsheet_id: String,
    http: reqwest::Client,
    tokens: TokenSource,
}

impl SheetsTabularStore {
    /// Creates a client for the spreadsheet `spreadsheet_id`.
    ///
    /// Returns `Ok(None)` when the spreadsheet id is blank, so callers can
    /// treat the store as unconfigured.
    ///
    /// # Arguments
    ///
    /// * `spreadsheet_id` - The spreadsheet identifier from its URL
    /// * `account` - Service account with edit access to the spreadsheet
    /// * `timeout` - Per-request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        spreadsheet_id: &str,
        account: ServiceAccount,
        timeout: Duration,
    ) -> Result<Option<Self>, PersistenceError> {
        let spreadsheet_id: &str = spreadsheet_id.trim();
        if spreadsheet_id.is_empty() {
            return Ok(None);
        }

        let http: reqwest::Client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Some(Self {
            spreadsheet_id: spreadsheet_id.to_string(),
            tokens: TokenSource::new(account, http.clone()),
            http,
        }))
    }

    /// Builds `.../spreadsheets/{id}/values/{range}{suffix}` with the range
    /// percent-encoded as one path segment.
    fn values_url(&self, range: &str, suffix: &str) -> Result<Url, PersistenceError> {
        let mut url: Url = Url::parse(SHEETS_API_BASE)
            .map_err(|e| PersistenceError::InitializationError(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| {
                PersistenceError::InitializationError(String::from("Invalid Sheets API base URL"))
            })?
            .push(&self.spreadsheet_id)
            .push("values")
            .push(&format!("{range}{suffix}"));
        Ok(url)
    }

    fn batch_update_url(&self) -> String {
        format!("{SHEETS_API_BASE}/{}:batchUpdate", self.spreadsheet_id)
    }

    async fn request(&self, method: Method, url: Url) -> Result<RequestBuilder, PersistenceError> {
        let token: String = self.tokens.access_token().await?;
        Ok(self.http.request(method, url).bearer_auth(token))
    }

    async fn send(builder: RequestBuilder) -> Result<reqwest::Response, PersistenceError> {
        let response: reqwest::Response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body: String = response.text().await.unwrap_or_default();
        Err(PersistenceError::RemoteRejected {
            status: status.as_u16(),
            body,
        })
    }

    async fn clear(&self, range: &str) -> Result<(), PersistenceError> {
        let url: Url = self.values_url(range, ":clear")?;
        let builder: RequestBuilder = self.request(Method::POST, url).await?.json(&json!({}));
        Self::send(builder).await?;
        Ok(())
    }
}

/// Renders a cell returned by the API as the string it displays.
fn cell_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl TabularStore for SheetsTabularStore {
    fn backend_name(&self) -> &'static str {
        "google-sheets"
    }

    async fn append_rows(&self, range: &str, rows: Vec<Row>) -> Result<(), PersistenceError> {
        let mut url: Url = self.values_url(range, ":append")?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "RAW")
            .append_pair("insertDataOption", "INSERT_ROWS");

        let builder: RequestBuilder = self
            .request(Method::POST, url)
            .await?
            .json(&ValueRange { values: &rows });
        Self::send(builder).await?;

        debug!(range, rows = rows.len(), "Appended rows to spreadsheet");
        Ok(())
    }

    async fn read_rows(&self, range: &str) -> Result<Vec<Row>, PersistenceError> {
        let url: Url = self.values_url(range, "")?;
        let builder: RequestBuilder = self.request(Method::GET, url).await?;
        let body: ValueRangeResponse = Self::send(builder).await?.json().await?;

        Ok(body
            .values
            .iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect())
    }

    async fn write_rows(&self, range: &str, rows: Vec<Row>) -> Result<(), PersistenceError> {
        self.clear(range).await?;

        let mut url: Url = self.values_url(range, "")?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");

        let builder: RequestBuilder = self
            .request(Method::PUT, url)
            .await?
            .json(&ValueRange { values: &rows });
        Self::send(builder).await?;

        debug!(range, rows = rows.len(), "Replaced spreadsheet rows");
        Ok(())
    }

    async fn add_sheet(&self, title: &str, headers: Row) -> Result<(), PersistenceError> {
        let whole_sheet: String = format!("'{title}'");
        if self.read_rows(&whole_sheet).await.is_ok() {
            return Err(PersistenceError::SheetExists(title.to_string()));
        }

        let url: Url = Url::parse(&self.batch_update_url())
            .map_err(|e| PersistenceError::InitializationError(e.to_string()))?;
        let request = json!({
            "requests": [{
                "addSheet": {
                    "properties": {
                        "title": title,
                        "gridProperties": {
                            "rowCount": NEW_SHEET_ROWS,
                            "columnCount": NEW_SHEET_COLUMNS,
                        }
                    }
                }
            }]
        });
        let builder: RequestBuilder = self.request(Method::POST, url).await?.json(&request);
        Self::send(builder).await?;

        self.write_rows(&whole_sheet, vec![headers]).await
    }
}
