// src/services/sheets.rs

//! Google Sheets v4 REST client.
//!
//! `SpreadsheetStore` is the seam the sync pipeline and the HTTP layer
//! depend on; `SheetsClient` is the production implementation. Every
//! call is attempted exactly once, with no retry or backoff.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::config::SheetsConfig;
use crate::error::{AppError, Result};
use crate::models::Row;
use crate::services::auth::TokenProvider;

const SHEETS_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Operations the sync pipeline needs from a spreadsheet backend.
#[async_trait]
pub trait SpreadsheetStore: Send + Sync {
    /// Titles of all worksheets in the document.
    async fn sheet_titles(&self) -> Result<Vec<String>>;

    /// Create a new worksheet with the given title.
    async fn add_sheet(&self, title: &str) -> Result<()>;

    /// Overwrite the cells of a range with the given rows (RAW input).
    async fn update_values(&self, range: &str, values: &[Row]) -> Result<()>;

    /// Clear all values in a range.
    async fn clear_values(&self, range: &str) -> Result<()>;

    /// Append rows after a range, inserting new sheet rows.
    ///
    /// Returns the number of rows appended.
    async fn append_rows(&self, range: &str, values: &[Row]) -> Result<usize>;
}

/// Production store backed by the Sheets v4 REST API.
pub struct SheetsClient {
    client: reqwest::Client,
    tokens: Arc<TokenProvider>,
    spreadsheet_id: String,
    base_url: String,
}

impl SheetsClient {
    pub fn new(client: reqwest::Client, tokens: Arc<TokenProvider>, config: &SheetsConfig) -> Self {
        Self {
            client,
            tokens,
            spreadsheet_id: config.spreadsheet_id.clone(),
            base_url: SHEETS_BASE.to_string(),
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value> {
        let token = self.tokens.access_token().await?;
        let response = request.bearer_auth(token).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            let message = body
                .pointer("/error/message")
                .and_then(Value::as_str)
                .unwrap_or("unexpected response")
                .to_string();
            return Err(AppError::sheets(status.as_u16(), message));
        }
        Ok(response.json().await.unwrap_or(Value::Null))
    }

    fn url(&self, suffix: &str) -> String {
        format!("{}/{}{}", self.base_url, self.spreadsheet_id, suffix)
    }
}

#[async_trait]
impl SpreadsheetStore for SheetsClient {
    async fn sheet_titles(&self) -> Result<Vec<String>> {
        let body = self
            .send(
                self.client
                    .get(self.url(""))
                    .query(&[("fields", "sheets.properties.title")]),
            )
            .await?;
        let titles = body
            .pointer("/sheets")
            .and_then(Value::as_array)
            .map(|sheets| {
                sheets
                    .iter()
                    .filter_map(|s| s.pointer("/properties/title"))
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Ok(titles)
    }

    async fn add_sheet(&self, title: &str) -> Result<()> {
        let body = json!({
            "requests": [{ "addSheet": { "properties": { "title": title } } }]
        });
        self.send(self.client.post(self.url(":batchUpdate")).json(&body))
            .await?;
        Ok(())
    }

    async fn update_values(&self, range: &str, values: &[Row]) -> Result<()> {
        let url = self.url(&format!("/values/{range}"));
        self.send(
            self.client
                .put(url)
                .query(&[("valueInputOption", "RAW")])
                .json(&json!({ "values": values })),
        )
        .await?;
        Ok(())
    }

    async fn clear_values(&self, range: &str) -> Result<()> {
        let url = self.url(&format!("/values/{range}:clear"));
        self.send(self.client.post(url).json(&json!({}))).await?;
        Ok(())
    }

    async fn append_rows(&self, range: &str, values: &[Row]) -> Result<usize> {
        let url = self.url(&format!("/values/{range}:append"));
        self.send(
            self.client
                .post(url)
                .query(&[
                    ("valueInputOption", "USER_ENTERED"),
                    ("insertDataOption", "INSERT_ROWS"),
                ])
                .json(&json!({ "values": values })),
        )
        .await?;
        Ok(values.len())
    }
}

/// In-memory spreadsheet store for tests.
pub mod testing {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use tokio::sync::RwLock;

    use crate::error::{AppError, Result};
    use crate::models::Row;

    use super::SpreadsheetStore;

    /// Which store operation should fail.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum FailStep {
        Titles,
        AddSheet,
        Update,
        Clear,
        Append,
    }

    /// Snapshot of one worksheet's contents.
    #[derive(Debug, Clone, Default)]
    pub struct SheetSnapshot {
        pub headers: Row,
        pub rows: Vec<Row>,
    }

    /// A spreadsheet document held in memory.
    #[derive(Clone, Default)]
    pub struct MemoryStore {
        sheets: Arc<RwLock<HashMap<String, SheetSnapshot>>>,
        calls: Arc<AtomicUsize>,
        fail: Option<FailStep>,
    }

    impl MemoryStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// A handle to the same document that fails at the given step.
        pub fn failing_at(&self, step: FailStep) -> Self {
            Self {
                sheets: Arc::clone(&self.sheets),
                calls: Arc::clone(&self.calls),
                fail: Some(step),
            }
        }

        /// Number of store operations attempted.
        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub async fn sheet(&self, name: &str) -> Option<SheetSnapshot> {
            self.sheets.read().await.get(name).cloned()
        }

        fn check(&self, step: FailStep) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail == Some(step) {
                return Err(AppError::sheets(503, "injected failure"));
            }
            Ok(())
        }

        fn sheet_of(range: &str) -> Result<&str> {
            range
                .split('!')
                .next()
                .filter(|s| !s.is_empty())
                .ok_or_else(|| AppError::sheets(400, format!("bad range: {range}")))
        }
    }

    #[async_trait]
    impl SpreadsheetStore for MemoryStore {
        async fn sheet_titles(&self) -> Result<Vec<String>> {
            self.check(FailStep::Titles)?;
            Ok(self.sheets.read().await.keys().cloned().collect())
        }

        async fn add_sheet(&self, title: &str) -> Result<()> {
            self.check(FailStep::AddSheet)?;
            self.sheets
                .write()
                .await
                .insert(title.to_string(), SheetSnapshot::default());
            Ok(())
        }

        async fn update_values(&self, range: &str, values: &[Row]) -> Result<()> {
            self.check(FailStep::Update)?;
            let name = Self::sheet_of(range)?;
            let mut sheets = self.sheets.write().await;
            let sheet = sheets
                .get_mut(name)
                .ok_or_else(|| AppError::sheets(400, format!("no such sheet: {name}")))?;
            if let Some(first) = values.first() {
                sheet.headers = first.clone();
            }
            Ok(())
        }

        async fn clear_values(&self, range: &str) -> Result<()> {
            self.check(FailStep::Clear)?;
            let name = Self::sheet_of(range)?;
            let mut sheets = self.sheets.write().await;
            let sheet = sheets
                .get_mut(name)
                .ok_or_else(|| AppError::sheets(400, format!("no such sheet: {name}")))?;
            sheet.rows.clear();
            Ok(())
        }

        async fn append_rows(&self, range: &str, values: &[Row]) -> Result<usize> {
            self.check(FailStep::Append)?;
            let name = Self::sheet_of(range)?;
            let mut sheets = self.sheets.write().await;
            let sheet = sheets
                .get_mut(name)
                .ok_or_else(|| AppError::sheets(400, format!("no such sheet: {name}")))?;
            sheet.rows.extend(values.iter().cloned());
            Ok(values.len())
        }
    }
}
