// src/pipeline/sync.rs

//! The ensure/clear/append sequence.
//!
//! A sync fully replaces one worksheet's data region. The three steps run
//! strictly in order; only the clear step is allowed to fail without
//! aborting the call, and that decision is made here, not inside the
//! step, so the failure is at least observable in the logs.

use serde_json::Value;
use tracing::{info, warn};

use crate::error::Result;
use crate::models::{Row, SyncOutcome, SyncPlan};
use crate::services::SpreadsheetStore;

/// Rows 2..=1000, columns A..Z: the data region a sync owns.
const DATA_REGION: &str = "A2:Z1000";

/// Execute one sync against the store.
///
/// A failure after the clear step leaves the worksheet header-only until
/// the next successful sync; that window is accepted, not guarded.
pub async fn run_sync(store: &dyn SpreadsheetStore, plan: &SyncPlan) -> Result<SyncOutcome> {
    ensure_sheet(store, plan).await?;

    if let Err(error) = clear_data(store, plan.sheet_name).await {
        // A transient clear failure must not block the sync; stale rows
        // below the new ones are the accepted worst case.
        warn!(sheet = plan.sheet_name, %error, "failed to clear data region");
    }

    let count = append_rows(store, plan).await?;
    info!(sheet = plan.sheet_name, count, "sync complete");
    Ok(SyncOutcome {
        sheet_name: plan.sheet_name.to_string(),
        count,
    })
}

/// Create the worksheet if missing, then overwrite its header row.
async fn ensure_sheet(store: &dyn SpreadsheetStore, plan: &SyncPlan) -> Result<()> {
    let titles = store.sheet_titles().await?;
    if !titles.iter().any(|t| t == plan.sheet_name) {
        info!(sheet = plan.sheet_name, "creating worksheet");
        store.add_sheet(plan.sheet_name).await?;
    }

    let header_row: Vec<Row> = vec![plan.headers.iter().map(|h| Value::from(*h)).collect()];
    store
        .update_values(&format!("{}!A1", plan.sheet_name), &header_row)
        .await
}

async fn clear_data(store: &dyn SpreadsheetStore, sheet_name: &str) -> Result<()> {
    store
        .clear_values(&format!("{sheet_name}!{DATA_REGION}"))
        .await
}

async fn append_rows(store: &dyn SpreadsheetStore, plan: &SyncPlan) -> Result<usize> {
    if plan.rows.is_empty() {
        return Ok(0);
    }
    store
        .append_rows(&format!("{}!A2", plan.sheet_name), &plan.rows)
        .await
}
