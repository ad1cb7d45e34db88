// src/pipeline/export.rs

//! Bulk export: pull everything from the content API and republish all
//! three worksheets.
//!
//! The three syncs run concurrently; each touches its own worksheet, so
//! there is nothing to coordinate between them.

use tracing::info;

use crate::error::Result;
use crate::models::{AggregateStats, SyncKind, SyncOutcome};
use crate::projector::plan_for;
use crate::services::{ContentClient, SpreadsheetStore};

use super::sync::run_sync;

/// Outcome of a full export, one entry per worksheet.
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub contacts: SyncOutcome,
    pub registrations: SyncOutcome,
    pub stats: SyncOutcome,
}

/// Fetch contacts and registrations, tally statistics over the union,
/// and sync all three worksheets.
pub async fn run_export(
    content: &ContentClient,
    store: &dyn SpreadsheetStore,
) -> Result<ExportReport> {
    let (contacts, registrations) = tokio::try_join!(
        content.fetch_all_contacts(),
        content.fetch_all_registrations(),
    )?;
    info!(
        contacts = contacts.len(),
        registrations = registrations.len(),
        "fetched submissions for export"
    );

    let stats = AggregateStats::tally(
        contacts
            .iter()
            .map(|c| c.status.as_str())
            .chain(registrations.iter().map(|r| r.status.as_str())),
    );

    let contact_plan = plan_for(SyncKind::Contact, &serde_json::to_value(&contacts)?)?;
    let registration_plan =
        plan_for(SyncKind::Registration, &serde_json::to_value(&registrations)?)?;
    let stats_plan = plan_for(SyncKind::Stats, &serde_json::to_value(stats)?)?;

    let (contacts, registrations, stats) = tokio::try_join!(
        run_sync(store, &contact_plan),
        run_sync(store, &registration_plan),
        run_sync(store, &stats_plan),
    )?;

    Ok(ExportReport {
        contacts,
        registrations,
        stats,
    })
}
