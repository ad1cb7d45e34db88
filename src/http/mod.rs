// src/http/mod.rs

//! HTTP surface: the sync endpoint router and its shared state.

mod sync;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::services::SpreadsheetStore;

/// Shared state for request handlers.
///
/// The store is injected behind the trait so tests can run the router
/// against an in-memory document.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SpreadsheetStore>,
    pub spreadsheet_id: String,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/sync-to-sheets",
            get(sync::sync_status).post(sync::sync_to_sheets),
        )
        .with_state(state)
}
