// src/http/sync.rs

//! Handlers for `/api/sync-to-sheets`.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use tracing::error;

use crate::error::AppError;
use crate::models::SyncKind;
use crate::pipeline::run_sync;
use crate::projector::plan_for;

use super::AppState;

/// `POST /api/sync-to-sheets`: replace one worksheet from a batch of
/// records. Validation failures never reach the spreadsheet service.
///
/// The body is parsed by hand so every rejection, including malformed
/// JSON, uses the same `{ "error": ... }` shape.
pub async fn sync_to_sheets(State(state): State<AppState>, body: Bytes) -> Response {
    let body: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(_) => return bad_request("Invalid JSON body"),
    };

    let data = match present(&body, "data") {
        Some(value) => value,
        None => return missing_parameter(),
    };
    let kind = match present(&body, "type") {
        Some(value) => value,
        None => return missing_parameter(),
    };

    let kind = match kind.as_str().and_then(SyncKind::parse) {
        Some(kind) => kind,
        None => {
            return bad_request("Invalid type. Use: contact, registration, or stats");
        }
    };

    let plan = match plan_for(kind, data) {
        Ok(plan) => plan,
        Err(AppError::Validation(message)) => return bad_request(&message),
        Err(other) => return sync_failure(other),
    };

    match run_sync(state.store.as_ref(), &plan).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": format!(
                    "Đồng bộ thành công {} dòng vào {}",
                    outcome.count, outcome.sheet_name
                ),
                "count": outcome.count,
                "sheetName": outcome.sheet_name,
            })),
        )
            .into_response(),
        Err(err) => sync_failure(err),
    }
}

/// `GET /api/sync-to-sheets`: liveness probe. Touches nothing upstream.
pub async fn sync_status(State(state): State<AppState>) -> Response {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "spreadsheetId": state.spreadsheet_id,
            "message": "Google Sheets sync service is ready",
        })),
    )
        .into_response()
}

/// A field counts as present only when it exists and is not JSON null.
fn present<'a>(body: &'a Value, field: &str) -> Option<&'a Value> {
    body.get(field).filter(|v| !v.is_null())
}

fn missing_parameter() -> Response {
    bad_request("Missing data or type parameter")
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

fn sync_failure(err: AppError) -> Response {
    error!(%err, "sync failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "Lỗi khi đồng bộ dữ liệu",
            "details": err.to_string(),
        })),
    )
        .into_response()
}
