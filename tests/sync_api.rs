//! End-to-end tests for the sync endpoint, run against the router with
//! an in-memory spreadsheet document.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use sheetsync::http::{AppState, router};
use sheetsync::services::sheets::testing::{FailStep, MemoryStore};

fn app(store: &MemoryStore) -> Router {
    router(AppState {
        store: Arc::new(store.clone()),
        spreadsheet_id: "test-spreadsheet".to_string(),
    })
}

async fn request(app: Router, method: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri("/api/sync-to-sheets");
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn post(app: Router, body: Value) -> (StatusCode, Value) {
    request(app, "POST", Some(body)).await
}

#[tokio::test]
async fn contact_sync_projects_display_labels() {
    let store = MemoryStore::new();
    let body = json!({
        "data": [{
            "full_name": "Nguyễn Văn A",
            "age": 25,
            "phone": "0123456789",
            "purpose": "sức khỏe",
            "training_type": "offline",
            "location": "van-yen",
            "status": "pending",
            "created_at": "2024-12-08T10:00:00Z",
        }],
        "type": "contact",
    });

    let (status, response) = post(app(&store), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["success"], json!(true));
    assert_eq!(response["count"], json!(1));
    assert_eq!(response["sheetName"], json!("Contact Submissions"));

    let sheet = store.sheet("Contact Submissions").await.unwrap();
    let row = &sheet.rows[0];
    assert!(row.contains(&json!("Văn Yên - Hà Đông")));
    assert!(row.contains(&json!("Trực tiếp")));
    assert!(row.contains(&json!("Chờ xử lý")));
    assert!(!row.contains(&json!("van-yen")));
}

#[tokio::test]
async fn second_sync_replaces_the_first() {
    let store = MemoryStore::new();
    let first = json!({ "data": [{ "full_name": "A" }, { "full_name": "B" }], "type": "registration" });
    let second = json!({ "data": [{ "full_name": "C" }], "type": "registration" });

    post(app(&store), first).await;
    let (status, response) = post(app(&store), second).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["count"], json!(1));
    let sheet = store.sheet("Registration Submissions").await.unwrap();
    assert_eq!(sheet.rows.len(), 1);
}

#[tokio::test]
async fn malformed_json_gets_the_error_envelope() {
    let store = MemoryStore::new();
    let response = app(&store)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/sync-to-sheets")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{ not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Invalid JSON body"));
    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn missing_type_is_rejected_without_upstream_calls() {
    let store = MemoryStore::new();
    let (status, response) = post(app(&store), json!({ "data": [] })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], json!("Missing data or type parameter"));
    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn missing_data_is_rejected_without_upstream_calls() {
    let store = MemoryStore::new();
    let (status, response) = post(app(&store), json!({ "type": "contact" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], json!("Missing data or type parameter"));
    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn unrecognized_type_is_rejected_without_upstream_calls() {
    let store = MemoryStore::new();
    let (status, response) = post(
        app(&store),
        json!({ "data": [], "type": "memberships" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response["error"],
        json!("Invalid type. Use: contact, registration, or stats")
    );
    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn empty_batch_succeeds_with_count_zero() {
    let store = MemoryStore::new();
    let (status, response) = post(app(&store), json!({ "data": [], "type": "contact" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["count"], json!(0));

    // Headers are still written even with nothing to append.
    let sheet = store.sheet("Contact Submissions").await.unwrap();
    assert_eq!(sheet.headers.len(), 12);
    assert!(sheet.rows.is_empty());
}

#[tokio::test]
async fn stats_sync_writes_the_five_counter_rows() {
    let store = MemoryStore::new();
    let body = json!({
        "data": { "total": 12, "pending": 5, "contacted": 3, "enrolled": 2, "rejected": 2 },
        "type": "stats",
    });

    let (status, response) = post(app(&store), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["count"], json!(5));
    assert_eq!(response["sheetName"], json!("Statistics"));

    let sheet = store.sheet("Statistics").await.unwrap();
    assert_eq!(sheet.rows.len(), 5);
    assert_eq!(sheet.rows[0][0], json!("Tổng đăng ký"));
    assert_eq!(sheet.rows[0][1], json!(12));
}

#[tokio::test]
async fn upstream_failure_maps_to_internal_error() {
    let store = MemoryStore::new().failing_at(FailStep::Titles);
    let (status, response) = post(
        app(&store),
        json!({ "data": [{ "full_name": "A" }], "type": "contact" }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response["error"], json!("Lỗi khi đồng bộ dữ liệu"));
    assert!(response["details"].as_str().is_some());
}

#[tokio::test]
async fn status_probe_is_always_ready() {
    let store = MemoryStore::new().failing_at(FailStep::Titles);
    let (status, response) = request(app(&store), "GET", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["status"], json!("ready"));
    assert_eq!(response["spreadsheetId"], json!("test-spreadsheet"));
    // The probe performs no upstream call, so the broken store is never touched.
    assert_eq!(store.call_count(), 0);
}
