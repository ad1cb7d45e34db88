// src/projector.rs

//! Per-type row projection.
//!
//! Turns a sync payload into a `SyncPlan`: the worksheet title, its fixed
//! header row, and one display-ready row per record. Column order here
//! must stay in step with the header lists; staff filter the sheets by
//! these columns.

use serde_json::{Value, json};

use crate::error::{AppError, Result};
use crate::locale;
use crate::models::{AggregateStats, Row, SubmissionRecord, SyncKind, SyncPlan};

/// Header row for the Contact Submissions worksheet.
pub const CONTACT_HEADERS: [&str; 12] = [
    "Ngày đăng ký",
    "Họ tên",
    "Tuổi",
    "SĐT",
    "Email",
    "Mục đích",
    "Hình thức",
    "Cơ sở",
    "Tin nhắn",
    "Trạng thái",
    "Ghi chú",
    "Cập nhật",
];

/// Header row for the Registration Submissions worksheet.
pub const REGISTRATION_HEADERS: [&str; 10] = [
    "Ngày đăng ký",
    "Họ tên",
    "Tuổi",
    "SĐT",
    "Mục đích",
    "Hình thức",
    "Cơ sở",
    "Trạng thái",
    "Ghi chú",
    "Cập nhật",
];

/// Header row for the Statistics worksheet.
pub const STATS_HEADERS: [&str; 3] = ["Chỉ số", "Giá trị", "Cập nhật"];

/// Build the full sync plan for a payload.
///
/// Contact and registration payloads must be arrays (empty is fine and
/// yields zero rows); stats payloads must be a single object.
pub fn plan_for(kind: SyncKind, data: &Value) -> Result<SyncPlan> {
    match kind {
        SyncKind::Contact => {
            let records = parse_records(kind, data)?;
            Ok(SyncPlan {
                sheet_name: kind.sheet_name(),
                headers: CONTACT_HEADERS.to_vec(),
                rows: records.iter().map(contact_row).collect(),
            })
        }
        SyncKind::Registration => {
            let records = parse_records(kind, data)?;
            Ok(SyncPlan {
                sheet_name: kind.sheet_name(),
                headers: REGISTRATION_HEADERS.to_vec(),
                rows: records.iter().map(registration_row).collect(),
            })
        }
        SyncKind::Stats => {
            if !data.is_object() {
                return Err(AppError::validation(
                    "stats payload must be a single object of counters",
                ));
            }
            let stats: AggregateStats = serde_json::from_value(data.clone())
                .map_err(|e| AppError::validation(format!("invalid stats payload: {e}")))?;
            Ok(SyncPlan {
                sheet_name: kind.sheet_name(),
                headers: STATS_HEADERS.to_vec(),
                rows: stats_rows(&stats),
            })
        }
    }
}

fn parse_records(kind: SyncKind, data: &Value) -> Result<Vec<SubmissionRecord>> {
    let items = data.as_array().ok_or_else(|| {
        AppError::validation(format!("{kind} payload must be an array of records"))
    })?;
    items
        .iter()
        .map(|item| {
            serde_json::from_value(item.clone())
                .map_err(|e| AppError::validation(format!("invalid {kind} record: {e}")))
        })
        .collect()
}

/// Project a contact submission into its 12-column row.
fn contact_row(record: &SubmissionRecord) -> Row {
    vec![
        json!(locale::format_date(&record.created_at)),
        json!(record.full_name),
        age_cell(record),
        json!(record.phone),
        json!(record.email),
        json!(record.purpose),
        json!(locale::training_type_label(&record.training_type)),
        json!(locale::location_name(&record.location)),
        json!(record.message),
        json!(locale::status_label(&record.status)),
        json!(record.notes),
        json!(locale::format_date(&record.updated_at)),
    ]
}

/// Project a registration into its 10-column row.
fn registration_row(record: &SubmissionRecord) -> Row {
    vec![
        json!(locale::format_date(&record.created_at)),
        json!(record.full_name),
        age_cell(record),
        json!(record.phone),
        json!(record.purpose),
        json!(locale::training_type_label(&record.training_type)),
        json!(locale::location_name(&record.location)),
        json!(locale::status_label(&record.status)),
        json!(record.notes),
        json!(locale::format_date(&record.updated_at)),
    ]
}

/// The five fixed statistics rows, stamped with the current time.
fn stats_rows(stats: &AggregateStats) -> Vec<Row> {
    let now = locale::format_now();
    vec![
        vec![json!("Tổng đăng ký"), json!(stats.total), json!(now)],
        vec![json!("Chờ xử lý"), json!(stats.pending), json!(now)],
        vec![json!("Đã liên hệ"), json!(stats.contacted), json!(now)],
        vec![json!("Đã ghi danh"), json!(stats.enrolled), json!(now)],
        vec![json!("Từ chối"), json!(stats.rejected), json!(now)],
    ]
}

fn age_cell(record: &SubmissionRecord) -> Value {
    record
        .age
        .as_ref()
        .map(|age| age.to_cell())
        .unwrap_or_else(|| json!(""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_contact() -> Value {
        json!([{
            "full_name": "Nguyễn Văn A",
            "age": 25,
            "phone": "0123456789",
            "purpose": "sức khỏe",
            "training_type": "offline",
            "location": "van-yen",
            "status": "pending",
            "created_at": "2024-12-08T10:00:00Z",
        }])
    }

    #[test]
    fn contact_rows_match_header_width() {
        let plan = plan_for(SyncKind::Contact, &sample_contact()).unwrap();
        assert_eq!(plan.sheet_name, "Contact Submissions");
        for row in &plan.rows {
            assert_eq!(row.len(), plan.headers.len());
        }
    }

    #[test]
    fn registration_rows_match_header_width() {
        let plan = plan_for(SyncKind::Registration, &sample_contact()).unwrap();
        assert_eq!(plan.sheet_name, "Registration Submissions");
        for row in &plan.rows {
            assert_eq!(row.len(), plan.headers.len());
        }
    }

    #[test]
    fn contact_row_renders_display_labels() {
        let plan = plan_for(SyncKind::Contact, &sample_contact()).unwrap();
        let row = &plan.rows[0];
        assert_eq!(row[6], json!("Trực tiếp"));
        assert_eq!(row[7], json!("Văn Yên - Hà Đông"));
        assert_eq!(row[9], json!("Chờ xử lý"));
    }

    #[test]
    fn snake_and_camel_case_project_identically() {
        let snake = json!([{ "full_name": "A", "created_at": "2024-12-08T10:00:00Z" }]);
        let camel = json!([{ "fullName": "A", "createdAt": "2024-12-08T10:00:00Z" }]);
        let a = plan_for(SyncKind::Contact, &snake).unwrap();
        let b = plan_for(SyncKind::Contact, &camel).unwrap();
        assert_eq!(a.rows, b.rows);
    }

    #[test]
    fn unknown_codes_pass_through_raw() {
        let data = json!([{ "location": "somewhere-else", "status": "archived" }]);
        let plan = plan_for(SyncKind::Contact, &data).unwrap();
        assert_eq!(plan.rows[0][7], json!("somewhere-else"));
        assert_eq!(plan.rows[0][9], json!("archived"));
    }

    #[test]
    fn empty_array_yields_empty_rows() {
        let plan = plan_for(SyncKind::Registration, &json!([])).unwrap();
        assert!(plan.rows.is_empty());
        assert_eq!(plan.headers.len(), 10);
    }

    #[test]
    fn non_array_payload_is_rejected() {
        assert!(plan_for(SyncKind::Contact, &json!({ "total": 1 })).is_err());
    }

    #[test]
    fn stats_plan_has_five_fixed_rows() {
        let plan = plan_for(
            SyncKind::Stats,
            &json!({ "total": 10, "pending": 4, "enrolled": 3 }),
        )
        .unwrap();
        assert_eq!(plan.rows.len(), 5);
        assert_eq!(plan.rows[0][0], json!("Tổng đăng ký"));
        assert_eq!(plan.rows[0][1], json!(10));
        assert_eq!(plan.rows[1][1], json!(4));
        // Missing counters default to zero.
        assert_eq!(plan.rows[2][1], json!(0));
        for row in &plan.rows {
            assert_eq!(row.len(), plan.headers.len());
        }
    }

    #[test]
    fn stats_payload_must_be_an_object() {
        assert!(plan_for(SyncKind::Stats, &json!([1, 2, 3])).is_err());
    }
}
