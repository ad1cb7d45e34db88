// src/locale.rs

//! Vietnamese display labels and date formatting for spreadsheet cells.
//!
//! Codes arriving from the content API are machine identifiers; the
//! spreadsheet is read by club staff, so everything is rendered in the
//! labels the admin dashboard uses. Unknown codes pass through raw
//! rather than failing the export.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

/// Offset for Asia/Ho_Chi_Minh. Vietnam has no DST.
const HANOI_OFFSET_SECS: i32 = 7 * 3600;

/// Map a facility code to its display name.
///
/// Unknown codes are returned unchanged.
pub fn location_name(code: &str) -> String {
    match code {
        "van-yen" => "Văn Yên - Hà Đông",
        "kien-hung" => "Kiến Hưng - Hà Đông",
        "thong-nhat" => "CV Thống Nhất",
        "hoa-binh" => "CV Hòa Bình",
        "kim-giang" => "Kim Giang",
        other => other,
    }
    .to_string()
}

/// Map a submission status code to its Vietnamese label.
///
/// Unknown codes are returned unchanged.
pub fn status_label(code: &str) -> String {
    match code {
        "pending" => "Chờ xử lý",
        "contacted" => "Đã liên hệ",
        "enrolled" => "Đã ghi danh",
        "rejected" => "Từ chối",
        other => other,
    }
    .to_string()
}

/// Map a training-type code to its label: "offline" is in-person,
/// everything else is online.
pub fn training_type_label(code: &str) -> String {
    if code == "offline" { "Trực tiếp" } else { "Online" }.to_string()
}

/// Format an upstream timestamp as `dd/mm/yyyy, HH:MM` in Hanoi time.
///
/// Empty input yields an empty cell; a string chrono cannot parse is
/// passed through raw so a malformed record never aborts a sync.
pub fn format_date(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }
    match parse_timestamp(raw) {
        Some(dt) => dt.format("%d/%m/%Y, %H:%M").to_string(),
        None => raw.to_string(),
    }
}

/// Format the current time as `dd/mm/yyyy, HH:MM` in Hanoi time.
pub fn format_now() -> String {
    Utc::now()
        .with_timezone(&hanoi())
        .format("%d/%m/%Y, %H:%M")
        .to_string()
}

fn hanoi() -> FixedOffset {
    FixedOffset::east_opt(HANOI_OFFSET_SECS).expect("valid fixed offset")
}

fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&hanoi()));
    }
    // The API sometimes emits naive timestamps; treat those as UTC.
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(
            Utc.from_utc_datetime(&naive)
                .with_timezone(&hanoi()),
        );
    }
    None
}
