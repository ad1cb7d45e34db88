//! Canonical form submission record.
//!
//! The content API has emitted both snake_case and camelCase shapes over
//! its lifetime; serde aliases normalize both into this one struct at the
//! deserialization boundary, so the projector never touches raw JSON keys.

use serde::Deserialize;
use serde_json::Value;

/// A contact or registration submission, normalized for projection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionRecord {
    /// Applicant full name
    #[serde(default, alias = "fullName")]
    pub full_name: String,

    /// Age, kept as number or string depending on the upstream shape
    #[serde(default)]
    pub age: Option<Scalar>,

    /// Phone number
    #[serde(default)]
    pub phone: String,

    /// Email address (contact form only)
    #[serde(default)]
    pub email: String,

    /// Stated training purpose
    #[serde(default)]
    pub purpose: String,

    /// Training-type code ("offline" or "online")
    #[serde(default, alias = "trainingType")]
    pub training_type: String,

    /// Facility code
    #[serde(default)]
    pub location: String,

    /// Free-form message (contact form only)
    #[serde(default)]
    pub message: String,

    /// Workflow status code
    #[serde(default)]
    pub status: String,

    /// Staff notes
    #[serde(default)]
    pub notes: String,

    /// Submission timestamp
    #[serde(default, alias = "createdAt")]
    pub created_at: String,

    /// Last update timestamp
    #[serde(default, alias = "updatedAt")]
    pub updated_at: String,
}

/// A scalar cell value that preserves numeric-ness.
///
/// Age arrives as a JSON number from the API but as a string from older
/// form payloads; either way the spreadsheet cell keeps the source type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(serde_json::Number),
    Text(String),
}

impl Scalar {
    /// Render as a JSON cell value for the Sheets values API.
    pub fn to_cell(&self) -> Value {
        match self {
            Scalar::Number(n) => Value::Number(n.clone()),
            Scalar::Text(s) => Value::String(s.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn snake_case_shape_deserializes() {
        let record: SubmissionRecord = serde_json::from_value(json!({
            "full_name": "Nguyễn Văn A",
            "age": 25,
            "phone": "0123456789",
            "training_type": "offline",
            "created_at": "2024-12-08T10:00:00Z",
        }))
        .unwrap();
        assert_eq!(record.full_name, "Nguyễn Văn A");
        assert_eq!(record.training_type, "offline");
        assert_eq!(record.created_at, "2024-12-08T10:00:00Z");
    }

    #[test]
    fn camel_case_shape_deserializes_identically() {
        let record: SubmissionRecord = serde_json::from_value(json!({
            "fullName": "Nguyễn Văn A",
            "trainingType": "offline",
            "createdAt": "2024-12-08T10:00:00Z",
        }))
        .unwrap();
        assert_eq!(record.full_name, "Nguyễn Văn A");
        assert_eq!(record.training_type, "offline");
        assert_eq!(record.created_at, "2024-12-08T10:00:00Z");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let record: SubmissionRecord = serde_json::from_value(json!({})).unwrap();
        assert_eq!(record.full_name, "");
        assert!(record.age.is_none());
    }

    #[test]
    fn age_accepts_number_or_string() {
        let n: SubmissionRecord = serde_json::from_value(json!({ "age": 25 })).unwrap();
        let s: SubmissionRecord = serde_json::from_value(json!({ "age": "25" })).unwrap();
        assert_eq!(n.age.unwrap().to_cell(), json!(25));
        assert_eq!(s.age.unwrap().to_cell(), json!("25"));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let record: SubmissionRecord =
            serde_json::from_value(json!({ "id": "abc", "courseName": "Basics" })).unwrap();
        assert_eq!(record.full_name, "");
    }
}
