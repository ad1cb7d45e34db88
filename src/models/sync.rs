//! Sync request/plan/outcome types.

use std::fmt;

use serde_json::Value;

/// One spreadsheet row, as accepted by the Sheets values API.
pub type Row = Vec<Value>;

/// Which worksheet a sync call targets.
///
/// The discriminator on the wire is one of exactly three literals;
/// anything else is rejected before any upstream call is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncKind {
    Contact,
    Registration,
    Stats,
}

impl SyncKind {
    /// Parse the wire discriminator.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "contact" => Some(Self::Contact),
            "registration" => Some(Self::Registration),
            "stats" => Some(Self::Stats),
            _ => None,
        }
    }

    /// Title of the worksheet this kind syncs into.
    pub fn sheet_name(&self) -> &'static str {
        match self {
            Self::Contact => "Contact Submissions",
            Self::Registration => "Registration Submissions",
            Self::Stats => "Statistics",
        }
    }
}

impl fmt::Display for SyncKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Contact => "contact",
            Self::Registration => "registration",
            Self::Stats => "stats",
        };
        f.write_str(s)
    }
}

/// A fully projected sync: target sheet, header row, data rows.
#[derive(Debug, Clone)]
pub struct SyncPlan {
    pub sheet_name: &'static str,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Row>,
}

/// Result of one completed sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Worksheet that was replaced
    pub sheet_name: String,

    /// Number of data rows written
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_only_the_three_literals() {
        assert_eq!(SyncKind::parse("contact"), Some(SyncKind::Contact));
        assert_eq!(SyncKind::parse("registration"), Some(SyncKind::Registration));
        assert_eq!(SyncKind::parse("stats"), Some(SyncKind::Stats));
        assert_eq!(SyncKind::parse("Contact"), None);
        assert_eq!(SyncKind::parse(""), None);
    }

    #[test]
    fn sheet_names_match_the_worksheets() {
        assert_eq!(SyncKind::Contact.sheet_name(), "Contact Submissions");
        assert_eq!(
            SyncKind::Registration.sheet_name(),
            "Registration Submissions"
        );
        assert_eq!(SyncKind::Stats.sheet_name(), "Statistics");
    }
}
