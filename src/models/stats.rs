//! Aggregate submission statistics.

use serde::{Deserialize, Serialize};

/// Counters for the Statistics worksheet.
///
/// Computed by the caller over the union of contact and registration
/// submissions; the endpoint only renders what it receives, so missing
/// counters default to zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AggregateStats {
    #[serde(default)]
    pub total: u64,

    #[serde(default)]
    pub pending: u64,

    #[serde(default)]
    pub contacted: u64,

    #[serde(default)]
    pub enrolled: u64,

    #[serde(default)]
    pub rejected: u64,
}

impl AggregateStats {
    /// Tally statuses across submissions.
    ///
    /// Every submission counts toward `total`; statuses outside the four
    /// known codes contribute to no other counter.
    pub fn tally<'a>(statuses: impl IntoIterator<Item = &'a str>) -> Self {
        let mut stats = Self::default();
        for status in statuses {
            stats.total += 1;
            match status {
                "pending" => stats.pending += 1,
                "contacted" => stats.contacted += 1,
                "enrolled" => stats.enrolled += 1,
                "rejected" => stats.rejected += 1,
                _ => {}
            }
        }
        stats
    }
}
