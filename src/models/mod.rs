//! Data models for prdesk
//!
//! This module contains the records the dashboard tracks, plus the draft
//! (create) and patch (update) inputs that arrive from the client.

mod contact;
mod link;
mod metric;
mod plan;
mod track;

pub use contact::{Contact, ContactCategory, ContactDraft, ContactPatch, Partition, TagsInput};
pub use link::{LinkDraft, LinkPatch, QuickLink};
pub use metric::{Metric, Trend};
pub use plan::{PlanDraft, PlanPatch, PlanStatus, PlanTask, ReleasePlan, TaskDraft};
pub use track::{Track, TrackDraft, TrackPatch, TrackStatus};

/// Anything stored in the dashboard and addressed by identifier
pub trait Record {
    fn id(&self) -> &str;
}

/// Use `value` unless it is missing or blank, otherwise fall back to `default`
pub(crate) fn or_default(value: Option<String>, default: &str) -> String {
    non_blank(value).unwrap_or_else(|| default.to_string())
}

/// Drop missing or whitespace-only values
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_default() {
        assert_eq!(or_default(None, "Pop"), "Pop");
        assert_eq!(or_default(Some("".into()), "Pop"), "Pop");
        assert_eq!(or_default(Some("   ".into()), "Pop"), "Pop");
        assert_eq!(or_default(Some("Techno".into()), "Pop"), "Techno");
    }
}
