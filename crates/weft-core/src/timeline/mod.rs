//! Timeline entry model.
//!
//! A timeline is the ordered history attached to one issue or pull request.
//! Each [`TimelineEntry`] has a small common header (storage id, poster,
//! creation time in seconds since the Unix epoch) and a typed [`EntryKind`]
//! payload.
//!
//! # JSON shape
//!
//! Entries are exchanged with the loading and rendering collaborators as
//! JSON. The kind is internally tagged:
//!
//! ```text
//! {"id":12,"poster_id":1,"created_unix":1700000000,
//!  "kind":{"type":"label","label":{"id":3,"name":"bug"},"removal":false}}
//! ```

pub mod change;
pub mod kind;

pub use change::{LabelChange, ReviewRequestChange};
pub use kind::EntryKind;

use serde::{Deserialize, Serialize};

/// One entry of an issue or pull-request timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Storage identifier. Synthesized summaries reuse the id of the first
    /// entry they replace.
    pub id: i64,

    /// Who produced the entry.
    pub poster_id: i64,

    /// Creation time, seconds since the Unix epoch.
    pub created_unix: i64,

    /// Free-form body (comment text). Always empty on synthesized entries.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,

    /// Typed payload.
    pub kind: EntryKind,
}

impl TimelineEntry {
    #[must_use]
    pub const fn new(id: i64, poster_id: i64, created_unix: i64, kind: EntryKind) -> Self {
        Self {
            id,
            poster_id,
            created_unix,
            content: String::new(),
            kind,
        }
    }

    /// A plain comment with a body.
    #[must_use]
    pub fn comment(id: i64, poster_id: i64, created_unix: i64, body: impl Into<String>) -> Self {
        Self {
            content: body.into(),
            ..Self::new(id, poster_id, created_unix, EntryKind::Comment)
        }
    }

    /// Whether this entry can take part in aggregation.
    #[must_use]
    pub const fn is_aggregable(&self) -> bool {
        self.kind.is_aggregable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Label;

    #[test]
    fn comment_carries_body() {
        let entry = TimelineEntry::comment(1, 2, 3, "hello");
        assert_eq!(entry.content, "hello");
        assert_eq!(entry.kind, EntryKind::Comment);
        assert!(!entry.is_aggregable());
    }

    #[test]
    fn json_roundtrip_preserves_entry() {
        let entry = TimelineEntry::new(
            12,
            1,
            1_700_000_000,
            EntryKind::Label(LabelChange::added(Label::new(3, "bug"))),
        );
        let json = serde_json::to_string(&entry).expect("serialize");
        assert!(json.contains(r#""type":"label""#));
        assert!(!json.contains("content"));

        let back: TimelineEntry = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, entry);
    }

    #[test]
    fn content_defaults_to_empty() {
        let json = r#"{"id":1,"poster_id":1,"created_unix":5,"kind":{"type":"close"}}"#;
        let entry: TimelineEntry = serde_json::from_str(json).expect("deserialize");
        assert!(entry.content.is_empty());
        assert_eq!(entry.kind, EntryKind::Close);
    }
}
