use serde::{Deserialize, Serialize};
use std::fmt;

use super::change::{LabelChange, ReviewRequestChange};
use crate::window::AggregationWindow;

/// What a timeline entry records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryKind {
    /// A user comment with a free-form body.
    Comment,
    /// The issue was closed.
    Close,
    /// The issue was reopened.
    Reopen,
    /// Labels were added or removed.
    Label(LabelChange),
    /// Review requests were added or removed.
    ReviewRequest(ReviewRequestChange),
    /// A previously synthesized summary of several kinds of change.
    Aggregated(Box<AggregationWindow>),
    /// Any other entry kind (milestone, due date, title change, ...).
    Other { name: String },
}

impl EntryKind {
    /// Whether entries of this kind can be folded into an aggregation
    /// window. Anything else ends the current run.
    #[must_use]
    pub const fn is_aggregable(&self) -> bool {
        matches!(
            self,
            Self::Close | Self::Reopen | Self::Label(_) | Self::ReviewRequest(_) | Self::Aggregated(_)
        )
    }

    /// Short name used in logs and error messages.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Comment => "comment",
            Self::Close => "close",
            Self::Reopen => "reopen",
            Self::Label(_) => "label",
            Self::ReviewRequest(_) => "review_request",
            Self::Aggregated(_) => "aggregated",
            Self::Other { name } => name.as_str(),
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
