//! Label and review-request change payloads.
//!
//! Both payloads come in two forms that may be combined:
//!
//! - the **single** form a data producer records for one user action:
//!   one label (or target) plus a `removal` flag
//! - the **list** form a synthesized summary carries: net `added` and
//!   `removed` lists
//!
//! Folding a payload into a [`DeltaSet`] applies the single item first, then
//! the `removed` list, then the `added` list. A payload with neither form is
//! malformed and rejected by validation.

use serde::{Deserialize, Serialize};

use crate::model::{Label, ReviewTarget};
use crate::reconcile::DeltaSet;

/// Labels added to or removed from an issue.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LabelChange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    #[serde(default)]
    pub removal: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub added: Vec<Label>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub removed: Vec<Label>,
}

impl LabelChange {
    /// A single label was added.
    #[must_use]
    pub fn added(label: Label) -> Self {
        Self {
            label: Some(label),
            ..Self::default()
        }
    }

    /// A single label was removed.
    #[must_use]
    pub fn removed(label: Label) -> Self {
        Self {
            label: Some(label),
            removal: true,
            ..Self::default()
        }
    }

    /// Net lists, as carried by a synthesized entry.
    #[must_use]
    pub fn lists(added: Vec<Label>, removed: Vec<Label>) -> Self {
        Self {
            added,
            removed,
            ..Self::default()
        }
    }

    /// True when the payload names no label at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.added.is_empty() && self.removed.is_empty()
    }

    /// Every label this payload mentions, in application order.
    #[must_use]
    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.label.iter().chain(&self.removed).chain(&self.added)
    }

    pub fn apply_to(&self, set: &mut DeltaSet<Label>) {
        if let Some(label) = &self.label {
            set.apply(label, self.removal);
        }
        for label in &self.removed {
            set.remove(label);
        }
        for label in &self.added {
            set.add(label);
        }
    }
}

/// Review requests added to or withdrawn from a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReviewRequestChange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<ReviewTarget>,
    #[serde(default)]
    pub removal: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub added: Vec<ReviewTarget>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub removed: Vec<ReviewTarget>,
}

impl ReviewRequestChange {
    /// A review was requested from `target`.
    #[must_use]
    pub fn requested(target: ReviewTarget) -> Self {
        Self {
            target: Some(target),
            ..Self::default()
        }
    }

    /// A review request for `target` was withdrawn.
    #[must_use]
    pub fn withdrawn(target: ReviewTarget) -> Self {
        Self {
            target: Some(target),
            removal: true,
            ..Self::default()
        }
    }

    /// Net lists, as carried by a synthesized entry.
    #[must_use]
    pub fn lists(added: Vec<ReviewTarget>, removed: Vec<ReviewTarget>) -> Self {
        Self {
            added,
            removed,
            ..Self::default()
        }
    }

    /// True when the payload names neither a user nor a team.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.target.is_none() && self.added.is_empty() && self.removed.is_empty()
    }

    /// Every target this payload mentions, in application order.
    #[must_use]
    pub fn targets(&self) -> impl Iterator<Item = &ReviewTarget> {
        self.target.iter().chain(&self.removed).chain(&self.added)
    }

    pub fn apply_to(&self, set: &mut DeltaSet<ReviewTarget>) {
        if let Some(target) = &self.target {
            set.apply(target, self.removal);
        }
        for target in &self.removed {
            set.remove(target);
        }
        for target in &self.added {
            set.add(target);
        }
    }
}
