//! Aggregation window: the merged state of one run of aggregable entries.
//!
//! A window is opened ([`reset`](AggregationWindow::reset)) on the first
//! entry of a run, folds every following entry of the run in
//! ([`absorb`](AggregationWindow::absorb)), and is finally turned into zero
//! or one replacement entries ([`synthesize`](AggregationWindow::synthesize)).
//!
//! The close flag is last-write-wins. Labels and review requests go through
//! [`DeltaSet`], so an add and a remove of the same identity inside one
//! window cancel out.
//!
//! `prev_closed` is the close state the window started from. It is carried
//! over from the previous window on reset, which is why the compactor keeps
//! one window value alive for the whole scan instead of building a fresh one
//! per run.

use serde::{Deserialize, Serialize};

use crate::model::{Label, ReviewTarget};
use crate::reconcile::DeltaSet;
use crate::threshold::ThresholdPolicy;
use crate::timeline::{EntryKind, LabelChange, ReviewRequestChange, TimelineEntry};

/// Identity of the entry a window started at. The synthesized entry takes
/// it over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    pub id: i64,
    pub poster_id: i64,
    pub created_unix: i64,
}

impl From<&TimelineEntry> for Anchor {
    fn from(entry: &TimelineEntry) -> Self {
        Self {
            id: entry.id,
            poster_id: entry.poster_id,
            created_unix: entry.created_unix,
        }
    }
}

/// Which categories of change a window ended up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Everything cancelled out.
    Unchanged,
    LabelOnly,
    CloseReopenOnly,
    ReviewRequestOnly,
    /// Two or more categories changed.
    Mixed,
}

/// What flushing a window produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synthesis {
    pub outcome: Outcome,
    /// The replacement entry, `None` when the window cancelled out.
    pub entry: Option<TimelineEntry>,
    /// How many input entries disappeared: all consumed entries for an
    /// unchanged window, all but one otherwise.
    pub entries_removed: usize,
}

impl Synthesis {
    /// Nothing survives: every consumed entry is dropped.
    const fn cancelled(entries_removed: usize) -> Self {
        Self {
            outcome: Outcome::Unchanged,
            entry: None,
            entries_removed,
        }
    }
}

/// Accumulated state of one aggregation run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationWindow {
    /// Creation time of the entry the window was reset at.
    pub start_unix: i64,
    /// Reference "now" minus `start_unix`.
    pub age_secs: i64,
    pub poster_id: i64,
    /// First consumed input position, `None` while nothing was absorbed.
    pub start_index: Option<usize>,
    /// Last consumed input position.
    pub end_index: Option<usize>,
    pub prev_closed: bool,
    pub is_closed: bool,
    pub labels: DeltaSet<Label>,
    pub review_requests: DeltaSet<ReviewTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Anchor>,
}

impl AggregationWindow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new run at `first`.
    ///
    /// The current close state becomes the baseline the new run is compared
    /// against.
    pub fn reset(&mut self, first: &TimelineEntry, now: i64) {
        self.start_unix = first.created_unix;
        self.age_secs = now.saturating_sub(first.created_unix);
        self.poster_id = first.poster_id;
        self.prev_closed = self.is_closed;
        self.start_index = None;
        self.end_index = None;
        self.anchor = None;
        self.labels.clear();
        self.review_requests.clear();
    }

    /// True once at least one entry has been absorbed since the last reset.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.start_index.is_some()
    }

    /// Number of input entries folded into this window.
    #[must_use]
    pub fn consumed(&self) -> usize {
        match (self.start_index, self.end_index) {
            (Some(start), Some(end)) => end - start + 1,
            _ => 0,
        }
    }

    /// Whether `entry` may continue this run: same poster, and no further
    /// from the window start than the policy allows for the window's age.
    #[must_use]
    pub fn accepts(&self, entry: &TimelineEntry, policy: &ThresholdPolicy) -> bool {
        entry.poster_id == self.poster_id
            && policy.allows(self.age_secs, entry.created_unix.saturating_sub(self.start_unix))
    }

    /// Fold the entry at input position `index` into the window.
    ///
    /// Non-aggregable kinds only extend the consumed range; the compactor
    /// never hands them in.
    pub fn absorb(&mut self, entry: &TimelineEntry, index: usize) {
        if self.start_index.is_none() {
            self.start_index = Some(index);
            self.anchor = Some(Anchor::from(entry));
        }
        self.end_index = Some(index);

        match &entry.kind {
            EntryKind::Close => self.is_closed = true,
            EntryKind::Reopen => self.is_closed = false,
            EntryKind::Label(change) => change.apply_to(&mut self.labels),
            EntryKind::ReviewRequest(change) => change.apply_to(&mut self.review_requests),
            EntryKind::Aggregated(nested) => self.merge(nested),
            EntryKind::Comment | EntryKind::Other { .. } => {}
        }
    }

    /// Merge a previously synthesized window on top of this one.
    pub fn merge(&mut self, nested: &Self) {
        self.is_closed = nested.is_closed;
        self.labels.replay(&nested.labels);
        self.review_requests.replay(&nested.review_requests);
    }

    #[must_use]
    pub const fn close_state_changed(&self) -> bool {
        self.is_closed != self.prev_closed
    }

    /// True if the window has any net effect.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.close_state_changed() || !self.labels.is_empty() || !self.review_requests.is_empty()
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        let close = self.close_state_changed();
        let labels = !self.labels.is_empty();
        let reviews = !self.review_requests.is_empty();

        match (close, labels, reviews) {
            (false, false, false) => Outcome::Unchanged,
            (false, true, false) => Outcome::LabelOnly,
            (true, false, false) => Outcome::CloseReopenOnly,
            (false, false, true) => Outcome::ReviewRequestOnly,
            _ => Outcome::Mixed,
        }
    }

    /// Synthesize the replacement and close the window. The close state is
    /// kept so the next [`reset`](Self::reset) can carry it forward.
    pub fn flush(&mut self) -> Synthesis {
        let synthesis = self.synthesize();
        self.start_index = None;
        self.end_index = None;
        self.anchor = None;
        synthesis
    }

    /// Build the replacement for the consumed range.
    ///
    /// A single-category window becomes that category's ordinary entry
    /// shape; a mixed one embeds a copy of the whole window. The replacement
    /// keeps the id, poster and timestamp of the first consumed entry and
    /// has an empty body.
    #[must_use]
    pub fn synthesize(&self) -> Synthesis {
        let consumed = self.consumed();
        let outcome = self.outcome();

        let Some(anchor) = self.anchor else {
            return Synthesis::cancelled(consumed);
        };

        let kind = match outcome {
            Outcome::Unchanged => return Synthesis::cancelled(consumed),
            Outcome::LabelOnly => EntryKind::Label(LabelChange::lists(
                self.labels.added.clone(),
                self.labels.removed.clone(),
            )),
            Outcome::ReviewRequestOnly => EntryKind::ReviewRequest(ReviewRequestChange::lists(
                self.review_requests.added.clone(),
                self.review_requests.removed.clone(),
            )),
            Outcome::CloseReopenOnly if self.is_closed => EntryKind::Close,
            Outcome::CloseReopenOnly => EntryKind::Reopen,
            Outcome::Mixed => EntryKind::Aggregated(Box::new(self.clone())),
        };

        Synthesis {
            outcome,
            entry: Some(TimelineEntry::new(
                anchor.id,
                anchor.poster_id,
                anchor.created_unix,
                kind,
            )),
            entries_removed: consumed.saturating_sub(1),
        }
    }
}
