//! Structural checks run over the whole timeline before anything is
//! rewritten.
//!
//! Only payload shape is checked. Ordering of the input is trusted: the
//! loader hands entries over sorted by creation time.

use crate::error::CompactError;
use crate::model::{GHOST_ID, Label, ReviewTarget};
use crate::timeline::{EntryKind, TimelineEntry};
use crate::window::AggregationWindow;

/// Check every entry, stopping at the first malformed one.
///
/// # Errors
///
/// Returns the [`CompactError`] describing the first malformed entry.
pub fn validate_timeline(entries: &[TimelineEntry]) -> Result<(), CompactError> {
    entries
        .iter()
        .enumerate()
        .try_for_each(|(position, entry)| validate_entry(entry, position))
}

/// Check a single entry found at input `position`.
///
/// # Errors
///
/// Returns a [`CompactError`] if the payload contradicts the entry kind.
pub fn validate_entry(entry: &TimelineEntry, position: usize) -> Result<(), CompactError> {
    let entry_id = entry.id;
    match &entry.kind {
        EntryKind::Label(change) => {
            if change.is_empty() {
                return Err(CompactError::EmptyLabelChange { position, entry_id });
            }
            check_labels(change.labels(), position, entry_id)
        }
        EntryKind::ReviewRequest(change) => {
            if change.is_empty() {
                return Err(CompactError::EmptyReviewRequest { position, entry_id });
            }
            check_targets(change.targets(), position, entry_id)
        }
        EntryKind::Aggregated(snapshot) => check_snapshot(snapshot, position, entry_id),
        EntryKind::Comment | EntryKind::Close | EntryKind::Reopen | EntryKind::Other { .. } => {
            Ok(())
        }
    }
}

fn check_snapshot(
    snapshot: &AggregationWindow,
    position: usize,
    entry_id: i64,
) -> Result<(), CompactError> {
    if !snapshot.labels.is_consistent() || !snapshot.review_requests.is_consistent() {
        return Err(CompactError::InconsistentSummary { position, entry_id });
    }
    check_labels(
        snapshot.labels.added.iter().chain(&snapshot.labels.removed),
        position,
        entry_id,
    )?;
    check_targets(
        snapshot
            .review_requests
            .added
            .iter()
            .chain(&snapshot.review_requests.removed),
        position,
        entry_id,
    )
}

fn check_labels<'a>(
    mut labels: impl Iterator<Item = &'a Label>,
    position: usize,
    entry_id: i64,
) -> Result<(), CompactError> {
    match labels.find(|label| label.id <= 0) {
        Some(label) => Err(CompactError::InvalidLabel {
            position,
            entry_id,
            label_id: label.id,
        }),
        None => Ok(()),
    }
}

fn check_targets<'a>(
    mut targets: impl Iterator<Item = &'a ReviewTarget>,
    position: usize,
    entry_id: i64,
) -> Result<(), CompactError> {
    let invalid = |target: &&ReviewTarget| {
        let id = target.principal().id;
        id <= 0 && id != GHOST_ID
    };
    match targets.find(invalid) {
        Some(target) => Err(CompactError::InvalidPrincipal {
            position,
            entry_id,
            kind: target.kind_str(),
            principal_id: target.principal().id,
        }),
        None => Ok(()),
    }
}
