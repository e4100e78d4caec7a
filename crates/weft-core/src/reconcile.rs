//! Cancellation-aware add/remove set pair.
//!
//! A [`DeltaSet`] records the *net* change a run of add/remove operations
//! made to some collection (labels on an issue, review requests on a pull
//! request). Operations cancel eagerly:
//!
//! - removing something that this delta added drops it from `added`
//! - adding something that this delta removed drops it from `removed`
//! - otherwise the item lands in `added` or `removed`, at most once
//!
//! So an identity is never on both sides, and any sequence of operations on
//! one identity collapses to the same state as its shortest equivalent
//! sequence.
//!
//! Both sides keep first-insertion order. Windows are small (a handful of
//! distinct identities), so the sides are plain vectors searched linearly.

use serde::{Deserialize, Serialize};

/// A value with an identity that decides equality inside a [`DeltaSet`].
///
/// Two values with the same key are the same element even when their other
/// fields (display names) differ.
pub trait Identity {
    type Key: Eq;

    fn identity(&self) -> Self::Key;
}

/// Net additions and removals for one kind of identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct DeltaSet<T> {
    #[serde(default)]
    pub added: Vec<T>,
    #[serde(default)]
    pub removed: Vec<T>,
}

impl<T> Default for DeltaSet<T> {
    fn default() -> Self {
        Self {
            added: Vec::new(),
            removed: Vec::new(),
        }
    }
}

impl<T: Identity + Clone> DeltaSet<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an add of `item`.
    pub fn add(&mut self, item: &T) {
        let key = item.identity();
        if let Some(pos) = position(&self.removed, &key) {
            self.removed.remove(pos);
            return;
        }
        if position(&self.added, &key).is_none() {
            self.added.push(item.clone());
        }
    }

    /// Record a remove of `item`.
    pub fn remove(&mut self, item: &T) {
        let key = item.identity();
        if let Some(pos) = position(&self.added, &key) {
            self.added.remove(pos);
            return;
        }
        if position(&self.removed, &key).is_none() {
            self.removed.push(item.clone());
        }
    }

    /// Record an add (`removal == false`) or a remove (`removal == true`).
    pub fn apply(&mut self, item: &T, removal: bool) {
        if removal {
            self.remove(item);
        } else {
            self.add(item);
        }
    }

    /// Replay another delta on top of this one: its additions as adds, then
    /// its removals as removes.
    pub fn replay(&mut self, other: &Self) {
        for item in &other.added {
            self.add(item);
        }
        for item in &other.removed {
            self.remove(item);
        }
    }

    /// Clear both sides.
    pub fn clear(&mut self) {
        self.added.clear();
        self.removed.clear();
    }

    /// True when neither side holds anything, i.e. no net change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// True when no identity appears twice, on one side or across both.
    ///
    /// Deltas built through [`add`](Self::add)/[`remove`](Self::remove) are
    /// always consistent; deserialized ones need not be.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let all: Vec<T::Key> = self
            .added
            .iter()
            .chain(&self.removed)
            .map(Identity::identity)
            .collect();
        all.iter()
            .enumerate()
            .all(|(i, key)| !all[..i].contains(key))
    }
}

fn position<T: Identity>(items: &[T], key: &T::Key) -> Option<usize> {
    items.iter().position(|item| item.identity() == *key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Tag(u32, &'static str);

    impl Identity for Tag {
        type Key = u32;

        fn identity(&self) -> u32 {
            self.0
        }
    }

    fn added(set: &DeltaSet<Tag>) -> Vec<u32> {
        set.added.iter().map(|t| t.0).collect()
    }

    fn removed(set: &DeltaSet<Tag>) -> Vec<u32> {
        set.removed.iter().map(|t| t.0).collect()
    }

    fn sorted(mut ids: Vec<u32>) -> Vec<u32> {
        ids.sort_unstable();
        ids
    }

    #[test]
    fn add_then_remove_cancels() {
        let mut set = DeltaSet::new();
        set.add(&Tag(1, "a"));
        set.remove(&Tag(1, "a"));
        assert!(set.is_empty());
    }

    #[test]
    fn remove_then_add_cancels() {
        let mut set = DeltaSet::new();
        set.remove(&Tag(1, "a"));
        set.add(&Tag(1, "a"));
        assert!(set.is_empty());
    }

    #[test]
    fn repeated_add_is_idempotent() {
        let mut set = DeltaSet::new();
        set.add(&Tag(1, "a"));
        set.add(&Tag(1, "a"));
        assert_eq!(added(&set), vec![1]);
        assert!(set.removed.is_empty());
    }

    #[test]
    fn cancellation_does_not_touch_the_other_side() {
        let mut set = DeltaSet::new();
        set.add(&Tag(1, "a"));
        set.remove(&Tag(1, "a"));
        set.remove(&Tag(1, "a"));
        assert!(set.added.is_empty());
        assert_eq!(removed(&set), vec![1]);
    }

    #[test]
    fn identity_decides_membership_not_payload() {
        let mut set = DeltaSet::new();
        set.add(&Tag(4, "old name"));
        set.remove(&Tag(4, "new name"));
        assert!(set.is_empty());
    }

    #[test]
    fn keeps_first_insertion_order() {
        let mut set = DeltaSet::new();
        for id in [3, 1, 2] {
            set.add(&Tag(id, "x"));
        }
        set.remove(&Tag(1, "x"));
        set.add(&Tag(1, "x"));
        assert_eq!(added(&set), vec![3, 2, 1]);
    }

    #[test]
    fn apply_dispatches_on_flag() {
        let mut set = DeltaSet::new();
        set.apply(&Tag(1, "a"), false);
        set.apply(&Tag(2, "b"), true);
        assert_eq!(added(&set), vec![1]);
        assert_eq!(removed(&set), vec![2]);
    }

    #[test]
    fn replay_applies_adds_before_removes() {
        let mut base = DeltaSet::new();
        base.remove(&Tag(1, "a"));
        base.add(&Tag(2, "b"));

        let mut next = DeltaSet::new();
        next.add(&Tag(1, "a"));
        next.remove(&Tag(2, "b"));
        next.add(&Tag(3, "c"));

        base.replay(&next);
        assert_eq!(added(&base), vec![3]);
        assert!(base.removed.is_empty());
    }

    // Order of the sides may differ between groupings; membership may not.
    #[test]
    fn replay_is_associative() {
        let ops: [&[(u32, bool)]; 3] = [
            &[(1, false), (2, true)],
            &[(2, false), (3, false), (1, true)],
            &[(3, true), (4, true), (2, true)],
        ];
        let deltas: Vec<DeltaSet<Tag>> = ops
            .iter()
            .map(|run| {
                let mut d = DeltaSet::new();
                for &(id, removal) in *run {
                    d.apply(&Tag(id, "x"), removal);
                }
                d
            })
            .collect();

        let mut left = deltas[0].clone();
        left.replay(&deltas[1]);
        left.replay(&deltas[2]);

        let mut tail = deltas[1].clone();
        tail.replay(&deltas[2]);
        let mut right = deltas[0].clone();
        right.replay(&tail);

        assert_eq!(sorted(added(&left)), sorted(added(&right)));
        assert_eq!(sorted(removed(&left)), sorted(removed(&right)));
    }

    #[test]
    fn consistency_detects_overlap_and_duplicates() {
        let mut set = DeltaSet::new();
        set.add(&Tag(1, "a"));
        set.remove(&Tag(2, "b"));
        assert!(set.is_consistent());

        let overlap = DeltaSet {
            added: vec![Tag(1, "a")],
            removed: vec![Tag(1, "a")],
        };
        assert!(!overlap.is_consistent());

        let duplicate = DeltaSet {
            added: vec![Tag(1, "a"), Tag(1, "b")],
            removed: vec![],
        };
        assert!(!duplicate.is_consistent());
    }

    #[test]
    fn missing_side_deserializes_empty() {
        use crate::model::Label;

        let set: DeltaSet<Label> =
            serde_json::from_str(r#"{"added":[{"id":4,"name":"ui"}]}"#).expect("deserialize");
        assert_eq!(set.added, vec![Label::new(4, "ui")]);
        assert!(set.removed.is_empty());
        assert!(set.is_consistent());
    }

    #[test]
    fn clear_empties_both_sides() {
        let mut set = DeltaSet::new();
        set.add(&Tag(1, "a"));
        set.remove(&Tag(2, "b"));
        set.clear();
        assert!(set.is_empty());
    }
}
