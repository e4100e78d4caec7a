//! Review-request targets.
//!
//! A review can be requested from a user or from a team. Users and teams live
//! in separate id spaces, so user 5 and team 5 are different targets; the
//! variant tag is part of the identity ([`TargetKey`]).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::reconcile::Identity;

/// Id shared by every ghost principal (a deleted user or team).
pub const GHOST_ID: i64 = -1;

/// A user or team reference: numeric id plus display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: i64,
    pub name: String,
}

impl Principal {
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Placeholder for a user that no longer exists.
    #[must_use]
    pub fn ghost_user() -> Self {
        Self::new(GHOST_ID, "Ghost")
    }

    /// Placeholder for a team that no longer exists.
    #[must_use]
    pub fn ghost_team() -> Self {
        Self::new(GHOST_ID, "Ghost team")
    }

    #[must_use]
    pub const fn is_ghost(&self) -> bool {
        self.id == GHOST_ID
    }
}

/// Who a review was requested from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ReviewTarget {
    User(Principal),
    Team(Principal),
}

/// Structural identity of a [`ReviewTarget`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TargetKey {
    User(i64),
    Team(i64),
}

impl ReviewTarget {
    #[must_use]
    pub fn user(id: i64, name: impl Into<String>) -> Self {
        Self::User(Principal::new(id, name))
    }

    #[must_use]
    pub fn team(id: i64, name: impl Into<String>) -> Self {
        Self::Team(Principal::new(id, name))
    }

    #[must_use]
    pub const fn principal(&self) -> &Principal {
        match self {
            Self::User(p) | Self::Team(p) => p,
        }
    }

    #[must_use]
    pub const fn kind_str(&self) -> &'static str {
        match self {
            Self::User(_) => "user",
            Self::Team(_) => "team",
        }
    }
}

impl Identity for ReviewTarget {
    type Key = TargetKey;

    fn identity(&self) -> TargetKey {
        match self {
            Self::User(p) => TargetKey::User(p.id),
            Self::Team(p) => TargetKey::Team(p.id),
        }
    }
}

impl fmt::Display for ReviewTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind_str(), self.principal().name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_and_team_with_same_id_are_distinct() {
        let user = ReviewTarget::user(5, "toto");
        let team = ReviewTarget::team(5, "toto");
        assert_ne!(user.identity(), team.identity());
    }

    #[test]
    fn ghost_teams_share_identity() {
        let a = ReviewTarget::Team(Principal::ghost_team());
        let b = ReviewTarget::Team(Principal::ghost_team());
        assert_eq!(a.identity(), b.identity());
        assert!(a.principal().is_ghost());
    }

    #[test]
    fn ghost_user_and_ghost_team_differ() {
        let user = ReviewTarget::User(Principal::ghost_user());
        let team = ReviewTarget::Team(Principal::ghost_team());
        assert_ne!(user.identity(), team.identity());
    }

    #[test]
    fn serde_is_internally_tagged() {
        let json = serde_json::to_string(&ReviewTarget::team(9, "core")).expect("serialize");
        assert_eq!(json, r#"{"kind":"team","id":9,"name":"core"}"#);

        let back: ReviewTarget = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, ReviewTarget::team(9, "core"));
    }

    #[test]
    fn display_includes_kind() {
        assert_eq!(ReviewTarget::user(1, "alice").to_string(), "user alice");
    }
}
