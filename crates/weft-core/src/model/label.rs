use serde::{Deserialize, Serialize};
use std::fmt;

use crate::reconcile::Identity;

/// An issue label as it appears in a timeline entry.
///
/// Identity is the numeric id alone; `name` is carried for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: i64,
    pub name: String,
}

impl Label {
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl Identity for Label {
    type Key = i64;

    fn identity(&self) -> i64 {
        self.id
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
