//! Identities referenced by timeline entries.
//!
//! Labels and review-request targets are compared by identity, never by
//! display name: renaming a label between two entries of the same window
//! must still let an add and a remove cancel.

pub mod label;
pub mod target;

pub use label::Label;
pub use target::{GHOST_ID, Principal, ReviewTarget, TargetKey};
