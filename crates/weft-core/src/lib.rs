//! weft-core: timeline aggregation for issue and pull-request histories.
//!
//! Fine-grained state changes (labels, review requests, close/reopen) made
//! in quick succession by one person are folded into a single entry showing
//! their net effect; changes that cancel out disappear. See [`compact`] for
//! the scan and [`window`] for the merge rules.
//!
//! ```
//! use weft_core::compact::compact_timeline;
//! use weft_core::model::Label;
//! use weft_core::timeline::{EntryKind, LabelChange, TimelineEntry};
//!
//! let bug = Label::new(1, "bug");
//! let mut timeline = vec![
//!     TimelineEntry::new(10, 1, 0, EntryKind::Label(LabelChange::added(bug.clone()))),
//!     TimelineEntry::new(11, 1, 1, EntryKind::Label(LabelChange::removed(bug))),
//! ];
//! compact_timeline(&mut timeline, 60).expect("well-formed timeline");
//! assert!(timeline.is_empty());
//! ```
//!
//! # Conventions
//!
//! - **Errors**: engine failures are typed ([`error::CompactError`]);
//!   configuration loading uses `anyhow::Result`.
//! - **Logging**: `tracing` macros only; the library never installs a
//!   subscriber.

pub mod compact;
pub mod config;
pub mod error;
pub mod model;
pub mod reconcile;
pub mod threshold;
pub mod timeline;
pub mod validate;
pub mod window;

pub use compact::{CompactionReport, Compactor, compact_timeline};
pub use error::{CompactError, ErrorCode};
pub use timeline::{EntryKind, TimelineEntry};
pub use window::{AggregationWindow, Outcome};
