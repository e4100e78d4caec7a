//! Timeline compaction.
//!
//! Rewrites an issue timeline so that each run of closely spaced
//! state-change entries by one poster becomes at most one entry carrying the
//! run's net effect.
//!
//! # Scan
//!
//! One pass over the input, front to back, with a single
//! [`AggregationWindow`]:
//!
//! 1. A non-aggregable entry (comment, milestone change, ...) flushes the
//!    window and is copied to the output unchanged.
//! 2. An aggregable entry that the window cannot accept (other poster, or
//!    further from the window start than the [`ThresholdPolicy`] allows)
//!    flushes the window and opens a new one at that entry.
//! 3. Otherwise the entry is absorbed.
//!
//! The last window is flushed after the scan. Flushing appends zero entries
//! (everything cancelled) or one entry (the net effect) to the output, so the
//! input is never re-indexed while it is being read.
//!
//! # Failure
//!
//! The whole timeline is validated before the scan starts. A malformed entry
//! fails the call with a [`CompactError`] and leaves the timeline untouched.

use anyhow::Result;
use serde::Serialize;

use crate::config::TimelineConfig;
use crate::error::CompactError;
use crate::threshold::ThresholdPolicy;
use crate::timeline::TimelineEntry;
use crate::validate::validate_timeline;
use crate::window::{AggregationWindow, Outcome};

/// Counters describing one compaction call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompactionReport {
    /// Entries handed in.
    pub entries_in: usize,
    /// Entries left after rewriting.
    pub entries_out: usize,
    /// Windows flushed, including cancelled ones.
    pub windows_flushed: usize,
    /// Windows whose changes cancelled out completely.
    pub windows_cancelled: usize,
    /// Replacement entries written.
    pub summaries_created: usize,
    /// Replacement entries that had to use the mixed summary shape.
    pub mixed_summaries: usize,
    /// `entries_in - entries_out`.
    pub entries_removed: usize,
}

/// Folds timelines using a fixed threshold policy.
#[derive(Debug, Clone)]
pub struct Compactor {
    policy: ThresholdPolicy,
    enabled: bool,
}

impl Default for Compactor {
    fn default() -> Self {
        Self::new(ThresholdPolicy::default())
    }
}

impl Compactor {
    #[must_use]
    pub const fn new(policy: ThresholdPolicy) -> Self {
        Self {
            policy,
            enabled: true,
        }
    }

    /// Build a compactor from loaded configuration.
    ///
    /// # Errors
    ///
    /// Fails if the configured thresholds are invalid.
    pub fn from_config(config: &TimelineConfig) -> Result<Self> {
        let mut compactor = Self::new(config.aggregation.policy()?);
        compactor.enabled = config.aggregation.enabled;
        Ok(compactor)
    }

    #[must_use]
    pub const fn policy(&self) -> &ThresholdPolicy {
        &self.policy
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Rewrite `timeline` in place.
    ///
    /// `now` is the reference time (seconds since the Unix epoch) that
    /// window ages are measured against. It is never read from a clock, so
    /// the same input and `now` always give the same output.
    ///
    /// # Errors
    ///
    /// Returns a [`CompactError`] if any entry is malformed. The timeline is
    /// not modified in that case.
    pub fn compact(
        &self,
        timeline: &mut Vec<TimelineEntry>,
        now: i64,
    ) -> Result<CompactionReport, CompactError> {
        let _span = tracing::debug_span!("timeline.compact", entries = timeline.len(), now).entered();

        if let Err(err) = validate_timeline(timeline) {
            let code = err.code();
            tracing::warn!(
                code = %code,
                summary = code.message(),
                hint = code.hint().unwrap_or_default(),
                position = err.position(),
                error = %err,
                "refusing to compact malformed timeline"
            );
            return Err(err);
        }

        if !self.enabled {
            return Ok(CompactionReport {
                entries_in: timeline.len(),
                entries_out: timeline.len(),
                ..CompactionReport::default()
            });
        }

        let input = std::mem::take(timeline);
        let (output, report) = self.fold(input, now);
        *timeline = output;

        tracing::debug!(
            entries_in = report.entries_in,
            entries_out = report.entries_out,
            windows = report.windows_flushed,
            cancelled = report.windows_cancelled,
            mixed = report.mixed_summaries,
            "timeline compacted"
        );
        Ok(report)
    }

    fn fold(&self, input: Vec<TimelineEntry>, now: i64) -> (Vec<TimelineEntry>, CompactionReport) {
        let mut report = CompactionReport {
            entries_in: input.len(),
            ..CompactionReport::default()
        };
        let mut output = Vec::with_capacity(input.len());
        let mut window = AggregationWindow::new();

        for (index, entry) in input.into_iter().enumerate() {
            if !entry.is_aggregable() {
                flush(&mut window, &mut output, &mut report);
                output.push(entry);
                continue;
            }

            if !window.is_active() {
                window.reset(&entry, now);
            } else if !window.accepts(&entry, &self.policy) {
                flush(&mut window, &mut output, &mut report);
                window.reset(&entry, now);
            }
            window.absorb(&entry, index);
        }
        flush(&mut window, &mut output, &mut report);

        report.entries_out = output.len();
        report.entries_removed = report.entries_in - report.entries_out;
        (output, report)
    }
}

/// Flush `window` if it holds anything, appending its replacement.
fn flush(
    window: &mut AggregationWindow,
    output: &mut Vec<TimelineEntry>,
    report: &mut CompactionReport,
) {
    if !window.is_active() {
        return;
    }

    let consumed = window.consumed();
    let synthesis = window.flush();
    tracing::trace!(
        outcome = ?synthesis.outcome,
        consumed,
        removed = synthesis.entries_removed,
        "window flushed"
    );

    report.windows_flushed += 1;
    match synthesis.outcome {
        Outcome::Unchanged => report.windows_cancelled += 1,
        Outcome::Mixed => report.mixed_summaries += 1,
        Outcome::LabelOnly | Outcome::CloseReopenOnly | Outcome::ReviewRequestOnly => {}
    }
    if let Some(entry) = synthesis.entry {
        report.summaries_created += 1;
        output.push(entry);
    }
}

/// Compact `timeline` with the default thresholds.
///
/// # Errors
///
/// Returns a [`CompactError`] if any entry is malformed; the timeline is left
/// untouched.
pub fn compact_timeline(
    timeline: &mut Vec<TimelineEntry>,
    now: i64,
) -> Result<CompactionReport, CompactError> {
    Compactor::default().compact(timeline, now)
}
