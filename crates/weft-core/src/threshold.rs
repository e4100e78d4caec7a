//! Age-dependent merge threshold.
//!
//! The older a window is (relative to the caller's reference "now"), the
//! larger the gap allowed between its first entry and a later one for both
//! to share the window. Exact timing of old activity matters less, so it is
//! compressed harder; recent activity keeps minute granularity.
//!
//! | window age  | allowed gap |
//! |-------------|-------------|
//! | > 30 days   | 1 day       |
//! | > 1 day     | 1 hour      |
//! | > 1 hour    | 10 minutes  |
//! | otherwise   | 1 minute    |
//!
//! The comparison is inclusive: a gap exactly equal to the threshold merges.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

pub const MINUTE: i64 = 60;
pub const HOUR: i64 = 60 * MINUTE;
pub const DAY: i64 = 24 * HOUR;
pub const MONTH: i64 = 30 * DAY;

/// One row of the threshold table: windows strictly older than
/// `older_than_secs` may span up to `gap_secs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub older_than_secs: i64,
    pub gap_secs: i64,
}

impl Tier {
    #[must_use]
    pub const fn new(older_than_secs: i64, gap_secs: i64) -> Self {
        Self {
            older_than_secs,
            gap_secs,
        }
    }
}

/// Default tiers, oldest first.
pub const DEFAULT_TIERS: [Tier; 3] = [
    Tier::new(MONTH, DAY),
    Tier::new(DAY, HOUR),
    Tier::new(HOUR, 10 * MINUTE),
];

/// Gap allowed when no tier matches.
pub const DEFAULT_BASE_GAP: i64 = MINUTE;

/// Maps a window's age to the maximum gap it may span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdPolicy {
    base_gap_secs: i64,
    /// Sorted by `older_than_secs`, descending.
    tiers: Vec<Tier>,
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self {
            base_gap_secs: DEFAULT_BASE_GAP,
            tiers: DEFAULT_TIERS.to_vec(),
        }
    }
}

impl ThresholdPolicy {
    /// Build a policy from a base gap and tiers in any order.
    ///
    /// # Errors
    ///
    /// Fails if a gap is not positive, a tier age is negative, or two tiers
    /// share the same age.
    pub fn new(base_gap_secs: i64, mut tiers: Vec<Tier>) -> Result<Self> {
        if base_gap_secs <= 0 {
            bail!("base gap must be positive, got {base_gap_secs}s");
        }
        for tier in &tiers {
            if tier.gap_secs <= 0 {
                bail!(
                    "tier older than {}s has non-positive gap {}s",
                    tier.older_than_secs,
                    tier.gap_secs
                );
            }
            if tier.older_than_secs < 0 {
                bail!("tier age must not be negative, got {}s", tier.older_than_secs);
            }
        }

        tiers.sort_by(|a, b| b.older_than_secs.cmp(&a.older_than_secs));
        if let Some(pair) = tiers
            .windows(2)
            .find(|pair| pair[0].older_than_secs == pair[1].older_than_secs)
        {
            bail!("duplicate tier for age {}s", pair[0].older_than_secs);
        }

        Ok(Self {
            base_gap_secs,
            tiers,
        })
    }

    /// Maximum gap, in seconds, for a window of the given age.
    #[must_use]
    pub fn threshold(&self, window_age_secs: i64) -> i64 {
        self.tiers
            .iter()
            .find(|tier| window_age_secs > tier.older_than_secs)
            .map_or(self.base_gap_secs, |tier| tier.gap_secs)
    }

    /// Whether an entry `gap_secs` after the window start may join a window
    /// of the given age.
    #[must_use]
    pub fn allows(&self, window_age_secs: i64, gap_secs: i64) -> bool {
        gap_secs <= self.threshold(window_age_secs)
    }

    #[must_use]
    pub const fn base_gap_secs(&self) -> i64 {
        self.base_gap_secs
    }

    #[must_use]
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }
}
