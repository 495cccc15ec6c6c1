//! Retarget outcome reports.
//!
//! Every retarget computation returns the bits it chose together with the
//! branch that produced them. The algorithms stay free of side effects; the
//! service layer hands these reports to the observer.

use super::compact::CompactTarget;
use serde::Serialize;
use std::fmt;

/// Which retarget algorithm produced a target.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum RetargetAlgorithm {
    /// Fixed-interval retarget (every `adjustment_interval` blocks)
    LegacyInterval,
    /// Kimoto Gravity Well, recomputed every block
    GravityWell,
}

impl fmt::Display for RetargetAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LegacyInterval => f.write_str("legacy-interval"),
            Self::GravityWell => f.write_str("gravity-well"),
        }
    }
}

/// Branch taken while computing the next target.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum RetargetPath {
    /// No parent block, or too little history; the work limit applies
    WorkLimit,
    /// Between interval boundaries; the tip's bits carry over
    Carried,
    /// Candidate arrived long after the tip on a network that allows min-difficulty blocks
    MinDifficulty,
    /// Skipped back over min-difficulty blocks to the last real target
    LastRealDifficulty {
        /// Height of the block whose bits were reused
        height: u64,
    },
    /// Retargeting disabled by the network parameters
    NoRetargeting,
    /// Interval-boundary recompute
    Interval {
        /// Elapsed seconds over the lookback window, before the 4x clamp
        raw_timespan: i64,
        /// Clamped elapsed seconds over the lookback window
        actual_timespan: i64,
        /// Expected seconds for the window
        target_timespan: i64,
    },
    /// Gravity well disabled by the diagnostic override
    ZeroGravity,
    /// Gravity well sample
    GravityWell {
        /// Blocks consumed by the walk
        mass: u64,
        /// Elapsed seconds over the sample
        actual_seconds: i64,
        /// Expected seconds for the sample
        target_seconds: i64,
        /// `target_seconds / actual_seconds` at the last step
        ratio: f64,
        /// The event horizon stopped the walk before it ran out of ancestors
        early_exit: bool,
    },
}

/// Result of one retarget computation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RetargetOutcome {
    /// Algorithm selected for this height
    pub algorithm: RetargetAlgorithm,
    /// Height of the block the target applies to
    pub height: u64,
    /// Tip bits before the retarget, if there is a tip
    pub previous: Option<CompactTarget>,
    /// Required bits for the next block
    pub bits: CompactTarget,
    /// Branch that produced `bits`
    pub path: RetargetPath,
}

impl RetargetOutcome {
    /// True when the target was actually recomputed from chain history.
    pub fn is_recompute(&self) -> bool {
        matches!(
            self.path,
            RetargetPath::Interval { .. } | RetargetPath::GravityWell { .. }
        )
    }
}
