//! Legacy interval retarget
//!
//! The target is recomputed once every `adjustment_interval` blocks from the
//! wall-clock time the previous interval took, limited to a 4x change in
//! either direction. Between boundaries the tip's bits carry over, except on
//! networks that allow min-difficulty blocks.
//!
//! REMEMBER: Target is a CEILING. Lower target = harder!

use super::arith::{clamp_to_limit, scale_target};
use super::compact::CompactTarget;
use super::header::CandidateHeader;
use super::outcome::{RetargetAlgorithm, RetargetOutcome, RetargetPath};
use super::params::ConsensusParams;
use crate::ports::ChainLink;

/// Maximum adjustment factor per interval.
pub const MAX_ADJUSTMENT_FACTOR: i64 = 4;

/// Required bits for the block after `tip` under the interval rules.
///
/// # Panics
///
/// If the chain index is missing the ancestor at the start of the lookback
/// window. That is index corruption, not an invalid block.
pub fn legacy_next_target<L: ChainLink>(
    tip: Option<&L>,
    candidate: &CandidateHeader,
    params: &ConsensusParams,
) -> RetargetOutcome {
    let limit_bits = params.pow_limit_bits();

    let Some(tip) = tip else {
        return outcome(0, None, limit_bits, RetargetPath::WorkLimit);
    };

    let next_height = tip.height() + 1;
    let interval = params.adjustment_interval(next_height);

    if next_height % interval != 0 {
        if params.allow_min_difficulty_blocks {
            let stall_after = tip
                .time()
                .saturating_add(params.pow_target_spacing.saturating_mul(2));
            if candidate.time > stall_after {
                return outcome(next_height, Some(tip.bits()), limit_bits, RetargetPath::MinDifficulty);
            }
            let real = last_real_difficulty(tip, params);
            return outcome(
                next_height,
                Some(tip.bits()),
                real.bits(),
                RetargetPath::LastRealDifficulty {
                    height: real.height(),
                },
            );
        }
        return outcome(next_height, Some(tip.bits()), tip.bits(), RetargetPath::Carried);
    }

    // The first retarget after genesis looks back one block less, so a
    // majority miner cannot shift the window on every later retarget.
    let blocks_to_go_back = if next_height != interval {
        interval
    } else {
        interval - 1
    };

    let first_height = tip.height().checked_sub(blocks_to_go_back).unwrap_or_else(|| {
        panic!(
            "retarget window of {} blocks reaches below genesis from height {}",
            blocks_to_go_back,
            tip.height()
        )
    });
    let first = tip.ancestor(first_height).unwrap_or_else(|| {
        panic!(
            "chain index has no ancestor at height {} below tip {}",
            first_height,
            tip.height()
        )
    });

    let (bits, path) = recompute_timespan(tip, first.time(), params);
    outcome(next_height, Some(tip.bits()), bits, path)
}

/// Scale `tip`'s target by the time the interval actually took.
///
/// `first_block_time` is the timestamp at the start of the lookback window.
pub fn recompute_timespan<L: ChainLink>(
    tip: &L,
    first_block_time: i64,
    params: &ConsensusParams,
) -> (CompactTarget, RetargetPath) {
    if params.no_retargeting {
        return (tip.bits(), RetargetPath::NoRetargeting);
    }

    let target_timespan = params.target_timespan(tip.height() + 1);
    let min_timespan = target_timespan / MAX_ADJUSTMENT_FACTOR;
    let max_timespan = target_timespan.saturating_mul(MAX_ADJUSTMENT_FACTOR);

    let raw_timespan = tip.time().saturating_sub(first_block_time);
    let mut actual_timespan = raw_timespan;
    if actual_timespan < min_timespan {
        actual_timespan = min_timespan;
    }
    if actual_timespan > max_timespan {
        actual_timespan = max_timespan;
    }

    let scaled = scale_target(
        tip.bits().target(),
        actual_timespan.max(0) as u64,
        target_timespan.max(0) as u64,
    );
    let bits = CompactTarget::from_target(clamp_to_limit(scaled, params.pow_limit));

    (
        bits,
        RetargetPath::Interval {
            raw_timespan,
            actual_timespan,
            target_timespan,
        },
    )
}

/// Walk back over min-difficulty blocks to the last block carrying a real
/// target. Stops at an interval boundary, at a block whose bits differ from
/// the limit, or at genesis.
///
/// # Panics
///
/// If the walk takes more steps than `tip` has ancestors.
fn last_real_difficulty<L: ChainLink>(tip: &L, params: &ConsensusParams) -> L {
    let limit_bits = params.pow_limit_bits();
    let mut link = tip.clone();
    let mut steps = 0u64;

    while link.height() % params.adjustment_interval(link.height()) != 0 && link.bits() == limit_bits {
        let Some(parent) = link.parent() else {
            break;
        };
        steps += 1;
        assert!(
            steps <= tip.height(),
            "chain index walk from height {} did not descend",
            tip.height()
        );
        link = parent;
    }
    link
}

fn outcome(
    height: u64,
    previous: Option<CompactTarget>,
    bits: CompactTarget,
    path: RetargetPath,
) -> RetargetOutcome {
    RetargetOutcome {
        algorithm: RetargetAlgorithm::LegacyInterval,
        height,
        previous,
        bits,
        path,
    }
}
