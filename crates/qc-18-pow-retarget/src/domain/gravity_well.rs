//! Kimoto Gravity Well: per-block difficulty adjustment
//!
//! Every block, walk back from the tip accumulating a running average of the
//! targets and comparing the time the sample took against the time it should
//! have taken. The walk stops early once the rate deviates past the "event
//! horizon", a bound that narrows as more blocks are sampled:
//!
//! ```text
//! deviation = 1 + 0.7084 * (mass / 144) ^ -1.228
//! stop when ratio <= 1 / deviation  or  ratio >= deviation
//! ```
//!
//! The averaged target is then scaled by `actual / expected` seconds.
//!
//! REMEMBER: Target is a CEILING. Lower target = harder!

use super::arith::{clamp_to_limit, scale_target, step_mean};
use super::compact::CompactTarget;
use super::outcome::{RetargetAlgorithm, RetargetOutcome, RetargetPath};
use super::params::{ConsensusParams, GravityWellParams};
use crate::ports::ChainLink;
use primitive_types::U256;

/// Above this height, regressing timestamps are clamped while walking back.
///
/// Frozen historical hard fork (time-warp fix). Blocks at or below it keep
/// the original unclamped behavior so history replays identically.
pub const TIME_WARP_FORK_HEIGHT: u64 = 16_000;

/// Event horizon for a sample of `mass` blocks.
pub fn event_horizon_deviation(mass: u64) -> f64 {
    1.0 + 0.7084 * (mass as f64 / 144.0).powf(-1.228)
}

/// Required bits for the block after `tip` under the gravity well.
pub fn gravity_well_next_target<L: ChainLink>(
    tip: Option<&L>,
    params: &ConsensusParams,
    well: &GravityWellParams,
) -> RetargetOutcome {
    let limit_bits = params.pow_limit_bits();

    let Some(last) = tip else {
        return outcome(0, None, limit_bits, RetargetPath::WorkLimit);
    };
    let next_height = last.height() + 1;

    if last.height() == 0 || last.height() < well.past_blocks_min {
        return outcome(next_height, Some(last.bits()), limit_bits, RetargetPath::WorkLimit);
    }

    let mut latest_time = last.time();
    let mut reading = last.clone();
    let mut mass: u64 = 0;
    let mut actual_seconds: i64 = 0;
    let mut target_seconds: i64 = 0;
    let mut ratio = 1.0f64;
    let mut average = U256::zero();
    let mut early_exit = false;

    let mut i: u64 = 1;
    while reading.height() > 0 {
        if well.past_blocks_max > 0 && i > well.past_blocks_max {
            break;
        }
        mass += 1;

        let sample = reading.bits().target();
        average = if i == 1 {
            sample
        } else {
            step_mean(average, sample, i)
        };

        let past_fork = reading.height() > TIME_WARP_FORK_HEIGHT;
        if past_fork && latest_time < reading.time() {
            latest_time = reading.time();
        }

        actual_seconds = latest_time.saturating_sub(reading.time()).max(0);
        if past_fork && actual_seconds < 1 {
            actual_seconds = 1;
        }
        target_seconds = well.target_spacing.saturating_mul(mass as i64);

        ratio = 1.0;
        if actual_seconds != 0 && target_seconds != 0 {
            ratio = target_seconds as f64 / actual_seconds as f64;
        }

        let deviation = event_horizon_deviation(mass);
        if mass >= well.past_blocks_min && (ratio <= 1.0 / deviation || ratio >= deviation) {
            early_exit = true;
            break;
        }

        match reading.parent() {
            Some(parent) => reading = parent,
            None => break,
        }
        i += 1;
    }

    let mut next = average;
    if actual_seconds != 0 && target_seconds != 0 {
        next = scale_target(next, actual_seconds as u64, target_seconds as u64);
    }
    let bits = CompactTarget::from_target(clamp_to_limit(next, params.pow_limit));

    outcome(
        next_height,
        Some(last.bits()),
        bits,
        RetargetPath::GravityWell {
            mass,
            actual_seconds,
            target_seconds,
            ratio,
            early_exit,
        },
    )
}

/// Unconditional work limit, for the diagnostic zero-gravity override.
pub fn zero_gravity<L: ChainLink>(tip: Option<&L>, params: &ConsensusParams) -> RetargetOutcome {
    outcome(
        tip.map_or(0, |t| t.height() + 1),
        tip.map(|t| t.bits()),
        params.pow_limit_bits(),
        RetargetPath::ZeroGravity,
    )
}

fn outcome(
    height: u64,
    previous: Option<CompactTarget>,
    bits: CompactTarget,
    path: RetargetPath,
) -> RetargetOutcome {
    RetargetOutcome {
        algorithm: RetargetAlgorithm::GravityWell,
        height,
        previous,
        bits,
        path,
    }
}
