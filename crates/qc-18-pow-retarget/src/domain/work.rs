//! Chain work accounting
//!
//! Work is the expected number of hashes needed to meet a target,
//! `2^256 / (target + 1)`. Smaller targets mean more work; chain selection
//! prefers the tip with the most cumulative work.

use super::arith::to_f64;
use super::compact::CompactTarget;
use super::params::ConsensusParams;
use crate::ports::ChainLink;
use primitive_types::U256;

/// Work contributed by a block carrying `bits`.
///
/// Negative, overflowing and zero targets contribute nothing.
pub fn block_work(bits: CompactTarget) -> U256 {
    let decoded = bits.decode();
    if !decoded.is_usable() {
        return U256::zero();
    }
    target_work(decoded.target)
}

/// `2^256 / (target + 1)` without representing `2^256`.
///
/// `2^256 = (2^256 - target - 1) + (target + 1)`, so the quotient is
/// `(!target / (target + 1)) + 1`. A zero target saturates at `U256::MAX`.
pub fn target_work(target: U256) -> U256 {
    let divisor = target.saturating_add(U256::one());
    (!target / divisor).saturating_add(U256::one())
}

/// Seconds of mining at `tip`'s difficulty needed to produce the work between
/// `from` and `to`.
///
/// Positive when `to` has more work than `from`. Saturates at `i64::MAX` in
/// either direction. Used for stall detection, never for consensus.
pub fn equivalent_time<L: ChainLink>(to: &L, from: &L, tip: &L, params: &ConsensusParams) -> i64 {
    work_equivalent_time(
        to.chain_work(),
        from.chain_work(),
        tip.bits(),
        params.pow_target_spacing,
    )
}

/// [`equivalent_time`] over raw cumulative-work values.
pub fn work_equivalent_time(
    to_work: U256,
    from_work: U256,
    tip_bits: CompactTarget,
    target_spacing: i64,
) -> i64 {
    let (delta, sign) = if to_work > from_work {
        (to_work - from_work, 1i64)
    } else {
        (from_work - to_work, -1i64)
    };

    let tip_work = block_work(tip_bits);
    if tip_work.is_zero() {
        return if delta.is_zero() { 0 } else { sign * i64::MAX };
    }

    let spacing = U256::from(target_spacing.max(0) as u64);
    let seconds = delta.saturating_mul(spacing) / tip_work;
    if seconds.bits() > 63 {
        return sign * i64::MAX;
    }
    sign * seconds.low_u64() as i64
}

/// How many times harder `bits` is than the work limit.
///
/// 1.0 at the limit; 0.0 for unusable bits.
pub fn difficulty(bits: CompactTarget, pow_limit: U256) -> f64 {
    let decoded = bits.decode();
    if !decoded.is_usable() {
        return 0.0;
    }
    to_f64(pow_limit) / to_f64(decoded.target)
}

/// Human-readable summary of a target for log lines.
pub fn describe_target(target: U256) -> String {
    let leading_zero_bytes = target.leading_zeros() / 8;
    format!(
        "~{} leading zero bytes ({})",
        leading_zero_bytes,
        CompactTarget::from_target(target)
    )
}
