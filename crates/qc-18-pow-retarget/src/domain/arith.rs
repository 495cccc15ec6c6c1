//! 256-bit target scaling.
//!
//! Retargeting scales a target by `actual / expected` seconds. Multiplication
//! happens first so no precision is lost before the division; the truncation
//! order changes the result by up to one unit and must not be rearranged.

use primitive_types::U256;

/// `target * numerator / denominator`, multiplying first.
///
/// The product saturates at `U256::MAX` instead of wrapping. Callers clamp
/// the result to the work limit afterwards. Returns `target` unchanged when
/// `denominator` is zero.
pub fn scale_target(target: U256, numerator: u64, denominator: u64) -> U256 {
    if denominator == 0 {
        return target;
    }
    target.saturating_mul(U256::from(numerator)) / U256::from(denominator)
}

/// Clamp `target` so it never exceeds `limit`.
#[inline]
pub fn clamp_to_limit(target: U256, limit: U256) -> U256 {
    if target > limit {
        limit
    } else {
        target
    }
}

/// Step a running mean towards `sample`: `(sample - mean) / count + mean`.
///
/// Subtraction and addition wrap modulo 2^256. When `sample` is below `mean`
/// the difference wraps to a huge value, and consensus depends on that exact
/// result, so this must not be rewritten as a signed step.
pub fn step_mean(mean: U256, sample: U256, count: u64) -> U256 {
    let count = U256::from(count.max(1));
    let (delta, _) = sample.overflowing_sub(mean);
    let (next, _) = (delta / count).overflowing_add(mean);
    next
}

/// Lossy conversion to `f64`, used only for display and logging.
pub fn to_f64(value: U256) -> f64 {
    value
        .0
        .iter()
        .rev()
        .fold(0.0, |acc, limb| acc * 18_446_744_073_709_551_616.0 + *limb as f64)
}
