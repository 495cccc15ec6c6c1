//! Proof-of-work verification.

use super::compact::CompactTarget;
use super::params::ConsensusParams;
use crate::error::{InvalidTargetReason, Result, WorkError};
use primitive_types::{H256, U256};

/// Interpret a header hash as a 256-bit magnitude.
///
/// Header hashes are stored little-endian: byte 0 is the least significant.
#[inline]
pub fn hash_to_u256(hash: &H256) -> U256 {
    U256::from_little_endian(hash.as_bytes())
}

/// Decode `bits` and check it is a usable target no easier than the work limit.
pub fn checked_target(bits: CompactTarget, params: &ConsensusParams) -> Result<U256> {
    let decoded = bits.decode();

    let reason = if decoded.negative {
        Some(InvalidTargetReason::Negative)
    } else if decoded.overflow {
        Some(InvalidTargetReason::Overflow)
    } else if decoded.target.is_zero() {
        Some(InvalidTargetReason::Zero)
    } else if decoded.target > params.pow_limit {
        Some(InvalidTargetReason::AboveLimit)
    } else {
        None
    };

    match reason {
        Some(reason) => Err(WorkError::InvalidTarget { bits, reason }),
        None => Ok(decoded.target),
    }
}

/// Check that `hash` satisfies the target claimed by `bits`.
pub fn check_proof_of_work(hash: &H256, bits: CompactTarget, params: &ConsensusParams) -> Result<()> {
    let target = checked_target(bits, params)?;

    if hash_to_u256(hash) > target {
        return Err(WorkError::InsufficientWork { hash: *hash, bits });
    }
    Ok(())
}
