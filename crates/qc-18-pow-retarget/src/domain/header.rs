//! Candidate header as seen by the retarget engine.

use super::compact::CompactTarget;
use primitive_types::H256;
use serde::{Deserialize, Serialize};

/// The block being proposed or validated.
///
/// Retargeting reads only `time`; proof-of-work verification reads `pow_hash`
/// and `bits`. Hashing the header is the caller's job.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateHeader {
    /// Block timestamp (Unix epoch seconds)
    pub time: i64,
    /// Proof-of-work hash of the serialized header
    pub pow_hash: H256,
    /// Claimed target
    pub bits: CompactTarget,
}

impl CandidateHeader {
    /// Header used only for retargeting, before it has been mined.
    pub fn unmined(time: i64) -> Self {
        Self {
            time,
            pow_hash: H256::zero(),
            bits: CompactTarget::default(),
        }
    }
}
