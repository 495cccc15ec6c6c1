//! Inbound ports (driving side - API)

use super::outbound::ChainLink;
use crate::domain::{CandidateHeader, CompactTarget};
use crate::error::Result;
use primitive_types::{H256, U256};

/// Port: consensus proof-of-work rules exposed to block validation,
/// block production and chain selection.
pub trait ProofOfWorkRules {
    /// Bits the block after `tip` must carry. `tip` is `None` when the
    /// candidate is the genesis block.
    fn next_required_target<L: ChainLink>(
        &self,
        tip: Option<&L>,
        candidate: &CandidateHeader,
    ) -> CompactTarget;

    /// Check `hash` against the claimed `bits`.
    fn check_proof_of_work(&self, hash: &H256, bits: CompactTarget) -> Result<()>;

    /// Work represented by a block carrying `bits`.
    fn block_work(&self, bits: CompactTarget) -> U256;

    /// Seconds of mining at `tip`'s difficulty the work between `from` and `to` represents.
    fn equivalent_time<L: ChainLink>(&self, to: &L, from: &L, tip: &L) -> i64;
}
