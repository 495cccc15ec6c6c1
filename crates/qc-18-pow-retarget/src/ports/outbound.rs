//! Outbound ports (driven side - SPI)

use crate::domain::{CompactTarget, RetargetOutcome};
use crate::error::WorkError;
use primitive_types::U256;

/// Port: read-only view of one block in the best-known chain index.
///
/// Implementations are cheap handles (an index into an arena, a reference
/// into shared storage). Retargeting only walks backwards and never mutates.
pub trait ChainLink: Clone {
    /// Height above genesis (genesis = 0)
    fn height(&self) -> u64;

    /// Compact target recorded in this block's header
    fn bits(&self) -> CompactTarget;

    /// Header timestamp (Unix epoch seconds)
    fn time(&self) -> i64;

    /// Total work of the chain up to and including this block
    fn chain_work(&self) -> U256;

    /// Parent link; `None` only at genesis
    fn parent(&self) -> Option<Self>;

    /// Ancestor on this link's own line at `height`.
    ///
    /// `None` when `height` is above this link's height.
    fn ancestor(&self, height: u64) -> Option<Self>;
}

/// Port: observability sink for retarget decisions and rejected proofs of work.
pub trait RetargetObserver: Send + Sync {
    /// A target was computed for the next block
    fn on_retarget(&self, outcome: &RetargetOutcome);

    /// A proof of work failed verification
    fn on_pow_rejected(&self, error: &WorkError);
}
