//! Retarget algorithm selection by height.

use super::gravity_well::{gravity_well_next_target, zero_gravity};
use super::header::CandidateHeader;
use super::legacy::legacy_next_target;
use super::outcome::{RetargetAlgorithm, RetargetOutcome};
use super::params::{ConsensusParams, GravityWellParams};
use crate::ports::ChainLink;

/// First block height retargeted by the gravity well.
///
/// One-time consensus switch. Blocks below it keep the interval rules forever.
pub const GRAVITY_WELL_ACTIVATION_HEIGHT: u64 = 310_000;

impl RetargetAlgorithm {
    /// Algorithm that retargets the block at `next_height`.
    pub fn for_height(next_height: u64) -> Self {
        if next_height >= GRAVITY_WELL_ACTIVATION_HEIGHT {
            Self::GravityWell
        } else {
            Self::LegacyInterval
        }
    }
}

/// Required bits for the block after `tip`.
///
/// `zero_gravity` forces the gravity well to return the work limit; it has no
/// effect below the activation height.
pub fn next_required_target<L: ChainLink>(
    tip: Option<&L>,
    candidate: &CandidateHeader,
    params: &ConsensusParams,
    well: &GravityWellParams,
    zero_gravity_override: bool,
) -> RetargetOutcome {
    let next_height = tip.map_or(0, |t| t.height() + 1);

    match RetargetAlgorithm::for_height(next_height) {
        RetargetAlgorithm::LegacyInterval => legacy_next_target(tip, candidate, params),
        RetargetAlgorithm::GravityWell if zero_gravity_override => zero_gravity(tip, params),
        RetargetAlgorithm::GravityWell => gravity_well_next_target(tip, params, well),
    }
}
