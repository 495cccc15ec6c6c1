//! Domain layer - Pure consensus logic for difficulty retargeting
//!
//! Nothing here performs I/O, logs or mutates the chain index. Retarget
//! functions return a [`RetargetOutcome`] describing the branch they took;
//! the service layer decides what to do with it.
//!
//! ## Components
//!
//! - [`compact`]: 32-bit compact target codec
//! - [`pow`]: proof-of-work verification
//! - [`work`]: chain work and equivalent-time accounting
//! - [`legacy`]: interval retarget (below the activation height)
//! - [`gravity_well`]: per-block Kimoto Gravity Well retarget
//! - [`dispatcher`]: selects the algorithm by height

pub mod arith;
pub mod compact;
pub mod dispatcher;
pub mod gravity_well;
mod header;
pub mod legacy;
mod outcome;
pub mod params;
pub mod pow;
pub mod work;

pub use compact::{CompactTarget, DecodedTarget};
pub use dispatcher::{next_required_target, GRAVITY_WELL_ACTIVATION_HEIGHT};
pub use gravity_well::TIME_WARP_FORK_HEIGHT;
pub use header::CandidateHeader;
pub use outcome::{RetargetAlgorithm, RetargetOutcome, RetargetPath};
pub use params::{ConsensusParams, GravityWellParams, TimespanRule};
pub use pow::{check_proof_of_work, hash_to_u256};
pub use work::{block_work, difficulty, equivalent_time};
