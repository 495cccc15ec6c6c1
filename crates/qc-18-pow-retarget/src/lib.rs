//! # Quantum Chain - PoW Difficulty Retarget Engine (Subsystem 18)
//!
//! **Bounded Context:** Proof-of-Work Consensus Rules
//! **Architecture Compliance:** DDD + Hexagonal + TDD
//!
//! ## Purpose
//!
//! Decides the proof-of-work target every block must meet and checks that a
//! block met it:
//! - Compact ("nBits") target codec with sign and overflow flags
//! - Proof-of-work verification against the network work limit
//! - Chain work accounting and work-equivalent time
//! - Legacy interval retarget (every 2016 blocks, clamped to 4x)
//! - Kimoto Gravity Well per-block retarget from height 310000
//!
//! ## Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Adapters (Outer)                                   │
//! │  - ChainArena: in-memory block index                │
//! │  - TracingObserver / NoopObserver                   │
//! └─────────────────────────────────────────────────────┘
//!                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Ports (Middle)                                     │
//! │  - Inbound: ProofOfWorkRules                        │
//! │  - Outbound: ChainLink, RetargetObserver            │
//! └─────────────────────────────────────────────────────┘
//!                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (Inner - Pure Logic)                        │
//! │  - CompactTarget codec                              │
//! │  - Legacy interval + Gravity Well retarget          │
//! │  - Work and equivalent-time accounting              │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Critical Invariants
//!
//! 1. **Determinism**: the required target is a pure function of the ancestor
//!    chain, the candidate time and the parameters
//! 2. **Work Limit**: no computed target is ever easier than `pow_limit`
//! 3. **Bounded Walk**: the gravity well reads at most `past_blocks_max` links
//! 4. **Exact Arithmetic**: retarget arithmetic is 256-bit integer, apart from
//!    the event-horizon comparison
//!
//! ## Usage Example
//!
//! ```rust
//! use qc_18_pow_retarget::{
//!     CandidateHeader, ChainArena, ProofOfWorkRules, RetargetConfig, RetargetEngine,
//! };
//!
//! let engine = RetargetEngine::new(RetargetConfig::regtest()).unwrap();
//! let limit = engine.config().params.pow_limit_bits();
//!
//! let mut arena = ChainArena::new();
//! arena.push(None, limit, 1_000).unwrap();
//! let tip = arena.tip().unwrap();
//!
//! let bits = engine.next_required_target(Some(&tip), &CandidateHeader::unmined(1_150));
//! assert_eq!(bits, limit);
//! ```
//!
//! ## Module Structure
//!
//! - [`domain`]: Pure consensus logic (codec, retarget algorithms, work)
//! - [`ports`]: Hexagonal architecture interfaces (inbound/outbound)
//! - [`adapters`]: Chain index and observability sinks
//! - [`service`]: Engine wiring config, metrics and observer

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Chain index and observer adapters
pub mod adapters;
/// Domain models and consensus logic
pub mod domain;
pub mod ports;
pub mod service;

mod config;
mod error;
mod metrics;

pub use config::RetargetConfig;
pub use error::{ConfigError, HeaderError, IndexError, InvalidTargetReason, Result, WorkError};
pub use metrics::Metrics;

// Re-export commonly used types
pub use domain::{
    block_work, check_proof_of_work, difficulty, equivalent_time, next_required_target,
    CandidateHeader, CompactTarget, ConsensusParams, DecodedTarget, GravityWellParams,
    RetargetAlgorithm, RetargetOutcome, RetargetPath, TimespanRule,
    GRAVITY_WELL_ACTIVATION_HEIGHT, TIME_WARP_FORK_HEIGHT,
};

pub use ports::{ChainLink, ProofOfWorkRules, RetargetObserver};

pub use adapters::{ArenaLink, ChainArena, LinkId, NoopObserver, TracingObserver};

pub use service::RetargetEngine;

/// Subsystem identifier for IPC communication
pub const SUBSYSTEM_ID: u8 = 18;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subsystem_id() {
        assert_eq!(SUBSYSTEM_ID, 18);
    }

    #[test]
    fn test_activation_constants() {
        assert_eq!(GRAVITY_WELL_ACTIVATION_HEIGHT, 310_000);
        assert_eq!(TIME_WARP_FORK_HEIGHT, 16_000);
    }
}
