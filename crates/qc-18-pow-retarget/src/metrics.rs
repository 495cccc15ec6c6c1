//! Metrics collection for the retarget subsystem

use crate::domain::{RetargetAlgorithm, RetargetOutcome, RetargetPath};
use crate::error::WorkError;
use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics collector for retargeting and proof-of-work checks
#[derive(Debug, Default)]
pub struct Metrics {
    /// Targets computed by the interval rules
    pub legacy_retargets: AtomicU64,

    /// Targets computed by the gravity well
    pub gravity_well_retargets: AtomicU64,

    /// Gravity well walks stopped by the event horizon
    pub gravity_well_early_exits: AtomicU64,

    /// Blocks accepted by the proof-of-work check
    pub pow_accepted: AtomicU64,

    /// Blocks rejected for an unusable target
    pub pow_invalid_target: AtomicU64,

    /// Blocks rejected for a hash above the target
    pub pow_insufficient_work: AtomicU64,
}

impl Metrics {
    /// Create new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a computed target
    pub fn record_retarget(&self, outcome: &RetargetOutcome) {
        match outcome.algorithm {
            RetargetAlgorithm::LegacyInterval => {
                self.legacy_retargets.fetch_add(1, Ordering::Relaxed);
            }
            RetargetAlgorithm::GravityWell => {
                self.gravity_well_retargets.fetch_add(1, Ordering::Relaxed);
            }
        }
        if let RetargetPath::GravityWell {
            early_exit: true, ..
        } = outcome.path
        {
            self.gravity_well_early_exits
                .fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a proof-of-work check result
    pub fn record_pow_check(&self, result: &Result<(), WorkError>) {
        let counter = match result {
            Ok(()) => &self.pow_accepted,
            Err(WorkError::InvalidTarget { .. }) => &self.pow_invalid_target,
            Err(WorkError::InsufficientWork { .. }) => &self.pow_insufficient_work,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total retargets across both algorithms
    pub fn get_total_retargets(&self) -> u64 {
        self.legacy_retargets.load(Ordering::Relaxed)
            + self.gravity_well_retargets.load(Ordering::Relaxed)
    }

    /// Get total rejected proofs of work
    pub fn get_pow_rejected(&self) -> u64 {
        self.pow_invalid_target.load(Ordering::Relaxed)
            + self.pow_insufficient_work.load(Ordering::Relaxed)
    }

    /// Get fraction of gravity well walks that exited early
    pub fn get_early_exit_rate(&self) -> f64 {
        let walks = self.gravity_well_retargets.load(Ordering::Relaxed);
        if walks == 0 {
            return 0.0;
        }
        let exits = self.gravity_well_early_exits.load(Ordering::Relaxed);
        exits as f64 / walks as f64
    }
}
