//! Observer adapters for retarget decisions.

use crate::domain::{RetargetOutcome, RetargetPath};
use crate::error::WorkError;
use crate::ports::RetargetObserver;
use tracing::{debug, info, warn};

/// Emits retarget decisions as structured `tracing` events.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl RetargetObserver for TracingObserver {
    fn on_retarget(&self, outcome: &RetargetOutcome) {
        let before = outcome.previous.map(|b| b.to_string()).unwrap_or_default();

        match &outcome.path {
            RetargetPath::Interval {
                raw_timespan,
                actual_timespan,
                target_timespan,
            } => {
                info!(
                    height = outcome.height,
                    algorithm = %outcome.algorithm,
                    raw_timespan,
                    actual_timespan,
                    target_timespan,
                    before = %before,
                    after = %outcome.bits,
                    "[qc-18] Difficulty retarget"
                );
            }
            RetargetPath::GravityWell {
                mass,
                actual_seconds,
                target_seconds,
                ratio,
                early_exit,
            } => {
                info!(
                    height = outcome.height,
                    algorithm = %outcome.algorithm,
                    mass,
                    actual_seconds,
                    target_seconds,
                    ratio,
                    early_exit,
                    before = %before,
                    after = %outcome.bits,
                    "[qc-18] Difficulty retarget - Gravity Well"
                );
            }
            path => {
                debug!(
                    height = outcome.height,
                    algorithm = %outcome.algorithm,
                    path = ?path,
                    bits = %outcome.bits,
                    "[qc-18] Next target"
                );
            }
        }
    }

    fn on_pow_rejected(&self, error: &WorkError) {
        warn!(bits = %error.bits(), "[qc-18] Proof of work rejected: {}", error);
    }
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl RetargetObserver for NoopObserver {
    fn on_retarget(&self, _outcome: &RetargetOutcome) {}

    fn on_pow_rejected(&self, _error: &WorkError) {}
}
