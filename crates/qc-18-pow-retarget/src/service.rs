//! Retarget engine service
//!
//! Wires configuration, the observability sink and metrics around the pure
//! domain functions. Holds no chain state; every call is a deterministic
//! computation over the links it is handed, so one engine can be shared
//! across validation and chain-selection threads.

use crate::adapters::TracingObserver;
use crate::config::RetargetConfig;
use crate::domain::{self, CandidateHeader, CompactTarget, RetargetOutcome};
use crate::error::{ConfigError, HeaderError, Result};
use crate::metrics::Metrics;
use crate::ports::{ChainLink, ProofOfWorkRules, RetargetObserver};
use primitive_types::{H256, U256};
use std::sync::Arc;
use tracing::{debug, info};

/// Difficulty retarget and proof-of-work engine.
pub struct RetargetEngine {
    config: RetargetConfig,
    observer: Arc<dyn RetargetObserver>,
    metrics: Arc<Metrics>,
}

impl RetargetEngine {
    /// Validate `config` and build an engine that logs through `tracing`.
    pub fn new(config: RetargetConfig) -> std::result::Result<Self, ConfigError> {
        Self::with_observer(config, Arc::new(TracingObserver))
    }

    /// Validate `config` and build an engine reporting to `observer`.
    pub fn with_observer(
        config: RetargetConfig,
        observer: Arc<dyn RetargetObserver>,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate()?;

        info!("[qc-18] Initializing PoW Retarget Engine");
        info!(
            "  Work Limit: {} {}",
            config.params.pow_limit_bits(),
            domain::work::describe_target(config.params.pow_limit)
        );
        info!("  Target Spacing: {}s", config.params.pow_target_spacing);
        info!(
            "  Gravity Well Activation: height {}",
            domain::GRAVITY_WELL_ACTIVATION_HEIGHT
        );
        if config.zero_gravity {
            info!("  Zero Gravity override ENABLED: gravity well returns the work limit");
        }

        Ok(Self {
            config,
            observer,
            metrics: Arc::new(Metrics::new()),
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &RetargetConfig {
        &self.config
    }

    /// Shared metrics handle.
    pub fn metrics(&self) -> Arc<Metrics> {
        Arc::clone(&self.metrics)
    }

    /// Compute the next target and report the full outcome.
    pub fn retarget<L: ChainLink>(
        &self,
        tip: Option<&L>,
        candidate: &CandidateHeader,
    ) -> RetargetOutcome {
        let outcome = domain::next_required_target(
            tip,
            candidate,
            &self.config.params,
            &self.config.gravity_well,
            self.config.zero_gravity,
        );
        self.metrics.record_retarget(&outcome);
        if outcome.is_recompute() {
            debug!(
                height = outcome.height,
                difficulty = domain::difficulty(outcome.bits, self.config.params.pow_limit),
                "[qc-18] Recomputed difficulty"
            );
        }
        self.observer.on_retarget(&outcome);
        outcome
    }

    /// Check a candidate header: its bits must equal the required target and
    /// its hash must satisfy them.
    pub fn validate_header<L: ChainLink>(
        &self,
        tip: Option<&L>,
        header: &CandidateHeader,
    ) -> std::result::Result<(), HeaderError> {
        let required = self.next_required_target(tip, header);
        if header.bits != required {
            return Err(HeaderError::UnexpectedBits {
                expected: required,
                actual: header.bits,
            });
        }
        self.check_proof_of_work(&header.pow_hash, header.bits)?;
        Ok(())
    }
}

impl ProofOfWorkRules for RetargetEngine {
    fn next_required_target<L: ChainLink>(
        &self,
        tip: Option<&L>,
        candidate: &CandidateHeader,
    ) -> CompactTarget {
        self.retarget(tip, candidate).bits
    }

    fn check_proof_of_work(&self, hash: &H256, bits: CompactTarget) -> Result<()> {
        let result = domain::check_proof_of_work(hash, bits, &self.config.params);
        self.metrics.record_pow_check(&result);
        if let Err(error) = &result {
            self.observer.on_pow_rejected(error);
        }
        result
    }

    fn block_work(&self, bits: CompactTarget) -> U256 {
        domain::block_work(bits)
    }

    fn equivalent_time<L: ChainLink>(&self, to: &L, from: &L, tip: &L) -> i64 {
        domain::equivalent_time(to, from, tip, &self.config.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{ChainArena, NoopObserver};
    use crate::domain::RetargetPath;
    use std::sync::atomic::Ordering;

    fn engine(config: RetargetConfig) -> RetargetEngine {
        RetargetEngine::with_observer(config, Arc::new(NoopObserver)).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = RetargetConfig::mainnet();
        config.params.pow_target_spacing = -1;
        assert!(RetargetEngine::new(config).is_err());
    }

    #[test]
    fn test_genesis_candidate_gets_work_limit() {
        let engine = engine(RetargetConfig::mainnet());
        let tip: Option<&crate::adapters::ArenaLink> = None;
        let bits = engine.next_required_target(tip, &CandidateHeader::unmined(0));
        assert_eq!(bits, engine.config().params.pow_limit_bits());
        assert_eq!(engine.metrics().legacy_retargets.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_pow_check_updates_metrics() {
        let engine = engine(RetargetConfig::regtest());
        let limit_bits = engine.config().params.pow_limit_bits();

        assert!(engine.check_proof_of_work(&H256::zero(), limit_bits).is_ok());
        assert!(engine.check_proof_of_work(&H256::repeat_byte(0xff), limit_bits).is_err());
        assert!(engine.check_proof_of_work(&H256::zero(), CompactTarget(0)).is_err());

        let metrics = engine.metrics();
        assert_eq!(metrics.pow_accepted.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.pow_insufficient_work.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.pow_invalid_target.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_validate_header_requires_exact_bits() {
        let engine = engine(RetargetConfig::regtest());
        let mut arena = ChainArena::new();
        let limit_bits = engine.config().params.pow_limit_bits();
        arena.push(None, limit_bits, 1_000).unwrap();
        let tip = arena.tip().unwrap();

        let good = CandidateHeader {
            time: 1_150,
            pow_hash: H256::zero(),
            bits: limit_bits,
        };
        assert_eq!(engine.validate_header(Some(&tip), &good), Ok(()));

        let wrong_bits = CandidateHeader {
            bits: CompactTarget(0x1d00_ffff),
            ..good
        };
        assert_eq!(
            engine.validate_header(Some(&tip), &wrong_bits),
            Err(HeaderError::UnexpectedBits {
                expected: limit_bits,
                actual: CompactTarget(0x1d00_ffff),
            })
        );
    }

    #[test]
    fn test_zero_gravity_only_affects_gravity_well() {
        let config = RetargetConfig {
            zero_gravity: true,
            ..RetargetConfig::mainnet()
        };
        let engine = engine(config);
        let mut arena = ChainArena::new();
        arena.push(None, CompactTarget(0x1d00_ffff), 0).unwrap();
        let tip = arena.tip().unwrap();

        let out = engine.retarget(Some(&tip), &CandidateHeader::unmined(150));
        assert_eq!(out.path, RetargetPath::Carried);
    }
}
