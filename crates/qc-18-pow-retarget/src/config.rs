//! Configuration types for the retarget engine

use crate::domain::{ConsensusParams, GravityWellParams};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Runtime configuration for the retarget engine
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RetargetConfig {
    /// Network consensus parameters
    pub params: ConsensusParams,

    /// Gravity well window (defaults to the consensus window)
    #[serde(default)]
    pub gravity_well: GravityWellParams,

    /// Diagnostic override: the gravity well always returns the work limit.
    /// Never enable on a live network.
    #[serde(default)]
    pub zero_gravity: bool,
}

impl RetargetConfig {
    /// Main network with the consensus gravity well.
    pub fn mainnet() -> Self {
        Self::for_params(ConsensusParams::mainnet())
    }

    /// Public test network.
    pub fn testnet() -> Self {
        Self::for_params(ConsensusParams::testnet())
    }

    /// Local regression network.
    pub fn regtest() -> Self {
        Self::for_params(ConsensusParams::regtest())
    }

    /// Wrap `params` with the consensus gravity well and no overrides.
    pub fn for_params(params: ConsensusParams) -> Self {
        Self {
            params,
            gravity_well: GravityWellParams::consensus(),
            zero_gravity: false,
        }
    }

    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject parameters the retarget algorithms cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let params = &self.params;

        if params.pow_limit.is_zero() {
            return Err(invalid("pow_limit must be non-zero"));
        }
        if params.pow_target_spacing <= 0 {
            return Err(invalid("pow_target_spacing must be positive"));
        }

        let Some(first) = params.timespan_schedule.first() else {
            return Err(invalid("timespan_schedule must not be empty"));
        };
        if first.activation_height != 0 {
            return Err(invalid("timespan_schedule must start at height 0"));
        }
        for pair in params.timespan_schedule.windows(2) {
            if pair[1].activation_height <= pair[0].activation_height {
                return Err(invalid("timespan_schedule heights must be strictly increasing"));
            }
        }
        for rule in &params.timespan_schedule {
            if rule.target_timespan < params.pow_target_spacing {
                return Err(ConfigError::InvalidConfig(format!(
                    "target_timespan {} at height {} is shorter than one {}s block",
                    rule.target_timespan, rule.activation_height, params.pow_target_spacing
                )));
            }
        }

        let well = &self.gravity_well;
        if well.target_spacing <= 0 {
            return Err(invalid("gravity_well.target_spacing must be positive"));
        }
        if well.past_blocks_min == 0 || well.past_blocks_max < well.past_blocks_min {
            return Err(ConfigError::InvalidConfig(format!(
                "gravity_well window {}..={} is empty",
                well.past_blocks_min, well.past_blocks_max
            )));
        }

        Ok(())
    }
}

fn invalid(reason: &str) -> ConfigError {
    ConfigError::InvalidConfig(reason.to_string())
}
