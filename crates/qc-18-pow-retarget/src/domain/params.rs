//! Consensus parameters for difficulty retargeting
//!
//! **IMPORTANT**: a target is a CEILING on the block hash:
//! - HIGHER target = EASIER
//! - LOWER target = HARDER
//!
//! `pow_limit` is therefore the easiest target the network will ever accept.

use super::compact::CompactTarget;
use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// Seconds in a day, used to size the gravity-well window.
pub const SECONDS_PER_DAY: i64 = 60 * 60 * 24;

/// Target timespan that applies from `activation_height` onwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimespanRule {
    /// First block height the rule applies to
    pub activation_height: u64,
    /// Seconds one adjustment interval is expected to take
    pub target_timespan: i64,
}

/// Network-wide constants. Immutable for the lifetime of a chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusParams {
    /// Easiest allowed proof-of-work target
    pub pow_limit: U256,

    /// Easiest allowed proof-of-stake target (not used by retargeting)
    pub pos_limit: U256,

    /// Seconds between blocks
    pub pow_target_spacing: i64,

    /// Target timespan by height, sorted by `activation_height`, first rule at height 0
    pub timespan_schedule: Vec<TimespanRule>,

    /// Allow min-difficulty blocks when the network stalls
    pub allow_min_difficulty_blocks: bool,

    /// Never retarget; interval boundaries keep the tip's bits
    pub no_retargeting: bool,
}

impl ConsensusParams {
    /// Litecoin-style main network: 2.5 minute blocks, 3.5 day intervals.
    pub fn mainnet() -> Self {
        Self {
            pow_limit: U256::MAX >> 20,
            pos_limit: U256::MAX >> 24,
            pow_target_spacing: 150,
            timespan_schedule: vec![TimespanRule {
                activation_height: 0,
                target_timespan: 2016 * 150,
            }],
            allow_min_difficulty_blocks: false,
            no_retargeting: false,
        }
    }

    /// Public test network: mainnet timing with min-difficulty blocks.
    pub fn testnet() -> Self {
        Self {
            allow_min_difficulty_blocks: true,
            ..Self::mainnet()
        }
    }

    /// Local regression testing: trivially easy and never retargets.
    pub fn regtest() -> Self {
        Self {
            pow_limit: U256::MAX >> 1,
            pos_limit: U256::MAX >> 1,
            allow_min_difficulty_blocks: true,
            no_retargeting: true,
            ..Self::mainnet()
        }
    }

    /// Compact encoding of the work limit.
    pub fn pow_limit_bits(&self) -> CompactTarget {
        CompactTarget::from_target(self.pow_limit)
    }

    /// Expected seconds for the adjustment interval containing `height`.
    pub fn target_timespan(&self, height: u64) -> i64 {
        self.timespan_schedule
            .iter()
            .take_while(|rule| rule.activation_height <= height)
            .last()
            .or_else(|| self.timespan_schedule.first())
            .map(|rule| rule.target_timespan)
            .unwrap_or(self.pow_target_spacing)
    }

    /// Blocks per adjustment interval at `height`. Never zero.
    pub fn adjustment_interval(&self, height: u64) -> u64 {
        if self.pow_target_spacing <= 0 {
            return 1;
        }
        (self.target_timespan(height) / self.pow_target_spacing).max(1) as u64
    }
}

impl Default for ConsensusParams {
    fn default() -> Self {
        Self::mainnet()
    }
}

/// Gravity well window sizing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GravityWellParams {
    /// Seconds between blocks the well steers towards
    pub target_spacing: i64,
    /// Blocks required before the well retargets, and before the event horizon may stop the walk
    pub past_blocks_min: u64,
    /// Most blocks the walk will consume
    pub past_blocks_max: u64,
}

impl GravityWellParams {
    /// Spacing frozen into consensus when the gravity well activated.
    pub const CONSENSUS_SPACING: i64 = 60;

    /// Window derived from day fractions.
    ///
    /// The fractions are applied in double precision and truncated to whole
    /// seconds before dividing by the spacing. `2.8` days therefore gives
    /// 241_919 seconds, not 241_920, and the window holds 4031 blocks.
    pub fn from_day_fractions(target_spacing: i64, min_days: f64, max_days: f64) -> Self {
        let spacing = target_spacing.max(1);
        let past_seconds_min = (SECONDS_PER_DAY as f64 * min_days) as i64;
        let past_seconds_max = (SECONDS_PER_DAY as f64 * max_days) as i64;
        Self {
            target_spacing,
            past_blocks_min: (past_seconds_min / spacing).max(0) as u64,
            past_blocks_max: (past_seconds_max / spacing).max(0) as u64,
        }
    }

    /// Consensus window: 0.1 to 2.8 days of one-minute blocks.
    pub fn consensus() -> Self {
        Self::from_day_fractions(Self::CONSENSUS_SPACING, 0.1, 2.8)
    }
}

impl Default for GravityWellParams {
    fn default() -> Self {
        Self::consensus()
    }
}
