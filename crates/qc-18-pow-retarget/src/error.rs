//! Error types for the PoW retarget subsystem

use crate::domain::CompactTarget;
use primitive_types::H256;
use thiserror::Error;

/// Result type alias for proof-of-work checks
pub type Result<T> = std::result::Result<T, WorkError>;

/// Why a compact target cannot be used.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum InvalidTargetReason {
    /// Sign bit set on a non-zero mantissa
    #[error("negative")]
    Negative,
    /// Decodes to zero
    #[error("zero")]
    Zero,
    /// Does not fit in 256 bits
    #[error("overflow")]
    Overflow,
    /// Easier than the network work limit
    #[error("above work limit")]
    AboveLimit,
}

/// Consensus-rule failures. Both are terminal: the block must be rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WorkError {
    /// Claimed bits do not decode to a usable target
    #[error("Invalid target {bits}: {reason}")]
    InvalidTarget {
        /// Claimed bits
        bits: CompactTarget,
        /// Why the target was rejected
        reason: InvalidTargetReason,
    },

    /// Hash is above the claimed target
    #[error("Insufficient work: hash {hash:?} above target {bits}")]
    InsufficientWork {
        /// Proof-of-work hash
        hash: H256,
        /// Claimed bits
        bits: CompactTarget,
    },
}

impl WorkError {
    /// Bits the failing header claimed.
    pub fn bits(&self) -> CompactTarget {
        match self {
            Self::InvalidTarget { bits, .. } | Self::InsufficientWork { bits, .. } => *bits,
        }
    }
}

/// Header-level proof-of-work failure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// Header claims bits other than the required target
    #[error("Unexpected bits: expected {expected}, got {actual}")]
    UnexpectedBits {
        /// Required bits
        expected: CompactTarget,
        /// Bits in the header
        actual: CompactTarget,
    },

    /// Claimed bits or hash failed the proof-of-work check
    #[error(transparent)]
    Work(#[from] WorkError),
}

/// Rejected configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Parameter out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration document could not be parsed
    #[error("Configuration parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failures inserting into the in-memory chain index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum IndexError {
    /// Parent link is not in the index
    #[error("Unknown parent link {0}")]
    UnknownParent(usize),

    /// A genesis link already exists
    #[error("Genesis link already present")]
    DuplicateGenesis,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = WorkError::InvalidTarget {
            bits: CompactTarget(0x0492_3456),
            reason: InvalidTargetReason::Negative,
        };
        assert_eq!(err.to_string(), "Invalid target 04923456: negative");
        assert_eq!(err.bits(), CompactTarget(0x0492_3456));

        let err = WorkError::InsufficientWork {
            hash: H256::zero(),
            bits: CompactTarget(0x1d00_ffff),
        };
        assert!(err.to_string().contains("1d00ffff"));
    }

    #[test]
    fn test_config_error_from_json() {
        let parse = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: ConfigError = parse.into();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
