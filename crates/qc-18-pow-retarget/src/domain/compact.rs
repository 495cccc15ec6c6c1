//! Compact target codec ("nBits")
//!
//! Block headers carry their work target as a 32-bit floating representation:
//!
//! ```text
//!  31        24 23 22                     0
//! ┌────────────┬──┬────────────────────────┐
//! │  exponent  │ s│        mantissa        │
//! └────────────┴──┴────────────────────────┘
//! ```
//!
//! The magnitude is `mantissa * 256^(exponent - 3)`. The sign bit makes the value
//! conceptually signed; consensus treats any negative target as invalid.
//!
//! The format is lossy. Encoding keeps the three most significant bytes and
//! truncates the rest, which every node must reproduce bit-for-bit.

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

const SIGN_BIT: u32 = 0x0080_0000;
const MANTISSA_MASK: u32 = 0x007f_ffff;

/// Packed 32-bit target as stored in a block header.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompactTarget(pub u32);

/// Result of decoding a [`CompactTarget`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DecodedTarget {
    /// Magnitude, truncated to 256 bits
    pub target: U256,
    /// Sign bit was set on a non-zero mantissa
    pub negative: bool,
    /// Shifted mantissa does not fit in 256 bits
    pub overflow: bool,
}

impl DecodedTarget {
    /// True when the decoded value can be used as a proof-of-work target.
    pub fn is_usable(&self) -> bool {
        !self.negative && !self.overflow && !self.target.is_zero()
    }
}

impl CompactTarget {
    /// Raw consensus value.
    pub fn to_consensus(self) -> u32 {
        self.0
    }

    /// Decode into a 256-bit magnitude plus the sign and overflow flags.
    pub fn decode(self) -> DecodedTarget {
        let compact = self.0;
        let size = compact >> 24;
        let mut word = compact & MANTISSA_MASK;

        let target = if size <= 3 {
            word >>= 8 * (3 - size);
            U256::from(word)
        } else {
            let shift = 8 * (size - 3) as usize;
            if shift >= 256 {
                U256::zero()
            } else {
                U256::from(word) << shift
            }
        };

        let negative = word != 0 && (compact & SIGN_BIT) != 0;
        let overflow = word != 0
            && (size > 34 || (word > 0xff && size > 33) || (word > 0xffff && size > 32));

        DecodedTarget {
            target,
            negative,
            overflow,
        }
    }

    /// Magnitude only; flags are discarded.
    pub fn target(self) -> U256 {
        self.decode().target
    }

    /// Encode a non-negative magnitude using the smallest exponent that fits.
    pub fn from_target(target: U256) -> Self {
        Self::encode(target, false)
    }

    /// Encode a magnitude, setting the sign bit when `negative` and the
    /// resulting mantissa is non-zero.
    pub fn encode(target: U256, negative: bool) -> Self {
        let mut size = (target.bits() + 7) / 8;
        let mut compact = if size <= 3 {
            (target.low_u64() << (8 * (3 - size))) as u32
        } else {
            (target >> (8 * (size - 3))).low_u32()
        };

        // The mantissa's top bit would read as the sign; move a byte into the exponent.
        if compact & SIGN_BIT != 0 {
            compact >>= 8;
            size += 1;
        }

        compact |= (size as u32) << 24;
        if negative && (compact & MANTISSA_MASK) != 0 {
            compact |= SIGN_BIT;
        }
        CompactTarget(compact)
    }
}

impl From<u32> for CompactTarget {
    fn from(value: u32) -> Self {
        CompactTarget(value)
    }
}

impl From<CompactTarget> for u32 {
    fn from(value: CompactTarget) -> Self {
        value.0
    }
}

impl fmt::Display for CompactTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

impl fmt::LowerHex for CompactTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}
