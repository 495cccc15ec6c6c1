//! Shared fixtures for the retarget integration tests.

#![allow(dead_code)]

use primitive_types::U256;
use qc_18_pow_retarget::{
    block_work, ChainLink, CompactTarget, RetargetObserver, RetargetOutcome, WorkError,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

pub const BASE_TIME: i64 = 1_400_000_000;

/// A chain that exists only as a formula: every block carries the same bits
/// (or alternates between two) and sits `spacing` seconds after its parent,
/// optionally with jitter that makes timestamps run backwards. Lets tests
/// start walks at heights far past the gravity-well activation without
/// building the whole index.
pub struct SyntheticChain {
    pub bits: CompactTarget,
    /// Bits carried by odd heights, when they differ from `bits`.
    pub odd_bits: Option<CompactTarget>,
    pub spacing: i64,
    pub jitter: bool,
    reads: AtomicU64,
}

impl SyntheticChain {
    pub fn new(bits: CompactTarget, spacing: i64) -> Self {
        Self {
            bits,
            odd_bits: None,
            spacing,
            jitter: false,
            reads: AtomicU64::new(0),
        }
    }

    /// Even heights carry `even`, odd heights carry `odd`.
    pub fn alternating(even: CompactTarget, odd: CompactTarget, spacing: i64) -> Self {
        Self {
            odd_bits: Some(odd),
            ..Self::new(even, spacing)
        }
    }

    pub fn bits_at(&self, height: u64) -> CompactTarget {
        match self.odd_bits {
            Some(odd) if height % 2 == 1 => odd,
            _ => self.bits,
        }
    }

    pub fn jittered(bits: CompactTarget, spacing: i64) -> Self {
        Self {
            jitter: true,
            ..Self::new(bits, spacing)
        }
    }

    pub fn link(&self, height: u64) -> SyntheticLink<'_> {
        SyntheticLink {
            chain: self,
            height,
        }
    }

    pub fn time_at(&self, height: u64) -> i64 {
        let offset = if self.jitter {
            ((height * 7_919) % 181) as i64 - 90
        } else {
            0
        };
        BASE_TIME + height as i64 * self.spacing + offset
    }

    /// Parent hops since the last call.
    pub fn take_reads(&self) -> u64 {
        self.reads.swap(0, Ordering::Relaxed)
    }
}

#[derive(Clone, Copy)]
pub struct SyntheticLink<'a> {
    chain: &'a SyntheticChain,
    height: u64,
}

impl ChainLink for SyntheticLink<'_> {
    fn height(&self) -> u64 {
        self.height
    }

    fn bits(&self) -> CompactTarget {
        self.chain.bits_at(self.height)
    }

    fn time(&self) -> i64 {
        self.chain.time_at(self.height)
    }

    fn chain_work(&self) -> U256 {
        block_work(self.chain.bits) * U256::from(self.height + 1)
    }

    fn parent(&self) -> Option<Self> {
        self.chain.reads.fetch_add(1, Ordering::Relaxed);
        (self.height > 0).then(|| self.chain.link(self.height - 1))
    }

    fn ancestor(&self, height: u64) -> Option<Self> {
        (height <= self.height).then(|| self.chain.link(height))
    }
}

/// Keeps every outcome and rejection it is told about.
#[derive(Default)]
pub struct RecordingObserver {
    pub outcomes: Mutex<Vec<RetargetOutcome>>,
    pub rejections: Mutex<Vec<WorkError>>,
}

impl RetargetObserver for RecordingObserver {
    fn on_retarget(&self, outcome: &RetargetOutcome) {
        self.outcomes.lock().unwrap().push(outcome.clone());
    }

    fn on_pow_rejected(&self, error: &WorkError) {
        self.rejections.lock().unwrap().push(error.clone());
    }
}
