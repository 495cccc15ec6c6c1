//! Adapters: concrete chain index and observability sinks

pub mod chain_arena;
pub mod observers;

pub use chain_arena::{ArenaLink, ChainArena, LinkId};
pub use observers::{NoopObserver, TracingObserver};
