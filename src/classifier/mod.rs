//! Classifier module - the four-stage LP burn qualification pipeline
//!
//! Program presence, log patterns and balance deltas are pure functions over
//! the transaction record; the engine combines them with external mint
//! metadata into a [`BurnVerdict`].

pub mod types;
pub mod programs;
pub mod logs;
pub mod balances;
pub mod engine;

// Re-export main types
pub use types::{
    BurnCandidate, BurnSignal, BurnVerdict, ClassifierConfig, LogSignals, MintAuthorities,
    RejectionReason, TokenSupply,
};

// Re-export key entry points
pub use engine::classify_transaction;
pub use programs::{detect_programs, KnownProgramTag, RAYDIUM_LIQUIDITY_POOL_V4};
