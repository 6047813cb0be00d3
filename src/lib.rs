//! lp-burn-sentinel - Solana LP token burn classification
//!
//! This crate watches Raydium AMM transactions and classifies LP token
//! burns: detecting burn signals from balance deltas and program logs,
//! then qualifying them against mint metadata and configurable thresholds.

pub mod types;
pub mod error;
pub mod config;
pub mod classifier;
pub mod chain;

// Re-export main types for convenience
pub use classifier::{classify_transaction, BurnVerdict, ClassifierConfig, RejectionReason};
pub use error::SentinelError;
pub use types::{TokenBalance, TransactionRecord};
