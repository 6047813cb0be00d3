//! Core data structures shared between the burn classifier and the chain layer.

use serde::{Deserialize, Serialize};

/// A public key in base58 text form, as returned by JSON-encoded RPC responses.
pub type Pubkey = String;

/// One token balance snapshot entry from a transaction's pre/post metadata.
///
/// Entries are matched across the pre and post sides by the composite key
/// `(owner, mint, account_index)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenBalance {
    /// Index into the transaction's account keys
    pub account_index: u32,
    /// The token mint this balance belongs to
    pub mint: Pubkey,
    /// Wallet that owns the token account, when the node reports it
    pub owner: Option<Pubkey>,
    /// Balance in UI units (raw amount scaled by decimals)
    pub ui_amount: Option<f64>,
    /// Balance in raw base units
    pub raw_amount: u64,
    /// Mint decimals
    pub decimals: u8,
}

/// A confirmed transaction reduced to the fields burn classification needs.
///
/// Built from a JSON-encoded RPC transaction response; the classifier never
/// touches the raw wire format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Transaction signature, when known
    pub signature: Option<String>,
    /// Ordered account keys of the transaction message
    pub account_keys: Vec<Pubkey>,
    /// Program log lines emitted during execution
    pub log_messages: Vec<String>,
    /// Token balances before execution
    pub pre_token_balances: Vec<TokenBalance>,
    /// Token balances after execution
    pub post_token_balances: Vec<TokenBalance>,
    /// Lamport balances before execution, positionally indexed by account
    pub pre_balances: Vec<u64>,
    /// Lamport balances after execution, positionally indexed by account
    pub post_balances: Vec<u64>,
    /// Block time in Unix seconds, when the node reports it
    pub block_time: Option<i64>,
}
