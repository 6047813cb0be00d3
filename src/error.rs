//! Error taxonomy for the sentinel.
//!
//! The pure classification stages never produce errors; these variants cover
//! the chain-facing collaborators and configuration loading. Metadata failures
//! are degradable by design: the qualification engine skips corroboration
//! rather than failing a classification.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SentinelError {
    /// Mint authority/supply/creation-time data could not be fetched.
    #[error("mint metadata unavailable: {0}")]
    MetadataUnavailable(String),

    /// RPC transport failure.
    #[error("rpc error: {0}")]
    Rpc(String),

    /// Environment configuration problem.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<solana_client::client_error::ClientError> for SentinelError {
    fn from(err: solana_client::client_error::ClientError) -> Self {
        SentinelError::Rpc(err.to_string())
    }
}
