//! Chain module - RPC-backed data sources and outbound notifications

pub mod data_sources;
pub mod notifier;

pub use data_sources::{MintMetadataSource, RpcMintMetadataSource, RpcTransactionSource};
pub use notifier::BurnNotifier;
