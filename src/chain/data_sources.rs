//! Chain-facing collaborators: mint metadata lookups and transaction
//! fetching over a Solana RPC node.
//!
//! These are thin read wrappers with no decision logic. All metadata
//! lookups degrade to "unavailable" instead of failing a classification;
//! results are cached per mint with a short TTL.

use crate::classifier::types::{MintAuthorities, TokenSupply};
use crate::error::SentinelError;
use crate::types::{TokenBalance, TransactionRecord};
use async_trait::async_trait;
use moka::future::Cache;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_client::GetConfirmedSignaturesForAddress2Config;
use solana_client::rpc_config::RpcTransactionConfig;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::program_pack::Pack;
use solana_sdk::pubkey::Pubkey as SolanaPubkey;
use solana_sdk::signature::Signature;
use solana_transaction_status::{
    EncodedConfirmedTransactionWithStatusMeta, EncodedTransaction, UiMessage,
    UiTransactionEncoding, UiTransactionTokenBalance,
};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::{strategy::ExponentialBackoff, Retry};
use tracing::{debug, instrument, warn};

/// Signature page size for creation-time scans.
const SIGNATURE_PAGE_LIMIT: usize = 1000;
/// Lookback bound for creation-time scans, in pages.
const CREATION_SCAN_MAX_PAGES: usize = 5;

/// External mint metadata needed by the qualification engine.
///
/// Implementations may fail freely; the engine treats any error as
/// "metadata unavailable" and degrades instead of aborting.
#[async_trait]
pub trait MintMetadataSource: Send + Sync {
    /// Mint and freeze authorities, or `None` when the account cannot be
    /// read or parsed.
    async fn fetch_mint_authorities(
        &self,
        mint: &str,
    ) -> Result<Option<MintAuthorities>, SentinelError>;

    /// Total supply in UI units. Fields are `None` when unknown.
    async fn fetch_token_supply(&self, mint: &str) -> Result<TokenSupply, SentinelError>;

    /// Earliest known activity timestamp for the mint, approximate by
    /// nature. `None` when no history is available within the lookback.
    async fn estimate_mint_creation_time(&self, mint: &str) -> Result<Option<i64>, SentinelError>;
}

/// RPC-backed metadata source with per-mint TTL caching.
pub struct RpcMintMetadataSource {
    rpc: Arc<RpcClient>,
    authority_cache: Cache<String, Option<MintAuthorities>>,
    supply_cache: Cache<String, TokenSupply>,
}

impl RpcMintMetadataSource {
    pub fn new(rpc: Arc<RpcClient>) -> Self {
        Self {
            rpc,
            authority_cache: Cache::builder()
                .time_to_live(Duration::from_secs(300))
                .max_capacity(1000)
                .build(),
            supply_cache: Cache::builder()
                .time_to_live(Duration::from_secs(300))
                .max_capacity(1000)
                .build(),
        }
    }

    fn retry_strategy() -> impl Iterator<Item = Duration> {
        ExponentialBackoff::from_millis(200)
            .max_delay(Duration::from_secs(2))
            .take(2)
    }
}

#[async_trait]
impl MintMetadataSource for RpcMintMetadataSource {
    #[instrument(skip(self), fields(mint = %mint))]
    async fn fetch_mint_authorities(
        &self,
        mint: &str,
    ) -> Result<Option<MintAuthorities>, SentinelError> {
        if let Some(cached) = self.authority_cache.get(mint).await {
            return Ok(cached);
        }
        let mint_pubkey = match SolanaPubkey::from_str(mint) {
            Ok(pk) => pk,
            Err(e) => {
                return Err(SentinelError::MetadataUnavailable(format!(
                    "invalid mint address {}: {}",
                    mint, e
                )))
            }
        };

        let account = Retry::spawn(Self::retry_strategy(), || async {
            self.rpc.get_account(&mint_pubkey).await
        })
        .await;

        let authorities = match account {
            Ok(account) => match spl_token::state::Mint::unpack_from_slice(&account.data) {
                Ok(state) => {
                    let mint_authority: Option<_> = state.mint_authority.into();
                    let freeze_authority: Option<_> = state.freeze_authority.into();
                    Some(MintAuthorities {
                        mint_authority: mint_authority.map(|pk: SolanaPubkey| pk.to_string()),
                        freeze_authority: freeze_authority.map(|pk: SolanaPubkey| pk.to_string()),
                    })
                }
                Err(e) => {
                    debug!("mint account for {} is not an SPL mint: {}", mint, e);
                    None
                }
            },
            Err(e) => {
                debug!("failed to fetch mint account {}: {}", mint, e);
                None
            }
        };

        self.authority_cache
            .insert(mint.to_string(), authorities.clone())
            .await;
        Ok(authorities)
    }

    #[instrument(skip(self), fields(mint = %mint))]
    async fn fetch_token_supply(&self, mint: &str) -> Result<TokenSupply, SentinelError> {
        if let Some(cached) = self.supply_cache.get(mint).await {
            return Ok(cached);
        }
        let mint_pubkey = match SolanaPubkey::from_str(mint) {
            Ok(pk) => pk,
            Err(_) => return Ok(TokenSupply::default()),
        };

        let supply = match Retry::spawn(Self::retry_strategy(), || async {
            self.rpc.get_token_supply(&mint_pubkey).await
        })
        .await
        {
            Ok(amount) => TokenSupply {
                ui_amount: amount.ui_amount,
                decimals: Some(amount.decimals),
            },
            Err(e) => {
                debug!("failed to fetch supply for {}: {}", mint, e);
                TokenSupply::default()
            }
        };

        self.supply_cache.insert(mint.to_string(), supply.clone()).await;
        Ok(supply)
    }

    #[instrument(skip(self), fields(mint = %mint))]
    async fn estimate_mint_creation_time(&self, mint: &str) -> Result<Option<i64>, SentinelError> {
        let mint_pubkey = match SolanaPubkey::from_str(mint) {
            Ok(pk) => pk,
            Err(_) => return Ok(None),
        };

        // Walk the signature history backwards; the block time of the oldest
        // reachable signature approximates the mint creation time.
        let mut before: Option<Signature> = None;
        let mut oldest_block_time: Option<i64> = None;
        for _ in 0..CREATION_SCAN_MAX_PAGES {
            let config = GetConfirmedSignaturesForAddress2Config {
                before,
                until: None,
                limit: Some(SIGNATURE_PAGE_LIMIT),
                commitment: Some(CommitmentConfig::confirmed()),
            };
            let page = match self
                .rpc
                .get_signatures_for_address_with_config(&mint_pubkey, config)
                .await
            {
                Ok(page) => page,
                Err(e) => {
                    debug!("signature history fetch failed for {}: {}", mint, e);
                    break;
                }
            };
            let Some(last) = page.last() else {
                break;
            };
            if last.block_time.is_some() {
                oldest_block_time = last.block_time;
            }
            if page.len() < SIGNATURE_PAGE_LIMIT {
                break;
            }
            before = match Signature::from_str(&last.signature) {
                Ok(sig) => Some(sig),
                Err(_) => break,
            };
        }
        Ok(oldest_block_time)
    }
}

/// Transaction fetching and program-signature polling over RPC.
pub struct RpcTransactionSource {
    rpc: Arc<RpcClient>,
}

impl RpcTransactionSource {
    pub fn new(rpc: Arc<RpcClient>) -> Self {
        Self { rpc }
    }

    /// Fetch a confirmed transaction and reduce it to a
    /// [`TransactionRecord`]. Returns `Ok(None)` when the node does not
    /// know the signature.
    #[instrument(skip(self), fields(signature = %signature))]
    pub async fn fetch_transaction(
        &self,
        signature: &str,
    ) -> Result<Option<TransactionRecord>, SentinelError> {
        let parsed = Signature::from_str(signature)
            .map_err(|e| SentinelError::Rpc(format!("invalid signature {}: {}", signature, e)))?;
        let config = RpcTransactionConfig {
            encoding: Some(UiTransactionEncoding::Json),
            commitment: Some(CommitmentConfig::confirmed()),
            max_supported_transaction_version: Some(0),
        };
        match self.rpc.get_transaction_with_config(&parsed, config).await {
            Ok(fetched) => Ok(record_from_encoded(signature, fetched)),
            Err(e) => {
                let message = e.to_string();
                if message.contains("not found") || message.contains("Signature") {
                    debug!("transaction {} not found: {}", signature, message);
                    Ok(None)
                } else {
                    Err(SentinelError::Rpc(message))
                }
            }
        }
    }

    /// Most recent transaction signatures touching the given program.
    #[instrument(skip(self), fields(program = %program))]
    pub async fn recent_signatures(
        &self,
        program: &str,
        limit: usize,
    ) -> Result<Vec<String>, SentinelError> {
        let program_pubkey = SolanaPubkey::from_str(program)
            .map_err(|e| SentinelError::Config(format!("invalid program address: {}", e)))?;
        let config = GetConfirmedSignaturesForAddress2Config {
            before: None,
            until: None,
            limit: Some(limit),
            commitment: Some(CommitmentConfig::confirmed()),
        };
        let page = self
            .rpc
            .get_signatures_for_address_with_config(&program_pubkey, config)
            .await?;
        Ok(page
            .into_iter()
            .filter(|status| status.err.is_none())
            .map(|status| status.signature)
            .collect())
    }
}

/// Reduce a JSON-encoded RPC transaction to the classifier's record shape.
/// Returns `None` when the response carries no meta (nothing to classify).
fn record_from_encoded(
    signature: &str,
    fetched: EncodedConfirmedTransactionWithStatusMeta,
) -> Option<TransactionRecord> {
    let meta = fetched.transaction.meta?;

    let account_keys = match fetched.transaction.transaction {
        EncodedTransaction::Json(ui_transaction) => match ui_transaction.message {
            UiMessage::Raw(raw) => raw.account_keys,
            UiMessage::Parsed(parsed) => parsed
                .account_keys
                .into_iter()
                .map(|account| account.pubkey)
                .collect(),
        },
        _ => {
            warn!("unexpected transaction encoding for {}", signature);
            Vec::new()
        }
    };

    let log_messages: Vec<String> = Option::from(meta.log_messages).unwrap_or_default();
    let pre_token_balances =
        convert_token_balances(Option::from(meta.pre_token_balances).unwrap_or_default());
    let post_token_balances =
        convert_token_balances(Option::from(meta.post_token_balances).unwrap_or_default());

    Some(TransactionRecord {
        signature: Some(signature.to_string()),
        account_keys,
        log_messages,
        pre_token_balances,
        post_token_balances,
        pre_balances: meta.pre_balances,
        post_balances: meta.post_balances,
        block_time: fetched.block_time,
    })
}

/// An entry whose amount string fails to parse carries no usable quantity
/// and is dropped. Coercing it to zero would look like a fully drained
/// position to the direct-burn check.
fn convert_token_balances(raw: Vec<UiTransactionTokenBalance>) -> Vec<TokenBalance> {
    raw.into_iter()
        .filter_map(|entry| {
            let raw_amount = match entry.ui_token_amount.amount.parse() {
                Ok(amount) => amount,
                Err(_) => {
                    debug!(
                        mint = %entry.mint,
                        account_index = entry.account_index,
                        amount = %entry.ui_token_amount.amount,
                        "unparseable token amount, skipping balance entry"
                    );
                    return None;
                }
            };
            Some(TokenBalance {
                account_index: entry.account_index as u32,
                mint: entry.mint.clone(),
                owner: Option::from(entry.owner.clone()),
                ui_amount: entry.ui_token_amount.ui_amount,
                raw_amount,
                decimals: entry.ui_token_amount.decimals,
            })
        })
        .collect()
}
