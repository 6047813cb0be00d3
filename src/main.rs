//! Monitor binary: polls Raydium AMM v4 signatures, classifies each new
//! transaction and reports qualifying LP burns.

use anyhow::{Context, Result};
use governor::{Quota, RateLimiter};
use lp_burn_sentinel::chain::{BurnNotifier, RpcMintMetadataSource, RpcTransactionSource};
use lp_burn_sentinel::classifier::{classify_transaction, RAYDIUM_LIQUIDITY_POOL_V4};
use lp_burn_sentinel::config::MonitorConfig;
use moka::future::Cache;
use solana_client::nonblocking::rpc_client::RpcClient;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = MonitorConfig::from_env().context("loading configuration")?;
    info!(rpc_url = %config.rpc_url, "starting LP burn sentinel");

    let rpc = Arc::new(RpcClient::new(config.rpc_url.clone()));
    let transactions = RpcTransactionSource::new(Arc::clone(&rpc));
    let metadata = RpcMintMetadataSource::new(Arc::clone(&rpc));
    let notifier = BurnNotifier::new(config.webhook_url.clone());
    let classifier_config = config.classifier();

    let rate = NonZeroU32::new(config.rpc_requests_per_sec)
        .context("RPC_REQUESTS_PER_SEC must be nonzero")?;
    let limiter = RateLimiter::direct(Quota::per_second(rate));

    // Signatures already classified, expired after an hour so long-running
    // monitors do not grow without bound.
    let seen: Cache<String, ()> = Cache::builder()
        .time_to_live(Duration::from_secs(3600))
        .max_capacity(100_000)
        .build();

    let mut interval = tokio::time::interval(Duration::from_secs(config.poll_interval_secs));
    loop {
        interval.tick().await;

        limiter.until_ready().await;
        let signatures = match transactions
            .recent_signatures(RAYDIUM_LIQUIDITY_POOL_V4, config.signature_batch)
            .await
        {
            Ok(signatures) => signatures,
            Err(e) => {
                warn!("signature poll failed: {}", e);
                continue;
            }
        };

        for signature in signatures {
            if seen.contains_key(&signature) {
                continue;
            }

            limiter.until_ready().await;
            // Marked seen only once a record is in hand; a transient fetch
            // failure or a not-yet-available transaction gets retried on the
            // next poll.
            let record = match transactions.fetch_transaction(&signature).await {
                Ok(Some(record)) => record,
                Ok(None) => {
                    debug!(%signature, "transaction not yet available");
                    continue;
                }
                Err(e) => {
                    error!(%signature, "fetch failed: {}", e);
                    continue;
                }
            };
            seen.insert(signature.clone(), ()).await;

            let verdict = classify_transaction(&record, &classifier_config, &metadata).await;
            if verdict.is_qualifying {
                info!(
                    %signature,
                    mint = verdict.token_mint.as_deref().unwrap_or("?"),
                    burn_amount = verdict.burn_amount,
                    burn_percentage = verdict.burn_percentage,
                    "qualifying LP burn"
                );
                notifier.notify(&signature, &verdict).await;
            } else {
                debug!(
                    %signature,
                    reason = ?verdict.rejection_reason,
                    "transaction did not qualify"
                );
            }
        }
    }
}
