//! Qualification engine: combines program presence, log signals, and
//! balance deltas with external mint metadata into a final burn verdict.
//!
//! The engine is stateless across calls. Its only external touch point is
//! the [`MintMetadataSource`]; every fetch failure degrades to "metadata
//! unavailable" instead of aborting the classification, with one exception:
//! the transfer-to-burn path cannot compute a percentage without total
//! supply, so an unknown supply there is a definitive rejection.

use crate::chain::data_sources::MintMetadataSource;
use crate::classifier::balances::{primary_burn_signal, vault_outflow_fraction};
use crate::classifier::logs::detect_log_signals;
use crate::classifier::programs::{detect_programs, is_lp_authority};
use crate::classifier::types::{
    BurnSignal, BurnVerdict, ClassifierConfig, RejectionReason, TokenSupply,
};
use crate::types::TransactionRecord;
use tracing::{debug, instrument, warn};

/// Classify one transaction. Returns a verdict, never an error: inputs that
/// carry no usable signal reject with a reason instead of failing.
#[instrument(skip(tx, config, metadata), fields(signature = tx.signature.as_deref().unwrap_or("?")))]
pub async fn classify_transaction(
    tx: &TransactionRecord,
    config: &ClassifierConfig,
    metadata: &dyn MintMetadataSource,
) -> BurnVerdict {
    let programs = detect_programs(&tx.account_keys);
    let signals = detect_log_signals(&tx.log_messages);

    let Some(burn) = primary_burn_signal(&tx.pre_token_balances, &tx.post_token_balances) else {
        return BurnVerdict::rejected(RejectionReason::NoBurnSignal);
    };

    let mint = burn.mint().clone();
    let burn_amount = burn.amount_ui();
    let burner = burn.burner().cloned();
    let has_amm_program = programs.iter().any(|tag| tag.is_amm());

    // Balance deltas are authoritative; log markers only corroborate. A
    // mismatch is worth a trace when debugging RPC log truncation.
    match &burn {
        BurnSignal::DirectBurn { .. } | BurnSignal::DeltaBurn { .. }
            if !signals.has_burn_instruction && !signals.has_burn_checked_instruction =>
        {
            debug!(mint = %mint, "burn detected from balances without a burn instruction log");
        }
        BurnSignal::TransferToBurn { burn_address, .. }
            if signals.matched_burn_address.as_deref() != Some(burn_address.as_str()) =>
        {
            debug!(mint = %mint, "burn-address transfer not echoed in logs");
        }
        _ => {}
    }

    // Percentage reference depends on the detection path: the sender's
    // pre-burn position for delta/direct burns, total supply for
    // transfer-to-burn.
    let (burn_percentage, supply_known) = match &burn {
        BurnSignal::DirectBurn { .. } => (1.0, true),
        BurnSignal::DeltaBurn {
            amount_ui,
            owner_pre_ui,
            ..
        } => match owner_pre_ui {
            Some(pre) if *pre > 0.0 => (amount_ui / pre, true),
            // No locatable sender balance: the percentage gate must fail,
            // not silently pass.
            _ => (0.0, true),
        },
        BurnSignal::TransferToBurn { amount_ui, .. } => {
            match metadata.fetch_token_supply(&mint).await {
                Ok(TokenSupply {
                    ui_amount: Some(supply),
                    ..
                }) if supply > 0.0 => (amount_ui / supply, true),
                Ok(_) => (0.0, false),
                Err(e) => {
                    debug!("supply fetch failed for {}: {}", mint, e);
                    (0.0, false)
                }
            }
        }
    };

    if burn_percentage > 1.0 {
        warn!(
            mint = %mint,
            burn_percentage,
            "burn percentage above 1.0 indicates sender-attribution anomaly"
        );
    }

    // LP heuristics, logically OR'd; order only matters for short-circuit.
    let mut is_lp_token = signals.has_pool_vocabulary
        || (signals.has_burn_checked_instruction && has_amm_program)
        || (burn_percentage > 0.9 && has_amm_program)
        || (matches!(burn, BurnSignal::DirectBurn { .. }) && has_amm_program);

    // Corroborate with on-chain authorities when available. A revoked
    // authority pair defaults to LP treatment unless strict mode is set:
    // a deliberate policy favoring false positives over missed burns.
    match metadata.fetch_mint_authorities(&mint).await {
        Ok(Some(authorities)) => {
            let authority_is_lp = authorities
                .mint_authority
                .as_deref()
                .map(is_lp_authority)
                .unwrap_or(false)
                || authorities
                    .freeze_authority
                    .as_deref()
                    .map(is_lp_authority)
                    .unwrap_or(false);
            if authority_is_lp {
                is_lp_token = true;
            } else if authorities.mint_authority.is_none()
                && authorities.freeze_authority.is_none()
                && !config.strict_lp_mode
            {
                is_lp_token = true;
            }
        }
        Ok(None) => debug!("no authority metadata for {}, corroboration skipped", mint),
        Err(e) => debug!("authority fetch failed for {}: {}", mint, e),
    }

    let reject = |reason: RejectionReason| BurnVerdict {
        is_qualifying: false,
        token_mint: Some(mint.clone()),
        burn_amount,
        burn_percentage,
        burner: burner.clone(),
        is_lp_token,
        rejection_reason: Some(reason),
    };

    // Liquidity removal is economically different from a burn and must not
    // be reported as one, whatever the other signals say. Checked ahead of
    // every metadata-dependent gate.
    let outflow = vault_outflow_fraction(&tx.pre_balances, &tx.post_balances);
    if outflow > config.max_vault_outflow_fraction || signals.has_remove_liquidity_vocabulary {
        debug!(
            mint = %mint,
            outflow,
            remove_liquidity_logs = signals.has_remove_liquidity_vocabulary,
            "vault outflow veto"
        );
        return reject(RejectionReason::VaultOutflowVeto);
    }

    if !supply_known {
        return reject(RejectionReason::UnknownSupply);
    }

    // Age gates, only when configured and when a creation time is known.
    if config.min_burn_mint_age_minutes > 0 || config.max_token_age_minutes < u64::MAX {
        match metadata.estimate_mint_creation_time(&mint).await {
            Ok(Some(created_at)) => {
                let reference = tx
                    .block_time
                    .unwrap_or_else(|| chrono::Utc::now().timestamp());
                let age_minutes = ((reference - created_at).max(0) / 60) as u64;
                if age_minutes < config.min_burn_mint_age_minutes {
                    return reject(RejectionReason::MintTooYoung);
                }
                if age_minutes > config.max_token_age_minutes {
                    return reject(RejectionReason::MintTooOld);
                }
            }
            Ok(None) => debug!("no creation time for {}, age gates skipped", mint),
            Err(e) => debug!("creation time fetch failed for {}: {}", mint, e),
        }
    }

    if !is_lp_token {
        return reject(RejectionReason::NotLpToken);
    }

    if burn_percentage < config.min_lp_burn_percentage || burn_percentage > 1.0 {
        return reject(RejectionReason::BelowMinPercentage);
    }

    BurnVerdict {
        is_qualifying: true,
        token_mint: Some(mint),
        burn_amount,
        burn_percentage,
        burner,
        is_lp_token,
        rejection_reason: None,
    }
}
