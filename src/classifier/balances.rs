//! Balance-delta extraction over pre/post token balance snapshots.
//!
//! Three detection modes: strictly decreasing balances (delta burns),
//! positions drained from a positive raw amount to exactly zero (direct
//! burns), and balance increases on positions owned by a known burn address
//! (transfer-to-burn). Entries that appear on only one side of the
//! transaction are skipped; accounts can legitimately appear or disappear
//! across a transaction's lifecycle. Nothing here errors or panics.

use crate::classifier::programs::is_burn_address;
use crate::classifier::types::{BurnCandidate, BurnSignal};
use crate::types::{Pubkey, TokenBalance};
use std::collections::HashMap;
use tracing::debug;

type BalanceKey = (Option<Pubkey>, Pubkey, u32);

fn key_of(balance: &TokenBalance) -> BalanceKey {
    (
        balance.owner.clone(),
        balance.mint.clone(),
        balance.account_index,
    )
}

fn index_by_key(balances: &[TokenBalance]) -> HashMap<BalanceKey, &TokenBalance> {
    balances.iter().map(|b| (key_of(b), b)).collect()
}

/// Scale a raw amount into UI units.
pub fn ui_from_raw(raw_amount: u64, decimals: u8) -> f64 {
    raw_amount as f64 / 10f64.powi(decimals as i32)
}

fn ui_amount_of(balance: &TokenBalance) -> f64 {
    balance
        .ui_amount
        .unwrap_or_else(|| ui_from_raw(balance.raw_amount, balance.decimals))
}

/// All strictly decreasing balances, with owner attribution and the owner's
/// pre-burn balance as the percentage reference. Output follows the
/// iteration order of the post snapshot.
fn delta_events(
    pre_balances: &[TokenBalance],
    post_balances: &[TokenBalance],
) -> Vec<(Pubkey, f64, Option<Pubkey>, f64)> {
    let pre_by_key = index_by_key(pre_balances);
    let mut events = Vec::new();
    for post_entry in post_balances {
        let Some(pre_entry) = pre_by_key.get(&key_of(post_entry)) else {
            continue;
        };
        let pre_ui = ui_amount_of(pre_entry);
        let delta = pre_ui - ui_amount_of(post_entry);
        if delta > 0.0 {
            events.push((
                post_entry.mint.clone(),
                delta,
                post_entry.owner.clone(),
                pre_ui,
            ));
        }
    }
    events
}

/// Diff pre/post token balances and emit one candidate per strictly
/// decreasing balance on a matched `(owner, mint, account_index)` position.
pub fn extract_burn_candidates(
    pre_balances: &[TokenBalance],
    post_balances: &[TokenBalance],
) -> Vec<BurnCandidate> {
    delta_events(pre_balances, post_balances)
        .into_iter()
        .map(|(mint, amount_ui, _, _)| BurnCandidate { mint, amount_ui })
        .collect()
}

/// Positions drained from a positive raw amount to exactly zero, owned by a
/// wallet that is not a burn destination. Percentage is 1.0 by definition:
/// the whole position was consumed.
pub fn detect_direct_burns(
    pre_balances: &[TokenBalance],
    post_balances: &[TokenBalance],
) -> Vec<BurnSignal> {
    let post_by_key = index_by_key(post_balances);
    let mut signals = Vec::new();
    for pre_entry in pre_balances {
        if pre_entry.raw_amount == 0 {
            continue;
        }
        let Some(owner) = pre_entry.owner.as_deref() else {
            debug!(
                mint = %pre_entry.mint,
                account_index = pre_entry.account_index,
                "balance entry without owner, skipping direct-burn check"
            );
            continue;
        };
        if is_burn_address(owner) {
            continue;
        }
        let Some(post_entry) = post_by_key.get(&key_of(pre_entry)) else {
            continue;
        };
        if post_entry.raw_amount == 0 {
            signals.push(BurnSignal::DirectBurn {
                mint: pre_entry.mint.clone(),
                amount_ui: ui_amount_of(pre_entry),
                burner: Some(owner.to_string()),
            });
        }
    }
    signals
}

/// A balance increase on a position owned by a known burn address. The
/// increase is the burn amount; the sender is the first pre-balance entry
/// (in snapshot order) of the same mint whose owner is not a burn address
/// and whose balance covers the amount. That tie-break is a heuristic, not
/// a guarantee when several wallets qualify.
pub fn detect_transfer_to_burn(
    pre_balances: &[TokenBalance],
    post_balances: &[TokenBalance],
) -> Option<BurnSignal> {
    let pre_by_key = index_by_key(pre_balances);
    for post_entry in post_balances {
        let Some(owner) = post_entry.owner.as_deref() else {
            continue;
        };
        if !is_burn_address(owner) {
            continue;
        }
        let pre_ui = pre_by_key
            .get(&key_of(post_entry))
            .map(|b| ui_amount_of(b))
            .unwrap_or(0.0);
        let increase = ui_amount_of(post_entry) - pre_ui;
        if increase <= 0.0 {
            continue;
        }
        let sender = pre_balances
            .iter()
            .find(|b| {
                b.mint == post_entry.mint
                    && b.owner.as_deref().map(|o| !is_burn_address(o)).unwrap_or(false)
                    && ui_amount_of(b) >= increase
            })
            .and_then(|b| b.owner.clone());
        return Some(BurnSignal::TransferToBurn {
            mint: post_entry.mint.clone(),
            amount_ui: increase,
            burn_address: owner.to_string(),
            sender,
        });
    }
    None
}

/// The primary burn signal for a transaction, applying detection-mode
/// precedence: direct burn first, then transfer-to-burn, then the first
/// plain delta burn.
pub fn primary_burn_signal(
    pre_balances: &[TokenBalance],
    post_balances: &[TokenBalance],
) -> Option<BurnSignal> {
    if let Some(signal) = detect_direct_burns(pre_balances, post_balances).into_iter().next() {
        return Some(signal);
    }
    if let Some(signal) = detect_transfer_to_burn(pre_balances, post_balances) {
        return Some(signal);
    }
    delta_events(pre_balances, post_balances)
        .into_iter()
        .next()
        .map(|(mint, amount_ui, owner, owner_pre_ui)| BurnSignal::DeltaBurn {
            mint,
            amount_ui,
            owner,
            owner_pre_ui: Some(owner_pre_ui),
        })
}

/// Aggregate lamport decrease across the transaction's accounts, as a
/// fraction of the aggregate pre-transaction balance.
pub fn vault_outflow_fraction(pre_balances: &[u64], post_balances: &[u64]) -> f64 {
    let len = pre_balances.len().min(post_balances.len());
    let pre_total: u128 = pre_balances[..len].iter().map(|&v| v as u128).sum();
    let post_total: u128 = post_balances[..len].iter().map(|&v| v as u128).sum();
    if pre_total == 0 || post_total >= pre_total {
        return 0.0;
    }
    (pre_total - post_total) as f64 / pre_total as f64
}
