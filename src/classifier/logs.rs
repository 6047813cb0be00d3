//! Log-pattern detection over program log lines.
//!
//! Each signal is a named predicate so the loose string heuristics can be
//! tuned and tested independently of the qualification policy. All matching
//! is case-insensitive substring work except the burn-address search, which
//! is verbatim base58. Empty input yields the all-false value; nothing here
//! can fail.

use crate::classifier::programs::BURN_ADDRESSES;
use crate::classifier::types::LogSignals;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref REMOVE_LIQUIDITY_RE: Regex =
        Regex::new(r"(?i)remove[_\s]*liquidity|withdraw[_\s]*liquidity").expect("valid regex");
}

const POOL_VOCABULARY: &[&str] = &["pool", "liquidity", "lp", "raydium", "amm"];

/// The exact SPL burn instruction marker. The checked variant must not
/// trigger this predicate.
pub fn has_burn_instruction(line: &str) -> bool {
    let lower = line.to_ascii_lowercase();
    lower.contains("instruction: burn") && !lower.contains("instruction: burnchecked")
}

/// The checked-burn instruction marker.
pub fn has_burn_checked_instruction(line: &str) -> bool {
    line.to_ascii_lowercase().contains("instruction: burnchecked")
}

/// Any pool/liquidity vocabulary in the line.
pub fn has_pool_vocabulary(line: &str) -> bool {
    let lower = line.to_ascii_lowercase();
    POOL_VOCABULARY.iter().any(|word| lower.contains(word))
}

/// A remove-liquidity phrase, order-independent.
pub fn has_remove_liquidity_vocabulary(line: &str) -> bool {
    if REMOVE_LIQUIDITY_RE.is_match(line) {
        return true;
    }
    let lower = line.to_ascii_lowercase();
    lower.contains("remove") && lower.contains("liquidity")
}

/// First burn-registry address appearing verbatim in the line.
pub fn find_burn_address(line: &str) -> Option<&'static str> {
    BURN_ADDRESSES.iter().find(|addr| line.contains(*addr)).copied()
}

/// Scan all log lines and fold the per-line predicates into one signal set.
pub fn detect_log_signals(log_messages: &[String]) -> LogSignals {
    let mut signals = LogSignals::default();
    for line in log_messages {
        signals.has_burn_instruction |= has_burn_instruction(line);
        signals.has_burn_checked_instruction |= has_burn_checked_instruction(line);
        signals.has_pool_vocabulary |= has_pool_vocabulary(line);
        signals.has_remove_liquidity_vocabulary |= has_remove_liquidity_vocabulary(line);
        if signals.matched_burn_address.is_none() {
            if let Some(addr) = find_burn_address(line) {
                signals.matched_burn_address = Some(addr.to_string());
            }
        }
    }
    signals
}
