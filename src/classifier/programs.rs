//! Program-presence detection against fixed registries of Raydium AMM
//! programs and well-known burn destinations.
//!
//! An unrecognized address is simply absent from the result, never an error.

use crate::types::Pubkey;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Raydium liquidity pool v4 (the classic AMM)
pub const RAYDIUM_LIQUIDITY_POOL_V4: &str = "675kPX9MHTjS2zt1qfr1NYHuzeLXfQM9H24wFSUt1Mp8";
/// Raydium stable-swap AMM
pub const RAYDIUM_STABLE_AMM: &str = "5quBtoiQqxF9Jv6KYKctB59NT3gtJD2Y65kdnB1Uev3h";
/// Raydium constant-product market maker
pub const RAYDIUM_CPMM: &str = "CPMMoo8L3F4NbTegBCKVNunggL7H1ZpdTHKxQB5qKP1C";
/// Raydium LP locking program
pub const RAYDIUM_LP_LOCK: &str = "LockrWmn6K5twhz3y9w1dQERbmgSaRkfnTeTKbpofwE";
/// Streamflow token lock program
pub const STREAMFLOW_LOCK: &str = "LocktDzaV1W2Bm9DeZeiyz4J9zs4fRqNiYqQyracRXw";
/// Raydium AMM v4 pool authority
pub const RAYDIUM_AUTHORITY_V4: &str = "5Q544fKrFoe6tsEbD7S8EmxGTJYAKtTVhAW5Q5pge4j1";

/// Well-known unspendable addresses used as burn targets.
pub const BURN_ADDRESSES: &[&str] = &[
    "1nc1nerator11111111111111111111111111111111", // Incinerator
    "11111111111111111111111111111111",            // System program (common burn)
    "JUP4Fb2cqiRUcaTHdrPC8h2gNsA2ETXiPDD33WcGuJB", // Jupiter burn
];

/// Tag for a recognized program identifier in a transaction's account keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KnownProgramTag {
    LiquidityPoolV4,
    StableAmm,
    Cpmm,
    LpLock,
}

impl KnownProgramTag {
    /// Whether this tag identifies an AMM pool program (as opposed to a
    /// lock program).
    pub fn is_amm(&self) -> bool {
        matches!(
            self,
            KnownProgramTag::LiquidityPoolV4 | KnownProgramTag::StableAmm | KnownProgramTag::Cpmm
        )
    }
}

const PROGRAM_REGISTRY: &[(&str, KnownProgramTag)] = &[
    (RAYDIUM_LIQUIDITY_POOL_V4, KnownProgramTag::LiquidityPoolV4),
    (RAYDIUM_STABLE_AMM, KnownProgramTag::StableAmm),
    (RAYDIUM_CPMM, KnownProgramTag::Cpmm),
    (RAYDIUM_LP_LOCK, KnownProgramTag::LpLock),
    (STREAMFLOW_LOCK, KnownProgramTag::LpLock),
];

/// Scan account keys for known AMM program identifiers.
pub fn detect_programs(account_keys: &[Pubkey]) -> HashSet<KnownProgramTag> {
    let mut tags = HashSet::new();
    for key in account_keys {
        for (address, tag) in PROGRAM_REGISTRY {
            if key == address {
                tags.insert(*tag);
            }
        }
    }
    tags
}

/// Whether an address is in the fixed burn-destination registry.
pub fn is_burn_address(address: &str) -> bool {
    BURN_ADDRESSES.contains(&address)
}

/// Whether an address is a known AMM program, lock program, or pool
/// authority. Mints whose authority matches are treated as LP mints.
pub fn is_lp_authority(address: &str) -> bool {
    PROGRAM_REGISTRY.iter().any(|(a, _)| *a == address) || address == RAYDIUM_AUTHORITY_V4
}
