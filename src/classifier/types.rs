//! Types produced and consumed by the burn classification stages.

use crate::types::Pubkey;
use serde::{Deserialize, Serialize};

/// Thresholds and policy switches for burn qualification.
///
/// An immutable value passed into every classification call; there is no
/// ambient/global configuration anywhere in the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Minimum burn percentage for a qualifying LP burn
    pub min_lp_burn_percentage: f64,
    /// Reject burns of mints younger than this many minutes (0 = disabled)
    pub min_burn_mint_age_minutes: u64,
    /// Reject burns of mints older than this many minutes
    pub max_token_age_minutes: u64,
    /// Veto the transaction when aggregate lamport balances drop by more
    /// than this fraction of the pre-transaction total
    pub max_vault_outflow_fraction: f64,
    /// When set, a mint with both authorities revoked is NOT assumed to be
    /// an LP mint. The permissive default trades false positives for fewer
    /// missed burns.
    pub strict_lp_mode: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_lp_burn_percentage: 0.99,
            min_burn_mint_age_minutes: 0,
            max_token_age_minutes: u64::MAX,
            max_vault_outflow_fraction: 0.5,
            strict_lp_mode: false,
        }
    }
}

/// Why a transaction failed to qualify. The engine reports the first gate
/// that failed, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionReason {
    NoBurnSignal,
    NotLpToken,
    BelowMinPercentage,
    VaultOutflowVeto,
    MintTooYoung,
    MintTooOld,
    UnknownSupply,
}

/// Final classification verdict for one transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurnVerdict {
    /// Whether this is a genuine, significant LP burn worth reporting
    pub is_qualifying: bool,
    /// The burned mint, when a burn signal was found
    pub token_mint: Option<Pubkey>,
    /// Burned amount in UI units
    pub burn_amount: f64,
    /// Burned fraction of the reference balance (sender position or total
    /// supply, depending on the detection path). Values above 1.0 indicate a
    /// sender-attribution anomaly and never qualify.
    pub burn_percentage: f64,
    /// Wallet attributed as the burner, when locatable
    pub burner: Option<Pubkey>,
    /// Whether the mint was judged to be an LP token
    pub is_lp_token: bool,
    /// First failing gate when not qualifying
    pub rejection_reason: Option<RejectionReason>,
}

impl BurnVerdict {
    /// A verdict carrying nothing but a rejection reason.
    pub fn rejected(reason: RejectionReason) -> Self {
        Self {
            is_qualifying: false,
            token_mint: None,
            burn_amount: 0.0,
            burn_percentage: 0.0,
            burner: None,
            is_lp_token: false,
            rejection_reason: Some(reason),
        }
    }
}

/// One decreasing-balance event, transient per classification call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurnCandidate {
    pub mint: Pubkey,
    pub amount_ui: f64,
}

/// A detected burn with its detection mode and attribution.
///
/// Direct burns take precedence over delta burns on the same position;
/// transfer-to-burn is a distinct mode keyed on the destination owner.
#[derive(Debug, Clone, PartialEq)]
pub enum BurnSignal {
    /// A position drained from a positive raw amount to exactly zero.
    /// Percentage is definitionally 1.0.
    DirectBurn {
        mint: Pubkey,
        amount_ui: f64,
        burner: Option<Pubkey>,
    },
    /// A strictly decreasing balance on a matched position.
    DeltaBurn {
        mint: Pubkey,
        amount_ui: f64,
        owner: Option<Pubkey>,
        /// The owner's pre-burn balance, the percentage reference
        owner_pre_ui: Option<f64>,
    },
    /// Tokens moved onto a position owned by a known burn address.
    TransferToBurn {
        mint: Pubkey,
        amount_ui: f64,
        burn_address: Pubkey,
        sender: Option<Pubkey>,
    },
}

impl BurnSignal {
    pub fn mint(&self) -> &Pubkey {
        match self {
            BurnSignal::DirectBurn { mint, .. } => mint,
            BurnSignal::DeltaBurn { mint, .. } => mint,
            BurnSignal::TransferToBurn { mint, .. } => mint,
        }
    }

    pub fn amount_ui(&self) -> f64 {
        match self {
            BurnSignal::DirectBurn { amount_ui, .. } => *amount_ui,
            BurnSignal::DeltaBurn { amount_ui, .. } => *amount_ui,
            BurnSignal::TransferToBurn { amount_ui, .. } => *amount_ui,
        }
    }

    /// The wallet attributed as the burner, when locatable.
    pub fn burner(&self) -> Option<&Pubkey> {
        match self {
            BurnSignal::DirectBurn { burner, .. } => burner.as_ref(),
            BurnSignal::DeltaBurn { owner, .. } => owner.as_ref(),
            BurnSignal::TransferToBurn { sender, .. } => sender.as_ref(),
        }
    }
}

/// Log-derived burn and liquidity signals for one transaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogSignals {
    pub has_burn_instruction: bool,
    pub has_burn_checked_instruction: bool,
    pub has_pool_vocabulary: bool,
    pub has_remove_liquidity_vocabulary: bool,
    /// First burn-registry address found verbatim in any log line
    pub matched_burn_address: Option<Pubkey>,
}

/// Mint and freeze authorities of a token mint. `None` means the authority
/// was permanently revoked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MintAuthorities {
    pub mint_authority: Option<Pubkey>,
    pub freeze_authority: Option<Pubkey>,
}

/// Total supply of a token mint in UI units.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenSupply {
    pub ui_amount: Option<f64>,
    pub decimals: Option<u8>,
}
