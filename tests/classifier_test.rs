//! Tests for the burn qualification pipeline end to end
//!
//! These drive `classify_transaction` with handcrafted transaction records
//! and a scriptable metadata source, covering each rejection gate and the
//! qualifying paths.

use async_trait::async_trait;
use lp_burn_sentinel::chain::MintMetadataSource;
use lp_burn_sentinel::classifier::{
    classify_transaction, ClassifierConfig, MintAuthorities, RejectionReason, TokenSupply,
    RAYDIUM_LIQUIDITY_POOL_V4,
};
use lp_burn_sentinel::error::SentinelError;
use lp_burn_sentinel::types::{TokenBalance, TransactionRecord};

const INCINERATOR: &str = "1nc1nerator11111111111111111111111111111111";
const RAYDIUM_AUTHORITY_V4: &str = "5Q544fKrFoe6tsEbD7S8EmxGTJYAKtTVhAW5Q5pge4j1";

/// Scriptable metadata source with fixed answers.
#[derive(Default)]
struct ScriptedMetadata {
    authorities: Option<MintAuthorities>,
    supply: TokenSupply,
    created_at: Option<i64>,
}

#[async_trait]
impl MintMetadataSource for ScriptedMetadata {
    async fn fetch_mint_authorities(
        &self,
        _mint: &str,
    ) -> Result<Option<MintAuthorities>, SentinelError> {
        Ok(self.authorities.clone())
    }

    async fn fetch_token_supply(&self, _mint: &str) -> Result<TokenSupply, SentinelError> {
        Ok(self.supply.clone())
    }

    async fn estimate_mint_creation_time(&self, _mint: &str) -> Result<Option<i64>, SentinelError> {
        Ok(self.created_at)
    }
}

fn balance(account_index: u32, mint: &str, owner: &str, ui_amount: f64) -> TokenBalance {
    TokenBalance {
        account_index,
        mint: mint.to_string(),
        owner: Some(owner.to_string()),
        ui_amount: Some(ui_amount),
        raw_amount: (ui_amount * 1_000_000.0) as u64,
        decimals: 6,
    }
}

/// A full direct burn of an LP position inside a Raydium transaction.
fn direct_burn_tx() -> TransactionRecord {
    TransactionRecord {
        signature: Some("TestSig111".to_string()),
        account_keys: vec![
            "BurnerWallet1111111111111111111111111111111".to_string(),
            RAYDIUM_LIQUIDITY_POOL_V4.to_string(),
        ],
        log_messages: vec!["Program log: Instruction: Burn".to_string()],
        pre_token_balances: vec![balance(1, "LpMint111", "BurnerWallet", 5.0)],
        post_token_balances: vec![balance(1, "LpMint111", "BurnerWallet", 0.0)],
        pre_balances: vec![10_000_000, 5_000_000],
        post_balances: vec![9_995_000, 5_000_000],
        block_time: Some(1_700_000_000),
    }
}

#[tokio::test]
async fn test_no_balance_changes_reject_with_no_burn_signal() {
    let tx = TransactionRecord {
        signature: Some("TestSig000".to_string()),
        account_keys: vec![RAYDIUM_LIQUIDITY_POOL_V4.to_string()],
        log_messages: vec!["Program log: Instruction: Swap".to_string()],
        pre_token_balances: vec![balance(1, "MintA", "Wallet1", 10.0)],
        post_token_balances: vec![balance(1, "MintA", "Wallet1", 10.0)],
        ..TransactionRecord::default()
    };
    let verdict =
        classify_transaction(&tx, &ClassifierConfig::default(), &ScriptedMetadata::default()).await;
    assert!(!verdict.is_qualifying);
    assert_eq!(verdict.rejection_reason, Some(RejectionReason::NoBurnSignal));
    assert_eq!(verdict.token_mint, None);
}

#[tokio::test]
async fn test_direct_lp_burn_qualifies() {
    let verdict = classify_transaction(
        &direct_burn_tx(),
        &ClassifierConfig::default(),
        &ScriptedMetadata::default(),
    )
    .await;
    assert!(verdict.is_qualifying);
    assert_eq!(verdict.token_mint.as_deref(), Some("LpMint111"));
    assert_eq!(verdict.burn_percentage, 1.0);
    assert!((verdict.burn_amount - 5.0).abs() < 1e-9);
    assert!(verdict.is_lp_token);
    assert_eq!(verdict.burner.as_deref(), Some("BurnerWallet"));
    assert_eq!(verdict.rejection_reason, None);
}

#[tokio::test]
async fn test_classification_is_idempotent() {
    let tx = direct_burn_tx();
    let config = ClassifierConfig::default();
    let metadata = ScriptedMetadata::default();
    let first = classify_transaction(&tx, &config, &metadata).await;
    let second = classify_transaction(&tx, &config, &metadata).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_vault_outflow_vetoes_despite_full_burn() {
    // 1 SOL before, 0.4 SOL after: 60% outflow against a 50% ceiling
    let mut tx = direct_burn_tx();
    tx.pre_balances = vec![1_000_000_000];
    tx.post_balances = vec![400_000_000];
    let verdict =
        classify_transaction(&tx, &ClassifierConfig::default(), &ScriptedMetadata::default()).await;
    assert!(!verdict.is_qualifying);
    assert_eq!(
        verdict.rejection_reason,
        Some(RejectionReason::VaultOutflowVeto)
    );
    // The burn itself was still measured
    assert_eq!(verdict.burn_percentage, 1.0);
}

#[tokio::test]
async fn test_remove_liquidity_log_vetoes_despite_full_burn() {
    let mut tx = direct_burn_tx();
    tx.log_messages
        .push("Program log: Instruction: RemoveLiquidity".to_string());
    let verdict =
        classify_transaction(&tx, &ClassifierConfig::default(), &ScriptedMetadata::default()).await;
    assert!(!verdict.is_qualifying);
    assert_eq!(
        verdict.rejection_reason,
        Some(RejectionReason::VaultOutflowVeto)
    );
}

#[tokio::test]
async fn test_raising_min_percentage_never_admits_more() {
    // A 95% delta burn qualifies at 0.9 but not at the 0.99 default
    let tx = TransactionRecord {
        signature: Some("TestSig222".to_string()),
        account_keys: vec![RAYDIUM_LIQUIDITY_POOL_V4.to_string()],
        log_messages: vec!["Program log: Instruction: Burn".to_string()],
        pre_token_balances: vec![balance(1, "LpMint111", "Wallet1", 100.0)],
        post_token_balances: vec![balance(1, "LpMint111", "Wallet1", 5.0)],
        pre_balances: vec![10_000_000],
        post_balances: vec![10_000_000],
        ..TransactionRecord::default()
    };
    let metadata = ScriptedMetadata::default();

    let loose = ClassifierConfig {
        min_lp_burn_percentage: 0.9,
        ..ClassifierConfig::default()
    };
    let verdict = classify_transaction(&tx, &loose, &metadata).await;
    assert!(verdict.is_qualifying);
    assert!((verdict.burn_percentage - 0.95).abs() < 1e-9);

    let strict = ClassifierConfig::default();
    let verdict = classify_transaction(&tx, &strict, &metadata).await;
    assert!(!verdict.is_qualifying);
    assert_eq!(
        verdict.rejection_reason,
        Some(RejectionReason::BelowMinPercentage)
    );
}

#[tokio::test]
async fn test_transfer_to_burn_path_uses_total_supply() {
    let tx = TransactionRecord {
        signature: Some("TestSig333".to_string()),
        account_keys: vec![RAYDIUM_LIQUIDITY_POOL_V4.to_string()],
        log_messages: vec![format!("Program log: transfer to {}", INCINERATOR)],
        pre_token_balances: vec![
            balance(1, "LpMint111", "SenderWallet", 990.0),
            balance(2, "LpMint111", INCINERATOR, 0.0),
        ],
        post_token_balances: vec![
            balance(1, "LpMint111", "SenderWallet", 0.0),
            balance(2, "LpMint111", INCINERATOR, 990.0),
        ],
        pre_balances: vec![10_000_000],
        post_balances: vec![10_000_000],
        ..TransactionRecord::default()
    };
    // Sender position drains to zero: direct burn wins precedence there, so
    // drop the sender's post entry to force the transfer path.
    let mut tx = tx;
    tx.post_token_balances.remove(0);

    let metadata = ScriptedMetadata {
        supply: TokenSupply {
            ui_amount: Some(1000.0),
            decimals: Some(6),
        },
        ..ScriptedMetadata::default()
    };
    let config = ClassifierConfig {
        min_lp_burn_percentage: 0.95,
        ..ClassifierConfig::default()
    };
    let verdict = classify_transaction(&tx, &config, &metadata).await;
    assert!(verdict.is_qualifying);
    assert!((verdict.burn_percentage - 0.99).abs() < 1e-9);
    assert_eq!(verdict.burner.as_deref(), Some("SenderWallet"));
}

#[tokio::test]
async fn test_transfer_to_burn_without_supply_rejects_unknown_supply() {
    let tx = TransactionRecord {
        signature: Some("TestSig444".to_string()),
        account_keys: vec![RAYDIUM_LIQUIDITY_POOL_V4.to_string()],
        log_messages: vec!["Program log: burn transfer".to_string()],
        pre_token_balances: vec![balance(2, "LpMint111", INCINERATOR, 0.0)],
        post_token_balances: vec![balance(2, "LpMint111", INCINERATOR, 990.0)],
        pre_balances: vec![10_000_000],
        post_balances: vec![10_000_000],
        ..TransactionRecord::default()
    };
    let verdict =
        classify_transaction(&tx, &ClassifierConfig::default(), &ScriptedMetadata::default()).await;
    assert!(!verdict.is_qualifying);
    assert_eq!(
        verdict.rejection_reason,
        Some(RejectionReason::UnknownSupply)
    );
}

#[tokio::test]
async fn test_vault_outflow_veto_dominates_unknown_supply() {
    // Transfer-to-burn with no supply answer AND a 60% lamport outflow:
    // the veto wins over the supply gate.
    let tx = TransactionRecord {
        signature: Some("TestSig445".to_string()),
        account_keys: vec![RAYDIUM_LIQUIDITY_POOL_V4.to_string()],
        log_messages: vec!["Program log: burn transfer".to_string()],
        pre_token_balances: vec![balance(2, "LpMint111", INCINERATOR, 0.0)],
        post_token_balances: vec![balance(2, "LpMint111", INCINERATOR, 990.0)],
        pre_balances: vec![1_000_000_000],
        post_balances: vec![400_000_000],
        ..TransactionRecord::default()
    };
    let verdict =
        classify_transaction(&tx, &ClassifierConfig::default(), &ScriptedMetadata::default()).await;
    assert!(!verdict.is_qualifying);
    assert_eq!(
        verdict.rejection_reason,
        Some(RejectionReason::VaultOutflowVeto)
    );
}

#[tokio::test]
async fn test_anomalous_percentage_above_one_never_qualifies() {
    // Burn amount exceeds reported supply; percentage comes out above 1.0
    // and must fail the percentage gate while being reported unclamped.
    let tx = TransactionRecord {
        signature: Some("TestSig555".to_string()),
        account_keys: vec![RAYDIUM_LIQUIDITY_POOL_V4.to_string()],
        log_messages: vec!["Program log: pool burn".to_string()],
        pre_token_balances: vec![balance(2, "LpMint111", INCINERATOR, 0.0)],
        post_token_balances: vec![balance(2, "LpMint111", INCINERATOR, 990.0)],
        pre_balances: vec![10_000_000],
        post_balances: vec![10_000_000],
        ..TransactionRecord::default()
    };
    let metadata = ScriptedMetadata {
        supply: TokenSupply {
            ui_amount: Some(500.0),
            decimals: Some(6),
        },
        ..ScriptedMetadata::default()
    };
    let verdict = classify_transaction(&tx, &ClassifierConfig::default(), &metadata).await;
    assert!(!verdict.is_qualifying);
    assert_eq!(
        verdict.rejection_reason,
        Some(RejectionReason::BelowMinPercentage)
    );
    assert!((verdict.burn_percentage - 1.98).abs() < 1e-9);
}

#[tokio::test]
async fn test_mint_age_gates() {
    let mut tx = direct_burn_tx();
    tx.block_time = Some(1_700_000_000);
    let metadata = ScriptedMetadata {
        // 30 minutes before the transaction
        created_at: Some(1_700_000_000 - 30 * 60),
        ..ScriptedMetadata::default()
    };

    let too_young = ClassifierConfig {
        min_burn_mint_age_minutes: 60,
        ..ClassifierConfig::default()
    };
    let verdict = classify_transaction(&tx, &too_young, &metadata).await;
    assert_eq!(verdict.rejection_reason, Some(RejectionReason::MintTooYoung));

    let too_old = ClassifierConfig {
        max_token_age_minutes: 10,
        ..ClassifierConfig::default()
    };
    let verdict = classify_transaction(&tx, &too_old, &metadata).await;
    assert_eq!(verdict.rejection_reason, Some(RejectionReason::MintTooOld));

    let in_window = ClassifierConfig {
        min_burn_mint_age_minutes: 10,
        max_token_age_minutes: 60,
        ..ClassifierConfig::default()
    };
    let verdict = classify_transaction(&tx, &in_window, &metadata).await;
    assert!(verdict.is_qualifying);
}

#[tokio::test]
async fn test_unknown_creation_time_skips_age_gates() {
    let tx = direct_burn_tx();
    let config = ClassifierConfig {
        min_burn_mint_age_minutes: 60,
        ..ClassifierConfig::default()
    };
    let verdict = classify_transaction(&tx, &config, &ScriptedMetadata::default()).await;
    assert!(verdict.is_qualifying);
}

#[tokio::test]
async fn test_strict_mode_rejects_revoked_authorities_without_other_lp_signals() {
    // A plain wallet burn with no pool vocabulary and no AMM program
    let tx = TransactionRecord {
        signature: Some("TestSig666".to_string()),
        account_keys: vec!["SomeWallet111111111111111111111111111111111".to_string()],
        log_messages: vec!["Program log: Instruction: Burn".to_string()],
        pre_token_balances: vec![balance(1, "PlainMint", "Wallet1", 5.0)],
        post_token_balances: vec![balance(1, "PlainMint", "Wallet1", 0.0)],
        pre_balances: vec![10_000_000],
        post_balances: vec![10_000_000],
        ..TransactionRecord::default()
    };
    let metadata = ScriptedMetadata {
        authorities: Some(MintAuthorities {
            mint_authority: None,
            freeze_authority: None,
        }),
        ..ScriptedMetadata::default()
    };

    let permissive = ClassifierConfig::default();
    let verdict = classify_transaction(&tx, &permissive, &metadata).await;
    assert!(verdict.is_qualifying);
    assert!(verdict.is_lp_token);

    let strict = ClassifierConfig {
        strict_lp_mode: true,
        ..ClassifierConfig::default()
    };
    let verdict = classify_transaction(&tx, &strict, &metadata).await;
    assert!(!verdict.is_qualifying);
    assert_eq!(verdict.rejection_reason, Some(RejectionReason::NotLpToken));
}

#[tokio::test]
async fn test_lp_authority_corroboration_marks_mint_as_lp() {
    let tx = TransactionRecord {
        signature: Some("TestSig777".to_string()),
        account_keys: vec!["SomeWallet111111111111111111111111111111111".to_string()],
        log_messages: vec!["Program log: Instruction: Burn".to_string()],
        pre_token_balances: vec![balance(1, "PlainMint", "Wallet1", 5.0)],
        post_token_balances: vec![balance(1, "PlainMint", "Wallet1", 0.0)],
        pre_balances: vec![10_000_000],
        post_balances: vec![10_000_000],
        ..TransactionRecord::default()
    };
    let metadata = ScriptedMetadata {
        authorities: Some(MintAuthorities {
            mint_authority: Some(RAYDIUM_AUTHORITY_V4.to_string()),
            freeze_authority: None,
        }),
        ..ScriptedMetadata::default()
    };
    // Strict mode, yet the authority match alone marks the mint as LP
    let strict = ClassifierConfig {
        strict_lp_mode: true,
        ..ClassifierConfig::default()
    };
    let verdict = classify_transaction(&tx, &strict, &metadata).await;
    assert!(verdict.is_qualifying);
    assert!(verdict.is_lp_token);
}
