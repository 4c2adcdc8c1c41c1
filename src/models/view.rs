//! Presentation view models for the card, the history list and the landing
//! page. They only reshape stored data; no business rules live here.

use super::{
    account::{Account, WalletAddress},
    format::{format_amount, format_usd, truncate_hex},
    transaction::{Transaction, TxStatus},
};
use crate::config::ChainConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const MASKED_CARD_NUMBER: &str = "•••• •••• •••• ••••";
const MASKED_EXPIRY: &str = "••/••";
const MASKED_CVV: &str = "•••";
const MASKED_BILLING: &str = "•••• •••••• •••• ••••";
const NO_BILLING: &str = "No billing address provided";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardView {
    pub holder: String,
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
    pub billing_address: String,
    pub balance: f64,
    pub balance_display: String,
    pub active: bool,
    pub details_revealed: bool,
}

impl CardView {
    pub fn from_account(account: &Account, reveal: bool) -> Self {
        let has_card = account.has_card();
        let show = reveal && has_card;

        let shown = |value: &Option<String>, masked: &str, missing: &str| -> String {
            if show {
                value.clone().unwrap_or_else(|| missing.to_string())
            } else {
                masked.to_string()
            }
        };

        let billing_address = if !has_card {
            NO_BILLING.to_string()
        } else {
            shown(&account.billing_address, MASKED_BILLING, "Not provided")
        };

        Self {
            holder: account.full_name.clone(),
            card_number: shown(&account.card_number, MASKED_CARD_NUMBER, MASKED_CARD_NUMBER),
            expiry_date: shown(&account.expiry_date, MASKED_EXPIRY, MASKED_EXPIRY),
            cvv: shown(&account.cvv, MASKED_CVV, MASKED_CVV),
            billing_address,
            balance: account.balance,
            balance_display: format_usd(account.balance),
            active: has_card,
            details_revealed: show,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionView {
    pub id: Uuid,
    pub tx_hash: String,
    pub tx_hash_short: String,
    pub amount: f64,
    pub amount_display: String,
    pub status: TxStatus,
    pub created_at: DateTime<Utc>,
    pub explorer_url: String,
}

impl TransactionView {
    pub fn new(tx: &Transaction, chain: &ChainConfig) -> Self {
        Self {
            id: tx.id,
            tx_hash: tx.tx_hash.clone(),
            tx_hash_short: truncate_hex(&tx.tx_hash),
            amount: tx.amount,
            amount_display: format!("{} {}", format_amount(tx.amount), chain.symbol),
            status: tx.status,
            created_at: tx.created_at,
            explorer_url: chain.tx_url(&tx.tx_hash),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub account_id: Uuid,
    pub full_name: String,
    pub wallet_address: String,
    pub wallet_short: String,
    pub card: CardView,
    pub transactions: Vec<TransactionView>,
}

impl DashboardView {
    pub fn new(
        wallet: &WalletAddress,
        account: &Account,
        transactions: &[Transaction],
        chain: &ChainConfig,
        reveal: bool,
    ) -> Self {
        Self {
            account_id: account.id,
            full_name: account.full_name.clone(),
            wallet_address: wallet.to_string(),
            wallet_short: wallet.truncated(),
            card: CardView::from_account(account, reveal),
            transactions: transactions
                .iter()
                .map(|tx| TransactionView::new(tx, chain))
                .collect(),
        }
    }
}

/// Static content for the connect-wallet landing screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandingView {
    pub title: String,
    pub subtitle: String,
    pub tagline: String,
    pub chain_id: u64,
    pub chain_name: String,
}

impl LandingView {
    pub fn new(app_name: &str, chain: &ChainConfig) -> Self {
        Self {
            title: app_name.to_string(),
            subtitle: "DEBIT CARDS".to_string(),
            tagline: "Premium blockchain-powered debit cards".to_string(),
            chain_id: chain.id,
            chain_name: chain.name.clone(),
        }
    }
}
