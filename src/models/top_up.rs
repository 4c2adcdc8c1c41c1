use super::{transaction::Transaction, view::DashboardView};
use crate::services::fee::FeePolicy;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/accounts/:wallet/topups`. The amount is kept as the
/// raw string the user typed so validation messages match the form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopUpRequest {
    pub amount: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteQuery {
    pub amount: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    pub base: f64,
    pub fee: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopUpQuote {
    pub amount: f64,
    pub fee: f64,
    pub total: f64,
    pub fee_rate_bps: u32,
    pub policy: FeePolicy,
    /// What the wallet is expected to send to the treasury.
    pub charged: f64,
    /// What lands on the card balance.
    pub credited: f64,
    pub charged_eth: f64,
    pub treasury_address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopUpReceipt {
    pub transaction: Transaction,
    pub quote: TopUpQuote,
    pub previous_balance: f64,
    pub new_balance: f64,
    /// Refreshed dashboard; absent when the post-write reload failed.
    pub dashboard: Option<DashboardView>,
}
