//! Account and transaction persistence.

pub mod memory;
pub mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;

use crate::models::{Account, NewTransaction, Transaction, WalletAddress};
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed backend response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Account {0} not found")]
    AccountNotFound(Uuid),

    #[error("Backend returned no rows for {0}")]
    EmptyResponse(&'static str),

    #[error("Seed file error: {0}")]
    Seed(#[from] std::io::Error),
}

/// Record store holding pre-provisioned accounts and their top-ups.
///
/// Writes are independent: a transaction insert followed by a balance
/// update is not atomic across the two calls.
#[async_trait]
pub trait CardStore: Send + Sync {
    async fn account_by_wallet(
        &self,
        wallet: &WalletAddress,
    ) -> Result<Option<Account>, StoreError>;

    async fn account_by_id(&self, id: Uuid) -> Result<Option<Account>, StoreError>;

    /// Transactions owned by `account_id`, newest first.
    async fn transactions_for(&self, account_id: Uuid) -> Result<Vec<Transaction>, StoreError>;

    async fn insert_transaction(&self, tx: NewTransaction) -> Result<Transaction, StoreError>;

    async fn update_balance(&self, account_id: Uuid, balance: f64) -> Result<(), StoreError>;

    async fn ping(&self) -> bool;
}
