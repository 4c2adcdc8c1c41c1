use super::{CardStore, StoreError};
use crate::models::{Account, NewTransaction, Transaction, WalletAddress};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::path::Path;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-process store for development and tests.
#[derive(Default)]
pub struct MemoryStore {
    accounts: RwLock<HashMap<Uuid, Account>>,
    transactions: RwLock<Vec<Transaction>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        Self {
            accounts: RwLock::new(accounts.into_iter().map(|a| (a.id, a)).collect()),
            transactions: RwLock::new(Vec::new()),
        }
    }

    /// Loads accounts from a JSON array of `users` rows.
    pub async fn from_seed_file(path: &Path) -> Result<Self, StoreError> {
        let raw = tokio::fs::read_to_string(path).await?;
        let accounts: Vec<Account> = serde_json::from_str(&raw)?;
        tracing::info!("Seeded {} accounts from {}", accounts.len(), path.display());
        Ok(Self::with_accounts(accounts))
    }

    pub async fn transaction_count(&self) -> usize {
        self.transactions.read().await.len()
    }
}

#[async_trait]
impl CardStore for MemoryStore {
    async fn account_by_wallet(
        &self,
        wallet: &WalletAddress,
    ) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|a| wallet.matches(&a.wallet_address))
            .cloned())
    }

    async fn account_by_id(&self, id: Uuid) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.read().await.get(&id).cloned())
    }

    async fn transactions_for(&self, account_id: Uuid) -> Result<Vec<Transaction>, StoreError> {
        let mut txs: Vec<Transaction> = self
            .transactions
            .read()
            .await
            .iter()
            .filter(|tx| tx.user_id == account_id)
            .cloned()
            .collect();
        // Stable sort keeps insertion order reversed for equal timestamps.
        txs.reverse();
        txs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(txs)
    }

    async fn insert_transaction(&self, tx: NewTransaction) -> Result<Transaction, StoreError> {
        if !self.accounts.read().await.contains_key(&tx.user_id) {
            return Err(StoreError::AccountNotFound(tx.user_id));
        }

        let record = Transaction {
            id: Uuid::new_v4(),
            user_id: tx.user_id,
            tx_hash: tx.tx_hash,
            amount: tx.amount,
            status: tx.status,
            created_at: Utc::now(),
        };
        self.transactions.write().await.push(record.clone());
        Ok(record)
    }

    async fn update_balance(&self, account_id: Uuid, balance: f64) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(&account_id)
            .ok_or(StoreError::AccountNotFound(account_id))?;
        account.balance = balance;
        Ok(())
    }

    async fn ping(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TxStatus;

    fn account(wallet: &str) -> Account {
        Account {
            id: Uuid::new_v4(),
            wallet_address: wallet.to_string(),
            full_name: "Grace Hopper".to_string(),
            card_number: None,
            expiry_date: None,
            cvv: None,
            billing_address: None,
            balance: 0.0,
        }
    }

    fn new_tx(user_id: Uuid, amount: f64) -> NewTransaction {
        NewTransaction {
            user_id,
            tx_hash: crate::services::tx_hash::placeholder_tx_hash(),
            amount,
            status: TxStatus::Confirmed,
        }
    }

    #[tokio::test]
    async fn finds_accounts_by_wallet_ignoring_case() {
        let stored = account("0x5AAEB6053F3E94C9B9A09F33669435E7EF1BEAED");
        let store = MemoryStore::with_accounts([stored.clone()]);

        let wallet: WalletAddress = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed".parse().unwrap();
        assert_eq!(store.account_by_wallet(&wallet).await.unwrap(), Some(stored.clone()));
        assert_eq!(store.account_by_id(stored.id).await.unwrap(), Some(stored));

        let other: WalletAddress = "0x0000000000000000000000000000000000000001".parse().unwrap();
        assert!(store.account_by_wallet(&other).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn lists_transactions_newest_first() {
        let owner = account("0x0000000000000000000000000000000000000001");
        let stranger = account("0x0000000000000000000000000000000000000002");
        let store = MemoryStore::with_accounts([owner.clone(), stranger.clone()]);

        for amount in [1.0, 2.0, 3.0] {
            store.insert_transaction(new_tx(owner.id, amount)).await.unwrap();
        }
        store.insert_transaction(new_tx(stranger.id, 9.0)).await.unwrap();

        let amounts: Vec<f64> = store
            .transactions_for(owner.id)
            .await
            .unwrap()
            .iter()
            .map(|tx| tx.amount)
            .collect();
        assert_eq!(amounts, vec![3.0, 2.0, 1.0]);
    }

    #[tokio::test]
    async fn rejects_transactions_for_unknown_accounts() {
        let store = MemoryStore::new();
        let result = store.insert_transaction(new_tx(Uuid::new_v4(), 1.0)).await;
        assert!(matches!(result, Err(StoreError::AccountNotFound(_))));
        assert_eq!(store.transaction_count().await, 0);
    }

    #[tokio::test]
    async fn overwrites_balance() {
        let owner = account("0x0000000000000000000000000000000000000001");
        let store = MemoryStore::with_accounts([owner.clone()]);

        tokio_test::assert_ok!(store.update_balance(owner.id, 42_000.0).await);
        let reloaded = store.account_by_id(owner.id).await.unwrap().unwrap();
        assert_eq!(reloaded.balance, 42_000.0);

        tokio_test::assert_err!(store.update_balance(Uuid::new_v4(), 1.0).await);
    }
}
