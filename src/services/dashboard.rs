use crate::{
    error::CardError,
    models::{Account, Transaction, WalletAddress},
    services::{store::CardStore, Analytics, CacheService},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Account plus its history, as loaded for one dashboard render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub account: Account,
    pub transactions: Vec<Transaction>,
}

pub struct DashboardService {
    store: Arc<dyn CardStore>,
    cache: Arc<CacheService>,
    analytics: Arc<Analytics>,
    cache_ttl_secs: u64,
}

impl DashboardService {
    pub fn new(
        store: Arc<dyn CardStore>,
        cache: Arc<CacheService>,
        analytics: Arc<Analytics>,
        cache_ttl_secs: u64,
    ) -> Self {
        Self {
            store,
            cache,
            analytics,
            cache_ttl_secs,
        }
    }

    fn cache_key(wallet: &WalletAddress) -> String {
        format!("dashboard:{}", wallet.to_lower_hex())
    }

    /// Resolves the registered account for `wallet`. Unknown wallets are
    /// access-denied rather than errors.
    pub async fn account(&self, wallet: &WalletAddress) -> Result<Account, CardError> {
        match self.store.account_by_wallet(wallet).await? {
            Some(account) => Ok(account),
            None => {
                self.analytics.record_access_denied();
                tracing::info!("Unregistered wallet {} denied access", wallet);
                Err(CardError::AccessDenied(wallet.to_string()))
            }
        }
    }

    /// Returns the snapshot and whether it came from cache.
    pub async fn load(
        &self,
        wallet: &WalletAddress,
    ) -> Result<(DashboardSnapshot, bool), CardError> {
        let key = Self::cache_key(wallet);
        if let Some(cached) = self.cache.get::<DashboardSnapshot>(&key).await.ok().flatten() {
            return Ok((cached, true));
        }

        let snapshot = self.load_fresh(wallet).await?;
        Ok((snapshot, false))
    }

    /// Bypasses and repopulates the cache.
    pub async fn load_fresh(&self, wallet: &WalletAddress) -> Result<DashboardSnapshot, CardError> {
        let account = self.account(wallet).await?;
        let transactions = self.store.transactions_for(account.id).await?;

        let snapshot = DashboardSnapshot {
            account,
            transactions,
        };

        if let Err(e) = self
            .cache
            .set(&Self::cache_key(wallet), &snapshot, self.cache_ttl_secs)
            .await
        {
            tracing::warn!("Failed to cache dashboard for {}: {}", wallet, e);
        }

        Ok(snapshot)
    }

    pub async fn invalidate(&self, wallet: &WalletAddress) {
        self.cache.invalidate(&Self::cache_key(wallet)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::store::MemoryStore;
    use uuid::Uuid;

    const WALLET: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    fn service(store: Arc<MemoryStore>) -> (DashboardService, Arc<Analytics>) {
        let analytics = Arc::new(Analytics::new());
        let service = DashboardService::new(
            store,
            Arc::new(CacheService::memory_only(60)),
            analytics.clone(),
            60,
        );
        (service, analytics)
    }

    fn account() -> Account {
        Account {
            id: Uuid::new_v4(),
            wallet_address: WALLET.to_lowercase(),
            full_name: "Ada Lovelace".to_string(),
            card_number: None,
            expiry_date: None,
            cvv: None,
            billing_address: None,
            balance: 10.0,
        }
    }

    #[tokio::test]
    async fn unregistered_wallet_is_denied() {
        let (service, analytics) = service(Arc::new(MemoryStore::new()));
        let wallet: WalletAddress = WALLET.parse().unwrap();

        let result = service.load(&wallet).await;
        assert!(matches!(result, Err(CardError::AccessDenied(_))));
        assert_eq!(analytics.get_stats().await.access_denied, 1);
    }

    #[tokio::test]
    async fn second_load_is_served_from_cache_until_invalidated() {
        let stored = account();
        let store = Arc::new(MemoryStore::with_accounts([stored.clone()]));
        let (service, _) = service(store.clone());
        let wallet: WalletAddress = WALLET.parse().unwrap();

        let (first, hit) = service.load(&wallet).await.unwrap();
        assert!(!hit);
        assert_eq!(first.account.balance, 10.0);

        store.update_balance(stored.id, 99.0).await.unwrap();
        let (second, hit) = service.load(&wallet).await.unwrap();
        assert!(hit);
        assert_eq!(second.account.balance, 10.0);

        service.invalidate(&wallet).await;
        let (third, hit) = service.load(&wallet).await.unwrap();
        assert!(!hit);
        assert_eq!(third.account.balance, 99.0);
    }
}
