use crate::{
    config::{ChainConfig, TopUpLimits},
    error::CardError,
    models::{DashboardView, NewTransaction, TopUpQuote, TopUpReceipt, TxStatus, WalletAddress},
    services::{
        fee::FeeCalculator, notifier::TelegramNotifier, store::CardStore,
        tx_hash::placeholder_tx_hash, validator::validate_amount, Analytics, DashboardService,
    },
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Accounts with a top-up currently being written.
#[derive(Default)]
struct InFlight(Mutex<HashSet<Uuid>>);

impl InFlight {
    fn acquire(self: &Arc<Self>, account_id: Uuid) -> Result<InFlightGuard, CardError> {
        let mut set = self
            .0
            .lock()
            .map_err(|_| CardError::InternalError("top-up lock poisoned".to_string()))?;
        if !set.insert(account_id) {
            return Err(CardError::TopUpInProgress);
        }
        Ok(InFlightGuard {
            owner: self.clone(),
            account_id,
        })
    }
}

struct InFlightGuard {
    owner: Arc<InFlight>,
    account_id: Uuid,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if let Ok(mut set) = self.owner.0.lock() {
            set.remove(&self.account_id);
        }
    }
}

pub struct TopUpService {
    store: Arc<dyn CardStore>,
    dashboard: Arc<DashboardService>,
    analytics: Arc<Analytics>,
    notifier: Option<TelegramNotifier>,
    fees: FeeCalculator,
    limits: TopUpLimits,
    chain: ChainConfig,
    in_flight: Arc<InFlight>,
}

impl TopUpService {
    pub fn new(
        store: Arc<dyn CardStore>,
        dashboard: Arc<DashboardService>,
        analytics: Arc<Analytics>,
        notifier: Option<TelegramNotifier>,
        fees: FeeCalculator,
        limits: TopUpLimits,
        chain: ChainConfig,
    ) -> Self {
        Self {
            store,
            dashboard,
            analytics,
            notifier,
            fees,
            limits,
            chain,
            in_flight: Arc::new(InFlight::default()),
        }
    }

    /// Validates `raw_amount` and prices it without touching the store.
    pub fn quote(&self, raw_amount: &str) -> Result<TopUpQuote, CardError> {
        let amount = validate_amount(raw_amount, &self.limits)?;
        Ok(self.fees.quote(amount))
    }

    /// Records a top-up for `wallet`: one transaction insert, then one
    /// balance overwrite. The two writes are not atomic; if the second
    /// fails the transaction row stays behind.
    pub async fn submit(
        &self,
        wallet: &WalletAddress,
        raw_amount: &str,
    ) -> Result<TopUpReceipt, CardError> {
        let account_id = self.dashboard.account(wallet).await?.id;
        let quote = self.quote(raw_amount)?;

        let guard = self.in_flight.acquire(account_id).map_err(|e| {
            tracing::warn!("Rejected top-up for {}: {}", wallet, e);
            e
        })?;

        // Re-read under the guard so the balance includes any top-up that
        // finished while this one was waiting.
        let account = self
            .store
            .account_by_id(account_id)
            .await?
            .ok_or_else(|| CardError::AccessDenied(wallet.to_string()))?;

        let transaction = match self
            .store
            .insert_transaction(NewTransaction {
                user_id: account.id,
                tx_hash: placeholder_tx_hash(),
                amount: quote.credited,
                status: TxStatus::Confirmed,
            })
            .await
        {
            Ok(tx) => tx,
            Err(e) => {
                self.analytics.record_failure();
                tracing::error!("Top-up insert failed for {}: {}", wallet, e);
                return Err(e.into());
            }
        };

        let previous_balance = account.balance;
        let new_balance = previous_balance + quote.credited;

        if let Err(e) = self.store.update_balance(account.id, new_balance).await {
            self.analytics.record_failure();
            self.analytics.record_divergence();
            tracing::warn!(
                transaction_id = %transaction.id,
                account_id = %account.id,
                "Balance update failed after transaction was recorded; balance and history diverge: {}",
                e
            );
            self.dashboard.invalidate(wallet).await;
            return Err(e.into());
        }
        drop(guard);

        // Both writes landed; from here on nothing may turn the top-up into an error.
        self.dashboard.invalidate(wallet).await;
        let dashboard = match self.dashboard.load_fresh(wallet).await {
            Ok(snapshot) => Some(DashboardView::new(
                wallet,
                &snapshot.account,
                &snapshot.transactions,
                &self.chain,
                false,
            )),
            Err(e) => {
                tracing::warn!(
                    transaction_id = %transaction.id,
                    "Dashboard reload after top-up failed: {}",
                    e
                );
                None
            }
        };

        let receipt = TopUpReceipt {
            transaction,
            quote,
            previous_balance,
            new_balance,
            dashboard,
        };

        self.analytics
            .record_top_up(receipt.quote.credited, receipt.quote.fee, &wallet.to_string())
            .await;

        if let Some(notifier) = &self.notifier {
            if let Err(e) = notifier
                .notify_top_up(&account.full_name, wallet, &receipt)
                .await
            {
                tracing::warn!("Top-up notification failed: {}", e);
            }
        }

        Ok(receipt)
    }
}
