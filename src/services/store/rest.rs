use super::{CardStore, StoreError};
use crate::config::BackendConfig;
use crate::models::{Account, NewTransaction, Transaction, WalletAddress};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

const USERS: &str = "users";
const TRANSACTIONS: &str = "transactions";

/// PostgREST (Supabase) backed store.
pub struct RestStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    pub fn new(config: &BackendConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        tracing::info!("Using record store at {}", config.url);

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn checked(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, StoreError> {
        let response = self
            .authorized(self.client.get(self.table_url(table)))
            .query(&[("select", "*")])
            .query(query)
            .send()
            .await?;
        let body = Self::checked(response).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Scopes row-level security to the connected wallet. Failures are
    /// logged and ignored; the lookup that follows decides access.
    async fn scope_to_wallet(&self, wallet: &WalletAddress) {
        #[derive(Serialize)]
        struct ScopeRequest {
            wallet_addr: String,
        }

        let result = self
            .authorized(
                self.client
                    .post(format!("{}/rest/v1/rpc/set_current_wallet_address", self.base_url)),
            )
            .json(&ScopeRequest {
                wallet_addr: wallet.to_string(),
            })
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {}
            Ok(response) => {
                tracing::debug!("Wallet scoping rejected: {}", response.status());
            }
            Err(e) => tracing::debug!("Wallet scoping failed: {}", e),
        }
    }
}

#[async_trait]
impl CardStore for RestStore {
    async fn account_by_wallet(
        &self,
        wallet: &WalletAddress,
    ) -> Result<Option<Account>, StoreError> {
        self.scope_to_wallet(wallet).await;

        let rows: Vec<Account> = self
            .select(
                USERS,
                &[
                    ("wallet_address", format!("ilike.{}", wallet.to_lower_hex())),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn account_by_id(&self, id: Uuid) -> Result<Option<Account>, StoreError> {
        let rows: Vec<Account> = self
            .select(USERS, &[("id", format!("eq.{}", id)), ("limit", "1".to_string())])
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn transactions_for(&self, account_id: Uuid) -> Result<Vec<Transaction>, StoreError> {
        self.select(
            TRANSACTIONS,
            &[
                ("user_id", format!("eq.{}", account_id)),
                ("order", "created_at.desc".to_string()),
            ],
        )
        .await
    }

    async fn insert_transaction(&self, tx: NewTransaction) -> Result<Transaction, StoreError> {
        let response = self
            .authorized(self.client.post(self.table_url(TRANSACTIONS)))
            .header("Prefer", "return=representation")
            .json(&tx)
            .send()
            .await?;
        let body = Self::checked(response).await?.text().await?;
        let rows: Vec<Transaction> = serde_json::from_str(&body)?;
        rows.into_iter()
            .next()
            .ok_or(StoreError::EmptyResponse(TRANSACTIONS))
    }

    async fn update_balance(&self, account_id: Uuid, balance: f64) -> Result<(), StoreError> {
        #[derive(Serialize)]
        struct BalanceUpdate {
            balance: f64,
        }

        let response = self
            .authorized(self.client.patch(self.table_url(USERS)))
            .query(&[("id", format!("eq.{}", account_id))])
            .header("Prefer", "return=representation")
            .json(&BalanceUpdate { balance })
            .send()
            .await?;
        let body = Self::checked(response).await?.text().await?;
        let rows: Vec<serde_json::Value> = serde_json::from_str(&body)?;
        if rows.is_empty() {
            return Err(StoreError::AccountNotFound(account_id));
        }
        Ok(())
    }

    async fn ping(&self) -> bool {
        let result = self
            .authorized(self.client.get(self.table_url(USERS)))
            .query(&[("select", "id"), ("limit", "1")])
            .send()
            .await;
        matches!(result, Ok(response) if response.status().is_success())
    }
}
