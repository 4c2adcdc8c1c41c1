//! Typed HTTP client for the card API.

use crate::error::ErrorResponse;
use crate::models::{ApiResponse, DashboardView, TopUpQuote, TopUpReceipt, TopUpRequest};
use anyhow::{bail, Context, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub struct CardClient {
    client: Client,
    base_url: String,
}

impl CardClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            if let Ok(error) = serde_json::from_str::<ErrorResponse>(&body) {
                bail!("{} ({}): {}", status, error.error_code, error.error);
            }
            bail!("{}: {}", status, body);
        }

        let envelope: ApiResponse<T> = serde_json::from_str(&body)
            .with_context(|| format!("Unexpected response body: {}", body))?;
        Ok(envelope.data)
    }

    pub async fn public_config(&self) -> Result<Value> {
        let response = self.client.get(self.url("/api/config")).send().await?;
        Self::decode(response).await
    }

    pub async fn dashboard(&self, wallet: &str, reveal: bool) -> Result<DashboardView> {
        let response = self
            .client
            .get(self.url(&format!("/api/accounts/{}", wallet)))
            .query(&[("reveal", reveal)])
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn quote(&self, amount: &str) -> Result<TopUpQuote> {
        let response = self
            .client
            .get(self.url("/api/topups/quote"))
            .query(&[("amount", amount)])
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn top_up(&self, wallet: &str, amount: &str) -> Result<TopUpReceipt> {
        let response = self
            .client
            .post(self.url(&format!("/api/accounts/{}/topups", wallet)))
            .json(&TopUpRequest {
                amount: amount.to_string(),
            })
            .send()
            .await?;
        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[tokio::test]
    async fn decodes_quote_envelope() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/topups/quote")
            .match_query(Matcher::UrlEncoded("amount".into(), "1000".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({
                    "success": true,
                    "timestamp": "2024-01-01T00:00:00Z",
                    "cache_hit": false,
                    "request_id": "r-1",
                    "data": {
                        "amount": 1000.0,
                        "fee": 50.0,
                        "total": 1050.0,
                        "fee_rate_bps": 500,
                        "policy": "added",
                        "charged": 1050.0,
                        "credited": 1000.0,
                        "charged_eth": 0.00105,
                        "treasury_address": "0x1234567890123456789012345678901234567890"
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = CardClient::new(&server.url());
        let quote = client.quote("1000").await.unwrap();
        assert_eq!(quote.fee, 50.0);
        assert_eq!(quote.total, 1050.0);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn surfaces_error_envelope() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/accounts/0xabc/topups")
            .with_status(403)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({
                    "success": false,
                    "error": "Access denied",
                    "error_code": "ACCESS_DENIED",
                    "timestamp": "2024-01-01T00:00:00Z",
                    "request_id": "r-2"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = CardClient::new(&server.url());
        let error = client.top_up("0xabc", "50000").await.unwrap_err();
        assert!(error.to_string().contains("ACCESS_DENIED"));
    }
}
