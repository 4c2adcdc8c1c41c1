use crate::config::TelegramConfig;
use crate::models::{format::format_amount, TopUpReceipt, WalletAddress};
use anyhow::{bail, Result};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// Posts a message to the operator chat for every completed top-up.
pub struct TelegramNotifier {
    client: Client,
    config: TelegramConfig,
}

impl TelegramNotifier {
    /// Returns `None` unless real credentials are configured.
    pub fn from_config(config: Option<&TelegramConfig>) -> Option<Self> {
        let config = config.filter(|c| c.is_configured())?.clone();
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                tracing::warn!("Telegram client unavailable, notifications disabled: {}", e)
            })
            .ok()?;
        tracing::info!("Telegram notifications enabled for chat {}", config.chat_id);
        Some(Self { client, config })
    }

    pub async fn notify_top_up(
        &self,
        holder: &str,
        wallet: &WalletAddress,
        receipt: &TopUpReceipt,
    ) -> Result<()> {
        #[derive(Serialize)]
        struct SendMessage<'a> {
            chat_id: &'a str,
            text: String,
        }

        let request = SendMessage {
            chat_id: &self.config.chat_id,
            text: top_up_message(holder, wallet, receipt),
        };

        let response = self
            .client
            .post(format!(
                "{}/bot{}/sendMessage",
                self.config.api_url.trim_end_matches('/'),
                self.config.bot_token
            ))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            bail!("Telegram rejected notification: {}", response.status());
        }

        tracing::debug!("Top-up notification delivered");
        Ok(())
    }
}

fn top_up_message(holder: &str, wallet: &WalletAddress, receipt: &TopUpReceipt) -> String {
    format!(
        "New top-up\nHolder: {}\nWallet: {}\nCredited: {} PEPU\nFee: {} PEPU\nCharged: {} PEPU\nNew balance: {} PEPU\nTx: {}",
        holder,
        wallet,
        format_amount(receipt.quote.credited),
        format_amount(receipt.quote.fee),
        format_amount(receipt.quote.charged),
        format_amount(receipt.new_balance),
        receipt.transaction.tx_hash,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Transaction, TxStatus};
    use crate::services::{FeeCalculator, FeePolicy};
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn message_lists_every_amount_in_pepu() {
        let quote = FeeCalculator::new(FeePolicy::Added, 1_000_000.0, "0x1234".to_string())
            .quote(40_000.0);
        let receipt = TopUpReceipt {
            transaction: Transaction {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                tx_hash: format!("0x{}", "ab".repeat(32)),
                amount: quote.credited,
                status: TxStatus::Confirmed,
                created_at: Utc::now(),
            },
            quote,
            previous_balance: 500.0,
            new_balance: 40_500.0,
            dashboard: None,
        };
        let wallet: WalletAddress = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed".parse().unwrap();

        let message = top_up_message("Ada Lovelace", &wallet, &receipt);

        assert!(message.contains("Holder: Ada Lovelace"));
        assert!(message.contains("Wallet: 0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"));
        assert!(message.contains("Credited: 40,000 PEPU"));
        assert!(message.contains("Fee: 2,000 PEPU"));
        assert!(message.contains("Charged: 42,000 PEPU"));
        assert!(message.contains("New balance: 40,500 PEPU"));
    }

    #[test]
    fn placeholder_credentials_disable_notifier() {
        let config = TelegramConfig {
            api_url: "https://api.telegram.org".to_string(),
            bot_token: "YOUR_TELEGRAM_BOT_TOKEN".to_string(),
            chat_id: "-10042".to_string(),
            timeout_secs: 5,
        };
        assert!(TelegramNotifier::from_config(Some(&config)).is_none());
        assert!(TelegramNotifier::from_config(None).is_none());
    }
}
