use ethers::types::Address;
use ethers::utils::to_checksum;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Connected wallet, parsed from hex regardless of checksum casing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WalletAddress(Address);

impl WalletAddress {
    /// Lowercase `0x`-prefixed hex, used for case-insensitive lookups and cache keys.
    pub fn to_lower_hex(&self) -> String {
        format!("{:?}", self.0)
    }

    pub fn truncated(&self) -> String {
        super::format::truncate_hex(&self.to_string())
    }

    /// Compares against a stored address string, ignoring case.
    pub fn matches(&self, stored: &str) -> bool {
        stored.trim().eq_ignore_ascii_case(&self.to_lower_hex())
    }
}

impl FromStr for WalletAddress {
    type Err = InvalidWalletAddress;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| InvalidWalletAddress(s.to_string()))?;
        if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(InvalidWalletAddress(s.to_string()));
        }
        Address::from_str(hex)
            .map(Self)
            .map_err(|_| InvalidWalletAddress(s.to_string()))
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_checksum(&self.0, None))
    }
}

impl Serialize for WalletAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WalletAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid wallet address: {0}")]
pub struct InvalidWalletAddress(pub String);

/// Pre-provisioned card holder, stored in the `users` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub wallet_address: String,
    pub full_name: String,
    #[serde(default)]
    pub card_number: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub cvv: Option<String>,
    #[serde(default)]
    pub billing_address: Option<String>,
    #[serde(default)]
    pub balance: f64,
}

impl Account {
    pub fn has_card(&self) -> bool {
        self.card_number.as_deref().is_some_and(|n| !n.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALLET: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    #[test]
    fn parses_any_casing() {
        let checksummed: WalletAddress = WALLET.parse().unwrap();
        let lower: WalletAddress = WALLET.to_lowercase().parse().unwrap();
        assert_eq!(checksummed, lower);
        assert_eq!(lower.to_string(), WALLET);
        assert_eq!(lower.truncated(), "0x5aAe...eAed");
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!("".parse::<WalletAddress>().is_err());
        assert!("5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed".parse::<WalletAddress>().is_err());
        assert!("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeA".parse::<WalletAddress>().is_err());
        assert!("0xZZAeb6053F3E94C9b9A09f33669435E7Ef1BeAed".parse::<WalletAddress>().is_err());
    }

    #[test]
    fn matches_stored_address_case_insensitively() {
        let wallet: WalletAddress = WALLET.parse().unwrap();
        assert!(wallet.matches(&WALLET.to_uppercase().replace("0X", "0x")));
        assert!(!wallet.matches("0x0000000000000000000000000000000000000000"));
    }

    #[test]
    fn card_presence_follows_card_number() {
        let mut account: Account = serde_json::from_value(serde_json::json!({
            "id": Uuid::new_v4(),
            "wallet_address": WALLET,
            "full_name": "Ada Lovelace",
            "balance": 125.5,
        }))
        .unwrap();
        assert!(!account.has_card());

        account.card_number = Some("4111 1111 1111 1111".to_string());
        assert!(account.has_card());
    }
}
