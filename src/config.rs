use crate::services::fee::FeePolicy;
use anyhow::{bail, Context, Result};
use ethers::types::Address;
use serde::Serialize;
use std::path::PathBuf;
use std::str::FromStr;

/// Treasury address shipped in sample configuration files.
pub const PLACEHOLDER_TREASURY: &str = "0x1234567890123456789012345678901234567890";

const PLACEHOLDER_BOT_TOKEN: &str = "YOUR_TELEGRAM_BOT_TOKEN";
const PLACEHOLDER_CHAT_ID: &str = "YOUR_TELEGRAM_CHAT_ID";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Testnet,
    Production,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TopUpLimits {
    pub min_amount: f64,
    pub max_amount: f64,
}

impl Default for TopUpLimits {
    fn default() -> Self {
        Self {
            min_amount: 40_000.0,
            max_amount: 200_000.0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChainConfig {
    pub id: u64,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub rpc_url: String,
    pub explorer_url: String,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            id: 11_155_111,
            name: "Pepe Unchained V2".to_string(),
            symbol: "PEPU".to_string(),
            decimals: 18,
            rpc_url: "https://sepolia.drpc.org".to_string(),
            explorer_url: "https://pepuscan.com/".to_string(),
        }
    }
}

impl ChainConfig {
    pub fn tx_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_url.trim_end_matches('/'), tx_hash)
    }
}

/// PostgREST-compatible record store.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub api_url: String,
    pub bot_token: String,
    pub chat_id: String,
    pub timeout_secs: u64,
}

impl TelegramConfig {
    pub fn is_configured(&self) -> bool {
        !self.bot_token.is_empty()
            && !self.chat_id.is_empty()
            && self.bot_token != PLACEHOLDER_BOT_TOKEN
            && self.chat_id != PLACEHOLDER_CHAT_ID
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub host: String,
    pub port: u16,
    pub app_name: String,

    // Record store; falls back to the in-memory store when unset
    pub backend: Option<BackendConfig>,
    pub accounts_seed_path: Option<PathBuf>,

    // Top-up rules
    pub limits: TopUpLimits,
    pub quick_amounts: Vec<f64>,
    pub fee_policy: FeePolicy,
    pub treasury_address: Address,
    pub pepu_per_eth: f64,
    pub chain: ChainConfig,

    // Redis
    pub redis_url: Option<String>,
    pub dashboard_cache_ttl_secs: u64,

    pub telegram: Option<TelegramConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            host: "0.0.0.0".to_string(),
            port: 8080,
            app_name: "Somi Cards".to_string(),
            backend: None,
            accounts_seed_path: None,
            limits: TopUpLimits::default(),
            quick_amounts: vec![40_000.0, 75_000.0, 150_000.0, 200_000.0],
            fee_policy: FeePolicy::default(),
            treasury_address: Address::from_str(PLACEHOLDER_TREASURY)
                .unwrap_or_else(|_| Address::zero()),
            pepu_per_eth: 1_000_000.0,
            chain: ChainConfig::default(),
            redis_url: None,
            dashboard_cache_ttl_secs: 10,
            telegram: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let environment = Self::parse_environment()?;

        let backend = match std::env::var("BACKEND_URL").ok() {
            Some(url) => Some(BackendConfig {
                url: url.trim_end_matches('/').to_string(),
                api_key: std::env::var("BACKEND_API_KEY")
                    .context("BACKEND_API_KEY required when BACKEND_URL is set")?,
                timeout_secs: Self::parse_var("BACKEND_TIMEOUT_SECS", 10)?,
            }),
            None => None,
        };

        let telegram = match (
            std::env::var("TELEGRAM_BOT_TOKEN").ok(),
            std::env::var("TELEGRAM_CHAT_ID").ok(),
        ) {
            (Some(bot_token), Some(chat_id)) => Some(TelegramConfig {
                api_url: std::env::var("TELEGRAM_API_URL")
                    .unwrap_or_else(|_| "https://api.telegram.org".to_string()),
                bot_token,
                chat_id,
                timeout_secs: Self::parse_var("TELEGRAM_TIMEOUT_SECS", 5)?,
            }),
            _ => None,
        };

        let chain = ChainConfig {
            id: Self::parse_var("CHAIN_ID", defaults.chain.id)?,
            rpc_url: std::env::var("CHAIN_RPC_URL").unwrap_or(defaults.chain.rpc_url),
            explorer_url: std::env::var("CHAIN_EXPLORER_URL")
                .unwrap_or(defaults.chain.explorer_url),
            ..defaults.chain
        };

        let config = Self {
            environment,
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: Self::parse_var("PORT", defaults.port)?,
            app_name: std::env::var("APP_NAME").unwrap_or(defaults.app_name),

            backend,
            accounts_seed_path: std::env::var("ACCOUNTS_SEED_FILE").ok().map(PathBuf::from),

            limits: TopUpLimits {
                min_amount: Self::parse_var("TOP_UP_MIN_AMOUNT", defaults.limits.min_amount)?,
                max_amount: Self::parse_var("TOP_UP_MAX_AMOUNT", defaults.limits.max_amount)?,
            },
            quick_amounts: match std::env::var("TOP_UP_QUICK_AMOUNTS") {
                Ok(raw) => Self::parse_amount_list(&raw)?,
                Err(_) => defaults.quick_amounts,
            },
            fee_policy: Self::parse_var("FEE_POLICY", defaults.fee_policy)?,
            treasury_address: match std::env::var("TREASURY_ADDRESS") {
                Ok(raw) => Address::from_str(&raw)
                    .context("Invalid address for TREASURY_ADDRESS")?,
                Err(_) => defaults.treasury_address,
            },
            pepu_per_eth: Self::parse_var("PEPU_PER_ETH", defaults.pepu_per_eth)?,
            chain,

            redis_url: std::env::var("REDIS_URL").ok(),
            dashboard_cache_ttl_secs: Self::parse_var(
                "DASHBOARD_CACHE_TTL_SECS",
                defaults.dashboard_cache_ttl_secs,
            )?,

            telegram,
        };

        config.validate()?;
        Ok(config)
    }

    fn parse_environment() -> Result<Environment> {
        let env = std::env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string());

        match env.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "testnet" | "test" => Ok(Environment::Testnet),
            "production" | "prod" => Ok(Environment::Production),
            _ => bail!("Unknown environment: {}", env),
        }
    }

    fn parse_var<T>(var: &str, default: T) -> Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match std::env::var(var) {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid {}: {}", var, e)),
            Err(_) => Ok(default),
        }
    }

    fn parse_amount_list(raw: &str) -> Result<Vec<f64>> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<f64>()
                    .with_context(|| format!("Invalid TOP_UP_QUICK_AMOUNTS entry: {}", s))
            })
            .collect()
    }

    pub fn treasury_is_placeholder(&self) -> bool {
        Address::from_str(PLACEHOLDER_TREASURY)
            .map(|placeholder| placeholder == self.treasury_address)
            .unwrap_or(false)
    }

    pub fn validate(&self) -> Result<()> {
        let limits = &self.limits;
        if !limits.min_amount.is_finite() || !limits.max_amount.is_finite() {
            bail!("Top-up limits must be finite numbers");
        }
        if limits.min_amount < 0.0 || limits.min_amount > limits.max_amount {
            bail!(
                "TOP_UP_MIN_AMOUNT ({}) must be non-negative and not exceed TOP_UP_MAX_AMOUNT ({})",
                limits.min_amount,
                limits.max_amount
            );
        }
        if !self.pepu_per_eth.is_finite() || self.pepu_per_eth <= 0.0 {
            bail!("PEPU_PER_ETH must be positive");
        }

        if let Some(backend) = &self.backend {
            if !backend.url.starts_with("http") {
                bail!("BACKEND_URL must be HTTP(S) URL");
            }
        }

        if self.treasury_is_placeholder() {
            if self.environment == Environment::Production {
                bail!("TREASURY_ADDRESS must be configured in production");
            }
            tracing::warn!(
                "Treasury address not configured, using placeholder {}",
                PLACEHOLDER_TREASURY
            );
        }

        if let Some(telegram) = &self.telegram {
            if !telegram.is_configured() {
                tracing::warn!("Telegram credentials are placeholders, notifications disabled");
            }
        }

        tracing::info!(
            "Configuration validated for {:?} environment",
            self.environment
        );

        Ok(())
    }
}
