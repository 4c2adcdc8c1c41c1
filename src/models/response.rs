use super::view::LandingView;
use crate::config::{ChainConfig, TopUpLimits};
use crate::services::fee::FeePolicy;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    pub timestamp: DateTime<Utc>,
    pub cache_hit: bool,
    pub request_id: String,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self::with_cache_hit(data, false)
    }

    pub fn with_cache_hit(data: T, cache_hit: bool) -> Self {
        Self {
            success: true,
            data,
            timestamp: Utc::now(),
            cache_hit,
            request_id: Uuid::new_v4().to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub store: bool,
    pub redis: bool,
    pub uptime_seconds: u64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Stats {
    pub top_ups_total: u64,
    pub top_ups_failed: u64,
    pub balance_divergences: u64,
    pub volume_credited: f64,
    pub fees_collected: f64,
    pub access_denied: u64,
    pub uptime_seconds: u64,
}

/// Everything a front end needs to render the form and landing page.
#[derive(Serialize, Debug, Clone)]
pub struct PublicConfig {
    pub landing: LandingView,
    pub limits: TopUpLimits,
    pub quick_amounts: Vec<f64>,
    pub fee_rate_bps: u32,
    pub fee_policy: FeePolicy,
    pub treasury_address: String,
    pub pepu_per_eth: f64,
    pub chain: ChainConfig,
}
