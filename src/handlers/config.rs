use super::AppState;
use crate::config::Config;
use crate::models::{ApiResponse, LandingView, PublicConfig};
use crate::services::FeeCalculator;
use axum::{extract::State, Json};

pub fn public_config(config: &Config, fees: &FeeCalculator) -> PublicConfig {
    PublicConfig {
        landing: LandingView::new(&config.app_name, &config.chain),
        limits: config.limits,
        quick_amounts: config.quick_amounts.clone(),
        fee_rate_bps: fees.rate_bps(),
        fee_policy: fees.policy(),
        treasury_address: ethers::utils::to_checksum(&config.treasury_address, None),
        pepu_per_eth: config.pepu_per_eth,
        chain: config.chain.clone(),
    }
}

pub async fn get_public_config(
    State(state): State<AppState>,
) -> Json<ApiResponse<PublicConfig>> {
    Json(ApiResponse::ok(state.public_config.as_ref().clone()))
}
