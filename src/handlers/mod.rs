pub mod accounts;
pub mod config;
pub mod health;
pub mod stats;
pub mod top_up;

pub use accounts::*;
pub use config::*;
pub use health::*;
pub use stats::*;
pub use top_up::*;

use crate::{
    config::Config,
    models::PublicConfig,
    services::{
        Analytics, CacheService, CardStore, DashboardService, FeeCalculator, TelegramNotifier,
        TopUpService,
    },
};
use axum::{
    routing::{get, post},
    Router,
};
use ethers::utils::to_checksum;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub public_config: Arc<PublicConfig>,
    pub store: Arc<dyn CardStore>,
    pub cache: Arc<CacheService>,
    pub analytics: Arc<Analytics>,
    pub dashboard: Arc<DashboardService>,
    pub top_up: Arc<TopUpService>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn CardStore>,
        cache: Arc<CacheService>,
        notifier: Option<TelegramNotifier>,
    ) -> Self {
        let analytics = Arc::new(Analytics::new());
        let dashboard = Arc::new(DashboardService::new(
            store.clone(),
            cache.clone(),
            analytics.clone(),
            config.dashboard_cache_ttl_secs,
        ));
        let fees = FeeCalculator::new(
            config.fee_policy,
            config.pepu_per_eth,
            to_checksum(&config.treasury_address, None),
        );
        let public_config = Arc::new(public_config(&config, &fees));
        let top_up = Arc::new(TopUpService::new(
            store.clone(),
            dashboard.clone(),
            analytics.clone(),
            notifier,
            fees,
            config.limits,
            config.chain.clone(),
        ));

        Self {
            config: Arc::new(config),
            public_config,
            store,
            cache,
            analytics,
            dashboard,
            top_up,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/stats", get(get_stats))
        .route("/api/config", get(get_public_config))
        .route("/api/topups/quote", get(quote_top_up))
        .route("/api/accounts/:wallet", get(get_dashboard))
        .route("/api/accounts/:wallet/transactions", get(list_transactions))
        .route("/api/accounts/:wallet/topups", post(submit_top_up))
        .with_state(state)
}
