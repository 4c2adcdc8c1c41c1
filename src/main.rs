use anyhow::Result;
use somi_cards::{
    config::Config,
    handlers::{router, AppState},
    services::{CacheService, CardStore, MemoryStore, RestStore, TelegramNotifier},
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting {} API v{}", config.app_name, env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {:?}", config.environment);
    tracing::info!(
        "Top-up limits: {} - {} PEPU, fee policy: {}",
        config.limits.min_amount,
        config.limits.max_amount,
        config.fee_policy
    );

    let store: Arc<dyn CardStore> = match (&config.backend, &config.accounts_seed_path) {
        (Some(backend), _) => Arc::new(RestStore::new(backend)?),
        (None, Some(seed)) => Arc::new(MemoryStore::from_seed_file(seed).await?),
        (None, None) => {
            tracing::warn!("No BACKEND_URL or ACCOUNTS_SEED_FILE configured, starting with an empty in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    let cache = Arc::new(
        CacheService::new(config.redis_url.as_deref(), config.dashboard_cache_ttl_secs).await?,
    );
    let notifier = TelegramNotifier::from_config(config.telegram.as_ref());

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(config, store, cache, notifier);

    let app = router(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for ctrl+c: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down gracefully...");
}
