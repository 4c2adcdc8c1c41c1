use super::AppState;
use crate::models::HealthStatus;
use axum::{extract::State, Json};
use chrono::Utc;

pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    let (store_ok, redis_ok) = futures::future::join(state.store.ping(), state.cache.ping()).await;
    let redis_ok = redis_ok.unwrap_or(false);

    let status = if store_ok && (redis_ok || !state.cache.has_redis()) {
        "healthy"
    } else if store_ok {
        "degraded"
    } else {
        "unhealthy"
    };

    Json(HealthStatus {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: store_ok,
        redis: redis_ok,
        uptime_seconds: state.analytics.uptime_seconds(),
        timestamp: Utc::now(),
    })
}
