use super::AppState;
use crate::{
    error::CardError,
    models::{ApiResponse, DashboardView, TransactionView, WalletAddress},
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub reveal: bool,
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    Path(wallet): Path<String>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<ApiResponse<DashboardView>>, CardError> {
    let wallet: WalletAddress = wallet.parse()?;
    let (snapshot, cache_hit) = state.dashboard.load(&wallet).await?;

    let view = DashboardView::new(
        &wallet,
        &snapshot.account,
        &snapshot.transactions,
        &state.config.chain,
        query.reveal,
    );

    Ok(Json(ApiResponse::with_cache_hit(view, cache_hit)))
}

pub async fn list_transactions(
    State(state): State<AppState>,
    Path(wallet): Path<String>,
) -> Result<Json<ApiResponse<Vec<TransactionView>>>, CardError> {
    let wallet: WalletAddress = wallet.parse()?;
    let (snapshot, cache_hit) = state.dashboard.load(&wallet).await?;

    let history = snapshot
        .transactions
        .iter()
        .map(|tx| TransactionView::new(tx, &state.config.chain))
        .collect();

    Ok(Json(ApiResponse::with_cache_hit(history, cache_hit)))
}
