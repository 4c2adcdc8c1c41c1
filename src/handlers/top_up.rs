use super::AppState;
use crate::{
    error::CardError,
    models::{ApiResponse, QuoteQuery, TopUpQuote, TopUpReceipt, TopUpRequest, WalletAddress},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

pub async fn quote_top_up(
    State(state): State<AppState>,
    Query(query): Query<QuoteQuery>,
) -> Result<Json<ApiResponse<TopUpQuote>>, CardError> {
    let quote = state.top_up.quote(&query.amount)?;
    Ok(Json(ApiResponse::ok(quote)))
}

pub async fn submit_top_up(
    State(state): State<AppState>,
    Path(wallet): Path<String>,
    Json(request): Json<TopUpRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TopUpReceipt>>), CardError> {
    let wallet: WalletAddress = wallet.parse()?;
    let receipt = state.top_up.submit(&wallet, &request.amount).await?;

    tracing::info!(
        "Top-up of {} PEPU credited to {} (tx: {})",
        receipt.quote.credited,
        wallet,
        receipt.transaction.tx_hash
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(receipt))))
}
