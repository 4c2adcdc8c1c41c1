use crate::models::InvalidWalletAddress;
use crate::services::{store::StoreError, validator::AmountError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum CardError {
    #[error("{0}")]
    Validation(#[from] AmountError),

    #[error(transparent)]
    InvalidWallet(#[from] InvalidWalletAddress),

    #[error("Access denied: wallet {0} is not registered. Contact support to register your wallet address.")]
    AccessDenied(String),

    #[error("A top-up for this account is already being processed")]
    TopUpInProgress,

    #[error("Backend error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl CardError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            CardError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_FAILED"),
            CardError::InvalidWallet(_) => (StatusCode::BAD_REQUEST, "INVALID_WALLET_ADDRESS"),
            CardError::AccessDenied(_) => (StatusCode::FORBIDDEN, "ACCESS_DENIED"),
            CardError::TopUpInProgress => (StatusCode::CONFLICT, "TOP_UP_IN_PROGRESS"),
            CardError::Store(_) => (StatusCode::BAD_GATEWAY, "BACKEND_ERROR"),
            CardError::InternalError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub timestamp: chrono::DateTime<Utc>,
    pub request_id: String,
}

impl IntoResponse for CardError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();
        let (status, error_code) = self.status_and_code();

        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
            error_code: error_code.to_string(),
            timestamp: Utc::now(),
            request_id,
        };

        if status.is_server_error() {
            tracing::error!(
                error = ?self,
                error_code = error_code,
                "Request failed"
            );
        } else {
            tracing::info!(
                error = %self,
                error_code = error_code,
                "Request rejected"
            );
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_to_status_codes() {
        let cases = [
            (CardError::Validation(AmountError::NotANumber), StatusCode::UNPROCESSABLE_ENTITY),
            (CardError::AccessDenied("0xabc".into()), StatusCode::FORBIDDEN),
            (CardError::TopUpInProgress, StatusCode::CONFLICT),
            (
                CardError::Store(StoreError::Status {
                    status: 500,
                    body: "boom".into(),
                }),
                StatusCode::BAD_GATEWAY,
            ),
            (CardError::InternalError("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn validation_message_is_surfaced_verbatim() {
        let error = CardError::from(AmountError::BelowMinimum { min: 40_000.0 });
        assert_eq!(error.to_string(), "Minimum amount is 40,000 PEPU");
    }
}
