//! Route handlers

use agent_stock::UnifiedResponse;
use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use axum_extra::extract::WithRejection;
use serde_json::{Value, json};
use tracing::info;

use crate::AppState;
use crate::error::ApiError;

/// Longest symbol accepted by the stock endpoint
pub const MAX_SYMBOL_LEN: usize = 10;

const INVALID_LENGTH: &str = "Invalid stock symbol length";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/v1/stock", get(empty_symbol))
        .route("/api/v1/stock/", get(empty_symbol))
        .route("/api/v1/stock/:symbol", get(get_stock))
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to Stock Analysis API",
        "documentation": "/docs",
        "openapi": "/openapi.json",
    }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn empty_symbol() -> ApiError {
    ApiError::bad_request(INVALID_LENGTH)
}

async fn get_stock(
    State(state): State<AppState>,
    WithRejection(Path(symbol), _): WithRejection<Path<String>, ApiError>,
) -> Result<Json<UnifiedResponse>, ApiError> {
    let symbol = normalize_symbol(&symbol)?;
    info!(%symbol, "Stock data requested");

    let response = state.service.get_stock_data(&symbol).await?;
    Ok(Json(response))
}

/// Check the length and uppercase the symbol
fn normalize_symbol(symbol: &str) -> Result<String, ApiError> {
    let len = symbol.chars().count();
    if len == 0 || len > MAX_SYMBOL_LEN {
        return Err(ApiError::bad_request(INVALID_LENGTH));
    }
    Ok(symbol.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_symbol() {
        assert_eq!(normalize_symbol("aapl").unwrap(), "AAPL");
        assert_eq!(normalize_symbol("brk.b").unwrap(), "BRK.B");
        assert_eq!(normalize_symbol("ABCDEFGHIJ").unwrap(), "ABCDEFGHIJ");

        let err = normalize_symbol("ABCDEFGHIJK").unwrap_err();
        assert_eq!(err.detail(), "Invalid stock symbol length");
        assert!(normalize_symbol("").is_err());
    }
}
