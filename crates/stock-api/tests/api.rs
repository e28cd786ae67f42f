//! Router tests against a mocked analyzer

use agent_stock::{AnalysisPayload, Result, StockAnalyzer, StockError, StockService};
use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use mockall::mock;
use serde_json::{Value, json};
use std::sync::Arc;
use stock_api::{AppState, router};
use tower::ServiceExt;

mock! {
    Analyzer {}

    #[async_trait]
    impl StockAnalyzer for Analyzer {
        async fn analyze(&self, symbol: &str) -> Result<AnalysisPayload>;
    }
}

fn unified_json() -> Value {
    json!({
        "stock_data": {
            "financial_news": [
                {
                    "headline": "Apple unveils new chips",
                    "source": "Reuters",
                    "url": "https://www.reuters.com/technology/apple-chips-2024-10-01/",
                    "date": "2024-10-01"
                }
            ],
            "price_data": {
                "symbol": "AAPL",
                "last_price": 227.5,
                "high": 229.0,
                "low": 224.1,
                "volume": 51234567,
                "timestamp": "2024-10-01T20:00:00Z"
            },
            "analysis": {
                "technical": {
                    "moving_average_50": 221.3,
                    "moving_average_200": 201.8,
                    "rsi": 58,
                    "Description": "Uptrend above both averages",
                    "recommendations": "Hold, target 240"
                },
                "fundamental": {
                    "pe_ratio": 34.2,
                    "eps": 6.57,
                    "revenue_growth": 4.9,
                    "debt_to_equity": 1.5,
                    "Description": "Strong margins, slowing growth",
                    "recommendations": "Hold"
                }
            }
        }
    })
}

fn app(analyzer: MockAnalyzer) -> axum::Router {
    router(AppState::new(StockService::new(Arc::new(analyzer))))
}

fn never_called() -> MockAnalyzer {
    let mut analyzer = MockAnalyzer::new();
    analyzer.expect_analyze().never();
    analyzer
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_stock_returns_unified_payload() {
    let mut analyzer = MockAnalyzer::new();
    analyzer
        .expect_analyze()
        .withf(|symbol| symbol == "AAPL")
        .times(1)
        .returning(|_| Ok(AnalysisPayload::Mapping(unified_json())));

    let (status, body) = get(app(analyzer), "/api/v1/stock/aapl").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, unified_json());
}

#[tokio::test]
async fn test_symbol_length_bounds() {
    let (status, body) = get(app(never_called()), "/api/v1/stock/ABCDEFGHIJK").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"detail": "Invalid stock symbol length"}));

    for uri in ["/api/v1/stock/", "/api/v1/stock"] {
        let (status, body) = get(app(never_called()), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["detail"], "Invalid stock symbol length");
    }
}

#[tokio::test]
async fn test_undecodable_symbol_is_a_json_400() {
    let (status, body) = get(app(never_called()), "/api/v1/stock/%FF").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body["detail"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_symbol_lengths_one_to_ten_are_accepted() {
    for len in 1..=10 {
        let symbol = "A".repeat(len);
        let mut analyzer = MockAnalyzer::new();
        analyzer
            .expect_analyze()
            .times(1)
            .returning(|_| Ok(AnalysisPayload::Mapping(unified_json())));

        let (status, _) = get(app(analyzer), &format!("/api/v1/stock/{symbol}")).await;
        assert_eq!(status, StatusCode::OK, "length {len}");
    }
}

#[tokio::test]
async fn test_not_found_maps_to_404() {
    let mut analyzer = MockAnalyzer::new();
    analyzer
        .expect_analyze()
        .returning(|symbol| Err(StockError::SymbolNotFound(symbol.to_string())));

    let (status, body) = get(app(analyzer), "/api/v1/stock/ZZZZ").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "Symbol not found: ZZZZ"}));
}

#[tokio::test]
async fn test_invalid_symbol_maps_to_400() {
    let mut analyzer = MockAnalyzer::new();
    analyzer
        .expect_analyze()
        .returning(|symbol| Err(StockError::InvalidSymbol(symbol.to_string())));

    let (status, body) = get(app(analyzer), "/api/v1/stock/A$PL").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Invalid symbol: A$PL");
}

#[tokio::test]
async fn test_other_failures_map_to_500() {
    let mut analyzer = MockAnalyzer::new();
    analyzer
        .expect_analyze()
        .returning(|_| Err(StockError::ApiError("quota exceeded".to_string())));

    let (status, body) = get(app(analyzer), "/api/v1/stock/MSFT").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["detail"],
        "Error getting stock data for MSFT: API error: quota exceeded"
    );
}

#[tokio::test]
async fn test_malformed_mapping_maps_to_500() {
    let mut analyzer = MockAnalyzer::new();
    analyzer
        .expect_analyze()
        .returning(|_| Ok(AnalysisPayload::Mapping(json!({"stock_data": {}}))));

    let (status, body) = get(app(analyzer), "/api/v1/stock/AAPL").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().unwrap().contains("Schema validation failed"));
}

#[tokio::test]
async fn test_root_and_health() {
    let (status, body) = get(app(never_called()), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "message": "Welcome to Stock Analysis API",
            "documentation": "/docs",
            "openapi": "/openapi.json"
        })
    );

    let (status, body) = get(app(never_called()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
