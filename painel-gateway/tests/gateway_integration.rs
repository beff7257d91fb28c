//! Integration tests for the gateway clients against local mock upstreams

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use painel_gateway::{
    AdsClient, AdsConfig, ClientError, ExchangeClient, ExchangeConfig, OrderFilter, OrderGateway,
    StorefrontClient, StorefrontConfig, FALLBACK_RATE,
};
use shared::timeframe::DateRange;

async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn test_range() -> DateRange {
    DateRange {
        start: Utc.with_ymd_and_hms(2024, 3, 15, 3, 0, 0).unwrap(),
        end: Utc.with_ymd_and_hms(2024, 3, 21, 2, 59, 59).unwrap(),
    }
}

fn order_json(id: i64) -> Value {
    json!({
        "id": id,
        "total_price": "100.00",
        "financial_status": "paid",
        "gateway": "pix",
        "created_at": "2024-03-16T12:00:00-03:00",
        "line_items": [],
        "shipping_lines": []
    })
}

fn storefront_client(base_url: &str, max_retries: u32) -> StorefrontClient {
    let mut config = StorefrontConfig::new(base_url);
    config.max_retries = max_retries;
    config.timeout = 5;
    StorefrontClient::new(&config)
}

#[tokio::test]
async fn test_get_orders_paginates_with_since_id() {
    let hits = Arc::new(AtomicUsize::new(0));

    async fn orders(
        State(hits): State<Arc<AtomicUsize>>,
        Query(params): Query<HashMap<String, String>>,
    ) -> Json<Value> {
        hits.fetch_add(1, Ordering::SeqCst);
        let since_id: i64 = params.get("since_id").and_then(|s| s.parse().ok()).unwrap_or(0);
        let limit: usize = params.get("limit").and_then(|s| s.parse().ok()).unwrap_or(250);
        assert_eq!(params.get("status").map(String::as_str), Some("any"));

        let page: Vec<Value> = (1..=5)
            .filter(|id| *id > since_id)
            .take(limit)
            .map(order_json)
            .collect();
        Json(json!({ "orders": page }))
    }

    let app = Router::new()
        .route("/orders", get(orders))
        .with_state(hits.clone());
    let base = spawn_server(app).await;

    let client = storefront_client(&base, 0);
    let mut filter = OrderFilter::for_range(&test_range());
    filter.limit = 2;

    let orders = client.get_orders(&filter).await.unwrap();
    assert_eq!(orders.len(), 5);
    assert_eq!(orders.last().unwrap().id, 5);
    // two full pages plus the short final page
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_get_orders_unauthorized_is_not_retried() {
    let hits = Arc::new(AtomicUsize::new(0));

    async fn orders(State(hits): State<Arc<AtomicUsize>>) -> (axum::http::StatusCode, String) {
        hits.fetch_add(1, Ordering::SeqCst);
        (axum::http::StatusCode::UNAUTHORIZED, "invalid token".into())
    }

    let app = Router::new()
        .route("/orders", get(orders))
        .with_state(hits.clone());
    let base = spawn_server(app).await;

    let client = storefront_client(&base, 3);
    let filter = OrderFilter::for_range(&test_range());

    let err = client.get_orders(&filter).await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_get_orders_retries_server_errors() {
    let hits = Arc::new(AtomicUsize::new(0));

    async fn orders(State(hits): State<Arc<AtomicUsize>>) -> axum::response::Response {
        let n = hits.fetch_add(1, Ordering::SeqCst);
        if n == 0 {
            axum::response::IntoResponse::into_response((
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                "boom",
            ))
        } else {
            axum::response::IntoResponse::into_response(Json(json!({
                "orders": [order_json(1)]
            })))
        }
    }

    let app = Router::new()
        .route("/orders", get(orders))
        .with_state(hits.clone());
    let base = spawn_server(app).await;

    let client = storefront_client(&base, 2);
    let filter = OrderFilter::for_range(&test_range());

    let orders = client.get_orders(&filter).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_get_orders_missing_orders_field_is_malformed() {
    async fn orders() -> Json<Value> {
        Json(json!({ "not_orders": [] }))
    }

    let app = Router::new().route("/orders", get(orders));
    let base = spawn_server(app).await;

    let client = storefront_client(&base, 0);
    let filter = OrderFilter::for_range(&test_range());

    let err = client.get_orders(&filter).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_get_products() {
    async fn products() -> Json<Value> {
        Json(json!({
            "products": [
                {
                    "id": 11,
                    "title": "Garrafa Térmica",
                    "variants": [{"id": 1, "title": "Default", "price": "79.90"}],
                    "image": {"src": "https://cdn.example/p11.jpg"}
                }
            ]
        }))
    }

    let app = Router::new().route("/products", get(products));
    let base = spawn_server(app).await;

    let client = storefront_client(&base, 0);
    let products = client.get_products(250).await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, 11);
    assert!((products[0].first_variant_price() - 79.90).abs() < 1e-9);
}

#[tokio::test]
async fn test_exchange_rate_is_cached() {
    let hits = Arc::new(AtomicUsize::new(0));

    async fn usd(State(hits): State<Arc<AtomicUsize>>) -> Json<Value> {
        hits.fetch_add(1, Ordering::SeqCst);
        Json(json!({ "rates": { "BRL": 5.43 } }))
    }

    let app = Router::new().route("/USD", get(usd)).with_state(hits.clone());
    let base = spawn_server(app).await;

    let client = ExchangeClient::new(&ExchangeConfig {
        base_url: base,
        timeout: 5,
    });

    assert!((client.usd_to_brl().await - 5.43).abs() < 1e-9);
    assert!((client.usd_to_brl().await - 5.43).abs() < 1e-9);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_exchange_rate_falls_back_on_failure() {
    async fn usd() -> (axum::http::StatusCode, String) {
        (axum::http::StatusCode::INTERNAL_SERVER_ERROR, "down".into())
    }

    let app = Router::new().route("/USD", get(usd));
    let base = spawn_server(app).await;

    let client = ExchangeClient::new(&ExchangeConfig {
        base_url: base,
        timeout: 5,
    });
    assert_eq!(client.usd_to_brl().await, FALLBACK_RATE);
}

#[tokio::test]
async fn test_ads_spend_metrics() {
    async fn insights(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
        assert_eq!(params.get("level").map(String::as_str), Some("account"));
        assert!(params.get("time_range").unwrap().contains("2024-03-15"));
        Json(json!({
            "data": [{"spend": "250.75", "impressions": "12000", "clicks": "840"}]
        }))
    }

    let app = Router::new().route("/act_42/insights", get(insights));
    let base = spawn_server(app).await;

    let client = AdsClient::new(&AdsConfig {
        base_url: base,
        account_id: Some("42".into()),
        access_token: Some("token".into()),
        timeout: 5,
        max_retries: 0,
    });

    let metrics = client
        .get_spend_metrics(
            chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            chrono::NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
        )
        .await
        .unwrap();
    assert!((metrics.spend - 250.75).abs() < 1e-9);
    assert_eq!(metrics.impressions, 12000);
    assert_eq!(metrics.clicks, 840);
}

#[tokio::test]
async fn test_ads_token_error_is_unauthorized() {
    async fn insights() -> (axum::http::StatusCode, Json<Value>) {
        (
            axum::http::StatusCode::BAD_REQUEST,
            Json(json!({ "error": { "code": 190, "message": "token expired" } })),
        )
    }

    let app = Router::new().route("/act_42/insights", get(insights));
    let base = spawn_server(app).await;

    let client = AdsClient::new(&AdsConfig {
        base_url: base,
        account_id: Some("42".into()),
        access_token: Some("token".into()),
        timeout: 5,
        max_retries: 3,
    });

    let err = client
        .get_spend_metrics(
            chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            chrono::NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));
}

#[tokio::test]
async fn test_ads_unconfigured_reports_zero_spend() {
    let client = AdsClient::new(&AdsConfig::default());
    let metrics = client
        .get_spend_metrics(
            chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            chrono::NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(metrics, shared::models::AdSpendMetrics::default());
}
