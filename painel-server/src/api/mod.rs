//! API routes for painel-server

pub mod costs;
pub mod health;
pub mod metrics;
pub mod products;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub type ApiResult<T> = Result<axum::Json<T>, shared::error::AppError>;

/// Create the dashboard API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/metrics", get(metrics::get_dashboard_metrics))
        .route("/api/costs", get(costs::get_costs).put(costs::put_costs))
        .route("/api/products", get(products::list_products))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
