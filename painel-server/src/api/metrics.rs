//! Dashboard metrics endpoint
//!
//! One refresh cycle: resolve the timeframe, fan out to the storefront and
//! ad platform concurrently, join, then compose fees and net profit. There
//! is no partial-success mode; if either required source fails the whole
//! refresh fails.

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use shared::error::AppError;
use shared::models::{AdSpendMetrics, CostTables, FeeSummary, MetricsSummary};
use shared::timeframe::{self, DateRange};

use super::ApiResult;
use crate::metrics::{aggregate, compose, fee_summary};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MetricsQuery {
    /// Preset label or literal `dd/MM/yyyy - dd/MM/yyyy` range
    pub timeframe: String,
    /// Caller-supplied request-generation token, echoed back so stale
    /// responses can be discarded client-side
    pub generation: Option<u64>,
}

/// Full dashboard refresh payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub range: DateRange,
    pub storefront: MetricsSummary,
    pub fees: FeeSummary,
    pub ads: AdSpendMetrics,
    /// USD->BRL rate used for the ad-spend conversion
    pub exchange_rate: f64,
    /// Ad spend converted into BRL
    pub ad_spend: f64,
    pub net_profit: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation: Option<u64>,
}

/// GET /api/metrics?timeframe=...&generation=...
pub async fn get_dashboard_metrics(
    State(state): State<AppState>,
    Query(query): Query<MetricsQuery>,
) -> ApiResult<DashboardMetrics> {
    let range = timeframe::resolve_label(&query.timeframe, Utc::now(), state.timezone);
    let costs: CostTables = state.costs.snapshot().await;

    tracing::debug!(
        timeframe = %query.timeframe,
        start = %range.start,
        end = %range.end,
        "Refreshing dashboard metrics"
    );

    let since = range.start.with_timezone(&state.timezone).date_naive();
    let until = range.end.with_timezone(&state.timezone).date_naive();

    let (storefront, ads) = tokio::try_join!(
        aggregate(state.storefront.as_ref(), &range, &costs),
        async {
            state
                .ads
                .get_spend_metrics(since, until)
                .await
                .map_err(AppError::from)
        },
    )?;

    // Infallible by contract: cached, with a fixed fallback.
    let exchange_rate = state.exchange.usd_to_brl().await;

    let fees = fee_summary(Some(&storefront));
    let ad_spend = compose::convert_ad_spend(ads.spend, exchange_rate);
    let net_profit = compose::net_profit(&fees, &storefront, ad_spend);

    Ok(Json(DashboardMetrics {
        range,
        storefront,
        fees,
        ads,
        exchange_rate,
        ad_spend,
        net_profit,
        generation: query.generation,
    }))
}
