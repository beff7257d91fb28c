//! Cost-table settings endpoints

use axum::extract::State;
use axum::Json;
use shared::models::CostTables;

use super::ApiResult;
use crate::state::AppState;

/// GET /api/costs
pub async fn get_costs(State(state): State<AppState>) -> ApiResult<CostTables> {
    Ok(Json(state.costs.snapshot().await))
}

/// PUT /api/costs, replaces the cost tables wholesale
pub async fn put_costs(
    State(state): State<AppState>,
    Json(tables): Json<CostTables>,
) -> ApiResult<CostTables> {
    state.costs.replace(tables).await?;
    Ok(Json(state.costs.snapshot().await))
}
