//! Product catalog passthrough for the cost-settings surface

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use shared::error::AppError;

use super::ApiResult;
use crate::state::AppState;

/// Catalog entry trimmed down to what the cost-settings form needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: i64,
    pub title: String,
    pub price: f64,
    pub image: String,
}

/// GET /api/products
pub async fn list_products(State(state): State<AppState>) -> ApiResult<Vec<CatalogProduct>> {
    let products = state
        .storefront
        .get_products(250)
        .await
        .map_err(AppError::from)?;

    let catalog = products
        .into_iter()
        .map(|product| CatalogProduct {
            id: product.id,
            price: product.first_variant_price(),
            image: product
                .image
                .as_ref()
                .map(|i| i.src.clone())
                .unwrap_or_default(),
            title: product.title,
        })
        .collect();

    Ok(Json(catalog))
}
