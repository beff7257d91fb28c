//! Storefront product wire model (catalog passthrough for cost settings)

use serde::{Deserialize, Serialize};

/// Product variant
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProductVariant {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub title: String,
    /// Price as a decimal string on the wire
    #[serde(default)]
    pub price: String,
}

/// Product image
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProductImage {
    #[serde(default)]
    pub src: String,
}

/// Storefront product
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Product {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
    #[serde(default)]
    pub image: Option<ProductImage>,
}

impl Product {
    /// Price of the first variant; 0 when there is none or it is unparsable
    pub fn first_variant_price(&self) -> f64 {
        self.variants
            .first()
            .and_then(|v| v.price.parse().ok())
            .unwrap_or(0.0)
    }
}
