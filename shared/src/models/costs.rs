//! Cost tables supplied to the aggregator
//!
//! Configuration data owned by the settings surface. The aggregator only
//! ever receives an immutable snapshot per call; it never reads ambient
//! storage itself.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Shipping cost-table key for free-shipping orders
pub const FREE_SHIPPING_KEY: &str = "free-shipping";
/// Shipping cost-table key for premium-shipping orders
pub const PREMIUM_SHIPPING_KEY: &str = "premium-shipping";

/// Default order-value tax rate (percent)
pub const DEFAULT_TAX_RATE: f64 = 7.23;

/// Immutable cost-table snapshot consumed by the aggregator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostTables {
    /// Product id -> per-unit cost
    #[serde(default)]
    pub product_costs: HashMap<i64, f64>,
    /// Shipping-method key -> per-shipment cost
    #[serde(default)]
    pub shipping_costs: HashMap<String, f64>,
    /// Order-value tax rate, percent of order total
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,
    /// Fixed surcharge applied to every paid order
    #[serde(default)]
    pub fixed_tax_per_order: f64,
}

fn default_tax_rate() -> f64 {
    DEFAULT_TAX_RATE
}

impl Default for CostTables {
    fn default() -> Self {
        Self {
            product_costs: HashMap::new(),
            shipping_costs: HashMap::new(),
            tax_rate: DEFAULT_TAX_RATE,
            fixed_tax_per_order: 0.0,
        }
    }
}

impl CostTables {
    /// Per-unit cost for a product; unmapped products cost 0
    pub fn product_cost(&self, product_id: i64) -> f64 {
        self.product_costs.get(&product_id).copied().unwrap_or(0.0)
    }

    /// Per-shipment cost for a shipping-method key; unmapped keys cost 0
    pub fn shipping_cost(&self, key: &str) -> f64 {
        self.shipping_costs.get(key).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let tables = CostTables::default();
        assert_eq!(tables.tax_rate, DEFAULT_TAX_RATE);
        assert_eq!(tables.fixed_tax_per_order, 0.0);
        assert_eq!(tables.product_cost(42), 0.0);
        assert_eq!(tables.shipping_cost(FREE_SHIPPING_KEY), 0.0);
    }

    #[test]
    fn test_deserialize_partial_json() {
        let tables: CostTables =
            serde_json::from_str(r#"{"product_costs": {"10": 3.5}}"#).unwrap();
        assert_eq!(tables.product_cost(10), 3.5);
        assert_eq!(tables.tax_rate, DEFAULT_TAX_RATE);
    }
}
