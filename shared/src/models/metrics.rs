//! Metrics value types produced by the aggregation core

use serde::{Deserialize, Serialize};

/// Paid revenue split by payment method
///
/// Every paid order lands in exactly one bucket, so
/// `pix + credit_card == paid_revenue` within floating-point tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PaymentMethodSplit {
    pub pix: f64,
    pub credit_card: f64,
}

/// Tax totals accumulated over paid orders
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct TaxTotals {
    /// Order-value tax (order total x tax rate)
    pub order_taxes: f64,
    /// Fixed per-order surcharge
    pub fixed_taxes: f64,
}

/// Aggregated order metrics for one resolved date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MetricsSummary {
    /// Revenue over all matched orders, paid or not
    pub total_revenue: f64,
    /// Revenue restricted to paid orders
    pub paid_revenue: f64,
    pub order_count: i64,
    pub paid_order_count: i64,
    /// Average order value: paid revenue / paid orders, 0 when no paid orders
    pub average_order_value: f64,
    /// Cost of goods sold over paid orders
    pub cogs: f64,
    /// Shipping cost over paid orders
    pub shipping_cost: f64,
    pub payment_methods: PaymentMethodSplit,
    pub taxes: TaxTotals,
}

/// Ad-platform spend metrics for the same resolved window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct AdSpendMetrics {
    pub spend: f64,
    pub impressions: i64,
    pub clicks: i64,
}

/// Platform transaction fees and net revenue after fees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct FeeSummary {
    /// (pix + credit card revenue) - transaction fees
    pub net_revenue: f64,
    pub paid_order_count: i64,
    pub transaction_fees: f64,
}
