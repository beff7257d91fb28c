//! Net-profit composition
//!
//! The point where every aggregator output is consumed. All inputs must be
//! in the same currency before summation; ad spend arrives in USD and is
//! converted with the exchange-rate collaborator's rate.

use shared::models::{FeeSummary, MetricsSummary};

/// Convert USD ad spend into BRL
pub fn convert_ad_spend(spend_usd: f64, usd_to_brl: f64) -> f64 {
    spend_usd * usd_to_brl
}

/// Net profit for a refresh window, all values in BRL
pub fn net_profit(fees: &FeeSummary, summary: &MetricsSummary, ad_spend: f64) -> f64 {
    fees.net_revenue
        - summary.cogs
        - ad_spend
        - summary.shipping_cost
        - summary.taxes.fixed_taxes
        - summary.taxes.order_taxes
}
