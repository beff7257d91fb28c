//! Order-metrics aggregation
//!
//! One gateway call, one defensive re-filter, then pure reductions. The
//! whole call fails atomically when the gateway fails or returns a
//! structurally invalid payload; malformed individual orders degrade
//! field-wise to zero instead.

use painel_gateway::{OrderFilter, OrderGateway};
use shared::error::AppResult;
use shared::models::{CostTables, MetricsSummary, Order, PaymentMethodSplit, TaxTotals};
use shared::timeframe::DateRange;

use super::classify::{is_paid_order, payment_method, shipping_bucket, PaymentMethod};

/// Produce a [`MetricsSummary`] for a resolved date range
///
/// The gateway owns pagination and retries; this function owns the
/// client-side date re-check (the gateway's filter is not trusted as
/// exact) and the reductions.
pub async fn aggregate<G>(
    gateway: &G,
    range: &DateRange,
    costs: &CostTables,
) -> AppResult<MetricsSummary>
where
    G: OrderGateway + ?Sized,
{
    let filter = OrderFilter::for_range(range);
    let orders = gateway.get_orders(&filter).await?;

    let fetched = orders.len();
    let matched: Vec<Order> = orders
        .into_iter()
        .filter(|order| order.created_at.is_some_and(|created| range.contains(created)))
        .collect();
    if matched.len() < fetched {
        tracing::debug!(
            dropped = fetched - matched.len(),
            "Dropped orders outside the requested window"
        );
    }

    Ok(summarize(&matched, costs))
}

/// Reduce a window's orders into a metrics summary. Pure.
pub fn summarize(orders: &[Order], costs: &CostTables) -> MetricsSummary {
    let mut summary = MetricsSummary {
        order_count: orders.len() as i64,
        ..Default::default()
    };

    for order in orders {
        let total = order.total();
        summary.total_revenue += total;

        if !is_paid_order(order) {
            continue;
        }

        summary.paid_order_count += 1;
        summary.paid_revenue += total;
        match payment_method(order) {
            PaymentMethod::Pix => summary.payment_methods.pix += total,
            PaymentMethod::CreditCard => summary.payment_methods.credit_card += total,
        }

        summary.cogs += order_cogs(order, costs);
        summary.shipping_cost += order_shipping_cost(order, costs);
        summary.taxes.order_taxes += total * costs.tax_rate / 100.0;
        summary.taxes.fixed_taxes += costs.fixed_tax_per_order;
    }

    if summary.paid_order_count > 0 {
        summary.average_order_value = summary.paid_revenue / summary.paid_order_count as f64;
    }

    summary
}

/// Cost of goods for one order: quantity x per-unit cost, unmapped
/// products cost 0
fn order_cogs(order: &Order, costs: &CostTables) -> f64 {
    order
        .line_items
        .iter()
        .map(|item| {
            let cost = item
                .product_id
                .map(|id| costs.product_cost(id))
                .unwrap_or(0.0);
            cost * item.quantity as f64
        })
        .sum()
}

/// Shipping cost for one order via the shipping-bucket classifier
fn order_shipping_cost(order: &Order, costs: &CostTables) -> f64 {
    shipping_bucket(order)
        .cost_key()
        .map(|key| costs.shipping_cost(key))
        .unwrap_or(0.0)
}
