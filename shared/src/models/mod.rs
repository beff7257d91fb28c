//! Data models shared between the gateway and server crates

pub mod costs;
pub mod metrics;
pub mod order;
pub mod product;

pub use costs::{CostTables, FREE_SHIPPING_KEY, PREMIUM_SHIPPING_KEY};
pub use metrics::{AdSpendMetrics, FeeSummary, MetricsSummary, PaymentMethodSplit, TaxTotals};
pub use order::{FinancialStatus, LineItem, Order, ShippingLine};
pub use product::{Product, ProductVariant};
