//! Storefront order wire model
//!
//! Mirrors the admin-API order payload the order-fetch gateway returns.
//! Orders are externally owned and read-only: every field the aggregation
//! does not strictly require is defaulted so a single sparse record cannot
//! fail a whole batch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Financial status vocabulary of the storefront platform
///
/// Unknown future values deserialize to [`FinancialStatus::Unknown`] rather
/// than failing the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FinancialStatus {
    #[default]
    Pending,
    Authorized,
    Paid,
    PartiallyPaid,
    PartiallyRefunded,
    Refunded,
    Voided,
    #[serde(other)]
    Unknown,
}

/// Order line item
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LineItem {
    /// Product reference; absent for deleted/custom items
    pub product_id: Option<i64>,
    #[serde(default)]
    pub quantity: i64,
    /// Unit price as a decimal string on the wire
    #[serde(default)]
    pub price: String,
}

/// Order shipping line; the title drives shipping-cost classification
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ShippingLine {
    #[serde(default)]
    pub title: String,
}

/// Storefront order (externally owned, never mutated)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Order {
    #[serde(default)]
    pub id: i64,
    /// Total price as a decimal string on the wire
    #[serde(default)]
    pub total_price: String,
    /// Absent/null on the wire maps to `None`
    #[serde(default)]
    pub financial_status: Option<FinancialStatus>,
    #[serde(default)]
    pub cancelled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fulfillment_status: Option<String>,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    #[serde(default)]
    pub shipping_lines: Vec<ShippingLine>,
    /// Payment gateway identifier (free text)
    #[serde(default)]
    pub gateway: String,
    /// Creation instant; orders without one never match a date window
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Total price as a number; unparsable values coerce to 0
    pub fn total(&self) -> f64 {
        self.total_price.parse().unwrap_or(0.0)
    }

    /// Title of the first shipping line, if any
    pub fn first_shipping_title(&self) -> Option<&str> {
        self.shipping_lines.first().map(|line| line.title.as_str())
    }
}
