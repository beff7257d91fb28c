//! Order classification rules
//!
//! Substring classifiers with an explicit rule order: the first matching
//! rule wins, and matching is case-insensitive.

use shared::models::{FinancialStatus, Order, FREE_SHIPPING_KEY, PREMIUM_SHIPPING_KEY};

/// Payment method buckets. Every paid order lands in exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Pix,
    CreditCard,
}

/// Shipping-cost buckets derived from the first shipping line title
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShippingBucket {
    Free,
    Premium,
    Unclassified,
}

impl ShippingBucket {
    /// Cost-table key for this bucket; unclassified orders have none
    pub fn cost_key(self) -> Option<&'static str> {
        match self {
            ShippingBucket::Free => Some(FREE_SHIPPING_KEY),
            ShippingBucket::Premium => Some(PREMIUM_SHIPPING_KEY),
            ShippingBucket::Unclassified => None,
        }
    }
}

/// Whether an order counts as paid
///
/// Paid means: never cancelled, financial status is paid or partially paid,
/// and if the order is closed its status must still be one of paid,
/// partially paid, partially refunded, or refunded. Orders failing this
/// predicate contribute to total revenue and order count only.
pub fn is_paid_order(order: &Order) -> bool {
    if order.cancelled_at.is_some() {
        return false;
    }
    let status = order.financial_status.unwrap_or_default();
    if order.closed_at.is_some()
        && !matches!(
            status,
            FinancialStatus::Paid
                | FinancialStatus::PartiallyPaid
                | FinancialStatus::PartiallyRefunded
                | FinancialStatus::Refunded
        )
    {
        return false;
    }
    matches!(
        status,
        FinancialStatus::Paid | FinancialStatus::PartiallyPaid
    )
}

/// Classify a paid order's payment method from its gateway identifier
pub fn payment_method(order: &Order) -> PaymentMethod {
    if order.gateway.to_lowercase().contains("pix") {
        PaymentMethod::Pix
    } else {
        PaymentMethod::CreditCard
    }
}

/// Classify an order's shipping bucket from its first shipping line title
pub fn shipping_bucket(order: &Order) -> ShippingBucket {
    let Some(title) = order.first_shipping_title() else {
        return ShippingBucket::Unclassified;
    };
    let title = title.to_lowercase();
    if title.contains("grátis") || title.contains("free") {
        ShippingBucket::Free
    } else if title.contains("premium") {
        ShippingBucket::Premium
    } else {
        ShippingBucket::Unclassified
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shared::models::ShippingLine;

    fn order(status: FinancialStatus) -> Order {
        Order {
            id: 1,
            financial_status: Some(status),
            ..Default::default()
        }
    }

    #[test]
    fn test_paid_statuses() {
        assert!(is_paid_order(&order(FinancialStatus::Paid)));
        assert!(is_paid_order(&order(FinancialStatus::PartiallyPaid)));
        assert!(!is_paid_order(&order(FinancialStatus::Pending)));
        assert!(!is_paid_order(&order(FinancialStatus::Refunded)));
        assert!(!is_paid_order(&order(FinancialStatus::Voided)));
        assert!(!is_paid_order(&order(FinancialStatus::Unknown)));
    }

    #[test]
    fn test_cancelled_order_is_never_paid() {
        let mut o = order(FinancialStatus::Paid);
        o.cancelled_at = Some(Utc.with_ymd_and_hms(2024, 3, 16, 12, 0, 0).unwrap());
        assert!(!is_paid_order(&o));
    }

    #[test]
    fn test_closed_order_keeps_refund_statuses() {
        let closed = Some(Utc.with_ymd_and_hms(2024, 3, 16, 12, 0, 0).unwrap());

        // closed + paid stays paid
        let mut o = order(FinancialStatus::Paid);
        o.closed_at = closed;
        assert!(is_paid_order(&o));

        // closed + partially refunded is still in the allowed closed set,
        // but the status itself is not paid/partially_paid
        let mut o = order(FinancialStatus::PartiallyRefunded);
        o.closed_at = closed;
        assert!(!is_paid_order(&o));

        // closed + pending fails the closed-set check
        let mut o = order(FinancialStatus::Pending);
        o.closed_at = closed;
        assert!(!is_paid_order(&o));
    }

    #[test]
    fn test_missing_status_is_not_paid() {
        let o = Order::default();
        assert!(!is_paid_order(&o));
    }

    #[test]
    fn test_payment_method_matches_pix_substring() {
        let mut o = order(FinancialStatus::Paid);
        for gateway in ["pix", "PIX", "pagbank_pix", "Banco PIX Instantâneo"] {
            o.gateway = gateway.into();
            assert_eq!(payment_method(&o), PaymentMethod::Pix, "gateway: {gateway}");
        }
        for gateway in ["stripe", "appmax_card", ""] {
            o.gateway = gateway.into();
            assert_eq!(
                payment_method(&o),
                PaymentMethod::CreditCard,
                "gateway: {gateway}"
            );
        }
    }

    #[test]
    fn test_shipping_bucket_rules() {
        let mut o = Order::default();
        let cases = [
            ("FRETE GRÁTIS", ShippingBucket::Free),
            ("frete grátis", ShippingBucket::Free),
            ("Free Shipping", ShippingBucket::Free),
            ("FRETE PREMIUM", ShippingBucket::Premium),
            ("Standard", ShippingBucket::Unclassified),
        ];
        for (title, expected) in cases {
            o.shipping_lines = vec![ShippingLine {
                title: title.into(),
            }];
            assert_eq!(shipping_bucket(&o), expected, "title: {title}");
        }

        o.shipping_lines.clear();
        assert_eq!(shipping_bucket(&o), ShippingBucket::Unclassified);
    }

    #[test]
    fn test_shipping_rule_order_free_wins_over_premium() {
        let mut o = Order::default();
        o.shipping_lines = vec![ShippingLine {
            title: "Frete Grátis Premium".into(),
        }];
        assert_eq!(shipping_bucket(&o), ShippingBucket::Free);
    }
}
