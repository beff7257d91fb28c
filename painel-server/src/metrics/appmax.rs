//! Appmax payment-fee model
//!
//! Fixed fee schedule applied to the payment-method revenue split:
//! pix pays 0.99%, credit card pays 4.99% plus a stacked 0.99%
//! processing fee.

use shared::models::{FeeSummary, MetricsSummary};

/// Pix transaction fee rate
pub const PIX_FEE_RATE: f64 = 0.0099;
/// Credit-card transaction fee rate
pub const CARD_FEE_RATE: f64 = 0.0499;
/// Credit-card processing fee rate, stacked on top of the transaction fee
pub const CARD_PROCESSING_FEE_RATE: f64 = 0.0099;

/// Total platform fees for a payment-method split
pub fn transaction_fees(pix_revenue: f64, credit_card_revenue: f64) -> f64 {
    let pix_fee = pix_revenue * PIX_FEE_RATE;
    let card_fee =
        credit_card_revenue * CARD_FEE_RATE + credit_card_revenue * CARD_PROCESSING_FEE_RATE;
    pix_fee + card_fee
}

/// Derive fees and net revenue from an order-metrics summary
///
/// An absent summary yields an all-zero result; this is an explicit
/// degrade-to-zero, not an error.
pub fn fee_summary(summary: Option<&MetricsSummary>) -> FeeSummary {
    let Some(summary) = summary else {
        return FeeSummary::default();
    };

    let split = summary.payment_methods;
    let fees = transaction_fees(split.pix, split.credit_card);
    FeeSummary {
        net_revenue: (split.pix + split.credit_card) - fees,
        paid_order_count: summary.paid_order_count,
        transaction_fees: fees,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::PaymentMethodSplit;

    #[test]
    fn test_pix_fee_rate() {
        assert!((transaction_fees(1000.0, 0.0) - 9.90).abs() < 1e-6);
    }

    #[test]
    fn test_credit_card_fee_rate() {
        // 4.99% + 0.99% = 5.98%
        assert!((transaction_fees(0.0, 1000.0) - 59.80).abs() < 1e-6);
    }

    #[test]
    fn test_fee_summary() {
        let summary = MetricsSummary {
            paid_order_count: 3,
            payment_methods: PaymentMethodSplit {
                pix: 1000.0,
                credit_card: 1000.0,
            },
            ..Default::default()
        };
        let fees = fee_summary(Some(&summary));

        assert_eq!(fees.paid_order_count, 3);
        assert!((fees.transaction_fees - 69.70).abs() < 1e-6);
        assert!((fees.net_revenue - (2000.0 - 69.70)).abs() < 1e-6);
    }

    #[test]
    fn test_absent_summary_degrades_to_zero() {
        assert_eq!(fee_summary(None), FeeSummary::default());
    }
}
