//! Order-metrics aggregation core
//!
//! Pure reductions over fetched orders plus the fee and profit derivations
//! layered on top. Everything here is a function of its explicit inputs;
//! the only I/O is the single gateway call in [`aggregate::aggregate`].

pub mod aggregate;
pub mod appmax;
pub mod classify;
pub mod compose;

pub use aggregate::{aggregate, summarize};
pub use appmax::fee_summary;
pub use classify::{is_paid_order, payment_method, shipping_bucket, PaymentMethod, ShippingBucket};
pub use compose::{convert_ad_spend, net_profit};
