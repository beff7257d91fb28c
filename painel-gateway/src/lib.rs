//! HTTP collaborator clients for the Painel dashboard
//!
//! The aggregation core treats every external data source as a capability
//! behind one of these clients. Retry, backoff, credential attachment, and
//! timeout policy all live here, never in the aggregator:
//!
//! - [`StorefrontClient`] — order-fetch gateway against the storefront
//!   admin API (via the credential-holding edge proxy)
//! - [`AdsClient`] — ad-platform spend metrics
//! - [`ExchangeClient`] — USD->BRL rate with a one-hour cache and a fixed
//!   fallback

pub mod ads;
pub mod config;
pub mod error;
pub mod exchange;
pub mod storefront;

pub use ads::AdsClient;
pub use config::{AdsConfig, ExchangeConfig, StorefrontConfig};
pub use error::{ClientError, ClientResult};
pub use exchange::{ExchangeClient, FALLBACK_RATE};
pub use storefront::{OrderFilter, OrderGateway, StorefrontClient, ORDER_FIELDS};
