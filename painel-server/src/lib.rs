//! painel-server — e-commerce analytics dashboard API
//!
//! Aggregates order, revenue, and ad-spend data from the storefront and ad
//! platforms, applies the business cost/tax/fee model, and serves the
//! results to the dashboard front-end:
//! - Resolves timeframe selections to concrete date ranges
//! - Reduces fetched orders into a metrics summary
//! - Derives payment fees, net revenue, and net profit
//! - Stores the cost tables edited by the settings surface

pub mod api;
pub mod config;
pub mod costs;
pub mod metrics;
pub mod state;

pub use config::Config;
pub use state::AppState;
