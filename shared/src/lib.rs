//! Shared types for the Painel dashboard service
//!
//! Common types used across the gateway and server crates: storefront wire
//! models, cost tables, metrics values, error types, and the timeframe
//! resolver.

pub mod error;
pub mod models;
pub mod timeframe;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use timeframe::{DateRange, Timeframe};
