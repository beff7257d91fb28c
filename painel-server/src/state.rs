//! Application state for painel-server

use std::sync::Arc;

use chrono_tz::Tz;
use painel_gateway::{AdsClient, ExchangeClient, StorefrontClient};
use shared::error::AppResult;

use crate::config::Config;
use crate::costs::CostStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Order-fetch gateway client
    pub storefront: Arc<StorefrontClient>,
    /// Ad-platform client
    pub ads: Arc<AdsClient>,
    /// Exchange-rate client (cached, infallible)
    pub exchange: Arc<ExchangeClient>,
    /// Cost-table store
    pub costs: Arc<CostStore>,
    /// Business timezone
    pub timezone: Tz,
}

impl AppState {
    /// Build clients and load the cost store
    pub fn new(config: &Config) -> AppResult<Self> {
        Ok(Self {
            storefront: Arc::new(StorefrontClient::new(&config.storefront)),
            ads: Arc::new(AdsClient::new(&config.ads)),
            exchange: Arc::new(ExchangeClient::new(&config.exchange)),
            costs: Arc::new(CostStore::load(config.costs_path.clone())?),
            timezone: config.timezone,
        })
    }
}
