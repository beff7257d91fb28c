//! Dashboard server configuration

use chrono_tz::Tz;
use painel_gateway::{AdsConfig, ExchangeConfig, StorefrontConfig};
use std::path::PathBuf;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP port for the dashboard API
    pub http_port: u16,
    /// Business timezone for all date-range resolution
    pub timezone: Tz,
    /// Path of the JSON cost-table store
    pub costs_path: PathBuf,
    /// Order-fetch gateway settings
    pub storefront: StorefrontConfig,
    /// Ad-platform settings
    pub ads: AdsConfig,
    /// Exchange-rate settings
    pub exchange: ExchangeConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let timezone: Tz = match std::env::var("BUSINESS_TIMEZONE") {
            Ok(name) => name
                .parse()
                .map_err(|_| format!("Invalid BUSINESS_TIMEZONE: {name}"))?,
            Err(_) => shared::timeframe::BUSINESS_TIMEZONE,
        };

        let mut storefront = StorefrontConfig::new(
            std::env::var("STOREFRONT_BASE_URL").map_err(|_| "STOREFRONT_BASE_URL must be set")?,
        );
        storefront.access_token = std::env::var("STOREFRONT_ACCESS_TOKEN")
            .ok()
            .filter(|s| !s.is_empty());
        if let Some(timeout) = env_parse("GATEWAY_TIMEOUT_SECS") {
            storefront.timeout = timeout;
        }
        if let Some(retries) = env_parse("GATEWAY_MAX_RETRIES") {
            storefront.max_retries = retries;
        }
        if let Some(pages) = env_parse("STOREFRONT_MAX_PAGES") {
            storefront.max_pages = pages;
        }

        let mut ads = AdsConfig::default();
        if let Ok(base_url) = std::env::var("ADS_BASE_URL") {
            ads.base_url = base_url;
        }
        ads.account_id = std::env::var("ADS_ACCOUNT_ID").ok().filter(|s| !s.is_empty());
        ads.access_token = std::env::var("ADS_ACCESS_TOKEN")
            .ok()
            .filter(|s| !s.is_empty());
        ads.timeout = storefront.timeout;
        ads.max_retries = storefront.max_retries;

        let mut exchange = ExchangeConfig::default();
        if let Ok(base_url) = std::env::var("EXCHANGE_BASE_URL") {
            exchange.base_url = base_url;
        }
        exchange.timeout = storefront.timeout;

        Ok(Self {
            http_port: env_parse("HTTP_PORT").unwrap_or(8080),
            timezone,
            costs_path: std::env::var("COSTS_PATH")
                .unwrap_or_else(|_| "costs.json".into())
                .into(),
            storefront,
            ads,
            exchange,
        })
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
