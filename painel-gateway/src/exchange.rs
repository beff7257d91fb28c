//! Exchange-rate client
//!
//! USD->BRL rate used to convert ad spend into the dashboard currency.
//! Successful lookups are cached for up to one hour; any failure degrades
//! to a fixed fallback rate. By contract this client never errors.

use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::config::ExchangeConfig;
use crate::error::{ClientError, ClientResult};

/// Rate used whenever the upstream lookup fails
pub const FALLBACK_RATE: f64 = 5.0;

const CACHE_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone, Copy)]
struct CachedRate {
    rate: f64,
    fetched_at: Instant,
}

#[derive(Debug, Deserialize)]
struct RatesResponse {
    rates: HashMap<String, f64>,
}

/// HTTP client for the exchange-rate API
#[derive(Debug)]
pub struct ExchangeClient {
    client: Client,
    base_url: String,
    cache: RwLock<Option<CachedRate>>,
}

impl ExchangeClient {
    /// Create a new client from configuration
    pub fn new(config: &ExchangeConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
            cache: RwLock::new(None),
        }
    }

    /// Current USD->BRL rate, cached up to one hour, fallback on failure
    pub async fn usd_to_brl(&self) -> f64 {
        if let Some(cached) = *self.cache.read().await {
            if cached.fetched_at.elapsed() < CACHE_TTL {
                return cached.rate;
            }
        }

        match self.fetch_rate().await {
            Ok(rate) => {
                *self.cache.write().await = Some(CachedRate {
                    rate,
                    fetched_at: Instant::now(),
                });
                rate
            }
            Err(e) => {
                tracing::warn!("Exchange rate fetch failed: {e}; using fallback {FALLBACK_RATE}");
                FALLBACK_RATE
            }
        }
    }

    async fn fetch_rate(&self) -> ClientResult<f64> {
        let url = format!("{}/USD", self.base_url.trim_end_matches('/'));
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let body: RatesResponse = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        body.rates
            .get("BRL")
            .copied()
            .ok_or_else(|| ClientError::InvalidResponse("missing BRL rate".into()))
    }
}
