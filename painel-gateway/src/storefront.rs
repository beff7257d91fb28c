//! Order-fetch gateway client
//!
//! Talks to the edge proxy in front of the storefront admin API. The proxy
//! owns CORS and (optionally) the credentials; this client owns timeout,
//! retry/backoff, pagination, and response validation. The aggregation core
//! only ever sees a single logical order list per call.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use shared::models::{Order, Product};
use shared::timeframe::DateRange;

use crate::config::{backoff_delay, StorefrontConfig};
use crate::error::{ClientError, ClientResult};

/// Field selection requested for every order fetch
pub const ORDER_FIELDS: &str = "id,total_price,financial_status,created_at,cancelled_at,\
                                closed_at,fulfillment_status,line_items,shipping_lines,gateway";

/// Page size per order-fetch request (the platform's external ceiling)
pub const DEFAULT_PAGE_LIMIT: u32 = 250;

/// Order list filter, serialized as query parameters
#[derive(Debug, Clone, Serialize)]
pub struct OrderFilter {
    /// ISO-8601 with offset
    pub created_at_min: String,
    /// ISO-8601 with offset
    pub created_at_max: String,
    /// Always `any` for this system
    pub status: String,
    pub limit: u32,
    /// Pagination cursor: only orders with id greater than this are returned
    pub since_id: i64,
    pub fields: String,
}

impl OrderFilter {
    /// Filter covering a resolved date range
    pub fn for_range(range: &DateRange) -> Self {
        Self {
            created_at_min: range.start.to_rfc3339_opts(chrono::SecondsFormat::Millis, false),
            created_at_max: range.end.to_rfc3339_opts(chrono::SecondsFormat::Millis, false),
            status: "any".into(),
            limit: DEFAULT_PAGE_LIMIT,
            since_id: 0,
            fields: ORDER_FIELDS.into(),
        }
    }
}

/// Capability the aggregator calls to obtain candidate orders
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Fetch all orders matching the filter as one logical list
    async fn get_orders(&self, filter: &OrderFilter) -> ClientResult<Vec<Order>>;
}

#[derive(Debug, Deserialize)]
struct OrdersResponse {
    orders: Option<Vec<Order>>,
}

#[derive(Debug, Deserialize)]
struct ProductsResponse {
    products: Option<Vec<Product>>,
}

/// HTTP client for the order-fetch gateway
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    client: Client,
    base_url: String,
    access_token: Option<String>,
    max_retries: u32,
    max_pages: u32,
}

impl StorefrontClient {
    /// Create a new client from configuration
    pub fn new(config: &StorefrontConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout_duration())
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
            access_token: config.access_token.clone(),
            max_retries: config.max_retries,
            max_pages: config.max_pages,
        }
    }

    /// GET a JSON payload with retry/backoff
    ///
    /// Retries network errors, timeouts, 429, and 5xx with exponential
    /// backoff. 401 is surfaced as [`ClientError::Unauthorized`] immediately
    /// and never retried.
    async fn get_json<T, Q>(&self, path: &str, query: &Q) -> ClientResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );

        let mut attempt = 0u32;
        loop {
            let mut request = self.client.get(&url).query(query);
            if let Some(token) = &self.access_token {
                request = request.header("X-Shopify-Access-Token", token);
            }

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status == StatusCode::UNAUTHORIZED {
                        return Err(ClientError::Unauthorized);
                    }
                    if status.is_success() {
                        return response
                            .json::<T>()
                            .await
                            .map_err(|e| ClientError::InvalidResponse(e.to_string()));
                    }
                    let retryable =
                        status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error();
                    if retryable && attempt < self.max_retries {
                        let delay = backoff_delay(attempt);
                        tracing::warn!(%url, %status, attempt, "Retrying gateway request");
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }
                    let body = response.text().await.unwrap_or_default();
                    return Err(ClientError::Upstream {
                        status: status.as_u16(),
                        body,
                    });
                }
                Err(e) => {
                    if attempt < self.max_retries {
                        let delay = backoff_delay(attempt);
                        tracing::warn!(%url, error = %e, attempt, "Retrying gateway request");
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }
    }

    /// Fetch one page of orders
    ///
    /// A 2xx body missing the `orders` array is a protocol violation and
    /// fails the call.
    async fn fetch_orders_page(&self, filter: &OrderFilter) -> ClientResult<Vec<Order>> {
        let response: OrdersResponse = self.get_json("orders", filter).await?;
        response
            .orders
            .ok_or_else(|| ClientError::InvalidResponse("response missing the orders field".into()))
    }

    /// Fetch the product catalog (id, title, variants, image)
    pub async fn get_products(&self, limit: u32) -> ClientResult<Vec<Product>> {
        let response: ProductsResponse = self
            .get_json(
                "products",
                &[
                    ("limit", limit.to_string()),
                    ("fields", "id,title,variants,image".into()),
                ],
            )
            .await?;
        Ok(response.products.unwrap_or_default())
    }
}

#[async_trait]
impl OrderGateway for StorefrontClient {
    /// Fetch all matching orders, paging with `since_id` until a short page
    /// or the configured page cap. Hitting the cap logs a warning because
    /// totals will undercount.
    async fn get_orders(&self, filter: &OrderFilter) -> ClientResult<Vec<Order>> {
        let mut page_filter = filter.clone();
        let mut all = Vec::new();
        let mut pages = 0u32;

        loop {
            let batch = self.fetch_orders_page(&page_filter).await?;
            pages += 1;

            let full_page = batch.len() as u32 >= page_filter.limit;
            if let Some(last) = batch.last() {
                page_filter.since_id = last.id;
            }
            all.extend(batch);

            if !full_page {
                break;
            }
            if pages >= self.max_pages {
                tracing::warn!(
                    pages,
                    order_count = all.len(),
                    "Order pagination cap reached; metrics may undercount for this range"
                );
                break;
            }
        }

        tracing::debug!(order_count = all.len(), pages, "Fetched orders from gateway");
        Ok(all)
    }
}
