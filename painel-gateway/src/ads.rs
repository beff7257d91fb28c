//! Ad-platform spend client
//!
//! Pulls account-level spend/impressions/clicks from the ad platform's
//! insights endpoint for the same resolved window the order metrics cover.
//! Credential failures are surfaced distinctly and never retried.

use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use shared::models::AdSpendMetrics;

use crate::config::{backoff_delay, AdsConfig};
use crate::error::{ClientError, ClientResult};

/// Graph API error code for an expired or invalid access token
const TOKEN_ERROR_CODE: i64 = 190;

#[derive(Debug, Deserialize)]
struct InsightsResponse {
    data: Option<Vec<InsightsRow>>,
}

#[derive(Debug, Deserialize, Default)]
struct InsightsRow {
    #[serde(default)]
    spend: String,
    #[serde(default)]
    impressions: String,
    #[serde(default)]
    clicks: String,
}

#[derive(Debug, Deserialize)]
struct GraphErrorBody {
    error: Option<GraphError>,
}

#[derive(Debug, Deserialize)]
struct GraphError {
    #[serde(default)]
    code: i64,
}

/// HTTP client for the ad platform
#[derive(Debug)]
pub struct AdsClient {
    client: Client,
    base_url: String,
    account_id: Option<String>,
    access_token: Option<String>,
    max_retries: u32,
}

impl AdsClient {
    /// Create a new client from configuration
    pub fn new(config: &AdsConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
            account_id: config.account_id.clone(),
            access_token: config.access_token.clone(),
            max_retries: config.max_retries,
        }
    }

    /// Fetch spend metrics for `[since, until]` (business dates)
    ///
    /// Unconfigured credentials report zero spend rather than failing the
    /// whole dashboard refresh.
    pub async fn get_spend_metrics(
        &self,
        since: NaiveDate,
        until: NaiveDate,
    ) -> ClientResult<AdSpendMetrics> {
        let (Some(account_id), Some(token)) = (&self.account_id, &self.access_token) else {
            tracing::warn!("Ad platform credentials not configured; reporting zero spend");
            return Ok(AdSpendMetrics::default());
        };

        let url = format!(
            "{}/act_{}/insights",
            self.base_url.trim_end_matches('/'),
            account_id
        );
        let time_range = format!(r#"{{"since":"{since}","until":"{until}"}}"#);
        let query = [
            ("access_token", token.as_str()),
            ("level", "account"),
            ("fields", "spend,impressions,clicks"),
            ("time_range", time_range.as_str()),
            ("limit", "1000"),
        ];

        let mut attempt = 0u32;
        loop {
            match self.client.get(&url).query(&query).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status == StatusCode::UNAUTHORIZED {
                        return Err(ClientError::Unauthorized);
                    }
                    if status.is_success() {
                        let body: InsightsResponse = response
                            .json()
                            .await
                            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
                        return Ok(Self::parse_metrics(body));
                    }

                    let body = response.text().await.unwrap_or_default();
                    // The Graph API reports bad tokens as 400 with code 190.
                    if status == StatusCode::BAD_REQUEST && is_token_error(&body) {
                        return Err(ClientError::Unauthorized);
                    }
                    let retryable =
                        status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error();
                    if retryable && attempt < self.max_retries {
                        let delay = backoff_delay(attempt);
                        tracing::warn!(%url, %status, attempt, "Retrying ad insights request");
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(ClientError::Upstream {
                        status: status.as_u16(),
                        body,
                    });
                }
                Err(e) => {
                    if attempt < self.max_retries {
                        let delay = backoff_delay(attempt);
                        tracing::warn!(%url, error = %e, attempt, "Retrying ad insights request");
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }
    }

    /// The insights endpoint returns numbers as strings; unparsable values
    /// coerce to zero. An empty data array means no spend in the window.
    fn parse_metrics(body: InsightsResponse) -> AdSpendMetrics {
        let Some(row) = body.data.unwrap_or_default().into_iter().next() else {
            return AdSpendMetrics::default();
        };
        AdSpendMetrics {
            spend: row.spend.parse().unwrap_or(0.0),
            impressions: row.impressions.parse().unwrap_or(0),
            clicks: row.clicks.parse().unwrap_or(0),
        }
    }
}

fn is_token_error(body: &str) -> bool {
    serde_json::from_str::<GraphErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .is_some_and(|e| e.code == TOKEN_ERROR_CODE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_metrics_empty_data() {
        let body = InsightsResponse { data: Some(vec![]) };
        assert_eq!(AdsClient::parse_metrics(body), AdSpendMetrics::default());
    }

    #[test]
    fn test_parse_metrics_coerces_strings() {
        let body: InsightsResponse = serde_json::from_str(
            r#"{"data":[{"spend":"123.45","impressions":"9000","clicks":"321"}]}"#,
        )
        .unwrap();
        let metrics = AdsClient::parse_metrics(body);
        assert!((metrics.spend - 123.45).abs() < 1e-9);
        assert_eq!(metrics.impressions, 9000);
        assert_eq!(metrics.clicks, 321);
    }

    #[test]
    fn test_parse_metrics_bad_numbers_default_to_zero() {
        let body: InsightsResponse =
            serde_json::from_str(r#"{"data":[{"spend":"n/a"}]}"#).unwrap();
        let metrics = AdsClient::parse_metrics(body);
        assert_eq!(metrics, AdSpendMetrics::default());
    }

    #[test]
    fn test_is_token_error() {
        assert!(is_token_error(r#"{"error":{"code":190,"message":"expired"}}"#));
        assert!(!is_token_error(r#"{"error":{"code":100}}"#));
        assert!(!is_token_error("not json"));
    }
}
