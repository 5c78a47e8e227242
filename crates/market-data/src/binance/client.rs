use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::models::ExchangeInfo;
use crate::errors::MarketDataError;

pub(crate) const PROVIDER_ID: &str = "BINANCE";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Thin HTTP client for one Binance API host.
#[derive(Debug, Clone)]
pub struct BinanceClient {
    client: Client,
    base_url: String,
}

impl BinanceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches and decodes the `exchangeInfo` document served at `path`.
    pub async fn exchange_info<S>(&self, path: &str) -> Result<ExchangeInfo<S>, MarketDataError>
    where
        S: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("Binance request: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Binance {} answered HTTP {}", path, status);
            return Err(MarketDataError::provider(
                PROVIDER_ID,
                format!("HTTP {} - {}", status, body),
            ));
        }

        serde_json::from_str(&body).map_err(|e| {
            MarketDataError::provider(PROVIDER_ID, format!("Failed to parse {}: {}", path, e))
        })
    }
}
