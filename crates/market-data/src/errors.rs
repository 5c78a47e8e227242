//! Error type for exchange data sources.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The exchange answered, but not with something usable.
    #[error("Provider error: {provider} - {message}")]
    ProviderError { provider: String, message: String },

    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    pub(crate) fn provider(provider: &str, message: impl Into<String>) -> Self {
        MarketDataError::ProviderError {
            provider: provider.to_string(),
            message: message.into(),
        }
    }
}

impl From<MarketDataError> for symbolsync_core::Error {
    fn from(err: MarketDataError) -> Self {
        symbolsync_core::Error::MarketData(err.to_string())
    }
}
