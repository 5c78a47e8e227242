//! Exchange data sources for symbol synchronization.
//!
//! Each source fetches one Binance market's `exchangeInfo` document and maps
//! its instruments into [`symbolsync_core::sync::SymbolFields`]:
//!
//! - [`BinanceSpotSource`]: `/api/v3/exchangeInfo`
//! - [`BinanceUsdtFuturesSource`]: `/fapi/v1/exchangeInfo`
//! - [`BinanceCoinFuturesSource`]: `/dapi/v1/exchangeInfo`

pub mod binance;
pub mod errors;

pub use binance::{
    BinanceClient, BinanceCoinFuturesSource, BinanceSpotSource, BinanceUsdtFuturesSource,
    DEFAULT_COIN_FUTURES_URL, DEFAULT_SPOT_URL, DEFAULT_USDT_FUTURES_URL,
};
pub use errors::MarketDataError;
