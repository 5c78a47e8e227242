//! Binance spot, USDT-margined and coin-margined futures sources.

mod client;
mod futures;
pub mod models;
mod spot;

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::errors::MarketDataError;

pub use client::BinanceClient;
pub use futures::{BinanceCoinFuturesSource, BinanceUsdtFuturesSource};
pub use spot::BinanceSpotSource;

pub const DEFAULT_SPOT_URL: &str = "https://api.binance.com";
pub const DEFAULT_USDT_FUTURES_URL: &str = "https://fapi.binance.com";
pub const DEFAULT_COIN_FUTURES_URL: &str = "https://dapi.binance.com";

fn parse_decimal(symbol: &str, field: &str, value: &str) -> Result<Decimal, MarketDataError> {
    Decimal::from_str(value.trim()).map_err(|e| {
        MarketDataError::provider(
            client::PROVIDER_ID,
            format!("{} has an invalid {} '{}': {}", symbol, field, value, e),
        )
    })
}

fn parse_optional(
    symbol: &str,
    field: &str,
    value: Option<&str>,
) -> Result<Option<Decimal>, MarketDataError> {
    value.map(|v| parse_decimal(symbol, field, v)).transpose()
}
