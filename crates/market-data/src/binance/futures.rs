use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tracing::debug;

use symbolsync_core::constants::{BINANCE_COIN_FUTURES, BINANCE_USDT_FUTURES};
use symbolsync_core::symbols::MarketType;
use symbolsync_core::sync::normalizer::{map_contract_type, map_external_status};
use symbolsync_core::sync::{SymbolFields, SymbolSource};
use symbolsync_core::Result;

use super::client::BinanceClient;
use super::models::{Filters, FuturesSymbol};
use super::{parse_decimal, parse_optional};
use crate::errors::MarketDataError;

const USDT_EXCHANGE_INFO_PATH: &str = "/fapi/v1/exchangeInfo";
const COIN_EXCHANGE_INFO_PATH: &str = "/dapi/v1/exchangeInfo";

fn delivery_date(millis: Option<i64>) -> Option<DateTime<Utc>> {
    millis
        .filter(|ms| *ms > 0)
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
}

/// Maps a futures instrument. Coin futures carry their trading state in
/// `contractStatus`; USDT futures in `status`.
pub(crate) fn map_futures_symbol(
    raw: &FuturesSymbol,
    market_type: MarketType,
) -> std::result::Result<SymbolFields, MarketDataError> {
    let filters = Filters(&raw.filters);
    let name = raw.symbol.as_str();

    let raw_status = match market_type {
        MarketType::CoinFutures => raw.contract_status.as_deref().or(raw.status.as_deref()),
        _ => raw.status.as_deref(),
    };
    let (min_quantity, max_quantity) = match filters.lot_size() {
        Some((min, max, _)) => (
            Some(parse_decimal(name, "minQty", min)?),
            Some(parse_decimal(name, "maxQty", max)?),
        ),
        None => (None, None),
    };
    let min_notional = parse_optional(name, "notional", filters.min_notional())?;

    Ok(SymbolFields {
        symbol_name: raw.symbol.clone(),
        market_type,
        base_asset: raw.base_asset.clone(),
        quote_asset: raw.quote_asset.clone(),
        status: map_external_status(raw_status.unwrap_or_default()),
        contract_type: map_contract_type(raw.contract_type.as_deref()),
        delivery_date: delivery_date(raw.delivery_date),
        margin_asset: raw.margin_asset.clone().filter(|m| !m.trim().is_empty()),
        price_precision: raw.price_precision,
        quantity_precision: raw.quantity_precision,
        min_quantity,
        max_quantity,
        min_notional,
    })
}

async fn fetch(client: &BinanceClient, path: &str) -> Result<Vec<FuturesSymbol>> {
    let info = client.exchange_info::<FuturesSymbol>(path).await?;
    debug!("Binance {} returned {} symbols", path, info.symbols.len());
    Ok(info.symbols)
}

/// USDT-margined perpetual and delivery contracts.
pub struct BinanceUsdtFuturesSource {
    client: BinanceClient,
}

impl BinanceUsdtFuturesSource {
    pub fn new(client: BinanceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SymbolSource for BinanceUsdtFuturesSource {
    type Raw = FuturesSymbol;

    fn exchange_name(&self) -> &str {
        BINANCE_USDT_FUTURES
    }

    fn market_type(&self) -> MarketType {
        MarketType::UsdtFutures
    }

    async fn fetch_raw(&self) -> Result<Vec<FuturesSymbol>> {
        fetch(&self.client, USDT_EXCHANGE_INFO_PATH).await
    }

    fn map_one(&self, raw: &FuturesSymbol) -> Result<SymbolFields> {
        Ok(map_futures_symbol(raw, MarketType::UsdtFutures)?)
    }

    fn name_of(&self, raw: &FuturesSymbol) -> String {
        raw.symbol.clone()
    }
}

/// Coin-margined perpetual and delivery contracts.
pub struct BinanceCoinFuturesSource {
    client: BinanceClient,
}

impl BinanceCoinFuturesSource {
    pub fn new(client: BinanceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SymbolSource for BinanceCoinFuturesSource {
    type Raw = FuturesSymbol;

    fn exchange_name(&self) -> &str {
        BINANCE_COIN_FUTURES
    }

    fn market_type(&self) -> MarketType {
        MarketType::CoinFutures
    }

    async fn fetch_raw(&self) -> Result<Vec<FuturesSymbol>> {
        fetch(&self.client, COIN_EXCHANGE_INFO_PATH).await
    }

    fn map_one(&self, raw: &FuturesSymbol) -> Result<SymbolFields> {
        Ok(map_futures_symbol(raw, MarketType::CoinFutures)?)
    }

    fn name_of(&self, raw: &FuturesSymbol) -> String {
        raw.symbol.clone()
    }
}
