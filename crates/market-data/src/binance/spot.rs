use async_trait::async_trait;
use tracing::debug;

use symbolsync_core::constants::BINANCE_SPOT;
use symbolsync_core::symbols::{ContractType, MarketType};
use symbolsync_core::sync::normalizer::{map_external_status, precision_from_step};
use symbolsync_core::sync::{SymbolFields, SymbolSource};
use symbolsync_core::Result;

use super::client::BinanceClient;
use super::models::{Filters, SpotSymbol};
use super::{parse_decimal, parse_optional};
use crate::errors::MarketDataError;

const EXCHANGE_INFO_PATH: &str = "/api/v3/exchangeInfo";

/// Spot instruments. Precisions are derived from the tick and step sizes.
pub struct BinanceSpotSource {
    client: BinanceClient,
}

impl BinanceSpotSource {
    pub fn new(client: BinanceClient) -> Self {
        Self { client }
    }
}

pub(crate) fn map_spot_symbol(raw: &SpotSymbol) -> std::result::Result<SymbolFields, MarketDataError> {
    let filters = Filters(&raw.filters);
    let name = raw.symbol.as_str();

    let price_precision = match filters.tick_size() {
        Some(tick) => precision_from_step(parse_decimal(name, "tickSize", tick)?),
        None => 0,
    };
    let (quantity_precision, min_quantity, max_quantity) = match filters.lot_size() {
        Some((min, max, step)) => (
            precision_from_step(parse_decimal(name, "stepSize", step)?),
            Some(parse_decimal(name, "minQty", min)?),
            Some(parse_decimal(name, "maxQty", max)?),
        ),
        None => (0, None, None),
    };
    let min_notional = parse_optional(
        name,
        "minNotional",
        filters.notional().or_else(|| filters.min_notional()),
    )?;

    Ok(SymbolFields {
        symbol_name: raw.symbol.clone(),
        market_type: MarketType::Spot,
        base_asset: raw.base_asset.clone(),
        quote_asset: raw.quote_asset.clone(),
        status: map_external_status(&raw.status),
        contract_type: ContractType::Spot,
        delivery_date: None,
        margin_asset: None,
        price_precision,
        quantity_precision,
        min_quantity,
        max_quantity,
        min_notional,
    })
}

#[async_trait]
impl SymbolSource for BinanceSpotSource {
    type Raw = SpotSymbol;

    fn exchange_name(&self) -> &str {
        BINANCE_SPOT
    }

    fn market_type(&self) -> MarketType {
        MarketType::Spot
    }

    async fn fetch_raw(&self) -> Result<Vec<SpotSymbol>> {
        let info = self
            .client
            .exchange_info::<SpotSymbol>(EXCHANGE_INFO_PATH)
            .await?;
        debug!("Binance spot returned {} symbols", info.symbols.len());
        Ok(info.symbols)
    }

    fn map_one(&self, raw: &SpotSymbol) -> Result<SymbolFields> {
        Ok(map_spot_symbol(raw)?)
    }

    fn name_of(&self, raw: &SpotSymbol) -> String {
        raw.symbol.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use symbolsync_core::symbols::SymbolStatus;

    fn parse(json: &str) -> SpotSymbol {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn maps_a_trading_pair() {
        let raw = parse(
            r#"{
                "symbol": "BTCUSDT",
                "status": "TRADING",
                "baseAsset": "BTC",
                "baseAssetPrecision": 8,
                "quoteAsset": "USDT",
                "filters": [
                    {"filterType": "PRICE_FILTER", "minPrice": "0.01000000", "maxPrice": "1000000.00000000", "tickSize": "0.01000000"},
                    {"filterType": "LOT_SIZE", "minQty": "0.00001000", "maxQty": "9000.00000000", "stepSize": "0.00001000"},
                    {"filterType": "NOTIONAL", "minNotional": "5.00000000", "applyMinToMarket": true}
                ]
            }"#,
        );

        let fields = map_spot_symbol(&raw).unwrap();
        assert_eq!(fields.symbol_name, "BTCUSDT");
        assert_eq!(fields.status, SymbolStatus::Active);
        assert_eq!(fields.contract_type, ContractType::Spot);
        assert_eq!(fields.price_precision, 2);
        assert_eq!(fields.quantity_precision, 5);
        assert_eq!(fields.min_quantity, Some(dec!(0.00001)));
        assert_eq!(fields.max_quantity, Some(dec!(9000)));
        assert_eq!(fields.min_notional, Some(dec!(5)));
        assert_eq!(fields.margin_asset, None);
    }

    #[test]
    fn missing_filters_default_instead_of_failing() {
        let raw = parse(
            r#"{"symbol": "NEWUSDT", "status": "BREAK", "baseAsset": "NEW", "quoteAsset": "USDT"}"#,
        );

        let fields = map_spot_symbol(&raw).unwrap();
        assert_eq!(fields.status, SymbolStatus::Suspended);
        assert_eq!(fields.price_precision, 0);
        assert_eq!(fields.quantity_precision, 0);
        assert_eq!(fields.min_quantity, None);
        assert_eq!(fields.min_notional, None);
    }

    #[test]
    fn legacy_min_notional_is_used_when_notional_is_absent() {
        let raw = parse(
            r#"{
                "symbol": "ETHBTC", "status": "TRADING", "baseAsset": "ETH", "quoteAsset": "BTC",
                "filters": [{"filterType": "MIN_NOTIONAL", "minNotional": "0.00010000"}]
            }"#,
        );
        assert_eq!(map_spot_symbol(&raw).unwrap().min_notional, Some(dec!(0.0001)));
    }

    #[test]
    fn garbage_numbers_are_rejected() {
        let raw = parse(
            r#"{
                "symbol": "BADUSDT", "status": "TRADING", "baseAsset": "BAD", "quoteAsset": "USDT",
                "filters": [{"filterType": "PRICE_FILTER", "tickSize": "n/a"}]
            }"#,
        );
        let err = map_spot_symbol(&raw).unwrap_err();
        assert!(err.to_string().contains("BADUSDT has an invalid tickSize"));
    }
}
