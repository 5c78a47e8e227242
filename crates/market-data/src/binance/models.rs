//! Wire models of the Binance `exchangeInfo` endpoints.
//!
//! Only the fields the catalog uses are declared; numeric filter values arrive
//! as JSON strings and stay strings until mapping.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeInfo<S> {
    pub symbols: Vec<S>,
}

/// One entry of a symbol's `filters` array, tagged by `filterType`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "filterType")]
pub enum SymbolFilter {
    #[serde(rename = "PRICE_FILTER", rename_all = "camelCase")]
    Price { tick_size: String },

    #[serde(rename = "LOT_SIZE", rename_all = "camelCase")]
    LotSize {
        min_qty: String,
        max_qty: String,
        step_size: String,
    },

    #[serde(rename = "NOTIONAL", rename_all = "camelCase")]
    Notional { min_notional: String },

    /// Spot sends `minNotional`; futures send `notional`.
    #[serde(rename = "MIN_NOTIONAL", rename_all = "camelCase")]
    MinNotional {
        #[serde(default)]
        min_notional: Option<String>,
        #[serde(default)]
        notional: Option<String>,
    },

    #[serde(other)]
    Other,
}

/// Lookup helpers over a symbol's filter list.
pub(crate) struct Filters<'a>(pub &'a [SymbolFilter]);

impl<'a> Filters<'a> {
    pub fn tick_size(&self) -> Option<&'a str> {
        self.0.iter().find_map(|f| match f {
            SymbolFilter::Price { tick_size } => Some(tick_size.as_str()),
            _ => None,
        })
    }

    /// `(min_qty, max_qty, step_size)` of the `LOT_SIZE` filter.
    pub fn lot_size(&self) -> Option<(&'a str, &'a str, &'a str)> {
        self.0.iter().find_map(|f| match f {
            SymbolFilter::LotSize {
                min_qty,
                max_qty,
                step_size,
            } => Some((min_qty.as_str(), max_qty.as_str(), step_size.as_str())),
            _ => None,
        })
    }

    pub fn notional(&self) -> Option<&'a str> {
        self.0.iter().find_map(|f| match f {
            SymbolFilter::Notional { min_notional } => Some(min_notional.as_str()),
            _ => None,
        })
    }

    /// Either spelling of the `MIN_NOTIONAL` filter's value.
    pub fn min_notional(&self) -> Option<&'a str> {
        self.0.iter().find_map(|f| match f {
            SymbolFilter::MinNotional {
                min_notional,
                notional,
            } => notional.as_deref().or(min_notional.as_deref()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotSymbol {
    pub symbol: String,
    pub status: String,
    pub base_asset: String,
    pub quote_asset: String,
    #[serde(default)]
    pub filters: Vec<SymbolFilter>,
}

/// Shared shape of USDT-margined (`fapi`) and coin-margined (`dapi`) symbols.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuturesSymbol {
    pub symbol: String,
    #[serde(default)]
    pub status: Option<String>,
    /// Coin futures report their trading state here instead of `status`.
    #[serde(default)]
    pub contract_status: Option<String>,
    #[serde(default)]
    pub contract_type: Option<String>,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub delivery_date: Option<i64>,
    pub base_asset: String,
    pub quote_asset: String,
    #[serde(default)]
    pub margin_asset: Option<String>,
    pub price_precision: i32,
    pub quantity_precision: i32,
    #[serde(default)]
    pub filters: Vec<SymbolFilter>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_filters_are_tolerated() {
        let json = r#"[
            {"filterType": "PRICE_FILTER", "minPrice": "0.01", "maxPrice": "1000000", "tickSize": "0.01"},
            {"filterType": "ICEBERG_PARTS", "limit": 10},
            {"filterType": "MIN_NOTIONAL", "notional": "5"}
        ]"#;
        let filters: Vec<SymbolFilter> = serde_json::from_str(json).unwrap();

        assert_eq!(filters[1], SymbolFilter::Other);
        let lookup = Filters(&filters);
        assert_eq!(lookup.tick_size(), Some("0.01"));
        assert_eq!(lookup.lot_size(), None);
        assert_eq!(lookup.min_notional(), Some("5"));
    }
}
