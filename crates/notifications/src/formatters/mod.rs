//! Message bodies for the notification channels.

mod emergency;
mod html;
mod markdown;

pub use emergency::HtmlEmergencyFormatter;
pub use html::HtmlFormatter;
pub use markdown::MarkdownFormatter;

use chrono::{DateTime, Utc};
use symbolsync_core::notifications::SymbolChangeBatch;
use symbolsync_core::symbols::Symbol;

use crate::config::DEFAULT_MAX_SYMBOLS_PER_MESSAGE;

/// Shared knobs of the change-message formatters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    pub include_details: bool,
    pub max_symbols_per_message: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            include_details: false,
            max_symbols_per_message: DEFAULT_MAX_SYMBOLS_PER_MESSAGE,
        }
    }
}

pub(crate) fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// The three sections of a combined message, in display order.
pub(crate) fn sections(batch: &SymbolChangeBatch) -> [(&'static str, &'static str, &[Symbol]); 3] {
    [
        ("🆕", "New Symbols", batch.new_symbols.as_slice()),
        ("🔄", "Updated Symbols", batch.updated_symbols.as_slice()),
        ("⛔", "Delisted Symbols", batch.delisted_symbols.as_slice()),
    ]
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use symbolsync_core::notifications::SymbolChangeBatch;
    use symbolsync_core::symbols::{ContractType, MarketType, Symbol, SymbolStatus};

    pub fn symbol(name: &str, status: SymbolStatus) -> Symbol {
        Symbol {
            id: format!("{name}-id"),
            exchange_id: "binance-id".into(),
            symbol_name: name.into(),
            market_type: MarketType::Spot,
            base_asset: name.trim_end_matches("USDT").into(),
            quote_asset: "USDT".into(),
            status,
            price_precision: 2,
            quantity_precision: 4,
            contract_type: Some(ContractType::Spot),
            delivery_date: None,
            margin_asset: None,
            min_quantity: dec!(0.0001),
            min_notional: dec!(5),
            max_quantity: dec!(10000),
            updated_at: Utc.with_ymd_and_hms(2025, 4, 20, 9, 30, 0).unwrap(),
        }
    }

    pub fn batch() -> SymbolChangeBatch {
        SymbolChangeBatch {
            exchange_name: "BinanceSpot".into(),
            market_type: MarketType::Spot,
            new_symbols: vec![symbol("BTCUSDT", SymbolStatus::Active)],
            updated_symbols: vec![],
            delisted_symbols: vec![
                symbol("ETHUSDT", SymbolStatus::Delisted),
                symbol("XRPUSDT", SymbolStatus::Delisted),
            ],
            occurred_at: Utc.with_ymd_and_hms(2025, 4, 20, 9, 30, 0).unwrap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_special_characters_are_escaped() {
        assert_eq!(
            escape_html("<b>\"A&B\"</b>"),
            "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;"
        );
    }
}
