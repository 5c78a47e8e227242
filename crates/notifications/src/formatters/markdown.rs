use std::fmt::Write;

use symbolsync_core::notifications::SymbolChangeBatch;
use symbolsync_core::symbols::Symbol;

use super::{format_timestamp, sections, FormatOptions};

/// Telegram (legacy Markdown) rendering of a change batch.
#[derive(Debug, Clone, Default)]
pub struct MarkdownFormatter {
    options: FormatOptions,
}

impl MarkdownFormatter {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    /// Returns an empty string for an empty batch.
    pub fn format_changes(&self, batch: &SymbolChangeBatch) -> String {
        if batch.is_empty() {
            return String::new();
        }

        let mut out = String::new();
        let _ = writeln!(
            out,
            "📊 *Symbol changes on {} ({})*",
            batch.exchange_name, batch.market_type
        );
        let _ = writeln!(out, "_{}_", format_timestamp(batch.occurred_at));
        out.push('\n');

        for (icon, title, symbols) in sections(batch) {
            if symbols.is_empty() {
                continue;
            }
            let _ = writeln!(out, "{} *{} ({})*", icon, title, symbols.len());
            self.write_symbols(&mut out, symbols);
            out.push('\n');
        }

        let _ = writeln!(out, "*Total changes: {}*", batch.total_changes());
        out
    }

    fn write_symbols(&self, out: &mut String, symbols: &[Symbol]) {
        let shown = symbols.len().min(self.options.max_symbols_per_message);
        for symbol in &symbols[..shown] {
            let _ = writeln!(out, "- `{}` ({})", symbol.symbol_name, symbol.market_type);
            if self.options.include_details {
                let _ = writeln!(
                    out,
                    "  Base: `{}`, Quote: `{}`",
                    symbol.base_asset, symbol.quote_asset
                );
                let _ = writeln!(out, "  Status: {}", symbol.status);
                out.push('\n');
            }
        }

        let remaining = symbols.len() - shown;
        if remaining > 0 {
            out.push('\n');
            let _ = writeln!(out, "_...and {} more symbols_", remaining);
        }
    }
}
