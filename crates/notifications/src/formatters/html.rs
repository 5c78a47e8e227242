use std::fmt::Write;

use symbolsync_core::notifications::SymbolChangeBatch;
use symbolsync_core::symbols::Symbol;

use super::{escape_html, format_timestamp, sections, FormatOptions};

const CODE_STYLE: &str = "background-color: #f5f5f5; padding: 2px 4px; border-radius: 3px;";

/// Email rendering of a change batch.
#[derive(Debug, Clone, Default)]
pub struct HtmlFormatter {
    options: FormatOptions,
}

impl HtmlFormatter {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    pub fn subject(&self, batch: &SymbolChangeBatch) -> String {
        format!(
            "Symbol Changes on {} ({})",
            batch.exchange_name, batch.market_type
        )
    }

    /// Returns an empty string for an empty batch.
    pub fn format_changes(&self, batch: &SymbolChangeBatch) -> String {
        if batch.is_empty() {
            return String::new();
        }

        let mut out = String::new();
        out.push_str("<div style='font-family: Arial, sans-serif; max-width: 800px;'>\n");
        let _ = writeln!(
            out,
            "<h2>📊 Symbol changes on {} ({})</h2>",
            escape_html(&batch.exchange_name),
            batch.market_type
        );
        let _ = writeln!(out, "<p><em>{}</em></p>", format_timestamp(batch.occurred_at));

        for (icon, title, symbols) in sections(batch) {
            if symbols.is_empty() {
                continue;
            }
            let _ = writeln!(out, "<h3>{} {} ({})</h3>", icon, title, symbols.len());
            self.write_symbols(&mut out, symbols);
        }

        let _ = writeln!(
            out,
            "<p><strong>Total changes: {}</strong></p>",
            batch.total_changes()
        );
        out.push_str("</div>\n");
        out
    }

    fn write_symbols(&self, out: &mut String, symbols: &[Symbol]) {
        let shown = symbols.len().min(self.options.max_symbols_per_message);

        out.push_str("<ul style='list-style-type: none; padding-left: 10px;'>\n");
        for symbol in &symbols[..shown] {
            out.push_str("<li style='margin-bottom: 10px;'>\n");
            let _ = writeln!(
                out,
                "<code style='{}'>{}</code> ({})",
                CODE_STYLE,
                escape_html(&symbol.symbol_name),
                symbol.market_type
            );
            if self.options.include_details {
                out.push_str("<div style='margin-left: 20px;'>\n");
                let _ = writeln!(
                    out,
                    "Base: <code style='{}'>{}</code>, Quote: <code style='{}'>{}</code><br>",
                    CODE_STYLE,
                    escape_html(&symbol.base_asset),
                    CODE_STYLE,
                    escape_html(&symbol.quote_asset)
                );
                let _ = writeln!(out, "Status: {}", symbol.status);
                out.push_str("</div>\n");
            }
            out.push_str("</li>\n");
        }
        out.push_str("</ul>\n");

        let remaining = symbols.len() - shown;
        if remaining > 0 {
            let _ = writeln!(out, "<p><em>...and {} more symbols</em></p>", remaining);
        }
    }
}
