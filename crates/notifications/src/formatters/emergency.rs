use std::fmt::Write;

use symbolsync_core::notifications::{EmergencyAlert, EmergencyKind};

use super::{escape_html, format_timestamp};

/// Email rendering of emergency alerts.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlEmergencyFormatter;

fn call_to_action(kind: EmergencyKind) -> &'static str {
    match kind {
        EmergencyKind::ExchangeApiError => "Please take immediate action to resolve this issue.",
        EmergencyKind::DatabaseError => {
            "Please take immediate action to resolve this database issue."
        }
        EmergencyKind::SystemError => "Please investigate the system error as soon as possible.",
    }
}

impl HtmlEmergencyFormatter {
    /// `ALERT: {title} - {first context value}`.
    pub fn subject(&self, alert: &EmergencyAlert) -> String {
        match alert.context.first() {
            Some((_, value)) => format!("ALERT: {} - {}", alert.kind.title(), value),
            None => format!("ALERT: {}", alert.kind.title()),
        }
    }

    pub fn format(&self, alert: &EmergencyAlert) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "<h2 style='color: #cc0000;'>{}</h2>",
            alert.kind.title()
        );
        for (key, value) in &alert.context {
            let _ = writeln!(
                out,
                "<p><strong>{}:</strong> {}</p>",
                escape_html(key),
                escape_html(value)
            );
        }
        let _ = writeln!(
            out,
            "<p><strong>Time:</strong> {}</p>",
            format_timestamp(alert.occurred_at)
        );
        let _ = writeln!(
            out,
            "<p><strong>Error Message:</strong> {}</p>",
            escape_html(&alert.message)
        );

        if let Some(detail) = &alert.detail {
            out.push_str("<h3>Error Details:</h3>\n");
            out.push_str(
                "<pre style='background-color: #f8f8f8; padding: 10px; border-radius: 5px;'>\n",
            );
            let _ = writeln!(out, "{}", escape_html(detail));
            out.push_str("</pre>\n");
        }

        let _ = writeln!(out, "<p>{}</p>", call_to_action(alert.kind));
        out
    }
}
