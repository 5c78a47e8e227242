use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::Context;
use symbolsync_market_data::{DEFAULT_COIN_FUTURES_URL, DEFAULT_SPOT_URL, DEFAULT_USDT_FUTURES_URL};
use symbolsync_notifications::config::DEFAULT_MAX_SYMBOLS_PER_MESSAGE;
use symbolsync_notifications::{NotificationChannelConfig, SmtpSettings, TelegramOptions};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncConfig {
    pub enabled: bool,
    pub interval: Duration,
    pub initial_delay: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinanceUrls {
    pub spot: String,
    pub usdt_futures: String,
    pub coin_futures: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub sync: SyncConfig,
    pub binance: BinanceUrls,
    pub notifications: NotificationChannelConfig,
}

/// Reads `SS_*` variables through a lookup function so tests can supply their own.
struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn string(&self, key: &str, default: &str) -> String {
        (self.0)(key).unwrap_or_else(|| default.to_string())
    }

    fn parsed<T>(&self, key: &str, default: T) -> T
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match (self.0)(key) {
            Some(raw) if !raw.trim().is_empty() => raw.trim().parse().unwrap_or_else(|e| {
                warn!("Ignoring malformed {}='{}': {}", key, raw, e);
                default
            }),
            _ => default,
        }
    }

    fn flag(&self, key: &str, default: bool) -> bool {
        match (self.0)(key).map(|v| v.trim().to_ascii_lowercase()) {
            None => default,
            Some(v) if v.is_empty() => default,
            Some(v) => match v.as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    warn!("Ignoring malformed {}='{}'", key, v);
                    default
                }
            },
        }
    }

    fn list(&self, key: &str) -> Vec<String> {
        (self.0)(key)
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

impl Config {
    /// Loads configuration from the process environment, after `.env` if present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        let listen_raw = vars.string("SS_LISTEN_ADDR", "0.0.0.0:8080");
        let listen_addr: SocketAddr = listen_raw
            .parse()
            .with_context(|| format!("Invalid SS_LISTEN_ADDR '{}'", listen_raw))?;

        let cors_allow = match vars.list("SS_CORS_ALLOW_ORIGINS") {
            origins if origins.is_empty() => vec!["*".to_string()],
            origins => origins,
        };

        let telegram = TelegramOptions {
            bot_token: vars.string("SS_TELEGRAM_BOT_TOKEN", ""),
            chat_ids: vars.list("SS_TELEGRAM_CHAT_IDS"),
            include_details: vars.flag("SS_TELEGRAM_INCLUDE_DETAILS", false),
            max_symbols_per_message: vars
                .parsed("SS_TELEGRAM_MAX_SYMBOLS", DEFAULT_MAX_SYMBOLS_PER_MESSAGE),
        };
        let smtp = SmtpSettings {
            server: vars.string("SS_SMTP_SERVER", ""),
            port: vars.parsed("SS_SMTP_PORT", 0u16),
            use_ssl: vars.flag("SS_SMTP_USE_SSL", false),
            sender_email: vars.string("SS_SMTP_SENDER_EMAIL", ""),
            sender_name: vars.string("SS_SMTP_SENDER_NAME", ""),
            username: vars.string("SS_SMTP_USERNAME", ""),
            password: vars.string("SS_SMTP_PASSWORD", ""),
        };

        Ok(Self {
            listen_addr,
            db_path: vars.string("SS_DB_PATH", "./db/symbols.db"),
            cors_allow,
            request_timeout: Duration::from_millis(vars.parsed("SS_REQUEST_TIMEOUT_MS", 30_000u64)),
            sync: SyncConfig {
                enabled: vars.flag("SS_SYNC_ENABLED", true),
                interval: Duration::from_secs(vars.parsed("SS_SYNC_INTERVAL_SECS", 3600u64).max(1)),
                initial_delay: Duration::from_secs(vars.parsed("SS_SYNC_INITIAL_DELAY_SECS", 10u64)),
            },
            binance: BinanceUrls {
                spot: vars.string("SS_BINANCE_SPOT_URL", DEFAULT_SPOT_URL),
                usdt_futures: vars.string("SS_BINANCE_USDT_FUTURES_URL", DEFAULT_USDT_FUTURES_URL),
                coin_futures: vars.string("SS_BINANCE_COIN_FUTURES_URL", DEFAULT_COIN_FUTURES_URL),
            },
            notifications: NotificationChannelConfig {
                telegram,
                smtp,
                email_recipients: vars.list("SS_EMAIL_RECIPIENTS"),
                emergency_recipients: vars.list("SS_EMERGENCY_EMAIL_RECIPIENTS"),
            },
        })
    }
}
