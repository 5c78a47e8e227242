/// Exchange name for the Binance spot market.
pub const BINANCE_SPOT: &str = "BinanceSpot";

/// Exchange name for the Binance USDT-margined futures market.
pub const BINANCE_USDT_FUTURES: &str = "BinanceUsdtFutures";

/// Exchange name for the Binance coin-margined futures market.
pub const BINANCE_COIN_FUTURES: &str = "BinanceCoinFutures";

/// Exchanges that may be registered and synchronized.
pub const SUPPORTED_EXCHANGES: &[&str] = &[BINANCE_SPOT, BINANCE_USDT_FUTURES, BINANCE_COIN_FUTURES];

/// Fixed id of the notification settings singleton row.
pub const NOTIFICATION_SETTINGS_ID: &str = "5a23149e-79cc-4fed-8533-c3b4415c2cdb";

/// Default page number for paginated listings
pub const DEFAULT_PAGE_NUMBER: i64 = 1;

/// Default page size for paginated listings
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Context label carried by database errors raised during synchronization.
pub const SYNC_JOB_CONTEXT: &str = "SymbolSyncJob";

pub const MAX_EXCHANGE_NAME_LENGTH: usize = 100;
pub const MAX_SYMBOL_NAME_LENGTH: usize = 50;
pub const MAX_ASSET_CODE_LENGTH: usize = 20;

pub fn is_supported_exchange(name: &str) -> bool {
    SUPPORTED_EXCHANGES.contains(&name)
}
