//! Status history domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::symbols::{MarketType, SymbolStatus};

/// One immutable entry in a symbol's status ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub id: String,
    pub symbol_id: String,
    pub symbol_status: SymbolStatus,
    pub created_at: DateTime<Utc>,
}

impl Status {
    /// Records a transition of `symbol_id` into `symbol_status` at `created_at`.
    ///
    /// Ids are UUID v7 so rows sharing a timestamp still sort in creation order.
    pub fn record(
        symbol_id: impl Into<String>,
        symbol_status: SymbolStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            symbol_id: symbol_id.into(),
            symbol_status,
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEntry {
    pub updated_at: DateTime<Utc>,
    pub symbol_status: SymbolStatus,
}

impl From<&Status> for StatusEntry {
    fn from(status: &Status) -> Self {
        Self {
            updated_at: status.created_at,
            symbol_status: status.symbol_status,
        }
    }
}

/// Status history of one symbol, newest entry first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolHistory {
    pub symbol_name: String,
    pub market_type: MarketType,
    pub history: Vec<StatusEntry>,
}
