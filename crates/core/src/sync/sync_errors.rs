//! Failure classes of a synchronization run.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::notifications::{EmergencyAlert, EmergencyKind};
use crate::symbols::MarketType;

/// Why a synchronization run failed. Each class routes to its own emergency
/// alert.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyncError {
    /// The exchange could not be queried or its response could not be mapped.
    #[error("Exchange API error for {exchange} {market_type}: {message}")]
    ExchangeApi {
        exchange: String,
        market_type: MarketType,
        message: String,
    },

    /// Persisting the reconciliation result failed and was rolled back.
    #[error("Database error in {context}: {message}")]
    Database { context: String, message: String },

    #[error("Unexpected error in {component}: {message}")]
    Unexpected { component: String, message: String },
}

impl SyncError {
    pub fn emergency_kind(&self) -> EmergencyKind {
        match self {
            SyncError::ExchangeApi { .. } => EmergencyKind::ExchangeApiError,
            SyncError::Database { .. } => EmergencyKind::DatabaseError,
            SyncError::Unexpected { .. } => EmergencyKind::SystemError,
        }
    }

    /// Builds the operator alert for a failed run of `exchange`/`market_type`.
    pub fn to_alert(
        &self,
        exchange: &str,
        market_type: MarketType,
        occurred_at: DateTime<Utc>,
    ) -> EmergencyAlert {
        let (context, message, detail) = match self {
            SyncError::ExchangeApi {
                exchange: failed_exchange,
                market_type: failed_market,
                message,
            } => (
                ("Exchange", failed_exchange.clone()),
                format!(
                    "Error during {} {} symbols synchronization",
                    failed_exchange, failed_market
                ),
                message.clone(),
            ),
            SyncError::Database { context, message } => (
                ("Operation", context.clone()),
                format!("Error updating symbols: {}", message),
                message.clone(),
            ),
            SyncError::Unexpected { component, message } => (
                ("Component", component.clone()),
                format!(
                    "Unexpected error during {} {} symbols synchronization",
                    exchange, market_type
                ),
                message.clone(),
            ),
        };

        EmergencyAlert {
            kind: self.emergency_kind(),
            context: vec![(context.0.to_string(), context.1)],
            message,
            detail: Some(detail),
            occurred_at,
        }
    }
}
