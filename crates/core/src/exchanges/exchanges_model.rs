//! Exchange domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{is_supported_exchange, MAX_EXCHANGE_NAME_LENGTH};
use crate::errors::{FieldErrors, Result};

/// Domain model representing a registered exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exchange {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Input model for registering an exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExchange {
    pub name: String,
}

impl NewExchange {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Validates the name shape and that the exchange is one we can synchronize.
    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::default();
        if self.name.trim().is_empty() {
            errors.add("Name", "Exchange name is required.");
        } else if self.name.chars().count() > MAX_EXCHANGE_NAME_LENGTH {
            errors.add(
                "Name",
                format!(
                    "Exchange name must not exceed {} characters.",
                    MAX_EXCHANGE_NAME_LENGTH
                ),
            );
        } else if !is_supported_exchange(&self.name) {
            errors.add("Name", format!("Exchange {} is not supported.", self.name));
        }
        errors.into_result()
    }
}
