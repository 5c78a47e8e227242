use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;

use super::exchanges_model::{Exchange, NewExchange};
use super::exchanges_traits::{ExchangeRepositoryTrait, ExchangeServiceTrait};
use crate::constants::SUPPORTED_EXCHANGES;
use crate::errors::{DatabaseError, Error, Result};

/// Service for managing registered exchanges.
pub struct ExchangeService {
    repository: Arc<dyn ExchangeRepositoryTrait>,
}

impl ExchangeService {
    pub fn new(repository: Arc<dyn ExchangeRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn duplicate_name(name: &str) -> Error {
        Error::field(
            "Name",
            format!("Exchange with name '{}' already exists.", name),
        )
    }
}

#[async_trait]
impl ExchangeServiceTrait for ExchangeService {
    fn list_exchanges(&self) -> Result<Vec<Exchange>> {
        self.repository.list()
    }

    fn get_exchange(&self, name: &str) -> Result<Exchange> {
        self.repository
            .get_by_name(name)?
            .ok_or_else(|| Error::not_found("Exchange", name))
    }

    fn supported_exchanges(&self) -> Vec<String> {
        SUPPORTED_EXCHANGES.iter().map(|s| s.to_string()).collect()
    }

    async fn create_exchange(&self, new_exchange: NewExchange) -> Result<Exchange> {
        new_exchange.validate()?;

        if self.repository.get_by_name(&new_exchange.name)?.is_some() {
            return Err(Self::duplicate_name(&new_exchange.name));
        }

        let name = new_exchange.name.clone();
        match self.repository.create(new_exchange).await {
            Ok(exchange) => {
                info!("Registered exchange {}", exchange.name);
                Ok(exchange)
            }
            // Lost a race with a concurrent insert of the same name.
            Err(Error::Database(DatabaseError::UniqueViolation(_))) => {
                Err(Self::duplicate_name(&name))
            }
            Err(e) => Err(e),
        }
    }

    async fn delete_exchange(&self, name: &str) -> Result<()> {
        let exchange = self.get_exchange(name)?;
        self.repository.delete(&exchange.id).await?;
        info!("Deleted exchange {}", name);
        Ok(())
    }

    async fn ensure_supported_exchanges(&self) -> Result<Vec<String>> {
        let mut created = Vec::new();
        for name in SUPPORTED_EXCHANGES {
            if self.repository.get_by_name(name)?.is_some() {
                debug!("Exchange {} already registered", name);
                continue;
            }
            self.repository.create(NewExchange::new(*name)).await?;
            created.push(name.to_string());
        }
        if !created.is_empty() {
            info!("Seeded supported exchanges: {:?}", created);
        }
        Ok(created)
    }
}
