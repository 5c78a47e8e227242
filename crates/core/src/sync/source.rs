use async_trait::async_trait;

use super::normalizer::SymbolFields;
use crate::errors::Result;
use crate::symbols::MarketType;

/// One exchange market that can be synchronized: how to fetch its instrument
/// list and how to map one raw instrument into catalog terms.
#[async_trait]
pub trait SymbolSource: Send + Sync {
    /// Instrument record as returned by the exchange.
    type Raw: Send + Sync;

    /// Name of the registered exchange this source feeds.
    fn exchange_name(&self) -> &str;

    fn market_type(&self) -> MarketType;

    /// Fetches the complete current instrument list.
    async fn fetch_raw(&self) -> Result<Vec<Self::Raw>>;

    /// Maps one raw instrument. Failing here fails the whole batch.
    fn map_one(&self, raw: &Self::Raw) -> Result<SymbolFields>;

    fn name_of(&self, raw: &Self::Raw) -> String;
}
