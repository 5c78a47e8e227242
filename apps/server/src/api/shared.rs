use serde::Deserialize;
use std::str::FromStr;

use symbolsync_core::symbols::MarketType;
use symbolsync_core::Pagination;

use crate::error::ApiResult;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
}

impl PageQuery {
    pub fn pagination(&self) -> ApiResult<Pagination> {
        Ok(Pagination::from_query(self.page_number, self.page_size)?)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketTypeQuery {
    pub market_type: Option<String>,
}

impl MarketTypeQuery {
    /// Blank values count as absent.
    pub fn market_type(&self) -> ApiResult<Option<MarketType>> {
        match self.market_type.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => Ok(Some(MarketType::from_str(raw)?)),
        }
    }
}
