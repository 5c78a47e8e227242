//! Symbols module - domain models, administrative service, and traits.

mod symbols_model;
mod symbols_service;
mod symbols_traits;


pub use symbols_model::{AddSymbol, ContractType, MarketType, Symbol, SymbolStatus};
pub use symbols_service::SymbolService;
pub use symbols_traits::{SymbolRepositoryTrait, SymbolServiceTrait};
