pub mod contract;
mod error;
pub mod ledger;
pub mod query;
pub mod rewards;
pub mod state;

pub use crate::error::ContractError;
