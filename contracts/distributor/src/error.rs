use apportion::error::{ConfigurationFault, ParamsError};
use cosmwasm_std::{OverflowError, StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    /// Fatal, see [`ContractError::is_fatal`]
    #[error("Configuration fault: {0}")]
    Configuration(#[from] ConfigurationFault),

    #[error("Invalid params: {0}")]
    InvalidParams(#[from] ParamsError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("amount was zero, must be positive")]
    ZeroAmount {},

    #[error("Invalid denom {denom}, expected {expected}")]
    InvalidDenom { denom: String, expected: String },

    #[error("Reward pool not active")]
    PoolInactive {},

    #[error("Reward pool expired")]
    PoolExpired {},

    #[error("Reward pool fully claimed")]
    PoolExhausted {},

    #[error("Reward already granted to {recipient}")]
    DuplicateRecipient { recipient: String },

    #[error("Insufficient balance: {balance} available, {requested} requested")]
    InsufficientBalance { balance: Uint128, requested: Uint128 },
}

impl ContractError {
    /// Fatal errors mean the contract is misconfigured.
    /// Whoever drives distribution must abort the whole batch instead of skipping the message.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ContractError::Configuration(_))
    }
}

impl From<OverflowError> for ContractError {
    fn from(o: OverflowError) -> Self {
        StdError::from(o).into()
    }
}
