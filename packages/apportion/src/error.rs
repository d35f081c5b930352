use cosmwasm_std::{Decimal, StdError, Uint128};
use thiserror::Error;

/// Misconfiguration found while distributing.
/// Never the caller's fault: the surrounding batch must be aborted, not retried.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigurationFault {
    #[error("{pool} pool has a {proportion}% proportion but no address")]
    MissingAddress { pool: String, proportion: Decimal },

    #[error("{pool} pool address {address} can't be resolved")]
    UnresolvableAddress { pool: String, address: String },

    #[error("{pool} pool proportion {proportion}% is outside [0, 100]")]
    ProportionOutOfRange { pool: String, proportion: Decimal },

    #[error("{pool} split pays out {paid} from {available}")]
    Oversubscribed {
        pool: String,
        paid: Uint128,
        available: Uint128,
    },
}

/// Structural problems with a params update
#[derive(Error, Debug, PartialEq)]
pub enum ParamsError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{pool} proportion {proportion}% is outside [0, 100]")]
    ProportionOutOfRange { pool: String, proportion: Decimal },

    #[error("{pool} proportions add up to {total}%, more than 100%")]
    Oversubscribed { pool: String, total: Decimal },

    #[error("Team proportions require an address")]
    MissingTeamAddress {},

    #[error("Team address {address} is listed more than once")]
    DuplicateTeamAddress { address: String },

    #[error("Reward pool total is in {total} but claimed is in {claimed}")]
    RewardDenomMismatch { total: String, claimed: String },

    #[error("Reward pool claimed amount exceeds its total")]
    ClaimedExceedsTotal {},

    #[error("Reward pool claimed amount can't go from {stored} down to {incoming}")]
    ClaimedAmountDecrease { stored: Uint128, incoming: Uint128 },

    #[error("Reward pool window starts at {start_time} after it ends at {end_time}")]
    InvalidRewardWindow { start_time: u64, end_time: u64 },
}
