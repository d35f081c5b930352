use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Coin, Uint128};

use crate::types::{DistributionPlan, DistributionRecord, Params, PoolStatus, Reward, RewardPool};

#[cw_serde]
pub struct InstantiateMsg {
    /// Contract owner (governance), defaults to info.sender
    pub owner: Option<String>,
    /// Denom that gets funded & distributed
    pub denom: String,
    /// Catch-all destination for undistributed remainders
    pub fee_collector: String,
    /// Extra address allowed to trigger distributions
    pub trigger: Option<String>,
    /// Genesis params, defaults to no proportions & an empty reward pool in `denom`
    pub params: Option<Params>,
}

#[cw_serde]
pub enum ExecuteMsg {
    UpdateConfig {
        /// Starts an ownership transfer, the new owner completes it by calling UpdateConfig
        owner: Option<String>,
        fee_collector: Option<String>,
        trigger: Option<String>,
        /// Revokes the trigger address, takes precedence over `trigger`
        remove_trigger: Option<bool>,
    },
    /// Replace params, governance only
    UpdateParams {
        params: Params,
    },
    /// Credit attached funds to the distribution source
    Fund {},
    /// Split the source balance across the configured pools
    Distribute {},
    /// Grant a reward from series one, evaluator only
    CreateReward {
        recipient: String,
        amount: Coin,
    },
    /// Send ledger balance to the sender
    Withdraw {
        /// Defaults to the full balance
        amount: Option<Uint128>,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},
    #[returns(Params)]
    Params {},
    /// Series one pool with its status at the current block time
    #[returns(RewardPoolResponse)]
    RewardPool {},
    #[returns(Reward)]
    Reward { recipient: String },
    #[returns(Vec<Reward>)]
    Rewards {
        start_after: Option<String>,
        limit: Option<u32>,
    },
    /// Ledger balance of an account
    #[returns(Uint128)]
    Balance { account: String },
    /// Plan for distributing `amount` under the current params, nothing is applied
    #[returns(DistributionPlan)]
    SimulateDistribution { amount: Uint128 },
    #[returns(Vec<DistributionRecord>)]
    Distributions {
        start_after: Option<u64>,
        limit: Option<u32>,
    },
}

#[cw_serde]
pub struct Config {
    /// Governance
    pub owner: Addr,
    pub denom: String,
    pub fee_collector: Addr,
    pub trigger: Option<Addr>,
}

#[cw_serde]
pub struct RewardPoolResponse {
    pub pool: RewardPool,
    pub status: PoolStatus,
    pub headroom: Uint128,
}

/// Set as response data on CreateReward
#[cw_serde]
pub struct CreateRewardResponse {
    pub amount: Coin,
}
