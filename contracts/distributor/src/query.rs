use cosmwasm_std::{Deps, Env, Order, StdError, StdResult, Uint128};
use cw_storage_plus::Bound;

use apportion::distribution::plan_distribution;
use apportion::distributor::RewardPoolResponse;
use apportion::types::{DistributionPlan, DistributionRecord, Reward};

use crate::state::{BALANCES, CONFIG, DISTRIBUTIONS, PARAMS, REWARDS};

// Pagination defaults
const DEFAULT_LIMIT: u32 = 30u32;
const MAX_LIMIT: u32 = 100u32;

/// Returns reward series one & its status at the current block time
pub fn query_reward_pool(deps: Deps, env: Env) -> StdResult<RewardPoolResponse> {
    let pool = PARAMS.load(deps.storage)?.reward_series.series_one;

    Ok(RewardPoolResponse {
        status: pool.status(env.block.time.seconds()),
        headroom: pool.headroom(),
        pool,
    })
}

/// Returns a recipient's reward
pub fn query_reward(deps: Deps, recipient: String) -> StdResult<Reward> {
    let recipient = deps.api.addr_validate(&recipient)?;

    match REWARDS.may_load(deps.storage, recipient.to_string())? {
        Some(reward) => Ok(reward),
        None => Err(StdError::generic_err(format!("No reward for {}", recipient))),
    }
}

/// Returns rewards ordered by recipient
pub fn query_rewards(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Vec<Reward>> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(|start| Bound::exclusive(start));

    REWARDS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (_recipient, reward) = item?;

            Ok(reward)
        })
        .collect::<StdResult<Vec<Reward>>>()
}

/// Returns an account's ledger balance
pub fn query_balance(deps: Deps, account: String) -> StdResult<Uint128> {
    let account = deps.api.addr_validate(&account)?;

    Ok(BALANCES
        .may_load(deps.storage, account.to_string())?
        .unwrap_or_default())
}

/// Plans a distribution of `amount` under the stored params without applying it
pub fn simulate_distribution(deps: Deps, amount: Uint128) -> StdResult<DistributionPlan> {
    let config = CONFIG.load(deps.storage)?;
    let params = PARAMS.load(deps.storage)?;

    plan_distribution(deps.api, amount, &params, &config.fee_collector)
        .map_err(|fault| StdError::generic_err(format!("Configuration fault: {}", fault)))
}

/// Returns past distributions ordered by id
pub fn query_distributions(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Vec<DistributionRecord>> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(|start| Bound::exclusive(start));

    DISTRIBUTIONS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (_id, record) = item?;

            Ok(record)
        })
        .collect::<StdResult<Vec<DistributionRecord>>>()
}
