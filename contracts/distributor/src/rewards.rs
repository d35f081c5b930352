use cosmwasm_std::{attr, to_binary, Coin, DepsMut, Env, MessageInfo, Response};

use apportion::distributor::CreateRewardResponse;
use apportion::types::{PoolStatus, Reward};

use crate::error::ContractError;
use crate::state::{PARAMS, REWARDS};

/// Grants `amount` (clamped to the pool's headroom) to `recipient` from reward series one.
///
/// Only the evaluator can call this and every recipient is granted at most once.
/// A request bigger than the headroom is cut down rather than rejected, so the
/// last claimant drains the pool instead of being turned away.
pub fn create_reward(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: String,
    amount: Coin,
) -> Result<Response, ContractError> {
    let mut params = PARAMS.load(deps.storage)?;

    //Assert Authority
    if params.evaluator_address.is_empty() || info.sender.as_str() != params.evaluator_address {
        return Err(ContractError::Unauthorized {});
    }

    let recipient = deps.api.addr_validate(&recipient)?;
    if amount.amount.is_zero() {
        return Err(ContractError::ZeroAmount {});
    }

    let pool = &mut params.reward_series.series_one;
    if amount.denom != pool.total_amount.denom {
        return Err(ContractError::InvalidDenom {
            denom: amount.denom,
            expected: pool.total_amount.denom.clone(),
        });
    }

    //One grant per recipient, whatever state the pool is in
    if REWARDS.may_load(deps.storage, recipient.to_string())?.is_some() {
        return Err(ContractError::DuplicateRecipient {
            recipient: recipient.to_string(),
        });
    }

    match pool.status(env.block.time.seconds()) {
        PoolStatus::Inactive => return Err(ContractError::PoolInactive {}),
        PoolStatus::Expired => return Err(ContractError::PoolExpired {}),
        PoolStatus::Exhausted => return Err(ContractError::PoolExhausted {}),
        PoolStatus::Active => {}
    }

    let granted = Coin {
        denom: amount.denom.clone(),
        amount: pool.grant(amount.amount),
    };
    let pool_status = pool.status(env.block.time.seconds());
    let claimed_amount = pool.claimed_amount.clone();

    let reward = Reward::new(info.sender, recipient.clone(), granted.clone());
    REWARDS.save(deps.storage, recipient.to_string(), &reward)?;
    PARAMS.save(deps.storage, &params)?;

    Ok(Response::new()
        .add_attributes(vec![
            attr("method", "create_reward"),
            attr("recipient", recipient),
            attr("requested", amount.to_string()),
            attr("granted", granted.to_string()),
            attr("pool_claimed", claimed_amount.to_string()),
            attr("pool_status", pool_status.to_string()),
        ])
        .set_data(to_binary(&CreateRewardResponse { amount: granted })?))
}
