#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    attr, coins, to_binary, Attribute, BankMsg, Binary, Deps, DepsMut, Env, MessageInfo, Response,
    StdError, StdResult, Uint128,
};
use cw2::set_contract_version;

use apportion::distribution::{apply_plan, plan_distribution};
use apportion::distributor::{Config, ExecuteMsg, InstantiateMsg, QueryMsg};
use apportion::ledger::Ledger;
use apportion::types::{DistributionRecord, Params};

use crate::error::ContractError;
use crate::ledger::StorageLedger;
use crate::query::{
    query_balance, query_distributions, query_reward, query_reward_pool, query_rewards,
    simulate_distribution,
};
use crate::rewards::create_reward;
use crate::state::{CONFIG, DISTRIBUTIONS, DISTRIBUTION_COUNT, OWNERSHIP_TRANSFER, PARAMS};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:apportion-distributor";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    if msg.denom.is_empty() {
        return Err(ContractError::Std(StdError::generic_err("Denom can't be empty")));
    }

    let mut config = Config {
        owner: info.sender,
        denom: msg.denom,
        fee_collector: deps.api.addr_validate(&msg.fee_collector)?,
        trigger: None,
    };

    //Set Optionals
    if let Some(owner) = msg.owner {
        config.owner = deps.api.addr_validate(&owner)?;
    }
    if let Some(trigger) = msg.trigger {
        config.trigger = Some(deps.api.addr_validate(&trigger)?);
    }

    //Genesis params
    let params = msg.params.unwrap_or_else(|| Params::empty(&config.denom));
    params.validate(deps.api)?;

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    CONFIG.save(deps.storage, &config)?;
    PARAMS.save(deps.storage, &params)?;
    DISTRIBUTION_COUNT.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("config", format!("{:?}", config))
        .add_attribute("contract_address", env.contract.address))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::UpdateConfig {
            owner,
            fee_collector,
            trigger,
            remove_trigger,
        } => update_config(deps, info, owner, fee_collector, trigger, remove_trigger),
        ExecuteMsg::UpdateParams { params } => update_params(deps, info, params),
        ExecuteMsg::Fund {} => fund(deps, env, info),
        ExecuteMsg::Distribute {} => distribute(deps, env, info),
        ExecuteMsg::CreateReward { recipient, amount } => {
            create_reward(deps, env, info, recipient, amount)
        }
        ExecuteMsg::Withdraw { amount } => withdraw(deps, info, amount),
    }
}

fn update_config(
    deps: DepsMut,
    info: MessageInfo,
    owner: Option<String>,
    fee_collector: Option<String>,
    trigger: Option<String>,
    remove_trigger: Option<bool>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;

    //Assert Authority
    if info.sender != config.owner {
        //Check if ownership transfer is in progress & transfer if so
        match OWNERSHIP_TRANSFER.may_load(deps.storage)? {
            Some(pending) if pending == info.sender => {
                config.owner = info.sender;
                OWNERSHIP_TRANSFER.remove(deps.storage);
            }
            _ => return Err(ContractError::Unauthorized {}),
        }
    }

    let mut attrs = vec![attr("method", "update_config")];

    if let Some(owner) = owner {
        let valid_addr = deps.api.addr_validate(&owner)?;

        //Set owner transfer state
        OWNERSHIP_TRANSFER.save(deps.storage, &valid_addr)?;
        attrs.push(attr("owner_transfer", valid_addr));
    }
    if let Some(fee_collector) = fee_collector {
        config.fee_collector = deps.api.addr_validate(&fee_collector)?;
    }
    if let Some(trigger) = trigger {
        config.trigger = Some(deps.api.addr_validate(&trigger)?);
    }
    if remove_trigger.unwrap_or(false) {
        config.trigger = None;
    }

    CONFIG.save(deps.storage, &config)?;
    attrs.push(attr("updated_config", format!("{:?}", config)));

    Ok(Response::new().add_attributes(attrs))
}

/// Governance path for amending params.
/// Only structural checks happen here, pool addresses are resolved when distributing.
fn update_params(
    deps: DepsMut,
    info: MessageInfo,
    params: Params,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    //Assert Authority
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized {});
    }

    let current = PARAMS.load(deps.storage)?;
    params.validate_update(deps.api, &current)?;
    PARAMS.save(deps.storage, &params)?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "update_params"),
        attr("params", format!("{:?}", params)),
    ]))
}

/// Credits attached funds to the distribution source, the contract's own ledger account
fn fund(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    let mut amount = Uint128::zero();
    for coin in info.funds {
        if coin.denom != config.denom {
            return Err(ContractError::InvalidDenom {
                denom: coin.denom,
                expected: config.denom,
            });
        }
        amount += coin.amount;
    }
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount {});
    }

    let mut ledger = StorageLedger::new(deps.storage);
    ledger.deposit(&env.contract.address, amount)?;
    let source_balance = ledger.balance(&env.contract.address)?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "fund"),
        attr("funder", info.sender),
        attr("amount", amount),
        attr("source_balance", source_balance),
    ]))
}

/// Splits the whole source balance across the configured pools.
///
/// A `ContractError::Configuration` from here means the params can't be distributed
/// without losing track of funds; the caller has to treat it as fatal.
fn distribute(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let params = PARAMS.load(deps.storage)?;

    //Assert Authority
    if info.sender != config.owner && Some(&info.sender) != config.trigger.as_ref() {
        return Err(ContractError::Unauthorized {});
    }

    let source = env.contract.address.clone();
    let available = StorageLedger::new(deps.storage).balance(&source)?;

    //Plan before the balance check so misconfiguration surfaces even with nothing to distribute
    let plan = plan_distribution(deps.api, available, &params, &config.fee_collector)?;

    if available.is_zero() {
        return Ok(Response::new().add_attributes(vec![
            attr("method", "distribute"),
            attr("amount", available),
        ]));
    }

    apply_plan(&mut StorageLedger::new(deps.storage), &source, &plan)?;

    //Record
    let id = DISTRIBUTION_COUNT.load(deps.storage)? + 1;
    DISTRIBUTIONS.save(
        deps.storage,
        id,
        &DistributionRecord {
            id,
            block_height: env.block.height,
            block_time: env.block.time.seconds(),
            source_amount: plan.source_amount,
            payouts: plan.payouts.clone(),
            team_payouts: plan.team_payouts.clone(),
            team_retained: plan.team_retained,
        },
    )?;
    DISTRIBUTION_COUNT.save(deps.storage, &id)?;

    let mut attrs: Vec<Attribute> = vec![
        attr("method", "distribute"),
        attr("distribution_id", id.to_string()),
        attr("amount", plan.source_amount),
        attr("ecosystem", plan.ecosystem_amount),
        attr("team", plan.team_amount),
        attr("fee_collector", plan.fee_collector_amount),
        attr("team_retained", plan.team_retained),
    ];
    for payout in plan.payouts.iter().chain(plan.team_payouts.iter()) {
        attrs.push(attr("payout", payout.to_string()));
    }

    Ok(Response::new().add_attributes(attrs))
}

/// Sends the sender's ledger balance (or part of it) out of the contract
fn withdraw(
    deps: DepsMut,
    info: MessageInfo,
    amount: Option<Uint128>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut ledger = StorageLedger::new(deps.storage);

    let balance = ledger.balance(&info.sender)?;
    let amount = amount.unwrap_or(balance);
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount {});
    }
    if amount > balance {
        return Err(ContractError::InsufficientBalance {
            balance,
            requested: amount,
        });
    }

    ledger.withdraw(&info.sender, amount)?;

    let message = BankMsg::Send {
        to_address: info.sender.to_string(),
        amount: coins(amount.u128(), config.denom),
    };

    Ok(Response::new()
        .add_attributes(vec![
            attr("method", "withdraw"),
            attr("account", info.sender),
            attr("amount", amount),
            attr("remaining", balance - amount),
        ])
        .add_message(message))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::Params {} => to_binary(&PARAMS.load(deps.storage)?),
        QueryMsg::RewardPool {} => to_binary(&query_reward_pool(deps, env)?),
        QueryMsg::Reward { recipient } => to_binary(&query_reward(deps, recipient)?),
        QueryMsg::Rewards { start_after, limit } => {
            to_binary(&query_rewards(deps, start_after, limit)?)
        }
        QueryMsg::Balance { account } => to_binary(&query_balance(deps, account)?),
        QueryMsg::SimulateDistribution { amount } => {
            to_binary(&simulate_distribution(deps, amount)?)
        }
        QueryMsg::Distributions { start_after, limit } => {
            to_binary(&query_distributions(deps, start_after, limit)?)
        }
    }
}
