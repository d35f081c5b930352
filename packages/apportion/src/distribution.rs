use cosmwasm_std::{Addr, Api, Decimal, StdResult, Uint128};

use crate::error::ConfigurationFault;
use crate::ledger::Ledger;
use crate::math::{apply_proportion, max_proportion};
use crate::types::{DistributionPlan, DistributionProportion, Params, Payout, TeamRemainder};

/// A proportion whose account has been resolved
#[derive(Clone, Debug, PartialEq)]
pub struct Share {
    pub pool: String,
    pub account: Addr,
    pub proportion: Decimal,
}

/// Result of one single-level split
#[derive(Clone, Debug, PartialEq)]
pub struct Split {
    /// One entry per share, in share order, zero amounts included
    pub allocations: Vec<Payout>,
    /// What the shares didn't take
    pub remainder: Uint128,
}

/// Resolves a configured proportion to a share.
/// Unset addresses are only allowed on zero proportions, those resolve to None.
pub fn resolve_share(
    api: &dyn Api,
    pool: &str,
    entry: &DistributionProportion,
) -> Result<Option<Share>, ConfigurationFault> {
    if entry.proportion > max_proportion() {
        return Err(ConfigurationFault::ProportionOutOfRange {
            pool: pool.to_string(),
            proportion: entry.proportion,
        });
    }

    match entry.address() {
        Some(address) => {
            let account = api.addr_validate(address).map_err(|_| {
                ConfigurationFault::UnresolvableAddress {
                    pool: pool.to_string(),
                    address: address.to_string(),
                }
            })?;

            Ok(Some(Share {
                pool: pool.to_string(),
                account,
                proportion: entry.proportion,
            }))
        }
        None if entry.proportion.is_zero() => Ok(None),
        None => Err(ConfigurationFault::MissingAddress {
            pool: pool.to_string(),
            proportion: entry.proportion,
        }),
    }
}

/// Splits `amount` across `shares`, each share taking floor(amount * proportion / 100) of the
/// original amount. Allocations plus remainder always add up to `amount`.
pub fn split(pool: &str, amount: Uint128, shares: &[Share]) -> Result<Split, ConfigurationFault> {
    let oversubscribed = |paid: Uint128| ConfigurationFault::Oversubscribed {
        pool: pool.to_string(),
        paid,
        available: amount,
    };

    let mut allocations: Vec<Payout> = vec![];
    let mut paid = Uint128::zero();

    for share in shares {
        let portion = apply_proportion(amount, share.proportion).ok_or_else(|| {
            ConfigurationFault::ProportionOutOfRange {
                pool: share.pool.clone(),
                proportion: share.proportion,
            }
        })?;
        paid = paid.checked_add(portion).map_err(|_| oversubscribed(paid))?;

        allocations.push(Payout {
            account: share.account.clone(),
            amount: portion,
        });
    }

    let remainder = amount.checked_sub(paid).map_err(|_| oversubscribed(paid))?;

    Ok(Split { allocations, remainder })
}

/// Plans the distribution of `available` from the source account.
///
/// Ecosystem and team shares come out of `available`, the fee collector takes the rest.
/// The team allocation is then split again across the team proportions; whatever they
/// don't take is retained by the team pool or forwarded, per `params.team_remainder`.
pub fn plan_distribution(
    api: &dyn Api,
    available: Uint128,
    params: &Params,
    fee_collector: &Addr,
) -> Result<DistributionPlan, ConfigurationFault> {
    let pools = &params.pool_proportions;
    let ecosystem = match &pools.ecosystem {
        Some(entry) => resolve_share(api, "ecosystem", entry)?,
        None => None,
    };
    let team = match &pools.team {
        Some(entry) => resolve_share(api, "team", entry)?,
        None => None,
    };

    let shares: Vec<Share> = ecosystem.iter().chain(team.iter()).cloned().collect();
    let pool_split = split("pool", available, &shares)?;

    let mut allocations = pool_split.allocations.into_iter();
    let ecosystem_amount = ecosystem
        .as_ref()
        .and_then(|_| allocations.next())
        .map(|payout| payout.amount)
        .unwrap_or_default();
    let team_amount = team
        .as_ref()
        .and_then(|_| allocations.next())
        .map(|payout| payout.amount)
        .unwrap_or_default();

    let mut payouts: Vec<Payout> = vec![];
    for (share, amount) in [(&ecosystem, ecosystem_amount), (&team, team_amount)] {
        if let Some(share) = share {
            if !amount.is_zero() {
                payouts.push(Payout {
                    account: share.account.clone(),
                    amount,
                });
            }
        }
    }
    if !pool_split.remainder.is_zero() {
        payouts.push(Payout {
            account: fee_collector.clone(),
            amount: pool_split.remainder,
        });
    }

    let mut team_payouts: Vec<Payout> = vec![];
    let mut team_retained = Uint128::zero();
    let team_account = match team {
        Some(share) if !team_amount.is_zero() => {
            let mut member_shares: Vec<Share> = vec![];
            for entry in params.team_proportions.iter() {
                if let Some(share) = resolve_share(api, "team member", entry)? {
                    member_shares.push(share);
                }
            }
            let team_split = split("team", team_amount, &member_shares)?;

            team_payouts = team_split
                .allocations
                .into_iter()
                .filter(|payout| !payout.amount.is_zero())
                .collect();

            match params.team_remainder {
                TeamRemainder::Retain => team_retained = team_split.remainder,
                TeamRemainder::FeeCollector => {
                    if !team_split.remainder.is_zero() {
                        team_payouts.push(Payout {
                            account: fee_collector.clone(),
                            amount: team_split.remainder,
                        });
                    }
                }
            }

            Some(share.account)
        }
        _ => None,
    };

    Ok(DistributionPlan {
        source_amount: available,
        ecosystem_amount,
        team_amount,
        fee_collector_amount: pool_split.remainder,
        payouts,
        team_account,
        team_payouts,
        team_retained,
    })
}

/// Moves the planned amounts: one debit from `source` and a credit per payout,
/// then one debit from the team account and a credit per team payout.
pub fn apply_plan<L: Ledger + ?Sized>(
    ledger: &mut L,
    source: &Addr,
    plan: &DistributionPlan,
) -> StdResult<()> {
    if !plan.source_amount.is_zero() {
        ledger.withdraw(source, plan.source_amount)?;
    }
    for payout in plan.payouts.iter() {
        ledger.deposit(&payout.account, payout.amount)?;
    }

    if let Some(team_account) = &plan.team_account {
        let team_paid = plan.team_paid();
        if !team_paid.is_zero() {
            ledger.withdraw(team_account, team_paid)?;
            for payout in plan.team_payouts.iter() {
                ledger.deposit(&payout.account, payout.amount)?;
            }
        }
    }

    Ok(())
}
