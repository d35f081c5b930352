use core::fmt;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Api, Coin, Decimal, Uint128};

use crate::error::ParamsError;
use crate::math::max_proportion;

//Distribution

/// A percentage share of a distribution, optionally bound to an account
#[cw_serde]
pub struct DistributionProportion {
    /// Receiving account, an empty string is treated as unset
    pub address: Option<String>,
    /// Percentage in [0, 100]
    pub proportion: Decimal,
}

impl DistributionProportion {
    /// Returns the address if one is set and non-empty
    pub fn address(&self) -> Option<&str> {
        match &self.address {
            Some(address) if !address.is_empty() => Some(address.as_str()),
            _ => None,
        }
    }
}

#[cw_serde]
#[derive(Default)]
pub struct PoolProportions {
    pub ecosystem: Option<DistributionProportion>,
    pub team: Option<DistributionProportion>,
}

/// What happens to the part of the team allocation that team proportions don't cover
#[cw_serde]
#[derive(Default)]
pub enum TeamRemainder {
    /// Stays in the team pool account
    #[default]
    Retain,
    /// Forwarded to the fee collector
    FeeCollector,
}

//Rewards

#[cw_serde]
pub struct RewardPool {
    /// Block time in seconds, zero disables the time window
    pub start_time: u64,
    /// Block time in seconds, the pool expires at this time
    pub end_time: u64,
    pub total_amount: Coin,
    pub claimed_amount: Coin,
}

#[cw_serde]
pub enum PoolStatus {
    Inactive,
    Active,
    Exhausted,
    Expired,
}

impl fmt::Display for PoolStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PoolStatus::Inactive => write!(f, "inactive"),
            PoolStatus::Active => write!(f, "active"),
            PoolStatus::Exhausted => write!(f, "exhausted"),
            PoolStatus::Expired => write!(f, "expired"),
        }
    }
}

impl RewardPool {
    pub fn empty(denom: &str) -> Self {
        RewardPool {
            start_time: 0,
            end_time: 0,
            total_amount: Coin::new(0, denom),
            claimed_amount: Coin::new(0, denom),
        }
    }

    /// Remaining ungranted amount
    pub fn headroom(&self) -> Uint128 {
        self.total_amount
            .amount
            .saturating_sub(self.claimed_amount.amount)
    }

    /// Pool state at `now` (seconds).
    /// Window checks come before exhaustion, so an expired pool reports Expired even if fully claimed.
    pub fn status(&self, now: u64) -> PoolStatus {
        if self.start_time != 0 {
            if now < self.start_time {
                return PoolStatus::Inactive;
            }
            if now >= self.end_time {
                return PoolStatus::Expired;
            }
        }

        if self.headroom().is_zero() {
            PoolStatus::Exhausted
        } else {
            PoolStatus::Active
        }
    }

    /// Clamps `requested` to the headroom and books it as claimed.
    /// Returns the granted amount.
    pub fn grant(&mut self, requested: Uint128) -> Uint128 {
        let granted = requested.min(self.headroom());
        self.claimed_amount.amount += granted;

        granted
    }
}

#[cw_serde]
pub struct RewardSeries {
    pub series_one: RewardPool,
}

/// A one-per-recipient grant from a reward pool
#[cw_serde]
pub struct Reward {
    pub creator: Addr,
    pub recipient: Addr,
    pub amount: Coin,
    pub claimed_amount: Coin,
    pub claimed_amount_with_decay: Coin,
}

impl Reward {
    pub fn new(creator: Addr, recipient: Addr, amount: Coin) -> Self {
        let zero = Coin::new(0, amount.denom.clone());
        Reward {
            creator,
            recipient,
            amount,
            claimed_amount: zero.clone(),
            claimed_amount_with_decay: zero,
        }
    }

    /// Amount still owed to the recipient
    pub fn unclaimed(&self) -> Uint128 {
        self.amount.amount.saturating_sub(self.claimed_amount.amount)
    }
}

//Params

#[cw_serde]
pub struct Params {
    pub pool_proportions: PoolProportions,
    /// Relative to the team pool's allocation, need not sum to 100
    pub team_proportions: Vec<DistributionProportion>,
    #[serde(default)]
    pub team_remainder: TeamRemainder,
    pub reward_series: RewardSeries,
    /// Only sender allowed to create rewards, empty disables reward creation
    pub evaluator_address: String,
}

impl Params {
    pub fn empty(reward_denom: &str) -> Self {
        Params {
            pool_proportions: PoolProportions::default(),
            team_proportions: vec![],
            team_remainder: TeamRemainder::Retain,
            reward_series: RewardSeries {
                series_one: RewardPool::empty(reward_denom),
            },
            evaluator_address: String::new(),
        }
    }

    /// Structural checks run whenever params are set.
    /// Address presence for nonzero pool proportions is left to distribution time,
    /// since proportions and addresses can be amended separately.
    pub fn validate(&self, api: &dyn Api) -> Result<(), ParamsError> {
        let ceiling = max_proportion();
        let mut pool_total = Decimal::zero();

        for (pool, entry) in [
            ("ecosystem", &self.pool_proportions.ecosystem),
            ("team", &self.pool_proportions.team),
        ] {
            if let Some(entry) = entry {
                if entry.proportion > ceiling {
                    return Err(ParamsError::ProportionOutOfRange {
                        pool: pool.to_string(),
                        proportion: entry.proportion,
                    });
                }
                if let Some(address) = entry.address() {
                    api.addr_validate(address)?;
                }
                pool_total = pool_total + entry.proportion;
            }
        }
        if pool_total > ceiling {
            return Err(ParamsError::Oversubscribed {
                pool: String::from("pool"),
                total: pool_total,
            });
        }

        let mut team_total = Decimal::zero();
        let mut seen: Vec<Addr> = vec![];
        for entry in self.team_proportions.iter() {
            let address = match entry.address() {
                Some(address) => api.addr_validate(address)?,
                None => return Err(ParamsError::MissingTeamAddress {}),
            };
            if seen.contains(&address) {
                return Err(ParamsError::DuplicateTeamAddress { address: address.to_string() });
            }
            if entry.proportion > ceiling {
                return Err(ParamsError::ProportionOutOfRange {
                    pool: address.to_string(),
                    proportion: entry.proportion,
                });
            }
            team_total = team_total + entry.proportion;
            seen.push(address);
        }
        if team_total > ceiling {
            return Err(ParamsError::Oversubscribed {
                pool: String::from("team"),
                total: team_total,
            });
        }

        if !self.evaluator_address.is_empty() {
            api.addr_validate(&self.evaluator_address)?;
        }

        let pool = &self.reward_series.series_one;
        if pool.total_amount.denom != pool.claimed_amount.denom {
            return Err(ParamsError::RewardDenomMismatch {
                total: pool.total_amount.denom.clone(),
                claimed: pool.claimed_amount.denom.clone(),
            });
        }
        if pool.claimed_amount.amount > pool.total_amount.amount {
            return Err(ParamsError::ClaimedExceedsTotal {});
        }
        //An end time without a start time would be ignored
        if pool.start_time > pool.end_time || (pool.start_time == 0 && pool.end_time != 0) {
            return Err(ParamsError::InvalidRewardWindow {
                start_time: pool.start_time,
                end_time: pool.end_time,
            });
        }

        Ok(())
    }

    /// Checks a replacement against the stored params.
    /// The reward pool's claimed amount only ever grows.
    pub fn validate_update(&self, api: &dyn Api, current: &Params) -> Result<(), ParamsError> {
        self.validate(api)?;

        let stored = &current.reward_series.series_one.claimed_amount;
        let incoming = &self.reward_series.series_one.claimed_amount;
        if incoming.denom != stored.denom && !stored.amount.is_zero() {
            return Err(ParamsError::RewardDenomMismatch {
                total: incoming.denom.clone(),
                claimed: stored.denom.clone(),
            });
        }
        if incoming.amount < stored.amount {
            return Err(ParamsError::ClaimedAmountDecrease {
                stored: stored.amount,
                incoming: incoming.amount,
            });
        }

        Ok(())
    }
}

//Distribution results

#[cw_serde]
pub struct Payout {
    pub account: Addr,
    pub amount: Uint128,
}

impl fmt::Display for Payout {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.account, self.amount)
    }
}

/// Balance movements for one distribution, computed before anything is applied
#[cw_serde]
pub struct DistributionPlan {
    /// Debited from the source account
    pub source_amount: Uint128,
    pub ecosystem_amount: Uint128,
    pub team_amount: Uint128,
    pub fee_collector_amount: Uint128,
    /// First level credits, fee collector included
    pub payouts: Vec<Payout>,
    /// Team pool account, set whenever the team allocation is nonzero
    pub team_account: Option<Addr>,
    /// Second level credits out of the team account
    pub team_payouts: Vec<Payout>,
    /// Left in the team account after team payouts
    pub team_retained: Uint128,
}

impl DistributionPlan {
    pub fn total_paid(&self) -> Uint128 {
        self.payouts.iter().map(|payout| payout.amount).sum()
    }

    pub fn team_paid(&self) -> Uint128 {
        self.team_payouts.iter().map(|payout| payout.amount).sum()
    }
}

#[cw_serde]
pub struct DistributionRecord {
    pub id: u64,
    pub block_height: u64,
    /// Block time in seconds
    pub block_time: u64,
    pub source_amount: Uint128,
    pub payouts: Vec<Payout>,
    pub team_payouts: Vec<Payout>,
    pub team_retained: Uint128,
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::MockApi;
    use cosmwasm_std::coin;

    fn pool(start_time: u64, end_time: u64, total: u128, claimed: u128) -> RewardPool {
        RewardPool {
            start_time,
            end_time,
            total_amount: coin(total, "ulore"),
            claimed_amount: coin(claimed, "ulore"),
        }
    }

    fn team_member(proportion: Decimal, address: &str) -> DistributionProportion {
        DistributionProportion {
            address: Some(address.to_string()),
            proportion,
        }
    }

    #[test]
    fn pool_status_follows_window_then_headroom() {
        let pool = pool(100, 200, 50, 0);
        assert_eq!(pool.status(99), PoolStatus::Inactive);
        assert_eq!(pool.status(100), PoolStatus::Active);
        assert_eq!(pool.status(199), PoolStatus::Active);
        assert_eq!(pool.status(200), PoolStatus::Expired);

        let drained = RewardPool { claimed_amount: coin(50, "ulore"), ..pool };
        assert_eq!(drained.status(150), PoolStatus::Exhausted);
        assert_eq!(drained.status(250), PoolStatus::Expired);
    }

    #[test]
    fn unset_start_time_disables_window() {
        let pool = pool(0, 0, 50, 10);
        assert_eq!(pool.status(0), PoolStatus::Active);
        assert_eq!(pool.status(1_000_000), PoolStatus::Active);
    }

    #[test]
    fn grant_clamps_to_headroom() {
        let mut pool = pool(0, 0, 50, 45);
        let granted = pool.grant(Uint128::new(10));

        assert_eq!(granted, Uint128::new(5));
        assert_eq!(pool.claimed_amount, coin(50, "ulore"));
        assert_eq!(pool.status(0), PoolStatus::Exhausted);
    }

    #[test]
    fn reward_starts_unclaimed() {
        let reward = Reward::new(
            Addr::unchecked("evaluator"),
            Addr::unchecked("recipient"),
            coin(7, "ulore"),
        );
        assert_eq!(reward.claimed_amount, coin(0, "ulore"));
        assert_eq!(reward.claimed_amount_with_decay, coin(0, "ulore"));
        assert_eq!(reward.unclaimed(), Uint128::new(7));
    }

    #[test]
    fn validate_params() {
        let api = MockApi::default();
        let mut params = Params::empty("ulore");
        params.validate(&api).unwrap();

        //Pool proportions above 100 combined
        params.pool_proportions = PoolProportions {
            ecosystem: Some(DistributionProportion { address: None, proportion: Decimal::percent(6000) }),
            team: Some(DistributionProportion { address: None, proportion: Decimal::percent(5000) }),
        };
        assert_eq!(
            params.validate(&api).unwrap_err(),
            ParamsError::Oversubscribed { pool: String::from("pool"), total: Decimal::percent(11000) }
        );

        //Single proportion above 100
        params.pool_proportions.team = None;
        params.pool_proportions.ecosystem = Some(DistributionProportion { address: None, proportion: Decimal::percent(10100) });
        assert_eq!(
            params.validate(&api).unwrap_err(),
            ParamsError::ProportionOutOfRange { pool: String::from("ecosystem"), proportion: Decimal::percent(10100) }
        );
        params.pool_proportions = PoolProportions::default();

        //Team entries need addresses
        params.team_proportions = vec![DistributionProportion { address: Some(String::new()), proportion: Decimal::one() }];
        assert_eq!(params.validate(&api).unwrap_err(), ParamsError::MissingTeamAddress {});

        //No duplicates
        params.team_proportions = vec![
            team_member(Decimal::percent(1000), "member_a"),
            team_member(Decimal::percent(1000), "member_a"),
        ];
        assert_eq!(
            params.validate(&api).unwrap_err(),
            ParamsError::DuplicateTeamAddress { address: String::from("member_a") }
        );

        //Team sum above 100
        params.team_proportions = vec![
            team_member(Decimal::percent(6000), "member_a"),
            team_member(Decimal::percent(4001), "member_b"),
        ];
        assert_eq!(
            params.validate(&api).unwrap_err(),
            ParamsError::Oversubscribed { pool: String::from("team"), total: Decimal::percent(10001) }
        );

        //Malformed team address
        params.team_proportions = vec![team_member(Decimal::percent(1000), "Member_A")];
        assert!(matches!(params.validate(&api).unwrap_err(), ParamsError::Std(_)));
        params.team_proportions = vec![];

        //Reward pool shape
        params.reward_series.series_one = pool(10, 5, 50, 0);
        assert_eq!(
            params.validate(&api).unwrap_err(),
            ParamsError::InvalidRewardWindow { start_time: 10, end_time: 5 }
        );
        params.reward_series.series_one = pool(0, 5, 50, 0);
        assert_eq!(
            params.validate(&api).unwrap_err(),
            ParamsError::InvalidRewardWindow { start_time: 0, end_time: 5 }
        );
        params.reward_series.series_one = pool(0, 0, 50, 51);
        assert_eq!(params.validate(&api).unwrap_err(), ParamsError::ClaimedExceedsTotal {});
    }

    #[test]
    fn claimed_amount_never_decreases() {
        let api = MockApi::default();
        let mut current = Params::empty("ulore");
        current.reward_series.series_one = pool(0, 0, 50, 20);

        let mut incoming = current.clone();
        incoming.reward_series.series_one = pool(0, 0, 100, 19);
        assert_eq!(
            incoming.validate_update(&api, &current).unwrap_err(),
            ParamsError::ClaimedAmountDecrease { stored: Uint128::new(20), incoming: Uint128::new(19) }
        );

        incoming.reward_series.series_one = pool(0, 0, 100, 20);
        incoming.validate_update(&api, &current).unwrap();
    }
}
