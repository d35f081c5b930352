use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

use apportion::distributor::Config;
use apportion::types::{DistributionRecord, Params, Reward};

pub const CONFIG: Item<Config> = Item::new("config");
pub const PARAMS: Item<Params> = Item::new("params");
pub const REWARDS: Map<String, Reward> = Map::new("rewards"); //Keyed by recipient, one per recipient
pub const BALANCES: Map<String, Uint128> = Map::new("balances"); //Ledger accounts, the contract's own address is the distribution source
pub const DISTRIBUTIONS: Map<u64, DistributionRecord> = Map::new("distributions");
pub const DISTRIBUTION_COUNT: Item<u64> = Item::new("distribution_count");

pub const OWNERSHIP_TRANSFER: Item<Addr> = Item::new("ownership_transfer");
