use cosmwasm_std::{Addr, StdResult, Uint128};

/// Named-account balance store.
/// Amounts are exact integers, withdrawing more than an account holds is an error.
pub trait Ledger {
    fn balance(&self, account: &Addr) -> StdResult<Uint128>;

    fn deposit(&mut self, account: &Addr, amount: Uint128) -> StdResult<()>;

    fn withdraw(&mut self, account: &Addr, amount: Uint128) -> StdResult<()>;
}
