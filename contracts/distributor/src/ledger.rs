use apportion::ledger::Ledger;
use cosmwasm_std::{Addr, StdResult, Storage, Uint128};

use crate::state::BALANCES;

/// Ledger over contract storage.
/// The contract holds the tokens, so the sum of all accounts matches its bank balance.
pub struct StorageLedger<'a> {
    storage: &'a mut dyn Storage,
}

impl<'a> StorageLedger<'a> {
    pub fn new(storage: &'a mut dyn Storage) -> Self {
        StorageLedger { storage }
    }
}

impl Ledger for StorageLedger<'_> {
    fn balance(&self, account: &Addr) -> StdResult<Uint128> {
        Ok(BALANCES
            .may_load(&*self.storage, account.to_string())?
            .unwrap_or_default())
    }

    fn deposit(&mut self, account: &Addr, amount: Uint128) -> StdResult<()> {
        if amount.is_zero() {
            return Ok(());
        }

        BALANCES.update(self.storage, account.to_string(), |balance| -> StdResult<_> {
            Ok(balance.unwrap_or_default().checked_add(amount)?)
        })?;

        Ok(())
    }

    fn withdraw(&mut self, account: &Addr, amount: Uint128) -> StdResult<()> {
        let remaining = self.balance(account)?.checked_sub(amount)?;

        //Drop emptied accounts
        if remaining.is_zero() {
            BALANCES.remove(self.storage, account.to_string());
        } else {
            BALANCES.save(self.storage, account.to_string(), &remaining)?;
        }

        Ok(())
    }
}
