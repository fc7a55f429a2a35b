//! Balance and allowance bookkeeping
//!
//! The ledger knows nothing about fees or exemptions. Every primitive keeps
//! `sum(balances) == total_supply` and fails instead of wrapping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ReservoirError, Result};
use crate::types::{Address, Amount};

/// Allowance value that is never decremented
pub const INFINITE_ALLOWANCE: Amount = Amount::MAX;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    balances: BTreeMap<Address, Amount>,
    allowances: BTreeMap<Address, BTreeMap<Address, Amount>>,
    total_supply: Amount,
    /// Cumulative minted, never decremented
    total_minted: Amount,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================
    // Views
    // ========================================

    pub fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(owner)
            .and_then(|m| m.get(spender))
            .copied()
            .unwrap_or(0)
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    pub fn total_minted(&self) -> Amount {
        self.total_minted
    }

    /// Derived: everything ever minted that is no longer outstanding
    pub fn total_burned(&self) -> Amount {
        self.total_minted.saturating_sub(self.total_supply)
    }

    /// Number of accounts with a non-zero balance
    pub fn holders(&self) -> usize {
        self.balances.len()
    }

    pub fn iter_balances(&self) -> impl Iterator<Item = (&Address, &Amount)> {
        self.balances.iter()
    }

    /// Sum of all balances; `None` if it does not fit (it always should)
    pub fn sum_of_balances(&self) -> Option<Amount> {
        self.balances
            .values()
            .try_fold(0u128, |acc, b| acc.checked_add(*b))
    }

    // ========================================
    // Supply primitives
    // ========================================

    pub fn mint(&mut self, account: &Address, amount: Amount) -> Result<()> {
        if amount == 0 {
            return Err(ReservoirError::InvalidAmount);
        }
        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(ReservoirError::Overflow)?;
        let minted = self
            .total_minted
            .checked_add(amount)
            .ok_or(ReservoirError::Overflow)?;
        let balance = self
            .balance_of(account)
            .checked_add(amount)
            .ok_or(ReservoirError::Overflow)?;

        self.set_balance(account, balance);
        self.total_supply = supply;
        self.total_minted = minted;
        Ok(())
    }

    pub fn burn(&mut self, account: &Address, amount: Amount) -> Result<()> {
        if amount == 0 {
            return Err(ReservoirError::InvalidAmount);
        }
        let balance = self
            .balance_of(account)
            .checked_sub(amount)
            .ok_or(ReservoirError::InsufficientBalance)?;
        // Cannot fail while sum(balances) == total_supply
        let supply = self
            .total_supply
            .checked_sub(amount)
            .ok_or(ReservoirError::Overflow)?;

        self.set_balance(account, balance);
        self.total_supply = supply;
        Ok(())
    }

    /// Plain value move, no fee logic
    pub fn move_balance(&mut self, from: &Address, to: &Address, amount: Amount) -> Result<()> {
        if amount == 0 {
            return Err(ReservoirError::InvalidAmount);
        }
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return Err(ReservoirError::InsufficientBalance);
        }
        if from == to {
            return Ok(());
        }
        let to_balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(ReservoirError::Overflow)?;

        self.set_balance(from, from_balance - amount);
        self.set_balance(to, to_balance);
        Ok(())
    }

    // ========================================
    // Allowances
    // ========================================

    pub fn approve(&mut self, owner: &Address, spender: &Address, amount: Amount) {
        if amount == 0 {
            if let Some(spenders) = self.allowances.get_mut(owner) {
                spenders.remove(spender);
                if spenders.is_empty() {
                    self.allowances.remove(owner);
                }
            }
        } else {
            self.allowances
                .entry(*owner)
                .or_default()
                .insert(*spender, amount);
        }
    }

    /// Adds to the existing allowance; returns the new value
    pub fn increase_allowance(
        &mut self,
        owner: &Address,
        spender: &Address,
        added: Amount,
    ) -> Result<Amount> {
        let updated = self
            .allowance(owner, spender)
            .checked_add(added)
            .ok_or(ReservoirError::Overflow)?;
        self.approve(owner, spender, updated);
        Ok(updated)
    }

    /// Consumes `amount` of the spender's allowance over `owner`.
    /// The infinite sentinel is left untouched.
    pub fn spend_allowance(
        &mut self,
        owner: &Address,
        spender: &Address,
        amount: Amount,
    ) -> Result<()> {
        let current = self.allowance(owner, spender);
        if current == INFINITE_ALLOWANCE {
            return Ok(());
        }
        let remaining = current
            .checked_sub(amount)
            .ok_or(ReservoirError::InsufficientAllowance)?;
        self.approve(owner, spender, remaining);
        Ok(())
    }

    fn set_balance(&mut self, account: &Address, balance: Amount) {
        if balance == 0 {
            self.balances.remove(account);
        } else {
            self.balances.insert(*account, balance);
        }
    }
}
