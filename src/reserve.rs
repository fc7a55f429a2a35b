//! Reserve asset interface
//!
//! The reserve asset is an external token. The contract only ever touches it
//! through [`safe_transfer`] and [`safe_transfer_from`], which turn both a
//! `false` return and an error into [`ReservoirError::ReserveTransferFailed`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{ReservoirError, Result};
use crate::types::{Address, Amount};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReserveError {
    #[error("insufficient reserve balance")]
    InsufficientBalance,

    #[error("insufficient reserve allowance")]
    InsufficientAllowance,

    #[error("reserve arithmetic overflow")]
    Overflow,

    #[error("zero amount")]
    ZeroAmount,
}

pub trait ReserveAsset {
    /// Token identifier
    fn id(&self) -> Address;

    fn balance_of(&self, owner: &Address) -> Amount;

    fn allowance(&self, owner: &Address, spender: &Address) -> Amount;

    /// Move `amount` from `caller` to `to`
    fn transfer(&mut self, caller: &Address, to: &Address, amount: Amount)
        -> core::result::Result<bool, ReserveError>;

    /// Move `amount` from `from` to `to` against `spender`'s allowance
    fn transfer_from(
        &mut self,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> core::result::Result<bool, ReserveError>;
}

pub fn safe_transfer<A: ReserveAsset + ?Sized>(
    asset: &mut A,
    caller: &Address,
    to: &Address,
    amount: Amount,
) -> Result<()> {
    match asset.transfer(caller, to, amount) {
        Ok(true) => Ok(()),
        Ok(false) => Err(ReservoirError::ReserveTransferFailed(
            "transfer returned false".to_string(),
        )),
        Err(e) => Err(ReservoirError::ReserveTransferFailed(e.to_string())),
    }
}

pub fn safe_transfer_from<A: ReserveAsset + ?Sized>(
    asset: &mut A,
    spender: &Address,
    from: &Address,
    to: &Address,
    amount: Amount,
) -> Result<()> {
    match asset.transfer_from(spender, from, to, amount) {
        Ok(true) => Ok(()),
        Ok(false) => Err(ReservoirError::ReserveTransferFailed(
            "transferFrom returned false".to_string(),
        )),
        Err(e) => Err(ReservoirError::ReserveTransferFailed(e.to_string())),
    }
}

// ============================================================================
// In-memory reserve token
// ============================================================================

/// Plain fungible token with a faucet. `frozen` makes every transfer
/// report failure, for exercising the safe-transfer path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryReserve {
    id: Address,
    balances: BTreeMap<Address, Amount>,
    allowances: BTreeMap<Address, BTreeMap<Address, Amount>>,
    total_supply: Amount,
    #[serde(default)]
    frozen: bool,
}

impl MemoryReserve {
    pub fn new(id: Address) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Faucet
    pub fn mint(&mut self, to: &Address, amount: Amount) -> core::result::Result<(), ReserveError> {
        if amount == 0 {
            return Err(ReserveError::ZeroAmount);
        }
        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(ReserveError::Overflow)?;
        let balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(ReserveError::Overflow)?;
        self.balances.insert(*to, balance);
        self.total_supply = supply;
        Ok(())
    }

    pub fn approve(&mut self, owner: &Address, spender: &Address, amount: Amount) {
        self.allowances
            .entry(*owner)
            .or_default()
            .insert(*spender, amount);
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    pub fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    fn move_balance(
        &mut self,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> core::result::Result<(), ReserveError> {
        let from_balance = self
            .balance_of(from)
            .checked_sub(amount)
            .ok_or(ReserveError::InsufficientBalance)?;
        if from == to {
            return Ok(());
        }
        let to_balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(ReserveError::Overflow)?;
        self.balances.insert(*from, from_balance);
        self.balances.insert(*to, to_balance);
        Ok(())
    }
}

impl ReserveAsset for MemoryReserve {
    fn id(&self) -> Address {
        self.id
    }

    fn balance_of(&self, owner: &Address) -> Amount {
        self.balances.get(owner).copied().unwrap_or(0)
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(owner)
            .and_then(|m| m.get(spender))
            .copied()
            .unwrap_or(0)
    }

    fn transfer(
        &mut self,
        caller: &Address,
        to: &Address,
        amount: Amount,
    ) -> core::result::Result<bool, ReserveError> {
        if self.frozen {
            return Ok(false);
        }
        self.move_balance(caller, to, amount)?;
        Ok(true)
    }

    fn transfer_from(
        &mut self,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> core::result::Result<bool, ReserveError> {
        if self.frozen {
            return Ok(false);
        }
        let current = self.allowance(from, spender);
        let remaining = current
            .checked_sub(amount)
            .ok_or(ReserveError::InsufficientAllowance)?;
        if self.balance_of(from) < amount {
            return Err(ReserveError::InsufficientBalance);
        }
        if current != Amount::MAX {
            self.approve(from, spender, remaining);
        }
        self.move_balance(from, to, amount)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(label: &str) -> Address {
        Address::from_label(label).unwrap()
    }

    #[test]
    fn test_faucet_and_transfer() {
        let mut usd = MemoryReserve::new(addr("usd"));
        let (alice, bob) = (addr("alice"), addr("bob"));

        usd.mint(&alice, 100).unwrap();
        safe_transfer(&mut usd, &alice, &bob, 40).unwrap();

        assert_eq!(usd.balance_of(&alice), 60);
        assert_eq!(usd.balance_of(&bob), 40);
        assert_eq!(usd.total_supply(), 100);
    }

    #[test]
    fn test_transfer_from_spends_allowance() {
        let mut usd = MemoryReserve::new(addr("usd"));
        let (alice, vault) = (addr("alice"), addr("vault"));
        usd.mint(&alice, 100).unwrap();
        usd.approve(&alice, &vault, 70);

        safe_transfer_from(&mut usd, &vault, &alice, &vault, 50).unwrap();
        assert_eq!(usd.allowance(&alice, &vault), 20);
        assert!(matches!(
            safe_transfer_from(&mut usd, &vault, &alice, &vault, 21),
            Err(ReservoirError::ReserveTransferFailed(_))
        ));
    }

    #[test]
    fn test_false_return_is_an_error() {
        let mut usd = MemoryReserve::new(addr("usd"));
        let (alice, bob) = (addr("alice"), addr("bob"));
        usd.mint(&alice, 100).unwrap();
        usd.set_frozen(true);

        assert_eq!(
            safe_transfer(&mut usd, &alice, &bob, 1),
            Err(ReservoirError::ReserveTransferFailed("transfer returned false".to_string()))
        );
        assert_eq!(usd.balance_of(&alice), 100);
    }
}
