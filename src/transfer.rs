//! Taxed transfers
//!
//! A non-exempt transfer pays `fee = amount * 4.5%`, split into a burn
//! share, a controller share and a swap share (the remainder). The legs run
//! in a fixed order: swap, burn, controller, recipient.

use log::{debug, info};

use crate::contract::Reservoir;
use crate::error::{ReservoirError, Result};
use crate::events::Event;
use crate::exemption::Exemption;
use crate::reserve::ReserveAsset;
use crate::types::{Address, Amount, Call};
use crate::venue::SwapVenue;
use reservoir_model::{split_transfer_fee, TransferFee};

/// How the fee of a transfer was decided
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferKind {
    Exempt(Exemption),
    /// Fee fell below the floor and was dropped
    Waived,
    Taxed(TransferFee),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransferReceipt {
    pub from: Address,
    pub to: Address,
    pub amount: Amount,
    /// Credited to `to`
    pub net: Amount,
    pub kind: TransferKind,
    /// Reserve asset the swap share fetched (zero without a swap)
    pub reserve_received: Amount,
}

impl TransferReceipt {
    pub fn fee(&self) -> Amount {
        match self.kind {
            TransferKind::Taxed(split) => split.fee,
            _ => 0,
        }
    }
}

// ============================================================================
// Public entry points
// ============================================================================

impl<R, V> Reservoir<R, V>
where
    R: ReserveAsset + Clone,
    V: SwapVenue + Clone,
{
    pub fn transfer(&mut self, call: Call, to: Address, amount: Amount) -> Result<TransferReceipt> {
        self.execute(|c| c.taxed_transfer(&call.caller, &to, amount, call.now))
    }

    /// Delegated transfer. The allowance is charged the full pre-tax amount.
    pub fn transfer_from(
        &mut self,
        call: Call,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<TransferReceipt> {
        self.execute(|c| {
            c.ledger.spend_allowance(&from, &call.caller, amount)?;
            c.taxed_transfer(&from, &to, amount, call.now)
        })
    }

    pub fn approve(&mut self, call: Call, spender: Address, amount: Amount) -> Result<()> {
        if call.caller.is_zero() || spender.is_zero() {
            return Err(ReservoirError::ZeroAddress);
        }
        self.execute(|c| {
            c.ledger.approve(&call.caller, &spender, amount);
            c.events.push(Event::Approval {
                owner: call.caller,
                spender,
                amount,
            });
            Ok(())
        })
    }
}

// ============================================================================
// Fee engine
// ============================================================================

impl<R, V> Reservoir<R, V>
where
    R: ReserveAsset + Clone,
    V: SwapVenue + Clone,
{
    pub(crate) fn taxed_transfer(
        &mut self,
        from: &Address,
        to: &Address,
        amount: Amount,
        now: u64,
    ) -> Result<TransferReceipt> {
        if from.is_zero() || to.is_zero() {
            return Err(ReservoirError::ZeroAddress);
        }
        if amount == 0 || amount < self.config.params.min_transfer {
            return Err(ReservoirError::InvalidAmount);
        }
        if self.ledger.balance_of(from) < amount {
            return Err(ReservoirError::InsufficientBalance);
        }

        if let Some(reason) = self.exemption_policy().check(from, to) {
            debug!("Exempt transfer ({reason:?}) of {amount}");
            self.move_tokens(from, to, amount)?;
            return Ok(TransferReceipt {
                from: *from,
                to: *to,
                amount,
                net: amount,
                kind: TransferKind::Exempt(reason),
                reserve_received: 0,
            });
        }

        let params = self.config.params;
        let split = match split_transfer_fee(amount, params.fee_bps, params.min_fee)? {
            Some(split) => split,
            None => {
                debug!("Fee on {amount} below floor {}, waived", params.min_fee);
                self.move_tokens(from, to, amount)?;
                return Ok(TransferReceipt {
                    from: *from,
                    to: *to,
                    amount,
                    net: amount,
                    kind: TransferKind::Waived,
                    reserve_received: 0,
                });
            }
        };

        let contract = self.config.contract;
        let controller = self.config.controller;

        // 1. Swap share to the contract, then out to the venue if a pair is set
        let mut reserve_received = 0;
        if split.swap > 0 {
            self.move_tokens(from, &contract, split.swap)?;
            if !self.pair.is_zero() {
                reserve_received = self.swap_to_reserve(split.swap, now)?;
            } else {
                debug!("No pair set, {} stays with the contract", split.swap);
            }
        }

        // 2. Burn share
        if split.burn > 0 {
            self.burn_tokens(from, split.burn)?;
        }

        // 3. Controller share
        if split.controller > 0 {
            self.move_tokens(from, &controller, split.controller)?;
        }

        // 4. Recipient
        self.move_tokens(from, to, split.net)?;

        self.events.push(Event::TaxedTransfer {
            from: *from,
            to: *to,
            amount,
            net: split.net,
            burned: split.burn,
            to_controller: split.controller,
            swapped: split.swap,
            reserve_received,
        });
        info!(
            "Taxed transfer {} -> {}: amount {}, fee {}, net {}, reserve received {}",
            from, to, amount, split.fee, split.net, reserve_received
        );

        Ok(TransferReceipt {
            from: *from,
            to: *to,
            amount,
            net: split.net,
            kind: TransferKind::Taxed(split),
            reserve_received,
        })
    }
}
