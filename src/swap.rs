//! Swap leg: convert contract-held ledger tokens into the reserve asset

use log::{debug, info, warn};

use crate::contract::Reservoir;
use crate::error::{ReservoirError, Result};
use crate::events::Event;
use crate::exemption::ExemptionPolicy;
use crate::ledger::Ledger;
use crate::reserve::{safe_transfer, ReserveAsset};
use crate::types::{Address, Amount};
use crate::venue::{SwapContext, SwapVenue, VenueError};
use reservoir_model::min_swap_output;

/// The world as seen by the venue during one swap.
///
/// Only exempt pulls are honoured: the contract is mid-call, so any
/// transfer that would need the taxed path is a reentry and is refused.
/// Exempt pulls must land in the pair and may not exceed the swap amount
/// in total. Reserve asset may only be paid out of the pair.
struct SwapCallContext<'a, R> {
    ledger: &'a mut Ledger,
    reserve: &'a mut R,
    events: &'a mut Vec<Event>,
    policy: ExemptionPolicy,
    contract: Address,
    router: Address,
    pair: Address,
    /// Ledger tokens the venue may still pull for this swap
    pull_budget: Amount,
    now: u64,
    /// First ledger-level refusal, surfaced instead of the venue's error
    rejection: Option<ReservoirError>,
}

impl<R: ReserveAsset> SwapCallContext<'_, R> {
    fn reject(&mut self, err: ReservoirError) -> VenueError {
        let message = err.to_string();
        if self.rejection.is_none() {
            self.rejection = Some(err);
        }
        VenueError::TransferRejected(message)
    }

    fn pull(&mut self, from: &Address, to: &Address, amount: Amount) -> Result<()> {
        if amount == 0 {
            return Err(ReservoirError::InvalidAmount);
        }
        if from.is_zero() || to.is_zero() {
            return Err(ReservoirError::ZeroAddress);
        }
        if !self.policy.is_exempt(from, to) {
            return Err(ReservoirError::ReentrantCall);
        }
        if *to != self.pair || amount > self.pull_budget {
            return Err(ReservoirError::Unauthorized);
        }
        self.ledger.spend_allowance(from, &self.router, amount)?;
        self.ledger.move_balance(from, to, amount)?;
        self.pull_budget -= amount;
        self.events.push(Event::Transfer {
            from: *from,
            to: *to,
            amount,
        });
        Ok(())
    }
}

impl<R: ReserveAsset> SwapContext for SwapCallContext<'_, R> {
    fn caller(&self) -> Address {
        self.contract
    }

    fn now(&self) -> u64 {
        self.now
    }

    fn token_balance_of(&self, owner: &Address) -> Amount {
        self.ledger.balance_of(owner)
    }

    fn token_transfer_from(
        &mut self,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> core::result::Result<(), VenueError> {
        self.pull(from, to, amount).map_err(|e| self.reject(e))
    }

    fn reserve_balance_of(&self, owner: &Address) -> Amount {
        self.reserve.balance_of(owner)
    }

    fn reserve_pay(
        &mut self,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> core::result::Result<(), VenueError> {
        if *from == self.contract || *from != self.pair {
            return Err(self.reject(ReservoirError::Unauthorized));
        }
        safe_transfer(&mut *self.reserve, from, to, amount).map_err(|e| self.reject(e))
    }
}

impl<R, V> Reservoir<R, V>
where
    R: ReserveAsset + Clone,
    V: SwapVenue + Clone,
{
    /// Minimum reserve-asset output the swap leg would demand for `amount`
    pub fn swap_bound(&self, amount: Amount) -> Result<Amount> {
        if self.pair.is_zero() {
            return Err(ReservoirError::PairNotSet);
        }
        let reserves = self
            .venue
            .get_reserves(&self.pair, &self.config.contract, &self.config.reserve_asset);
        Ok(min_swap_output(amount, reserves, self.config.params.min_output_percent)?)
    }

    /// Swap `amount` of contract-held ledger tokens for the reserve asset.
    /// Returns the reserve asset actually received by the contract.
    pub(crate) fn swap_to_reserve(&mut self, amount: Amount, now: u64) -> Result<Amount> {
        let pair = self.pair;
        if pair.is_zero() {
            return Err(ReservoirError::PairNotSet);
        }
        if amount == 0 {
            return Ok(0);
        }

        let contract = self.config.contract;
        let reserve_asset = self.config.reserve_asset;
        let params = self.config.params;
        let router = self.venue.address();

        let min_out = self.swap_bound(amount)?;
        debug!("Swap {amount} via pair {pair}, min out {min_out}");

        // Top up the router's allowance by the shortfall only
        let current = self.ledger.allowance(&contract, &router);
        if current < amount {
            let allowance = self
                .ledger
                .increase_allowance(&contract, &router, amount - current)?;
            self.events.push(Event::Approval {
                owner: contract,
                spender: router,
                amount: allowance,
            });
        }

        let deadline = now
            .checked_add(params.swap_deadline_secs)
            .ok_or(ReservoirError::Overflow)?;
        let path = [contract, reserve_asset];
        let before = self.reserve.balance_of(&contract);

        let mut ctx = SwapCallContext {
            ledger: &mut self.ledger,
            reserve: &mut self.reserve,
            events: &mut self.events,
            policy: ExemptionPolicy::from_config(&self.config),
            contract,
            router,
            pair,
            pull_budget: amount,
            now,
            rejection: None,
        };
        let outcome = self
            .venue
            .swap_exact_tokens_for_tokens_supporting_fee_on_transfer_tokens(
                &mut ctx, amount, min_out, &path, &contract, deadline,
            );
        let rejection = ctx.rejection.take();

        if let Err(e) = outcome {
            warn!("Swap of {amount} rejected by venue: {e}");
            return Err(rejection.unwrap_or(ReservoirError::Venue(e)));
        }

        let received = self.reserve.balance_of(&contract).saturating_sub(before);
        if received == 0 {
            warn!("Swap of {amount} returned without delivering reserve asset");
            return Err(ReservoirError::SwapFailed);
        }

        self.events.push(Event::SwapExecuted {
            amount_in: amount,
            min_amount_out: min_out,
            reserve_received: received,
        });
        info!("Swapped {amount} for {received} reserve asset");
        Ok(received)
    }
}
