//! Issuance and redemption vaults, plus the residue sweep

use log::{debug, info};

use crate::contract::Reservoir;
use crate::error::{ReservoirError, Result};
use crate::events::Event;
use crate::reserve::{safe_transfer, safe_transfer_from, ReserveAsset};
use crate::types::{Amount, Call};
use crate::venue::SwapVenue;
use reservoir_model::{quote_issuance, redemption_payout, IssuanceQuote};

/// Outcome of a redemption
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Redemption {
    pub shares: Amount,
    pub payout: Amount,
    /// Supply left after the burn
    pub supply_after: Amount,
}

// ============================================================================
// Issuance
// ============================================================================

impl<R, V> Reservoir<R, V>
where
    R: ReserveAsset + Clone,
    V: SwapVenue + Clone,
{
    /// Deposit reserve asset for freshly minted shares, net of the fee.
    ///
    /// Half the fee stays in the contract as backing. The other half is paid
    /// to the controller in reserve asset, and the controller is minted the
    /// same number of shares on top.
    pub fn issue_shares(&mut self, call: Call, deposit: Amount) -> Result<IssuanceQuote> {
        self.execute(|c| {
            let ends_at = c.config.issuance_ends_at()?;
            if call.now > ends_at {
                return Err(ReservoirError::IssuancePeriodEnded);
            }
            let params = c.config.params;
            if deposit == 0 || deposit < params.min_liquidity {
                return Err(ReservoirError::InvalidAmount);
            }

            let contract = c.config.contract;
            let controller = c.config.controller;
            if c.reserve.allowance(&call.caller, &contract) < deposit {
                return Err(ReservoirError::InsufficientAllowance);
            }
            safe_transfer_from(&mut c.reserve, &contract, &call.caller, &contract, deposit)?;

            let quote = quote_issuance(deposit, params.fee_bps, params.min_fee)?;
            debug!("Issuance quote: {quote:?}");

            if quote.fee_to_controller > 0 {
                safe_transfer(&mut c.reserve, &contract, &controller, quote.fee_to_controller)?;
                c.mint_tokens(&controller, quote.fee_to_controller)?;
            }
            c.mint_tokens(&call.caller, quote.shares)?;

            c.events.push(Event::SharesIssued {
                account: call.caller,
                deposit,
                shares: quote.shares,
                fee_to_contract: quote.fee_to_contract,
                fee_to_controller: quote.fee_to_controller,
            });
            info!(
                "Issued {} shares to {} for deposit {} (fee {})",
                quote.shares, call.caller, deposit, quote.fee
            );
            Ok(quote)
        })
    }

    /// Same arithmetic as `issue_shares`, without any effect
    pub fn preview_issue(&self, deposit: Amount) -> Result<IssuanceQuote> {
        let params = self.config.params;
        if deposit == 0 || deposit < params.min_liquidity {
            return Err(ReservoirError::InvalidAmount);
        }
        Ok(quote_issuance(deposit, params.fee_bps, params.min_fee)?)
    }
}

// ============================================================================
// Redemption
// ============================================================================

impl<R, V> Reservoir<R, V>
where
    R: ReserveAsset + Clone,
    V: SwapVenue + Clone,
{
    /// Burn `shares` for a pro-rata slice of the contract's reserve asset.
    /// Allowed at any time.
    pub fn redeem_shares(&mut self, call: Call, shares: Amount) -> Result<Redemption> {
        self.execute(|c| {
            if shares == 0 {
                return Err(ReservoirError::InvalidAmount);
            }
            if c.ledger.balance_of(&call.caller) < shares {
                return Err(ReservoirError::InsufficientBalance);
            }
            let payout = c.preview_redeem(shares)?;

            // Burn first, pay second
            c.burn_tokens(&call.caller, shares)?;
            let contract = c.config.contract;
            safe_transfer(&mut c.reserve, &contract, &call.caller, payout)?;

            let supply_after = c.ledger.total_supply();
            c.events.push(Event::SharesRedeemed {
                account: call.caller,
                shares,
                payout,
            });
            info!("Redeemed {shares} shares from {} for {payout}", call.caller);
            Ok(Redemption {
                shares,
                payout,
                supply_after,
            })
        })
    }

    /// Payout `redeem_shares` would make right now
    pub fn preview_redeem(&self, shares: Amount) -> Result<Amount> {
        if shares == 0 {
            return Err(ReservoirError::InvalidAmount);
        }
        let supply = self.ledger.total_supply();
        if supply == 0 {
            return Err(ReservoirError::InsufficientContractBalance);
        }
        if shares > supply {
            return Err(ReservoirError::InsufficientBalance);
        }
        let reserve_balance = self.reserve.balance_of(&self.config.contract);
        let payout = redemption_payout(reserve_balance, shares, supply)?;
        if payout == 0 {
            return Err(ReservoirError::InsufficientContractBalance);
        }
        Ok(payout)
    }
}

// ============================================================================
// Maintenance
// ============================================================================

impl<R, V> Reservoir<R, V>
where
    R: ReserveAsset + Clone,
    V: SwapVenue + Clone,
{
    /// Burn every ledger token the contract holds. Anyone may call; the
    /// reserve asset is untouched.
    pub fn burn_contract_balance(&mut self, call: Call) -> Result<Amount> {
        self.execute(|c| {
            let contract = c.config.contract;
            let residue = c.ledger.balance_of(&contract);
            if residue == 0 {
                return Err(ReservoirError::InsufficientContractBalance);
            }
            c.burn_tokens(&contract, residue)?;
            c.events.push(Event::ResidueBurned {
                caller: call.caller,
                amount: residue,
            });
            info!("Burned {residue} contract residue (called by {})", call.caller);
            Ok(residue)
        })
    }
}
