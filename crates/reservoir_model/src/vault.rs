//! Issuance and redemption math
//!
//! # Properties
//! - **V1**: `shares + fee == deposit` and `fee_to_contract + fee_to_controller == fee`
//! - **V2**: `payout <= reserve_balance` for any `shares <= supply`
//! - **V3**: Truncation always favours the remaining holders

use crate::{
    math::{mul_div, sub},
    ModelError, BPS_SCALE, WAD,
};

/// Quote for an issuance deposit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssuanceQuote {
    /// Reserve asset deposited by the caller
    pub deposit: u128,
    /// Total issuance fee
    pub fee: u128,
    /// Half of the fee, kept as reserve backing
    pub fee_to_contract: u128,
    /// Other half, paid out to the controller (and minted again as shares)
    pub fee_to_controller: u128,
    /// Shares minted to the depositor
    pub shares: u128,
}

/// Quote an issuance of shares against a reserve-asset deposit.
///
/// Unlike transfers, a fee below the floor rejects the deposit.
pub fn quote_issuance(
    deposit: u128,
    fee_bps: u128,
    min_fee: u128,
) -> Result<IssuanceQuote, ModelError> {
    if deposit == 0 || fee_bps > BPS_SCALE {
        return Err(ModelError::InvalidAmount);
    }

    let fee = mul_div(deposit, fee_bps, BPS_SCALE)?;
    if fee < min_fee {
        return Err(ModelError::InvalidAmount);
    }

    let fee_to_contract = fee / 2;
    let fee_to_controller = fee - fee_to_contract;
    let shares = sub(deposit, fee)?;

    Ok(IssuanceQuote {
        deposit,
        fee,
        fee_to_contract,
        fee_to_controller,
        shares,
    })
}

/// Pro-rata reserve payout for burning `shares` out of `supply`.
///
/// Returns 0 when the slice truncates away; the caller decides whether that
/// is an error.
pub fn redemption_payout(
    reserve_balance: u128,
    shares: u128,
    supply: u128,
) -> Result<u128, ModelError> {
    if shares == 0 {
        return Err(ModelError::InvalidAmount);
    }
    if shares > supply {
        return Err(ModelError::InvalidAmount);
    }
    mul_div(reserve_balance, shares, supply)
}

/// Reserve asset per unit of supply, scaled by 1e18. Zero when nothing is outstanding.
pub fn backing_ratio(reserve_balance: u128, supply: u128) -> Result<u128, ModelError> {
    if supply == 0 {
        return Ok(0);
    }
    mul_div(reserve_balance, WAD, supply)
}
