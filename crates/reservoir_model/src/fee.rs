//! Transfer tax split
//!
//! # Properties
//! - **F1**: `burn + controller + swap == fee` exactly (swap is the remainder)
//! - **F2**: `fee + net == amount`
//! - **F3**: fees below the floor are waived, never rounded up

use crate::{math::mul_div, ModelError, BPS_SCALE};

/// Breakdown of a taxed transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferFee {
    /// Total fee taken from the sender
    pub fee: u128,
    /// Burned from the sender (20% of fee)
    pub burn: u128,
    /// Paid to the controller (5% of fee)
    pub controller: u128,
    /// Moved to the contract and swapped into the reserve asset (remainder)
    pub swap: u128,
    /// Credited to the recipient
    pub net: u128,
}

impl TransferFee {
    /// Sum of everything debited from the sender
    pub fn total_debit(&self) -> u128 {
        self.burn + self.controller + self.swap + self.net
    }
}

/// Split the tax on a non-exempt transfer.
///
/// Returns `Ok(None)` when the fee falls below `min_fee`: the whole amount
/// then moves untaxed.
///
/// # Arguments
/// * `amount` - Gross transfer amount
/// * `fee_bps` - Fee rate in basis points (450 = 4.5%)
/// * `min_fee` - Smallest fee that is actually charged
pub fn split_transfer_fee(
    amount: u128,
    fee_bps: u128,
    min_fee: u128,
) -> Result<Option<TransferFee>, ModelError> {
    if amount == 0 {
        return Err(ModelError::InvalidAmount);
    }
    if fee_bps > BPS_SCALE {
        return Err(ModelError::InvalidAmount);
    }

    let fee = mul_div(amount, fee_bps, BPS_SCALE)?;
    if fee < min_fee || fee == 0 {
        return Ok(None);
    }

    let burn = fee * 2 / 10;
    let controller = fee / 20;
    // Remainder, so truncation in the two shares above never leaks value
    let swap = fee - burn - controller;
    let net = amount - fee;

    Ok(Some(TransferFee {
        fee,
        burn,
        controller,
        swap,
        net,
    }))
}
