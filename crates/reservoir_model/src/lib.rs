//! Reservoir Model - pure fee, vault and swap-bound arithmetic
//!
//! Every monetary rule of the reservoir engine lives here as a total function
//! over `u128` fixed-point amounts (1e18 scale) using checked arithmetic.
//! Products that may exceed 128 bits go through a 256-bit intermediate.
//!
//! The engine crate imports these functions directly and the Kani harnesses in
//! `crates/proofs/kani` verify them, so there is exactly one copy of the math.

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]

pub mod math;
pub mod fee;
pub mod vault;
pub mod swap;

pub use fee::{split_transfer_fee, TransferFee};
pub use math::{mul_div, U256};
pub use swap::{get_amount_out, min_swap_output};
pub use vault::{backing_ratio, quote_issuance, redemption_payout, IssuanceQuote};

/// Fixed-point scale of every amount (18 decimals)
pub const WAD: u128 = 1_000_000_000_000_000_000;

/// Basis points scale (10,000 bps = 100%)
pub const BPS_SCALE: u128 = 10_000;

/// Transfer and issuance fee (4.5%)
pub const FEE_BPS: u128 = 450;

/// Naive venue output estimate before reserves are known (~0.29% venue fee)
pub const VENUE_ESTIMATE_BPS: u128 = 9_971;

/// Floor applied on top of the reserve-refined swap estimate
pub const MIN_OUTPUT_PERCENT: u128 = 90;

/// Fee charged by the reference constant-product venue (0.30%)
pub const VENUE_FEE_BPS: u128 = 30;

/// Errors for model operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelError {
    /// Amount is zero or below a floor that is not waived
    InvalidAmount,
    /// Pool reserves are empty
    InsufficientLiquidity,
    /// Denominator is zero
    DivisionByZero,
    /// Result does not fit in 128 bits
    Overflow,
}
