//! Swap slippage bound and constant product output (x·y=k)

use crate::{
    math::{mul_div, narrow, U256},
    ModelError, BPS_SCALE, VENUE_ESTIMATE_BPS,
};

/// Minimum acceptable reserve-asset output for swapping `amount_in`.
///
/// Starts from a naive `amount_in * 9971 / 10000` estimate. When live pool
/// reserves `(reserve_in, reserve_out)` are known and both non-zero, the
/// estimate is refined as
/// `estimate * reserve_out / (reserve_in * 10000 + estimate)` and floored to
/// `min_output_percent` of the refined value. Unseeded pools use the naive
/// estimate directly.
pub fn min_swap_output(
    amount_in: u128,
    reserves: Option<(u128, u128)>,
    min_output_percent: u128,
) -> Result<u128, ModelError> {
    let estimate = mul_div(amount_in, VENUE_ESTIMATE_BPS, BPS_SCALE)?;

    let (reserve_in, reserve_out) = match reserves {
        Some((r_in, r_out)) if r_in > 0 && r_out > 0 => (r_in, r_out),
        _ => return Ok(estimate),
    };

    let denominator = U256::from(reserve_in)
        .checked_mul(U256::from(BPS_SCALE))
        .and_then(|d| d.checked_add(U256::from(estimate)))
        .ok_or(ModelError::Overflow)?;
    let numerator = U256::from(estimate)
        .checked_mul(U256::from(reserve_out))
        .ok_or(ModelError::Overflow)?;
    let refined = narrow(numerator / denominator)?;

    mul_div(refined, min_output_percent, 100)
}

/// Output of a constant product pool for an exact input, fee taken on input.
///
/// `out = in·(10000 - fee)·r_out / (r_in·10000 + in·(10000 - fee))`
pub fn get_amount_out(
    amount_in: u128,
    reserve_in: u128,
    reserve_out: u128,
    fee_bps: u128,
) -> Result<u128, ModelError> {
    if amount_in == 0 {
        return Err(ModelError::InvalidAmount);
    }
    if reserve_in == 0 || reserve_out == 0 {
        return Err(ModelError::InsufficientLiquidity);
    }
    if fee_bps >= BPS_SCALE {
        return Err(ModelError::InvalidAmount);
    }

    let in_with_fee = U256::from(amount_in) * U256::from(BPS_SCALE - fee_bps);
    let numerator = in_with_fee
        .checked_mul(U256::from(reserve_out))
        .ok_or(ModelError::Overflow)?;
    let denominator = U256::from(reserve_in) * U256::from(BPS_SCALE) + in_with_fee;

    narrow(numerator / denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MIN_OUTPUT_PERCENT, VENUE_FEE_BPS, WAD};
    use proptest::prelude::*;

    #[test]
    fn test_bound_without_reserves_is_naive_estimate() {
        let bound = min_swap_output(10_000, None, MIN_OUTPUT_PERCENT).unwrap();
        assert_eq!(bound, 9_971);
    }

    #[test]
    fn test_bound_with_empty_pool_is_naive_estimate() {
        let bound = min_swap_output(10_000, Some((0, 5_000)), MIN_OUTPUT_PERCENT).unwrap();
        assert_eq!(bound, 9_971);
    }

    #[test]
    fn test_bound_with_reserves() {
        // estimate = 9971; refined = 9971 * 2_000_000 / (1_000_000 * 10000 + 9971) = 1
        // (19_942_000_000 / 10_000_009_971 = 1)
        let bound = min_swap_output(10_000, Some((1_000_000, 2_000_000)), MIN_OUTPUT_PERCENT).unwrap();
        assert_eq!(bound, 0);

        // estimate = 99.71e18
        // refined = 99.71e18 * 2_000e18 / (1_000e18 * 10000 + 99.71e18)
        let bound = min_swap_output(100 * WAD, Some((1_000 * WAD, 2_000 * WAD)), 100).unwrap();
        assert_eq!(bound, 19_941_801_160_300_630);
    }

    #[test]
    fn test_bound_is_ninety_percent_of_refined() {
        let reserves = Some((10 * WAD, 10_000_000 * WAD));
        let full = min_swap_output(5 * WAD, reserves, 100).unwrap();
        let floored = min_swap_output(5 * WAD, reserves, MIN_OUTPUT_PERCENT).unwrap();
        assert_eq!(full, 498_525_146_028_844_731_945);
        assert_eq!(floored, 448_672_631_425_960_258_750);
    }

    #[test]
    fn test_amount_out_standard_pool() {
        // 1000 in against 1_000_000 / 1_000_000 with 30 bps fee
        let out = get_amount_out(1000, 1_000_000, 1_000_000, VENUE_FEE_BPS).unwrap();
        // 9_970_000 * 1_000_000 / (10_000_000_000 + 9_970_000) = 996
        assert_eq!(out, 996);
    }

    #[test]
    fn test_amount_out_empty_pool() {
        assert_eq!(
            get_amount_out(1000, 0, 1_000_000, VENUE_FEE_BPS),
            Err(ModelError::InsufficientLiquidity)
        );
    }

    proptest! {
        #[test]
        fn prop_amount_out_below_reserve(
            amount_in in 1u128..1_000_000_000_000_000_000_000u128,
            reserve_in in 1u128..1_000_000_000_000_000_000_000u128,
            reserve_out in 1u128..1_000_000_000_000_000_000_000u128,
        ) {
            let out = get_amount_out(amount_in, reserve_in, reserve_out, VENUE_FEE_BPS).unwrap();
            prop_assert!(out < reserve_out);
        }

        #[test]
        fn prop_bound_within_reserve_out(
            amount_in in 1u128..1_000_000_000_000_000_000_000u128,
            reserve_in in 0u128..1_000_000_000_000_000_000_000u128,
            reserve_out in 0u128..1_000_000_000_000_000_000_000u128,
        ) {
            let naive = min_swap_output(amount_in, None, MIN_OUTPUT_PERCENT).unwrap();
            let bound = min_swap_output(amount_in, Some((reserve_in, reserve_out)), MIN_OUTPUT_PERCENT).unwrap();
            if reserve_in > 0 && reserve_out > 0 {
                prop_assert!(bound <= reserve_out);
            } else {
                prop_assert_eq!(bound, naive);
            }
        }
    }
}
