//! Kani proofs for the swap slippage bound
//!
//! - **S1: Unseeded fallback** - without reserves the bound is the naive estimate
//! - **S2: Bound below pool** - with reserves the bound stays under reserve_out

use reservoir_model::{min_swap_output, MIN_OUTPUT_PERCENT};

/// S1: No reserves means the naive 99.71% estimate
#[kani::proof]
fn s1_unseeded_pool_uses_estimate() {
    let amount: u128 = kani::any();
    kani::assume(amount < 1u128 << 64);

    let bound = min_swap_output(amount, None, MIN_OUTPUT_PERCENT).unwrap();
    assert!(bound == amount * 9_971 / 10_000);
}

/// S2: A refined bound can never ask for more than the pool holds
#[kani::proof]
fn s2_bound_below_reserve_out() {
    let amount: u128 = kani::any();
    let reserve_in: u128 = kani::any();
    let reserve_out: u128 = kani::any();

    kani::assume(amount < 1u128 << 48);
    kani::assume(reserve_in > 0 && reserve_in < 1u128 << 48);
    kani::assume(reserve_out > 0 && reserve_out < 1u128 << 48);

    let bound = min_swap_output(amount, Some((reserve_in, reserve_out)), MIN_OUTPUT_PERCENT).unwrap();
    assert!(bound < reserve_out);
}
