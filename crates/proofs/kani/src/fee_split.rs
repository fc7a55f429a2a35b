//! Kani proofs for the transfer tax split
//!
//! - **F1: Exact split** - burn + controller + swap == fee
//! - **F2: Conservation** - every debited unit lands in exactly one bucket
//! - **F3: Floor waiver** - a fee below the floor is never charged

use reservoir_model::{split_transfer_fee, FEE_BPS};

/// F1 + F2: the three shares sum to the fee and the fee plus net sum to the amount
#[kani::proof]
fn f1_f2_split_conserves_amount() {
    let amount: u128 = kani::any();
    let min_fee: u128 = kani::any();

    kani::assume(amount > 0 && amount < 1u128 << 100);
    kani::assume(min_fee < 1u128 << 64);

    if let Ok(Some(split)) = split_transfer_fee(amount, FEE_BPS, min_fee) {
        assert!(split.burn + split.controller + split.swap == split.fee,
            "F1: shares must sum to the fee");
        assert!(split.fee + split.net == amount, "F2: fee + net must equal amount");
        assert!(split.swap >= split.burn, "swap share is the largest bucket");
    }
}

/// F3: waived transfers only happen when the computed fee is below the floor
#[kani::proof]
fn f3_waiver_only_below_floor() {
    let amount: u128 = kani::any();
    let min_fee: u128 = kani::any();

    kani::assume(amount > 0 && amount < 1u128 << 64);
    kani::assume(min_fee > 0 && min_fee < 1u128 << 64);

    let fee = amount * FEE_BPS / 10_000;
    match split_transfer_fee(amount, FEE_BPS, min_fee) {
        Ok(None) => assert!(fee < min_fee, "F3: only sub-floor fees are waived"),
        Ok(Some(split)) => assert!(split.fee >= min_fee, "F3: charged fee respects floor"),
        Err(_) => unreachable!("non-zero amounts never fail"),
    }
}
