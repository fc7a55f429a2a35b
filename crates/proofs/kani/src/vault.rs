//! Kani proofs for issuance and redemption
//!
//! - **V1: Issuance conservation** - shares + fee == deposit, halves sum to fee
//! - **V2: Redemption bound** - payout never exceeds the reserve
//! - **V3: Monotone payout** - redeeming more shares never pays less

use reservoir_model::{quote_issuance, redemption_payout, FEE_BPS};

/// V1: Issuance splits the deposit exactly
#[kani::proof]
fn v1_issuance_conserves_deposit() {
    let deposit: u128 = kani::any();
    kani::assume(deposit > 0 && deposit < 1u128 << 100);

    if let Ok(quote) = quote_issuance(deposit, FEE_BPS, 0) {
        assert!(quote.shares + quote.fee == deposit);
        assert!(quote.fee_to_contract + quote.fee_to_controller == quote.fee);
        assert!(quote.fee_to_controller >= quote.fee_to_contract);
    }
}

/// V2: A redemption can never extract more than the reserve holds
#[kani::proof]
fn v2_payout_bounded_by_reserve() {
    let reserve: u128 = kani::any();
    let shares: u128 = kani::any();
    let supply: u128 = kani::any();

    kani::assume(reserve < 1u128 << 64);
    kani::assume(supply > 0 && supply < 1u128 << 64);
    kani::assume(shares > 0 && shares <= supply);

    let payout = redemption_payout(reserve, shares, supply).unwrap();
    assert!(payout <= reserve, "V2: payout must not exceed reserve");
}

/// V3: Payout is monotone in the number of shares
#[kani::proof]
fn v3_payout_monotone_in_shares() {
    let reserve: u128 = kani::any();
    let supply: u128 = kani::any();
    let small: u128 = kani::any();
    let large: u128 = kani::any();

    kani::assume(reserve < 1u128 << 64);
    kani::assume(supply > 0 && supply < 1u128 << 32);
    kani::assume(small > 0 && small <= large && large <= supply);

    let a = redemption_payout(reserve, small, supply).unwrap();
    let b = redemption_payout(reserve, large, supply).unwrap();
    assert!(a <= b, "V3: more shares never pay less");
}
