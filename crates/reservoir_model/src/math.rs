//! Checked fixed-point helpers with a 256-bit intermediate

use crate::ModelError;
use uint::construct_uint;

construct_uint! {
    /// 256-bit unsigned integer for intermediate products.
    pub struct U256(4);
}

/// Compute `a * b / denominator`, truncating.
///
/// The product is formed in 256 bits, so it never overflows; only a quotient
/// that does not fit back into `u128` is an error.
pub fn mul_div(a: u128, b: u128, denominator: u128) -> Result<u128, ModelError> {
    if denominator == 0 {
        return Err(ModelError::DivisionByZero);
    }

    let product = U256::from(a)
        .checked_mul(U256::from(b))
        .ok_or(ModelError::Overflow)?;
    let quotient = product / U256::from(denominator);

    narrow(quotient)
}

/// Narrow a 256-bit value back to `u128`.
pub fn narrow(value: U256) -> Result<u128, ModelError> {
    if value > U256::from(u128::MAX) {
        return Err(ModelError::Overflow);
    }
    Ok(value.as_u128())
}

/// Checked subtraction mapped onto the model error type.
#[inline]
pub fn sub(a: u128, b: u128) -> Result<u128, ModelError> {
    a.checked_sub(b).ok_or(ModelError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_div_exact() {
        assert_eq!(mul_div(1000, 450, 10_000), Ok(45));
        assert_eq!(mul_div(7, 3, 2), Ok(10));
    }

    #[test]
    fn test_mul_div_wide_product() {
        // (u128::MAX) * 2 / 4 overflows 128 bits in the product but not in the result
        let result = mul_div(u128::MAX, 2, 4).unwrap();
        assert_eq!(result, u128::MAX / 2);
    }

    #[test]
    fn test_mul_div_quotient_overflow() {
        assert_eq!(mul_div(u128::MAX, 2, 1), Err(ModelError::Overflow));
    }

    #[test]
    fn test_mul_div_zero_denominator() {
        assert_eq!(mul_div(1, 1, 0), Err(ModelError::DivisionByZero));
    }
}
