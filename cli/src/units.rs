//! Token amount parsing and formatting
//!
//! Amounts are written in token units with up to 18 decimals (`12.5`), or
//! in raw base units with a `wei` suffix (`1000wei`).

use reservoir::{Amount, WAD};
use thiserror::Error;

const DECIMALS: usize = 18;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AmountError {
    #[error("empty amount")]
    Empty,

    #[error("invalid amount: {0}")]
    Invalid(String),

    #[error("more than 18 decimal places: {0}")]
    TooPrecise(String),

    #[error("amount too large: {0}")]
    Overflow(String),
}

pub fn parse_amount(text: &str) -> Result<Amount, AmountError> {
    let text = text.trim().replace('_', "");
    if text.is_empty() {
        return Err(AmountError::Empty);
    }

    if let Some(raw) = text.strip_suffix("wei") {
        return raw
            .parse::<Amount>()
            .map_err(|_| AmountError::Invalid(text.clone()));
    }

    let (whole, fraction) = match text.split_once('.') {
        Some((w, f)) => (w, f),
        None => (text.as_str(), ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(AmountError::Invalid(text.clone()));
    }
    let all_digits = |s: &str| s.chars().all(|ch| ch.is_ascii_digit());
    if !all_digits(whole) || !all_digits(fraction) {
        return Err(AmountError::Invalid(text.clone()));
    }
    if fraction.len() > DECIMALS {
        return Err(AmountError::TooPrecise(text.clone()));
    }

    let whole: Amount = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| AmountError::Overflow(text.clone()))?
    };
    let fraction: Amount = if fraction.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", fraction, width = DECIMALS);
        padded.parse().map_err(|_| AmountError::Invalid(text.clone()))?
    };

    whole
        .checked_mul(WAD)
        .and_then(|w| w.checked_add(fraction))
        .ok_or(AmountError::Overflow(text))
}

/// `955000000000000000000` -> `955`, `2250000000000000000` -> `2.25`
pub fn format_amount(amount: Amount) -> String {
    let whole = amount / WAD;
    let fraction = amount % WAD;
    if fraction == 0 {
        return whole.to_string();
    }
    let digits = format!("{:0>width$}", fraction, width = DECIMALS);
    format!("{whole}.{}", digits.trim_end_matches('0'))
}

/// Basis points as a percentage string
pub fn format_bps(bps: u128) -> String {
    format!("{}.{:02}%", bps / 100, bps % 100)
}
