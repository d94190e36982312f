//! Fixed point helpers shared by the executor and the reference routers.
//!
//! Prices and slippage are 18 decimals fixed point values ("wad"). Token amounts keep the
//! precision of their token and are moved between precisions with [`convert_decimals`]. All
//! operations round down and fail instead of wrapping.

use alloy::primitives::{
    utils::{parse_units, ParseUnits},
    U256,
};

use crate::swap::{
    errors::SwapError,
    evm::constants::{MAX_DECIMALS_DIFF, WAD},
};

/// Computes `a * b / denominator`, rounding down.
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256, SwapError> {
    if denominator.is_zero() {
        return Err(SwapError::DivisionByZero);
    }
    let product = a
        .checked_mul(b)
        .ok_or(SwapError::AmountOverflow)?;
    Ok(product / denominator)
}

pub fn wad_mul(a: U256, b: U256) -> Result<U256, SwapError> {
    mul_div(a, b, WAD)
}

pub fn wad_div(a: U256, b: U256) -> Result<U256, SwapError> {
    mul_div(a, WAD, b)
}

fn pow10(exponent: u8) -> Result<U256, SwapError> {
    if exponent > MAX_DECIMALS_DIFF {
        return Err(SwapError::AmountOverflow);
    }
    Ok(U256::from(10u64).pow(U256::from(exponent)))
}

/// Moves `amount` from a token with `from_decimals` to a token with `to_decimals`.
///
/// Scales by `10^(to_decimals - from_decimals)`, in either direction. Going to a lower precision
/// truncates the extra digits.
pub fn convert_decimals(amount: U256, from_decimals: u8, to_decimals: u8) -> Result<U256, SwapError> {
    match from_decimals.cmp(&to_decimals) {
        std::cmp::Ordering::Equal => Ok(amount),
        std::cmp::Ordering::Less => amount
            .checked_mul(pow10(to_decimals - from_decimals)?)
            .ok_or(SwapError::AmountOverflow),
        std::cmp::Ordering::Greater => Ok(amount / pow10(from_decimals - to_decimals)?),
    }
}

/// Minimum acceptable output of an exact input swap.
///
/// `price` is the amount of `token_in` paid for one `token_out`, so the expected output is
/// `amount_in / price`, reduced by `max_slippage` and expressed in `token_out` decimals.
pub fn min_amount_out(
    amount_in: U256,
    decimals_in: u8,
    decimals_out: u8,
    price: U256,
    max_slippage: U256,
) -> Result<U256, SwapError> {
    let expected = amount_out_at_price(amount_in, decimals_in, decimals_out, price)?;
    wad_mul(expected, WAD.saturating_sub(max_slippage))
}

/// Output of `amount_in` at `price`, in `token_out` decimals.
///
/// Scaling up happens before the division and scaling down after it, so digits below the output
/// precision still take part in the division.
pub fn amount_out_at_price(
    amount_in: U256,
    decimals_in: u8,
    decimals_out: u8,
    price: U256,
) -> Result<U256, SwapError> {
    if decimals_in > decimals_out {
        return convert_decimals(wad_div(amount_in, price)?, decimals_in, decimals_out);
    }
    wad_div(convert_decimals(amount_in, decimals_in, decimals_out)?, price)
}

/// Maximum acceptable input of an exact output swap.
///
/// The expected input is `amount_out * price`, increased by `max_slippage` and expressed in
/// `token_in` decimals.
pub fn max_amount_in(
    amount_out: U256,
    decimals_in: u8,
    decimals_out: u8,
    price: U256,
    max_slippage: U256,
) -> Result<U256, SwapError> {
    let amount_out = convert_decimals(amount_out, decimals_out, decimals_in)?;
    let expected = wad_mul(amount_out, price)?;
    let factor = WAD
        .checked_add(max_slippage)
        .ok_or(SwapError::AmountOverflow)?;
    wad_mul(expected, factor)
}

/// Parses a human readable decimal amount ("0.65", "1000") into a fixed point integer with the
/// given number of decimals.
pub fn parse_amount(value: &str, decimals: u8) -> Result<U256, SwapError> {
    match parse_units(value, decimals)? {
        ParseUnits::U256(amount) => Ok(amount),
        ParseUnits::I256(_) => {
            Err(SwapError::InvalidInput(format!("Amount {value} cannot be negative")))
        }
    }
}
