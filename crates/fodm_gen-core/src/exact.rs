// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Exact rational helpers used throughout the conversion.
//!
//! Every intermediate value is a [`BigRational`]; the only lossy step is the
//! final rounding into a register field. Decimal text (as found in delay
//! tables) is parsed without passing through binary floating point.

use core::cmp::Ordering;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use crate::error::FodmError;

// Decimal exponents beyond this are rejected rather than expanded.
const MAX_DECIMAL_EXPONENT: u32 = 4096;

/// Parse decimal text such as `-84141.202861`, `1e9` or `+2.5E-3` exactly.
///
/// Leading and trailing whitespace is ignored. At least one digit must be
/// present in the mantissa.
pub fn parse_decimal(text: &str) -> Result<BigRational, FodmError> {
    let invalid = || FodmError::InvalidNumber {
        text: text.to_string(),
    };
    let trimmed = text.trim();

    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(pos) => {
            let exp: i32 = unsigned[pos + 1..].parse().map_err(|_| invalid())?;
            (&unsigned[..pos], exp)
        }
        None => (unsigned, 0),
    };
    if exponent.unsigned_abs() > MAX_DECIMAL_EXPONENT {
        return Err(invalid());
    }

    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((i, f)) => (i, f),
        None => (mantissa, ""),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (int_part.is_empty() && frac_part.is_empty()) || !all_digits(int_part) || !all_digits(frac_part)
    {
        return Err(invalid());
    }

    let digits = format!("{}{}", int_part, frac_part);
    let mut numer = BigInt::parse_bytes(digits.as_bytes(), 10).ok_or_else(invalid)?;
    if negative {
        numer = -numer;
    }

    let scale = exponent - frac_part.len() as i32;
    let ten = BigInt::from(10u32);
    let value = if scale >= 0 {
        BigRational::from_integer(numer * ten.pow(scale.unsigned_abs()))
    } else {
        BigRational::new(numer, ten.pow(scale.unsigned_abs()))
    };
    Ok(value)
}

/// Exact rational from an integer.
pub fn integer(value: impl Into<BigInt>) -> BigRational {
    BigRational::from_integer(value.into())
}

/// `2^bits` as an exact rational.
pub fn pow2(bits: u32) -> BigRational {
    BigRational::from_integer(BigInt::one() << bits as usize)
}

/// Largest integer not greater than `x`.
pub fn floor(x: &BigRational) -> BigInt {
    x.floor().to_integer()
}

/// Smallest integer not less than `x`.
pub fn ceil(x: &BigRational) -> BigInt {
    x.ceil().to_integer()
}

/// Round to the nearest integer, ties to even.
pub fn round_half_even(x: &BigRational) -> BigInt {
    let below = floor(x);
    let remainder = x - BigRational::from_integer(below.clone());
    let half = BigRational::new(BigInt::one(), BigInt::from(2u32));
    match remainder.cmp(&half) {
        Ordering::Less => below,
        Ordering::Greater => below + 1u32,
        Ordering::Equal if below.is_even() => below,
        Ordering::Equal => below + 1u32,
    }
}

/// Euclidean remainder: the result has the sign of `modulus` and magnitude
/// below it, regardless of the sign of `x`.
///
/// # Panics
///
/// Panics if `modulus` is zero.
pub fn rem_euclid(x: &BigRational, modulus: &BigRational) -> BigRational {
    assert!(!modulus.is_zero(), "rem_euclid by zero");
    let quotient = (x / modulus).floor();
    let rem = x - quotient * modulus;
    if modulus.is_negative() && rem.is_positive() {
        rem + modulus
    } else {
        rem
    }
}

/// Split an integer into its floor quotient and non-negative remainder by `2^bits`.
pub fn split_pow2(value: &BigInt, bits: u32) -> (BigInt, BigInt) {
    let divisor = BigInt::one() << bits as usize;
    value.div_mod_floor(&divisor)
}
