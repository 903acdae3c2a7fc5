// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Fixed-point quantization into register fields.
//!
//! A [`Field`] describes one register field: its width, signedness and the
//! number of fractional bits (the scale is `2^frac_bits`). Quantization
//! rounds half to even; fitting the result into the field is governed by an
//! [`OverflowPolicy`].

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, ToPrimitive};

use crate::error::FodmError;
use crate::exact;

/// What to do when a rounded value does not fit its register field.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum OverflowPolicy {
    /// Report [`FodmError::RegisterOverflow`].
    #[default]
    Error,
    /// Clamp to the nearest representable value.
    Saturate,
    /// Keep the low `bits` bits (two's complement for signed fields).
    Wrap,
}

/// Layout of a single register field.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Field {
    /// Register field name, used in error messages.
    pub name: &'static str,
    /// Field width in bits (at most 64).
    pub bits: u32,
    /// Whether the field holds a two's complement value.
    pub signed: bool,
    /// Number of fractional bits; the quantization scale is `2^frac_bits`.
    pub frac_bits: u32,
}

impl Field {
    /// An unsigned field of `bits` bits with `frac_bits` fractional bits.
    pub const fn unsigned(name: &'static str, bits: u32, frac_bits: u32) -> Self {
        Field {
            name,
            bits,
            signed: false,
            frac_bits,
        }
    }

    /// A signed field of `bits` bits with `frac_bits` fractional bits.
    pub const fn signed(name: &'static str, bits: u32, frac_bits: u32) -> Self {
        Field {
            name,
            bits,
            signed: true,
            frac_bits,
        }
    }

    /// Smallest representable raw value.
    pub fn min(&self) -> BigInt {
        if self.signed {
            -(BigInt::one() << (self.bits - 1) as usize)
        } else {
            BigInt::from(0u32)
        }
    }

    /// Largest representable raw value.
    pub fn max(&self) -> BigInt {
        let magnitude_bits = if self.signed { self.bits - 1 } else { self.bits };
        (BigInt::one() << magnitude_bits as usize) - 1u32
    }

    /// Scale `x` by `2^frac_bits` and round half to even. No range check.
    pub fn quantize(&self, x: &BigRational) -> BigInt {
        quantize(x, self.frac_bits)
    }

    /// Bring an already rounded value into range according to `policy`.
    pub fn fit(&self, raw: BigInt, policy: OverflowPolicy) -> Result<BigInt, FodmError> {
        let (min, max) = (self.min(), self.max());
        if raw >= min && raw <= max {
            return Ok(raw);
        }
        match policy {
            OverflowPolicy::Error => Err(FodmError::RegisterOverflow {
                field: self.name,
                value: raw,
            }),
            OverflowPolicy::Saturate => Ok(if raw < min { min } else { max }),
            OverflowPolicy::Wrap => {
                let (_, low) = exact::split_pow2(&raw, self.bits);
                if self.signed && low > max {
                    Ok(low - (BigInt::one() << self.bits as usize))
                } else {
                    Ok(low)
                }
            }
        }
    }

    /// Quantize `x` and encode it as an unsigned register value.
    ///
    /// Must only be called on unsigned fields.
    pub fn encode_unsigned(&self, x: &BigRational, policy: OverflowPolicy) -> Result<u64, FodmError> {
        debug_assert!(!self.signed, "{} is a signed field", self.name);
        self.unsigned_from_int(self.quantize(x), policy)
    }

    /// Quantize `x` and encode it as a signed register value.
    ///
    /// Must only be called on signed fields.
    pub fn encode_signed(&self, x: &BigRational, policy: OverflowPolicy) -> Result<i64, FodmError> {
        debug_assert!(self.signed, "{} is an unsigned field", self.name);
        self.signed_from_int(self.quantize(x), policy)
    }

    /// Encode an integer value (already in register units) as unsigned.
    pub fn unsigned_from_int(&self, raw: BigInt, policy: OverflowPolicy) -> Result<u64, FodmError> {
        let fitted = self.fit(raw, policy)?;
        fitted.to_u64().ok_or(FodmError::RegisterOverflow {
            field: self.name,
            value: fitted,
        })
    }

    /// Encode an integer value (already in register units) as signed.
    pub fn signed_from_int(&self, raw: BigInt, policy: OverflowPolicy) -> Result<i64, FodmError> {
        let fitted = self.fit(raw, policy)?;
        fitted.to_i64().ok_or(FodmError::RegisterOverflow {
            field: self.name,
            value: fitted,
        })
    }
}

/// `round_half_to_even(x * 2^frac_bits)`.
pub fn quantize(x: &BigRational, frac_bits: u32) -> BigInt {
    exact::round_half_even(&(x * exact::pow2(frac_bits)))
}
