// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Reduction of unbounded phase values (in cycles) into `[-0.5, 0.5)`.

use num_bigint::BigInt;
use num_rational::BigRational;

use crate::exact;

/// Map a phase in cycles onto the signed half-open range `[-0.5, 0.5)`.
///
/// Computes `((x mod 1) + 1.5) mod 1 - 0.5` with a Euclidean modulo, so the
/// result does not depend on the sign of `x`.
pub fn reduce(x: &BigRational) -> BigRational {
    let one = exact::integer(1);
    let half = BigRational::new(BigInt::from(1), BigInt::from(2));
    let three_halves = BigRational::new(BigInt::from(3), BigInt::from(2));
    exact::rem_euclid(&(exact::rem_euclid(x, &one) + three_halves), &one) - half
}
