// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! First order delay model segments.

use num_bigint::BigInt;
use num_rational::BigRational;

/// One piece of a piecewise-linear delay model, valid on `[start_time, end_time)`.
///
/// All quantities are in SI units: seconds for the delay and the times,
/// seconds per second for the delay rate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DelaySegment {
    delay_constant: BigRational,
    delay_linear: BigRational,
    start_time: BigRational,
    end_time: BigRational,
}

impl DelaySegment {
    /// Create a segment from values already in seconds.
    pub fn new(
        delay_constant: BigRational,
        delay_linear: BigRational,
        start_time: BigRational,
        end_time: BigRational,
    ) -> Self {
        DelaySegment {
            delay_constant,
            delay_linear,
            start_time,
            end_time,
        }
    }

    /// Create a segment from delay table units: delay in nanoseconds, delay
    /// rate in nanoseconds per second and times in milliseconds.
    pub fn from_model_units(
        delay_ns: BigRational,
        rate_ns_per_s: BigRational,
        start_ms: BigRational,
        stop_ms: BigRational,
    ) -> Self {
        let nano = BigInt::from(1_000_000_000u32);
        let milli = BigInt::from(1_000u32);
        DelaySegment {
            delay_constant: delay_ns / nano.clone(),
            delay_linear: rate_ns_per_s / nano,
            start_time: start_ms / milli.clone(),
            end_time: stop_ms / milli,
        }
    }

    /// Delay at `start_time`, in seconds.
    pub fn delay_constant(&self) -> &BigRational {
        &self.delay_constant
    }

    /// Delay rate, in seconds per second.
    pub fn delay_linear(&self) -> &BigRational {
        &self.delay_linear
    }

    /// Start of validity, in seconds.
    pub fn start_time(&self) -> &BigRational {
        &self.start_time
    }

    /// End of validity (exclusive), in seconds.
    pub fn end_time(&self) -> &BigRational {
        &self.end_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exact::{integer, parse_decimal};

    #[test]
    fn model_units_are_scaled_to_seconds() {
        let seg = DelaySegment::from_model_units(
            parse_decimal("-84141.202861").unwrap(),
            parse_decimal("-9.034271527").unwrap(),
            integer(770_535_685_740i64),
            integer(770_535_685_750i64),
        );
        assert_eq!(
            *seg.delay_constant(),
            BigRational::new(BigInt::from(-84_141_202_861i64), BigInt::from(10i64.pow(15)))
        );
        assert_eq!(
            *seg.delay_linear(),
            BigRational::new(BigInt::from(-9_034_271_527i64), BigInt::from(10i64.pow(18)))
        );
        assert_eq!(
            *seg.start_time(),
            BigRational::new(BigInt::from(77_053_568_574i64), BigInt::from(100))
        );
        assert_eq!(*seg.end_time(), integer(770_535_685_750i64) / BigInt::from(1000));
    }
}
