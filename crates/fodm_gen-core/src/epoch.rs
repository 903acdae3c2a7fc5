// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Sample-domain origin for a conversion run.
//!
//! The epoch is the whole second at or before the run's reference start time.
//! Sample counts are kept relative to it so that the exact intermediate
//! values stay small.

use num_bigint::BigInt;
use num_rational::BigRational;

use crate::config::RateConfig;
use crate::exact;

/// Whole-second time origin, expressed in seconds and in samples at both rates.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Epoch {
    seconds: BigInt,
    input_samples: BigInt,
    output_samples: BigInt,
}

impl Epoch {
    /// Compute the epoch for a run starting at `start_time` seconds.
    pub fn from_start_time(start_time: &BigRational, rates: &RateConfig) -> Self {
        let seconds = exact::floor(start_time);
        Epoch {
            input_samples: &seconds * rates.input_sample_rate(),
            output_samples: &seconds * rates.output_sample_rate(),
            seconds,
        }
    }

    /// Epoch in whole seconds.
    pub fn seconds(&self) -> &BigInt {
        &self.seconds
    }

    /// Epoch in input samples.
    pub fn input_samples(&self) -> &BigInt {
        &self.input_samples
    }

    /// Epoch in output samples.
    pub fn output_samples(&self) -> &BigInt {
        &self.output_samples
    }

    /// Epoch as an exact rational number of seconds.
    pub fn as_rational(&self) -> BigRational {
        BigRational::from_integer(self.seconds.clone())
    }
}
