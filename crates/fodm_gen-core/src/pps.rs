// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Pulse-per-second alignment.

use num_bigint::BigInt;
use num_rational::BigRational;

use crate::config::RateConfig;
use crate::epoch::Epoch;
use crate::error::FodmError;
use crate::exact;
use crate::quantize::OverflowPolicy;
use crate::registers::OUTPUT_PPS;

/// First whole-second boundary at or after `current_output_samples`, in
/// output samples relative to the epoch.
pub fn next_pps_sample(current_output_samples: &BigInt, rates: &RateConfig) -> BigInt {
    let rate = BigInt::from(rates.output_sample_rate());
    let seconds = exact::ceil(&BigRational::new(current_output_samples.clone(), rate.clone()));
    seconds * rate
}

/// The `output_PPS` register: the absolute output sample of the next PPS,
/// truncated to its low 32 bits.
pub fn output_pps_register(
    current_output_samples: &BigInt,
    rates: &RateConfig,
    epoch: &Epoch,
) -> Result<u32, FodmError> {
    let absolute = next_pps_sample(current_output_samples, rates) + epoch.output_samples();
    // Wrapping into a 32-bit field always fits.
    OUTPUT_PPS
        .unsigned_from_int(absolute, OverflowPolicy::Wrap)
        .map(|value| value as u32)
}
