// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Conversion of a delay segment into sample-domain delay terms.
//!
//! The segment's validity interval is mapped onto whole output samples
//! relative to the epoch. The delay rate is combined with the resampling rate
//! and quantized to the layout's `delay_linear` scale. Half of the resulting
//! accumulated quantization error is optionally subtracted from the delay
//! constant so that the error crosses zero in the middle of the interval.

use log::trace;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

use crate::config::{ConverterConfig, DelayRateModel};
use crate::epoch::Epoch;
use crate::error::FodmError;
use crate::exact;
use crate::quantize::quantize;
use crate::registers::DELAY_CONSTANT;
use crate::segment::DelaySegment;

/// Exact and quantized delay terms for one segment.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DelayTerms {
    /// First output sample of the segment, relative to the epoch.
    pub current_output_samples: BigInt,
    /// Number of whole output samples the segment covers.
    pub validity_period_samples: BigInt,
    /// Input samples per output sample, before quantization.
    pub delay_linear: BigRational,
    /// `delay_linear` in register units, already fitted to the layout's field.
    pub delay_linear_register: BigInt,
    /// Accumulated `delay_linear` quantization error over the interval, in
    /// input samples. Zero when redistribution is disabled.
    pub rate_error_samples: BigRational,
    /// Whole input sample at which the segment starts, absolute.
    pub first_input_timestamp: BigInt,
    /// Fractional input sample in units of `2^-32`, in `[0, 2^32)`.
    pub delay_constant: BigInt,
}

/// Compute the delay terms for `segment` relative to `epoch`.
///
/// # Errors
///
/// Returns [`FodmError::InvalidSegmentDuration`] when the segment covers no
/// output samples or more than one second of them, and
/// [`FodmError::RegisterOverflow`] when the quantized delay rate does not fit
/// and the overflow policy is [`OverflowPolicy::Error`](crate::quantize::OverflowPolicy::Error).
pub fn convert_delay(
    segment: &DelaySegment,
    config: &ConverterConfig,
    epoch: &Epoch,
) -> Result<DelayTerms, FodmError> {
    let rates = config.rates();
    let t0 = epoch.as_rational();
    let output_rate = rates.output();

    let current = exact::floor(&((segment.start_time() - &t0) * &output_rate));
    let next = exact::floor(&((segment.end_time() - &t0) * &output_rate));
    let period = &next - &current;
    if !period.is_positive() || period > BigInt::from(rates.output_sample_rate()) {
        return Err(FodmError::InvalidSegmentDuration {
            start_sample: current,
            stop_sample: next,
            max_samples: rates.output_sample_rate(),
        });
    }

    let resampling_rate = rates.resampling_rate();
    let current_input = exact::integer(current.clone()) * &resampling_rate;

    let delay_linear = match config.rate_model() {
        DelayRateModel::Additive => &resampling_rate + segment.delay_linear(),
        DelayRateModel::Multiplicative => {
            &resampling_rate * (exact::integer(1) + segment.delay_linear())
        }
    };

    let field = config.layout().delay_linear_field();
    let delay_linear_register = field.fit(field.quantize(&delay_linear), config.overflow_policy())?;

    let rate_error_samples = if config.redistribute_rate_error() {
        let quantized = exact::integer(delay_linear_register.clone()) / exact::pow2(field.frac_bits);
        (quantized - &delay_linear) * exact::integer(period.clone())
    } else {
        BigRational::zero()
    };

    let delay_constant_input =
        segment.delay_constant() * rates.input() - &rate_error_samples / exact::integer(2);
    let fractional_input = current_input + delay_constant_input;

    // Round once at 2^-32 input samples so a carry out of the fraction lands
    // in the whole sample count.
    let (whole, delay_constant) = exact::split_pow2(
        &quantize(&fractional_input, DELAY_CONSTANT.frac_bits),
        DELAY_CONSTANT.bits,
    );
    let first_input_timestamp = whole + epoch.input_samples();

    trace!(
        "delay terms: output samples {}..{}, delay_linear {} (register {}), rate error {} samples, input {} + {}/2^32",
        current,
        next,
        delay_linear,
        delay_linear_register,
        rate_error_samples,
        first_input_timestamp,
        delay_constant
    );

    Ok(DelayTerms {
        current_output_samples: current,
        validity_period_samples: period,
        delay_linear,
        delay_linear_register,
        rate_error_samples,
        first_input_timestamp,
        delay_constant,
    })
}
