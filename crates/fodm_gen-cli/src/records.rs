// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Row types of the tabular delay model interchange.
//!
//! Input columns are matched by name, so their order does not matter and
//! extra columns are ignored. Numbers are kept as text until they are parsed
//! exactly by [`fodm_core::exact::parse_decimal`].

use fodm_core::exact::{integer, parse_decimal};
use fodm_core::{BigRational, DelaySegment, FodmError, FrequencyShift, RateConfig, RegisterValues};
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Output column names, in order.
pub const OUTPUT_COLUMNS: [&str; 8] = [
    "first_input_timestamp",
    "delay_constant",
    "phase_constant",
    "delay_linear",
    "phase_linear",
    "validity_period",
    "output_PPS",
    "first_output_timestamp",
];

/// One row of an input delay table, as text.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct InputRecord {
    /// Delay constant in nanoseconds.
    pub fo_delay_const: String,
    /// Delay rate in nanoseconds per second.
    pub fo_delay_linear: String,
    /// Segment start in milliseconds.
    pub fodm_start_t: String,
    /// Segment stop in milliseconds.
    pub fodm_stop_t: String,
    /// Reference start time of the higher order model, in milliseconds.
    pub hodm_start_t: String,
    /// Input sample rate in Hz.
    pub input_sample_rate: String,
    /// Output sample rate in Hz.
    pub output_sample_rate: String,
    /// Wideband shift in Hz.
    pub f_wb: String,
    /// Alignment shift in Hz.
    pub f_as: String,
    /// Down shift in Hz.
    pub f_ds: String,
    /// Sample clock frequency offset shift in Hz.
    pub f_scfo: String,
}

/// A parsed input row: everything needed for one single-segment run.
#[derive(Clone, Debug, PartialEq)]
pub struct DelayRun {
    /// Sample rates for the run.
    pub rates: RateConfig,
    /// Reference start time in seconds.
    pub start_time: BigRational,
    /// The segment to convert.
    pub segment: DelaySegment,
    /// Frequency shifts, already in register sign convention.
    pub shift: FrequencyShift,
}

impl InputRecord {
    /// Parse every column exactly.
    pub fn parse(&self) -> Result<DelayRun, FodmError> {
        let rates = RateConfig::new(
            parse_rate(&self.input_sample_rate)?,
            parse_rate(&self.output_sample_rate)?,
        )?;
        let start_time = parse_decimal(&self.hodm_start_t)? / integer(1_000);
        let segment = DelaySegment::from_model_units(
            parse_decimal(&self.fo_delay_const)?,
            parse_decimal(&self.fo_delay_linear)?,
            parse_decimal(&self.fodm_start_t)?,
            parse_decimal(&self.fodm_stop_t)?,
        );
        let shift = FrequencyShift::Explicit {
            f_wb: parse_decimal(&self.f_wb)?,
            f_as: parse_decimal(&self.f_as)?,
            f_ds: parse_decimal(&self.f_ds)?,
            f_scfo: parse_decimal(&self.f_scfo)?,
        };
        Ok(DelayRun {
            rates,
            start_time,
            segment,
            shift,
        })
    }
}

// Rates may be written as `220200960` or `2.2020096e8` but must be whole.
fn parse_rate(text: &str) -> Result<u32, FodmError> {
    let value = parse_decimal(text)?;
    if !value.is_integer() {
        return Err(FodmError::InvalidNumber {
            text: text.to_string(),
        });
    }
    value.to_integer().to_u32().ok_or_else(|| FodmError::InvalidNumber {
        text: text.to_string(),
    })
}

/// One row of an output register table.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct OutputRecord {
    /// See [`RegisterValues::first_input_timestamp`].
    pub first_input_timestamp: u64,
    /// See [`RegisterValues::delay_constant`].
    pub delay_constant: u32,
    /// See [`RegisterValues::phase_constant`].
    pub phase_constant: i32,
    /// See [`RegisterValues::delay_linear`].
    pub delay_linear: u64,
    /// See [`RegisterValues::phase_linear`].
    pub phase_linear: i64,
    /// See [`RegisterValues::validity_period`].
    pub validity_period: u32,
    /// See [`RegisterValues::output_pps`].
    #[serde(rename = "output_PPS")]
    pub output_pps: u32,
    /// See [`RegisterValues::first_output_timestamp`].
    pub first_output_timestamp: u64,
}

impl From<RegisterValues> for OutputRecord {
    fn from(values: RegisterValues) -> Self {
        OutputRecord {
            first_input_timestamp: values.first_input_timestamp,
            delay_constant: values.delay_constant,
            phase_constant: values.phase_constant,
            delay_linear: values.delay_linear,
            phase_linear: values.phase_linear,
            validity_period: values.validity_period,
            output_pps: values.output_pps,
            first_output_timestamp: values.first_output_timestamp,
        }
    }
}
