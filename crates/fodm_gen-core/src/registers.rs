// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! FODM register layouts and assembly of one register record per segment.
//!
//! Two layouts exist. The narrow layout holds the linear terms in 32-bit
//! fields with 31 fractional bits; the wide layout widens them to 64 bits
//! with 63 fractional bits. All other fields are the same in both.
//!
//! | Field | Narrow | Wide |
//! |---|---|---|
//! | `first_input_timestamp` | u64 | u64 |
//! | `delay_constant` | u32, 2^-32 input samples | same |
//! | `phase_constant` | i32, 2^-31 cycles | same |
//! | `delay_linear` | u32, 2^-31 | u64, 2^-63 |
//! | `phase_linear` | i32, 2^-31 cycles | i64, 2^-63 cycles |
//! | `validity_period` | u32, samples minus one | same |
//! | `output_PPS` | u32, low bits of sample index | same |
//! | `first_output_timestamp` | u64 | u64 |

use log::trace;

use crate::config::ConverterConfig;
use crate::delay::convert_delay;
use crate::epoch::Epoch;
use crate::error::FodmError;
use crate::phase_model::compute_phase;
use crate::pps::output_pps_register;
use crate::quantize::{Field, OverflowPolicy};
use crate::segment::DelaySegment;

/// Absolute input sample at which the segment starts.
pub const FIRST_INPUT_TIMESTAMP: Field = Field::unsigned("first_input_timestamp", 64, 0);
/// Fractional input sample delay.
pub const DELAY_CONSTANT: Field = Field::unsigned("delay_constant", 32, 32);
/// Phase at the first output sample.
pub const PHASE_CONSTANT: Field = Field::signed("phase_constant", 32, 31);
/// Output samples in the segment, minus one.
pub const VALIDITY_PERIOD: Field = Field::unsigned("validity_period", 32, 0);
/// Low 32 bits of the output sample index of the next PPS.
pub const OUTPUT_PPS: Field = Field::unsigned("output_PPS", 32, 0);
/// Absolute output sample at which the segment starts.
pub const FIRST_OUTPUT_TIMESTAMP: Field = Field::unsigned("first_output_timestamp", 64, 0);

const NARROW_DELAY_LINEAR: Field = Field::unsigned("delay_linear", 32, 31);
const WIDE_DELAY_LINEAR: Field = Field::unsigned("delay_linear", 64, 63);
const NARROW_PHASE_LINEAR: Field = Field::signed("phase_linear", 32, 31);
const WIDE_PHASE_LINEAR: Field = Field::signed("phase_linear", 64, 63);

/// Width of the linear-term register fields.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum RegisterLayout {
    /// 32-bit linear terms with 31 fractional bits.
    Narrow,
    /// 64-bit linear terms with 63 fractional bits.
    #[default]
    Wide,
}

impl RegisterLayout {
    /// The `delay_linear` field for this layout.
    pub fn delay_linear_field(self) -> Field {
        match self {
            RegisterLayout::Narrow => NARROW_DELAY_LINEAR,
            RegisterLayout::Wide => WIDE_DELAY_LINEAR,
        }
    }

    /// The `phase_linear` field for this layout.
    pub fn phase_linear_field(self) -> Field {
        match self {
            RegisterLayout::Narrow => NARROW_PHASE_LINEAR,
            RegisterLayout::Wide => WIDE_PHASE_LINEAR,
        }
    }
}

/// Register values for one segment.
///
/// Integer widths follow the wide layout; narrow layout values fit in the
/// low 32 bits of the linear terms.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct RegisterValues {
    /// Absolute input sample at which the segment starts.
    pub first_input_timestamp: u64,
    /// Fractional input sample delay, in 2^-32 samples.
    pub delay_constant: u32,
    /// Phase at the first output sample, in 2^-31 cycles.
    pub phase_constant: i32,
    /// Input samples per output sample, in 2^-31 (narrow) or 2^-63 (wide).
    pub delay_linear: u64,
    /// Phase per output sample, in 2^-31 (narrow) or 2^-63 (wide) cycles.
    pub phase_linear: i64,
    /// Output samples covered by the segment, minus one.
    pub validity_period: u32,
    /// Low 32 bits of the absolute output sample of the next PPS.
    pub output_pps: u32,
    /// Absolute output sample at which the segment starts.
    pub first_output_timestamp: u64,
}

impl RegisterValues {
    /// Number of output samples covered by the segment.
    pub fn validity_period_samples(&self) -> u64 {
        u64::from(self.validity_period) + 1
    }
}

/// Compute the register record for a single segment.
///
/// # Errors
///
/// Propagates [`FodmError::InvalidSegmentDuration`] for segments outside
/// `(0, 1]` seconds of output samples and [`FodmError::RegisterOverflow`]
/// when a checked field does not fit under the configured overflow policy.
pub fn compute_register_values(
    segment: &DelaySegment,
    config: &ConverterConfig,
    epoch: &Epoch,
) -> Result<RegisterValues, FodmError> {
    let delay = convert_delay(segment, config, epoch)?;
    let phase = compute_phase(segment, config, &delay, epoch);
    trace!(
        "phase terms: constant {} cycles, linear {} cycles/sample",
        phase.phase_constant,
        phase.phase_linear
    );

    let policy = config.overflow_policy();
    let layout = config.layout();

    // 32-bit fields are range-checked (or wrapped) first, so the casts below are lossless.
    let values = RegisterValues {
        first_input_timestamp: FIRST_INPUT_TIMESTAMP
            .unsigned_from_int(delay.first_input_timestamp.clone(), policy)?,
        delay_constant: DELAY_CONSTANT
            .unsigned_from_int(delay.delay_constant.clone(), OverflowPolicy::Wrap)?
            as u32,
        phase_constant: PHASE_CONSTANT.encode_signed(&phase.phase_constant, policy)? as i32,
        delay_linear: layout
            .delay_linear_field()
            .unsigned_from_int(delay.delay_linear_register.clone(), policy)?,
        phase_linear: layout
            .phase_linear_field()
            .encode_signed(&phase.phase_linear, policy)?,
        validity_period: VALIDITY_PERIOD
            .unsigned_from_int(&delay.validity_period_samples - 1u32, policy)?
            as u32,
        output_pps: output_pps_register(&delay.current_output_samples, config.rates(), epoch)?,
        first_output_timestamp: FIRST_OUTPUT_TIMESTAMP
            .unsigned_from_int(&delay.current_output_samples + epoch.output_samples(), policy)?,
    };
    Ok(values)
}
