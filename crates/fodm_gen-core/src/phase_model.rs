// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Phase correction for the frequency shifts applied around the resampler.
//!
//! The resampler sits between a frequency down shift (`F_DS`), a wideband
//! shift (`F_WB`), an alignment shift (`F_AS`) and a sample clock frequency
//! offset shift (`F_SCFO`). Delaying the signal changes the phase those
//! shifts leave behind; the FODM unit compensates with a phase constant and a
//! phase rate per output sample, both in cycles.

use num_rational::BigRational;
use num_traits::Zero;

use crate::config::{ConverterConfig, RateConfig};
use crate::delay::DelayTerms;
use crate::epoch::Epoch;
use crate::exact;
use crate::phase;
use crate::segment::DelaySegment;

/// Frequency shifts for phase correction, in Hz.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FrequencyShift {
    /// All four shifts supplied directly, already in the register sign
    /// convention.
    Explicit {
        /// Wideband shift.
        f_wb: BigRational,
        /// Alignment shift.
        f_as: BigRational,
        /// Down shift.
        f_ds: BigRational,
        /// Sample clock frequency offset shift.
        f_scfo: BigRational,
    },
    /// Down shift and SCFO shift derived from the frequency slice index.
    ///
    /// `F_DS = -index * input_rate * 9/10`,
    /// `F_SCFO = index * (input_rate - output_rate) * 9/10` and the alignment
    /// shift is negated.
    Slice {
        /// Frequency slice index.
        index: u32,
        /// Wideband shift.
        f_wb: BigRational,
        /// Alignment shift, as commanded (before negation).
        f_as: BigRational,
    },
}

/// The four shifts with slice-derived values filled in.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedShift {
    /// Wideband shift.
    pub f_wb: BigRational,
    /// Alignment shift.
    pub f_as: BigRational,
    /// Down shift.
    pub f_ds: BigRational,
    /// Sample clock frequency offset shift.
    pub f_scfo: BigRational,
}

impl ResolvedShift {
    /// `F_SCFO + F_AS`: the shift that accrues phase with elapsed time.
    pub fn time_coefficient(&self) -> BigRational {
        &self.f_scfo + &self.f_as
    }

    /// `F_WB - F_DS`: the shift that accrues phase with delay.
    pub fn delay_coefficient(&self) -> BigRational {
        &self.f_wb - &self.f_ds
    }
}

impl FrequencyShift {
    /// Resolve into the four shifts used by the phase formulas.
    pub fn resolve(&self, rates: &RateConfig) -> ResolvedShift {
        match self {
            FrequencyShift::Explicit {
                f_wb,
                f_as,
                f_ds,
                f_scfo,
            } => ResolvedShift {
                f_wb: f_wb.clone(),
                f_as: f_as.clone(),
                f_ds: f_ds.clone(),
                f_scfo: f_scfo.clone(),
            },
            FrequencyShift::Slice { index, f_wb, f_as } => {
                let nine_tenths = exact::integer(9) / exact::integer(10);
                let index = exact::integer(*index);
                ResolvedShift {
                    f_wb: f_wb.clone(),
                    f_as: -f_as.clone(),
                    f_ds: -(&index * rates.input() * &nine_tenths),
                    f_scfo: index * (rates.input() - rates.output()) * nine_tenths,
                }
            }
        }
    }
}

/// Formula for the phase constant at the start of a segment.
///
/// Variants differ in which time reference the shift phase accrues from. No
/// default is provided.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PhaseConstantStrategy {
    /// `(F_SCFO + F_AS) * start_time + (F_WB - F_DS) * delay_constant`.
    AbsoluteTime,
    /// `phase_linear * output_sample_index + (F_WB - F_DS) * delay_constant`,
    /// where the sample index is absolute and `phase_linear` is unreduced.
    ///
    /// With a non-zero delay rate the result depends on the epoch: moving the
    /// run by whole seconds changes the phase constant.
    EpochSampleIndex,
    /// `(F_SCFO + F_AS) / output_rate * output_sample_index
    /// + (F_WB - F_DS) * delay_constant`, leaving the delay rate term out.
    EpochSampleIndexShiftOnly,
}

/// Phase terms in cycles, reduced into `[-0.5, 0.5)`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PhaseTerms {
    /// Phase at the first output sample.
    pub phase_constant: BigRational,
    /// Phase change per output sample.
    pub phase_linear: BigRational,
}

impl PhaseTerms {
    /// Both terms zero.
    pub fn zero() -> Self {
        PhaseTerms {
            phase_constant: BigRational::zero(),
            phase_linear: BigRational::zero(),
        }
    }
}

/// Compute the phase terms for `segment`.
///
/// With no frequency shift configured both terms are exactly zero.
pub fn compute_phase(
    segment: &DelaySegment,
    config: &ConverterConfig,
    delay: &DelayTerms,
    epoch: &Epoch,
) -> PhaseTerms {
    let shift = match config.frequency_shift() {
        Some(shift) => shift.resolve(config.rates()),
        None => return PhaseTerms::zero(),
    };
    let output_rate = config.rates().output();
    let time_coefficient = shift.time_coefficient();
    let delay_phase = shift.delay_coefficient() * segment.delay_constant();

    let phase_linear =
        (&time_coefficient + shift.delay_coefficient() * segment.delay_linear()) / &output_rate;

    let output_index = exact::integer(&delay.current_output_samples + epoch.output_samples());
    let phase_constant = match config.phase_constant() {
        PhaseConstantStrategy::AbsoluteTime => {
            time_coefficient * segment.start_time() + delay_phase
        }
        PhaseConstantStrategy::EpochSampleIndex => &phase_linear * output_index + delay_phase,
        PhaseConstantStrategy::EpochSampleIndexShiftOnly => {
            time_coefficient / output_rate * output_index + delay_phase
        }
    };

    PhaseTerms {
        phase_constant: phase::reduce(&phase_constant),
        phase_linear: phase::reduce(&phase_linear),
    }
}
