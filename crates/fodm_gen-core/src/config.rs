// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Run configuration for delay model conversion.
//!
//! [`ConverterConfig`] bundles everything that stays constant for one run:
//! sample rates, register layout, parameterization choices and validation
//! strictness. It is built with [`ConverterConfig::builder()`]; the phase
//! constant strategy has no default and must be picked by the caller.
//!
//! # Examples
//!
//! ```
//! use fodm_core::config::{ConverterConfig, DelayRateModel, RateConfig};
//! use fodm_core::phase_model::PhaseConstantStrategy;
//! use fodm_core::registers::RegisterLayout;
//!
//! let rates = RateConfig::new(1_000_000_000, 900_000_000).unwrap();
//! let config = ConverterConfig::builder(rates, PhaseConstantStrategy::EpochSampleIndex)
//!     .layout(RegisterLayout::Narrow)
//!     .rate_model(DelayRateModel::Additive)
//!     .build();
//! assert_eq!(config.layout(), RegisterLayout::Narrow);
//! ```

use num_rational::BigRational;

use crate::error::FodmError;
use crate::exact;
use crate::phase_model::{FrequencyShift, PhaseConstantStrategy};
use crate::quantize::OverflowPolicy;
use crate::registers::RegisterLayout;

/// Input and output sample rates of the resampling stage.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct RateConfig {
    input_sample_rate: u32,
    output_sample_rate: u32,
}

impl RateConfig {
    /// Create a rate pair. Both rates are in samples per second and must be non-zero.
    pub fn new(input_sample_rate: u32, output_sample_rate: u32) -> Result<Self, FodmError> {
        if input_sample_rate == 0 || output_sample_rate == 0 {
            return Err(FodmError::InvalidSampleRate {
                input: input_sample_rate,
                output: output_sample_rate,
            });
        }
        Ok(RateConfig {
            input_sample_rate,
            output_sample_rate,
        })
    }

    /// Input sample rate in samples per second.
    pub fn input_sample_rate(&self) -> u32 {
        self.input_sample_rate
    }

    /// Output sample rate in samples per second.
    pub fn output_sample_rate(&self) -> u32 {
        self.output_sample_rate
    }

    /// Input rate as an exact rational.
    pub fn input(&self) -> BigRational {
        exact::integer(self.input_sample_rate)
    }

    /// Output rate as an exact rational.
    pub fn output(&self) -> BigRational {
        exact::integer(self.output_sample_rate)
    }

    /// Input samples consumed per output sample (`input / output`).
    pub fn resampling_rate(&self) -> BigRational {
        self.input() / self.output()
    }
}

/// How a segment's delay rate combines with the resampling rate into the
/// `delay_linear` register (input samples per output sample).
///
/// The two forms parameterize the same physical quantity differently; pick
/// the one the target register definition expects.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum DelayRateModel {
    /// `resampling_rate + delay_linear`.
    Additive,
    /// `resampling_rate * (1 + delay_linear)`.
    #[default]
    Multiplicative,
}

/// How strictly the sequencer checks that segments are contiguous.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum ContinuityCheck {
    /// Do not compare segment starts with the running cursor.
    Ignore,
    /// Log a warning when a segment does not start where the previous ended.
    #[default]
    Warn,
    /// Fail with [`FodmError::SegmentDiscontinuity`].
    Require,
}

/// Everything that stays constant across one conversion run.
#[derive(Clone, Debug, PartialEq)]
pub struct ConverterConfig {
    rates: RateConfig,
    layout: RegisterLayout,
    rate_model: DelayRateModel,
    phase_constant: PhaseConstantStrategy,
    frequency_shift: Option<FrequencyShift>,
    redistribute_rate_error: bool,
    continuity: ContinuityCheck,
    overflow_policy: OverflowPolicy,
}

impl ConverterConfig {
    /// Start building a configuration.
    ///
    /// Defaults: [`RegisterLayout::Wide`], [`DelayRateModel::Multiplicative`],
    /// no frequency shift (phase terms are zero), rate error redistribution
    /// enabled, [`ContinuityCheck::Warn`] and [`OverflowPolicy::Error`].
    pub fn builder(
        rates: RateConfig,
        phase_constant: PhaseConstantStrategy,
    ) -> ConverterConfigBuilder {
        ConverterConfigBuilder {
            config: ConverterConfig {
                rates,
                layout: RegisterLayout::default(),
                rate_model: DelayRateModel::default(),
                phase_constant,
                frequency_shift: None,
                redistribute_rate_error: true,
                continuity: ContinuityCheck::default(),
                overflow_policy: OverflowPolicy::default(),
            },
        }
    }

    /// Sample rates for the run.
    pub fn rates(&self) -> &RateConfig {
        &self.rates
    }

    /// Target register layout.
    pub fn layout(&self) -> RegisterLayout {
        self.layout
    }

    /// Delay rate parameterization.
    pub fn rate_model(&self) -> DelayRateModel {
        self.rate_model
    }

    /// Phase constant formula.
    pub fn phase_constant(&self) -> PhaseConstantStrategy {
        self.phase_constant
    }

    /// Frequency shift configuration, `None` when no phase correction applies.
    pub fn frequency_shift(&self) -> Option<&FrequencyShift> {
        self.frequency_shift.as_ref()
    }

    /// Whether half the delay rate quantization error is folded into the delay constant.
    pub fn redistribute_rate_error(&self) -> bool {
        self.redistribute_rate_error
    }

    /// Segment contiguity checking.
    pub fn continuity(&self) -> ContinuityCheck {
        self.continuity
    }

    /// Overflow handling for the range-checked register fields.
    pub fn overflow_policy(&self) -> OverflowPolicy {
        self.overflow_policy
    }
}

/// Builder for [`ConverterConfig`].
#[derive(Clone, Debug)]
pub struct ConverterConfigBuilder {
    config: ConverterConfig,
}

impl ConverterConfigBuilder {
    /// Set the register layout (default: [`RegisterLayout::Wide`]).
    pub fn layout(mut self, layout: RegisterLayout) -> Self {
        self.config.layout = layout;
        self
    }

    /// Set the delay rate parameterization (default: multiplicative).
    pub fn rate_model(mut self, model: DelayRateModel) -> Self {
        self.config.rate_model = model;
        self
    }

    /// Set the frequency shifts used for phase correction.
    ///
    /// Pass `None` for test-signal modes where no phase correction is wanted.
    pub fn frequency_shift(mut self, shift: impl Into<Option<FrequencyShift>>) -> Self {
        self.config.frequency_shift = shift.into();
        self
    }

    /// Enable or disable folding half the delay rate quantization error into
    /// the delay constant (default: enabled).
    pub fn redistribute_rate_error(mut self, enabled: bool) -> Self {
        self.config.redistribute_rate_error = enabled;
        self
    }

    /// Set segment contiguity checking (default: warn).
    pub fn continuity(mut self, check: ContinuityCheck) -> Self {
        self.config.continuity = check;
        self
    }

    /// Set overflow handling for range-checked fields (default: error).
    ///
    /// `output_PPS` and the delay constant fraction always wrap.
    pub fn overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.config.overflow_policy = policy;
        self
    }

    /// Finish building.
    pub fn build(self) -> ConverterConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    #[test]
    fn rate_config_rejects_zero() {
        assert_eq!(
            RateConfig::new(0, 10),
            Err(FodmError::InvalidSampleRate { input: 0, output: 10 })
        );
        assert!(RateConfig::new(10, 0).is_err());
    }

    #[test]
    fn resampling_rate_is_exact() {
        let rates = RateConfig::new(1_000_000_000, 900_000_000).unwrap();
        assert_eq!(
            rates.resampling_rate(),
            BigRational::new(BigInt::from(10), BigInt::from(9))
        );
    }

    #[test]
    fn builder_defaults() {
        let rates = RateConfig::new(220_000_000, 220_200_960).unwrap();
        let config = ConverterConfig::builder(rates, PhaseConstantStrategy::AbsoluteTime).build();
        assert_eq!(config.layout(), RegisterLayout::Wide);
        assert_eq!(config.rate_model(), DelayRateModel::Multiplicative);
        assert_eq!(config.phase_constant(), PhaseConstantStrategy::AbsoluteTime);
        assert!(config.frequency_shift().is_none());
        assert!(config.redistribute_rate_error());
        assert_eq!(config.continuity(), ContinuityCheck::Warn);
        assert_eq!(config.overflow_policy(), OverflowPolicy::Error);
    }

    #[test]
    fn builder_overrides() {
        let rates = RateConfig::new(220_000_000, 220_200_960).unwrap();
        let config = ConverterConfig::builder(rates, PhaseConstantStrategy::EpochSampleIndex)
            .layout(RegisterLayout::Narrow)
            .rate_model(DelayRateModel::Additive)
            .frequency_shift(FrequencyShift::Slice {
                index: 3,
                f_wb: exact::integer(0),
                f_as: exact::integer(1000),
            })
            .redistribute_rate_error(false)
            .continuity(ContinuityCheck::Require)
            .overflow_policy(OverflowPolicy::Saturate)
            .build();
        assert_eq!(config.layout(), RegisterLayout::Narrow);
        assert_eq!(config.rate_model(), DelayRateModel::Additive);
        assert!(config.frequency_shift().is_some());
        assert!(!config.redistribute_rate_error());
        assert_eq!(config.continuity(), ContinuityCheck::Require);
        assert_eq!(config.overflow_policy(), OverflowPolicy::Saturate);
    }
}
