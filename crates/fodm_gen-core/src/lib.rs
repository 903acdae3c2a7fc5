// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! First order delay model (FODM) register value calculation.
//!
//! This crate converts a piecewise-linear delay model, given in seconds and
//! seconds per second, into the fixed-point values a resampler's FODM unit
//! loads into hardware registers for each validity interval. All
//! intermediate arithmetic is exact; rounding happens once, when a value is
//! quantized into its register field.
//!
//! The usual entry point is [`sequencer::Sequencer`], which walks a stream of
//! [`segment::DelaySegment`]s under a [`config::ConverterConfig`] and yields
//! one [`registers::RegisterValues`] per segment.

#![warn(missing_docs)]

pub use num_bigint::BigInt;
pub use num_rational::BigRational;

/// Run configuration: sample rates, register layout and parameterization choices.
pub mod config;

/// Conversion of a segment's delay into sample-domain delay terms.
pub mod delay;

/// Whole-second time origin of a run.
pub mod epoch;

/// Error types for delay model conversion.
pub mod error;

/// Exact rational arithmetic helpers and decimal parsing.
pub mod exact;

/// Reduction of phase values into `[-0.5, 0.5)` cycles.
pub mod phase;

/// Phase correction terms derived from the configured frequency shifts.
pub mod phase_model;

/// Pulse-per-second alignment.
pub mod pps;

/// Fixed-point quantization into register fields.
pub mod quantize;

/// Register layouts and per-segment register assembly.
pub mod registers;

/// Delay model segments.
pub mod segment;

/// Iteration over ordered segments with a running cursor.
pub mod sequencer;

pub use config::{
    ContinuityCheck, ConverterConfig, ConverterConfigBuilder, DelayRateModel, RateConfig,
};
pub use error::FodmError;
pub use phase_model::{FrequencyShift, PhaseConstantStrategy};
pub use quantize::OverflowPolicy;
pub use registers::{RegisterLayout, RegisterValues};
pub use segment::DelaySegment;
pub use sequencer::{Sequencer, SequencerCursor};
