// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Pull-based conversion of an ordered stream of delay segments.
//!
//! A [`Sequencer`] owns the run's configuration and epoch and yields one
//! register record per segment together with the advanced
//! [`SequencerCursor`]. Segments are checked for ordering and, according to
//! [`ContinuityCheck`], for contiguity with the previous segment. The
//! iterator stops for good after the first error; build a new sequencer to
//! start over.
//!
//! # Examples
//!
//! ```
//! use fodm_core::config::{ConverterConfig, RateConfig};
//! use fodm_core::exact::integer;
//! use fodm_core::phase_model::PhaseConstantStrategy;
//! use fodm_core::segment::DelaySegment;
//! use fodm_core::sequencer::Sequencer;
//!
//! let rates = RateConfig::new(1_000, 1_000).unwrap();
//! let config = ConverterConfig::builder(rates, PhaseConstantStrategy::EpochSampleIndex).build();
//! let segments = vec![
//!     DelaySegment::new(integer(0), integer(0), integer(0), integer(1)),
//!     DelaySegment::new(integer(0), integer(0), integer(1), integer(2)),
//! ];
//! let records = Sequencer::new(config, &integer(0), segments)
//!     .collect_registers()
//!     .unwrap();
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[1].first_output_timestamp, 1_000);
//! ```

use core::iter::FusedIterator;

use log::{debug, warn};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::ToPrimitive;

use crate::config::{ContinuityCheck, ConverterConfig};
use crate::epoch::Epoch;
use crate::error::FodmError;
use crate::exact;
use crate::registers::{compute_register_values, RegisterValues};
use crate::segment::DelaySegment;

/// Position of a [`Sequencer`] after emitting a record.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct SequencerCursor {
    segments: usize,
    output_samples: i64,
}

impl SequencerCursor {
    /// Number of segments emitted so far.
    pub fn segments(&self) -> usize {
        self.segments
    }

    /// Output sample, relative to the epoch, at which the next segment is
    /// expected to start.
    pub fn output_samples(&self) -> i64 {
        self.output_samples
    }
}

/// Iterator converting delay segments into register records.
#[derive(Debug)]
pub struct Sequencer<I> {
    config: ConverterConfig,
    epoch: Epoch,
    segments: I,
    cursor: SequencerCursor,
    previous_start: Option<BigRational>,
    finished: bool,
}

impl<I> Sequencer<I>
where
    I: Iterator<Item = DelaySegment>,
{
    /// Create a sequencer for a run whose reference start time is
    /// `start_time` seconds. The epoch is derived from it once.
    pub fn new<S>(config: ConverterConfig, start_time: &BigRational, segments: S) -> Self
    where
        S: IntoIterator<IntoIter = I>,
    {
        let epoch = Epoch::from_start_time(start_time, config.rates());
        debug!(
            "sequencer epoch at {} s ({} input, {} output samples)",
            epoch.seconds(),
            epoch.input_samples(),
            epoch.output_samples()
        );
        Sequencer {
            config,
            epoch,
            segments: segments.into_iter(),
            cursor: SequencerCursor::default(),
            previous_start: None,
            finished: false,
        }
    }

    /// The epoch all sample counts are relative to.
    pub fn epoch(&self) -> &Epoch {
        &self.epoch
    }

    /// Cursor after the most recently emitted record.
    pub fn cursor(&self) -> SequencerCursor {
        self.cursor
    }

    /// Run to completion, returning the records or the first error.
    pub fn collect_registers(self) -> Result<Vec<RegisterValues>, FodmError> {
        self.map(|item| item.map(|(values, _)| values)).collect()
    }

    fn step(
        &mut self,
        segment: &DelaySegment,
    ) -> Result<(RegisterValues, SequencerCursor), FodmError> {
        let index = self.cursor.segments;
        if let Some(previous) = &self.previous_start {
            if segment.start_time() < previous {
                return Err(FodmError::SegmentOutOfOrder { index });
            }
        }

        let start = exact::floor(
            &((segment.start_time() - self.epoch.as_rational()) * self.config.rates().output()),
        );
        let start_sample = cursor_position(&start)?;
        if index > 0 && start_sample != self.cursor.output_samples {
            match self.config.continuity() {
                ContinuityCheck::Ignore => {}
                ContinuityCheck::Warn => warn!(
                    "segment {} starts at output sample {}, expected {}",
                    index, start_sample, self.cursor.output_samples
                ),
                ContinuityCheck::Require => {
                    return Err(FodmError::SegmentDiscontinuity {
                        index,
                        expected_sample: self.cursor.output_samples,
                        actual_sample: start_sample,
                    })
                }
            }
        }

        let values = compute_register_values(segment, &self.config, &self.epoch)?;
        debug!(
            "segment {}: {} output samples from {}, first input sample {}",
            index,
            values.validity_period_samples(),
            values.first_output_timestamp,
            values.first_input_timestamp
        );

        self.previous_start = Some(segment.start_time().clone());
        self.cursor = SequencerCursor {
            segments: index + 1,
            output_samples: cursor_position(&(start + values.validity_period_samples()))?,
        };
        Ok((values, self.cursor))
    }
}

fn cursor_position(samples: &BigInt) -> Result<i64, FodmError> {
    samples.to_i64().ok_or_else(|| FodmError::RegisterOverflow {
        field: "output_samples",
        value: samples.clone(),
    })
}

impl<I> Iterator for Sequencer<I>
where
    I: Iterator<Item = DelaySegment>,
{
    type Item = Result<(RegisterValues, SequencerCursor), FodmError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let segment = match self.segments.next() {
            Some(segment) => segment,
            None => {
                self.finished = true;
                return None;
            }
        };
        let result = self.step(&segment);
        if result.is_err() {
            self.finished = true;
        }
        Some(result)
    }
}

impl<I> FusedIterator for Sequencer<I> where I: Iterator<Item = DelaySegment> {}
