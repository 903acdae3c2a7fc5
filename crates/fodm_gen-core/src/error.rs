// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Error types for delay model conversion.
//!
//! [`FodmError`] carries enough context to identify the offending segment or
//! register field. It implements [`std::error::Error`] and converts into
//! [`std::io::Error`] for callers that surface everything as I/O failures.

use core::fmt;

use num_bigint::BigInt;

/// Errors that can occur while converting delay segments into register values.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FodmError {
    /// A segment spans zero (or negative) output samples, or more than one
    /// second of output samples.
    InvalidSegmentDuration {
        /// First output sample of the segment, relative to the epoch.
        start_sample: BigInt,
        /// First output sample after the segment, relative to the epoch.
        stop_sample: BigInt,
        /// Largest permitted duration (the output sample rate).
        max_samples: u32,
    },
    /// A quantized value does not fit the register field it is destined for.
    RegisterOverflow {
        /// Name of the register field.
        field: &'static str,
        /// The rounded value that did not fit.
        value: BigInt,
    },
    /// A sample rate of zero was supplied.
    InvalidSampleRate {
        /// Input sample rate in samples per second.
        input: u32,
        /// Output sample rate in samples per second.
        output: u32,
    },
    /// Segments were supplied with a decreasing start time.
    SegmentOutOfOrder {
        /// Zero-based index of the offending segment.
        index: usize,
    },
    /// A segment does not begin where the previous one ended.
    SegmentDiscontinuity {
        /// Zero-based index of the offending segment.
        index: usize,
        /// Output sample the running cursor expected the segment to start at.
        expected_sample: i64,
        /// Output sample the segment actually starts at.
        actual_sample: i64,
    },
    /// Text could not be parsed as an exact decimal number.
    InvalidNumber {
        /// The rejected text.
        text: String,
    },
}

impl fmt::Display for FodmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FodmError::InvalidSegmentDuration {
                start_sample,
                stop_sample,
                max_samples,
            } => {
                write!(
                    f,
                    "segment duration must be within (0, {}] output samples, got {} ({} - {})",
                    max_samples,
                    stop_sample - start_sample,
                    stop_sample,
                    start_sample
                )
            }
            FodmError::RegisterOverflow { field, value } => {
                write!(f, "value {} does not fit register field {}", value, field)
            }
            FodmError::InvalidSampleRate { input, output } => {
                write!(
                    f,
                    "sample rates must be non-zero: input {}, output {}",
                    input, output
                )
            }
            FodmError::SegmentOutOfOrder { index } => {
                write!(f, "segment {} starts before the previous segment", index)
            }
            FodmError::SegmentDiscontinuity {
                index,
                expected_sample,
                actual_sample,
            } => {
                write!(
                    f,
                    "segment {} starts at output sample {}, expected {}",
                    index, actual_sample, expected_sample
                )
            }
            FodmError::InvalidNumber { text } => {
                write!(f, "invalid decimal number: {:?}", text)
            }
        }
    }
}

impl From<FodmError> for std::io::Error {
    fn from(err: FodmError) -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::InvalidData, err)
    }
}

impl std::error::Error for FodmError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_segment_duration() {
        let err = FodmError::InvalidSegmentDuration {
            start_sample: BigInt::from(100),
            stop_sample: BigInt::from(1_100),
            max_samples: 900,
        };
        assert_eq!(
            err.to_string(),
            "segment duration must be within (0, 900] output samples, got 1000 (1100 - 100)"
        );
    }

    #[test]
    fn test_display_register_overflow() {
        let err = FodmError::RegisterOverflow {
            field: "delay_linear",
            value: BigInt::from(1u64) << 64,
        };
        assert_eq!(
            err.to_string(),
            "value 18446744073709551616 does not fit register field delay_linear"
        );
    }

    #[test]
    fn test_display_discontinuity() {
        let err = FodmError::SegmentDiscontinuity {
            index: 3,
            expected_sample: 10,
            actual_sample: 12,
        };
        assert_eq!(
            err.to_string(),
            "segment 3 starts at output sample 12, expected 10"
        );
    }

    #[test]
    fn test_display_invalid_number() {
        let err = FodmError::InvalidNumber {
            text: "12.x".to_string(),
        };
        assert_eq!(err.to_string(), "invalid decimal number: \"12.x\"");
    }

    #[test]
    fn test_into_io_error() {
        let io_err: std::io::Error = FodmError::SegmentOutOfOrder { index: 1 }.into();
        assert_eq!(io_err.kind(), std::io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_is_std_error() {
        let err: Box<dyn std::error::Error> =
            Box::new(FodmError::InvalidSampleRate { input: 0, output: 1 });
        assert_eq!(
            err.to_string(),
            "sample rates must be non-zero: input 0, output 1"
        );
    }
}
