// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Errors raised while converting delay tables.

use std::fmt;
use std::io;

use fodm_core::FodmError;

/// Errors that can occur while reading, converting or writing a delay table.
#[derive(Debug)]
pub enum CliError {
    /// A row could not be interpreted as a delay model record.
    MalformedRecord {
        /// Line number of the row in the input table.
        row: u64,
        /// What was wrong with it.
        detail: String,
    },
    /// A well-formed row failed register conversion.
    Conversion {
        /// Line number of the row in the input table.
        row: u64,
        /// The underlying conversion error.
        source: FodmError,
    },
    /// CSV reading or writing failed.
    Csv(csv::Error),
    /// Opening or flushing a file failed.
    Io(io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::MalformedRecord { row, detail } => {
                write!(f, "malformed record on line {}: {}", row, detail)
            }
            CliError::Conversion { row, source } => {
                write!(f, "conversion failed on line {}: {}", row, source)
            }
            CliError::Csv(e) => write!(f, "CSV error: {}", e),
            CliError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::MalformedRecord { .. } => None,
            CliError::Conversion { source, .. } => Some(source),
            CliError::Csv(e) => Some(e),
            CliError::Io(e) => Some(e),
        }
    }
}

impl From<csv::Error> for CliError {
    fn from(err: csv::Error) -> Self {
        CliError::Csv(err)
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Io(err)
    }
}
