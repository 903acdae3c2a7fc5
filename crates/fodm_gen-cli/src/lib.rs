// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Tabular front-end for FODM register value calculation.
//!
//! Reads delay tables in the CSV interchange format, converts every row with
//! [`fodm_core`] and writes the register values as CSV. The `fodm-calc`
//! binary is a thin wrapper around [`table::convert_files`].

#![warn(missing_docs)]

/// Command line arguments.
pub mod cli;

/// Error types for table conversion.
pub mod error;

/// Input and output row types.
pub mod records;

/// Whole-table conversion.
pub mod table;

pub use error::CliError;
pub use table::{convert_files, convert_table, TableOptions, TableSummary};
