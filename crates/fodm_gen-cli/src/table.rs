// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Conversion of whole delay tables.
//!
//! Every input row is an independent single-segment run: the reference
//! start time, sample rates and frequency shifts all come from the row.

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;

use fodm_core::{
    ConverterConfig, DelayRateModel, FodmError, PhaseConstantStrategy, RegisterLayout,
    RegisterValues, Sequencer,
};
use log::{debug, info, warn};

use crate::error::CliError;
use crate::records::{DelayRun, InputRecord, OutputRecord, OUTPUT_COLUMNS};

/// Options applied to every row of a table.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TableOptions {
    /// Register layout of the output.
    pub layout: RegisterLayout,
    /// Delay rate parameterization.
    pub rate_model: DelayRateModel,
    /// Phase constant formula.
    pub phase_constant: PhaseConstantStrategy,
    /// Fold half the delay rate quantization error into the delay constant.
    pub redistribute_rate_error: bool,
    /// Abort on the first malformed row instead of skipping it.
    pub strict: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        TableOptions {
            layout: RegisterLayout::Wide,
            rate_model: DelayRateModel::Multiplicative,
            phase_constant: PhaseConstantStrategy::EpochSampleIndex,
            redistribute_rate_error: true,
            strict: false,
        }
    }
}

impl TableOptions {
    fn config(&self, run: &DelayRun) -> ConverterConfig {
        ConverterConfig::builder(run.rates, self.phase_constant)
            .layout(self.layout)
            .rate_model(self.rate_model)
            .frequency_shift(run.shift.clone())
            .redistribute_rate_error(self.redistribute_rate_error)
            .build()
    }
}

/// Rows written and rows skipped by a table conversion.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TableSummary {
    /// Rows converted and written.
    pub converted: usize,
    /// Malformed rows skipped.
    pub skipped: usize,
}

/// Convert one parsed row into register values.
pub fn convert_run(run: DelayRun, options: &TableOptions) -> Result<RegisterValues, FodmError> {
    let config = options.config(&run);
    let mut records = Sequencer::new(config, &run.start_time, [run.segment]).collect_registers()?;
    // One segment in, one record out.
    Ok(records.remove(0))
}

/// Convert a delay table read from `input` into a register table written to `output`.
///
/// Malformed rows are skipped with a warning unless `options.strict` is set.
/// Conversion failures of well-formed rows always abort.
pub fn convert_table<R, W>(
    input: R,
    output: W,
    options: &TableOptions,
) -> Result<TableSummary, CliError>
where
    R: io::Read,
    W: io::Write,
{
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(input);
    let headers = reader.headers()?.clone();
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(output);
    writer.write_record(OUTPUT_COLUMNS)?;

    let mut summary = TableSummary::default();
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                let row = err.position().map_or(0, |pos| pos.line());
                skip_or_fail(row, err.to_string(), options, &mut summary)?;
                continue;
            }
        };
        let row = record.position().map_or(0, |pos| pos.line());

        let run = match record
            .deserialize::<InputRecord>(Some(&headers))
            .map_err(|e| e.to_string())
            .and_then(|input| input.parse().map_err(|e| e.to_string()))
        {
            Ok(run) => run,
            Err(detail) => {
                skip_or_fail(row, detail, options, &mut summary)?;
                continue;
            }
        };

        let values =
            convert_run(run, options).map_err(|source| CliError::Conversion { row, source })?;
        debug!("line {}: {:?}", row, values);
        writer.serialize(OutputRecord::from(values))?;
        summary.converted += 1;
    }

    writer.flush()?;
    Ok(summary)
}

fn skip_or_fail(
    row: u64,
    detail: String,
    options: &TableOptions,
    summary: &mut TableSummary,
) -> Result<(), CliError> {
    if options.strict {
        return Err(CliError::MalformedRecord { row, detail });
    }
    warn!("skipping malformed record on line {}: {}", row, detail);
    summary.skipped += 1;
    Ok(())
}

/// Convert the delay table at `input` into a register table at `output`.
pub fn convert_files(
    input: &Path,
    output: &Path,
    options: &TableOptions,
) -> Result<TableSummary, CliError> {
    let reader = BufReader::new(File::open(input)?);
    let writer = BufWriter::new(File::create(output)?);
    let summary = convert_table(reader, writer, options)?;
    info!(
        "wrote {} register records to {} ({} rows skipped)",
        summary.converted,
        output.display(),
        summary.skipped
    );
    Ok(summary)
}
