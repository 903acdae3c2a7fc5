// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Command line arguments for `fodm-calc`.

use std::io;
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use fodm_core::{DelayRateModel, PhaseConstantStrategy, RegisterLayout};
use log::LevelFilter;

use crate::table::TableOptions;

/// Register layout selectable on the command line.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum LayoutArg {
    /// 32-bit linear terms, 2^31 scale
    Narrow,
    /// 64-bit linear terms, 2^63 scale
    Wide,
}

/// Delay rate model selectable on the command line.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum RateModelArg {
    /// resampling_rate + delay_linear
    Additive,
    /// resampling_rate * (1 + delay_linear)
    Multiplicative,
}

/// Phase constant formula selectable on the command line.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum PhaseConstantArg {
    /// Shift phase accrued over absolute start time
    AbsoluteTime,
    /// Unreduced phase_linear times absolute output sample index
    EpochSampleIndex,
    /// Shift-only phase rate times absolute output sample index
    EpochSampleIndexShiftOnly,
}

/// Convert FODM delay tables into FODM register value tables.
#[derive(Debug, Parser)]
#[command(name = "fodm-calc", version)]
pub struct Cli {
    /// Input delay table (CSV)
    #[arg(name = "INPUT_TABLE")]
    pub input: PathBuf,

    /// Output register table (CSV), overwritten if it exists
    #[arg(name = "OUTPUT_TABLE")]
    pub output: PathBuf,

    /// Register layout of the linear terms
    #[arg(long, value_enum, default_value_t = LayoutArg::Wide)]
    pub layout: LayoutArg,

    /// How the delay rate combines with the resampling rate
    #[arg(long = "rate-model", value_enum, default_value_t = RateModelArg::Multiplicative)]
    pub rate_model: RateModelArg,

    /// Phase constant formula
    #[arg(long = "phase-constant", value_enum, default_value_t = PhaseConstantArg::EpochSampleIndex)]
    pub phase_constant: PhaseConstantArg,

    /// Do not fold half the delay rate quantization error into the delay constant
    #[arg(long = "no-rate-error-redistribution")]
    pub no_rate_error_redistribution: bool,

    /// Abort on the first malformed row instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// Print diagnostic messages (repeat for more detail)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only report errors
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl Cli {
    /// Table options selected by the flags.
    pub fn table_options(&self) -> TableOptions {
        TableOptions {
            layout: match self.layout {
                LayoutArg::Narrow => RegisterLayout::Narrow,
                LayoutArg::Wide => RegisterLayout::Wide,
            },
            rate_model: match self.rate_model {
                RateModelArg::Additive => DelayRateModel::Additive,
                RateModelArg::Multiplicative => DelayRateModel::Multiplicative,
            },
            phase_constant: match self.phase_constant {
                PhaseConstantArg::AbsoluteTime => PhaseConstantStrategy::AbsoluteTime,
                PhaseConstantArg::EpochSampleIndex => PhaseConstantStrategy::EpochSampleIndex,
                PhaseConstantArg::EpochSampleIndexShiftOnly => {
                    PhaseConstantStrategy::EpochSampleIndexShiftOnly
                }
            },
            redistribute_rate_error: !self.no_rate_error_redistribution,
            strict: self.strict,
        }
    }

    /// Log level selected by `-v` and `-q`.
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Whether a parse that ended without a [`Cli`] counts as success.
///
/// `--help` and `--version` succeed once their text is written; usage errors
/// and failed writes do not.
pub fn usage_succeeded(err: &clap::Error, printed: io::Result<()>) -> bool {
    printed.is_ok() && !err.use_stderr()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["fodm-calc", "in.csv", "out.csv"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("in.csv"));
        assert_eq!(cli.output, PathBuf::from("out.csv"));
        assert_eq!(cli.table_options(), TableOptions::default());
        assert_eq!(cli.log_level(), LevelFilter::Info);
    }

    #[test]
    fn all_options() {
        let cli = Cli::try_parse_from([
            "fodm-calc",
            "--layout",
            "narrow",
            "--rate-model",
            "additive",
            "--phase-constant",
            "epoch-sample-index-shift-only",
            "--no-rate-error-redistribution",
            "--strict",
            "-vv",
            "in.csv",
            "out.csv",
        ])
        .unwrap();
        let options = cli.table_options();
        assert_eq!(options.layout, RegisterLayout::Narrow);
        assert_eq!(options.rate_model, DelayRateModel::Additive);
        assert_eq!(
            options.phase_constant,
            PhaseConstantStrategy::EpochSampleIndexShiftOnly
        );
        assert!(!options.redistribute_rate_error);
        assert!(options.strict);
        assert_eq!(cli.log_level(), LevelFilter::Trace);
    }

    #[test]
    fn quiet_keeps_errors() {
        let cli = Cli::try_parse_from(["fodm-calc", "-q", "in.csv", "out.csv"]).unwrap();
        assert_eq!(cli.log_level(), LevelFilter::Error);
    }

    #[test]
    fn missing_output_is_a_usage_error() {
        let err = Cli::try_parse_from(["fodm-calc", "in.csv"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
        assert!(err.use_stderr());
    }

    #[test]
    fn help_succeeds_only_when_printed() {
        let err = Cli::try_parse_from(["fodm-calc", "--help"]).unwrap_err();
        assert!(usage_succeeded(&err, Ok(())));
        let broken = io::Error::new(io::ErrorKind::BrokenPipe, "closed");
        assert!(!usage_succeeded(&err, Err(broken)));
    }

    #[test]
    fn usage_error_fails_even_when_printed() {
        let err = Cli::try_parse_from(["fodm-calc", "in.csv"]).unwrap_err();
        assert!(!usage_succeeded(&err, Ok(())));
    }

    #[test]
    fn unknown_layout_is_rejected() {
        assert!(Cli::try_parse_from(["fodm-calc", "--layout", "huge", "a", "b"]).is_err());
    }
}
