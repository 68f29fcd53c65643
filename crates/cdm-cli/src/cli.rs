//! CLI argument definitions for the constraint minimiser.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use cdm_model::SearchStrategyKind;

#[derive(Parser)]
#[command(
    name = "cdm-constraints",
    version,
    about = "Minimise categorical records into a compact, lossless list of constraints",
    long_about = "Minimise categorical records into a compact, lossless list of constraints.\n\n\
                  Reads a delimited counts table, searches field orders for the shortest\n\
                  constraint list, refines it until it stops shrinking and writes JSON."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Minimise a counts table into a JSON constraint list.
    Minimise(MinimiseArgs),

    /// Write a copy of a monthly counts table with one row per day.
    AddDays(AddDaysArgs),

    /// Split a JSON constraint list by month length, adding day values.
    Expand(ExpandArgs),
}

#[derive(Parser)]
pub struct MinimiseArgs {
    /// Delimited counts table with a header row.
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    pub input: PathBuf,

    /// JSON file to write the constraints to.
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: PathBuf,

    /// Field delimiter (a single byte).
    #[arg(short = 'd', long = "delimiter", default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,

    /// Keep rows whose count is zero.
    #[arg(short = 'z', long = "keep-zero-counts")]
    pub keep_zero_counts: bool,

    /// TOML file with minimisation options; flags below override it.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Maximum refinement rounds after the first search.
    #[arg(long = "max-rounds", value_name = "N")]
    pub max_rounds: Option<usize>,

    /// Reject inputs with more fields than this.
    #[arg(long = "max-fields", value_name = "N")]
    pub max_fields: Option<usize>,

    /// Stop a search once the constraint list is at most this long.
    #[arg(long = "target-constraints", value_name = "N")]
    pub target_constraints: Option<usize>,

    /// Field order search strategy.
    #[arg(long = "strategy", value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Skip expanding the result and comparing it with the input.
    #[arg(long = "no-verify")]
    pub no_verify: bool,

    /// Dataset partition for the required-value check (default: the domain column).
    #[arg(long = "partition", value_name = "TAG")]
    pub partition: Option<String>,

    /// Reference catalog (TOML) replacing the built-in one.
    #[arg(long = "reference", value_name = "PATH")]
    pub reference: Option<PathBuf>,

    /// Vocabulary (JSON) replacing the built-in one.
    #[arg(long = "vocabulary", value_name = "PATH")]
    pub vocabulary: Option<PathBuf>,

    /// Write constraints in internal codes, without mapping or day values.
    #[arg(long = "no-map")]
    pub no_map: bool,

    /// Hide the search progress bar.
    #[arg(long = "no-progress")]
    pub no_progress: bool,
}

#[derive(Parser)]
pub struct AddDaysArgs {
    /// Counts table with `year` and `month` columns; output goes to `<PATH>.days`.
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    pub input: PathBuf,

    /// Field delimiter (a single byte).
    #[arg(short = 'd', long = "delimiter", default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,
}

#[derive(Parser)]
pub struct ExpandArgs {
    /// JSON constraint list.
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    pub input: PathBuf,

    /// JSON file to write the expanded list to.
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    Exhaustive,
    TrailingField,
}

impl From<StrategyArg> for SearchStrategyKind {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Exhaustive => Self::Exhaustive,
            StrategyArg::TrailingField => Self::TrailingField,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_delimiter(value: &str) -> Result<u8, String> {
    let value = if value == "\\t" { "\t" } else { value };
    match value.as_bytes() {
        [byte] => Ok(*byte),
        _ => Err(format!("delimiter must be a single byte, got {value:?}")),
    }
}
