use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use tracing::{info, info_span};

use cdm_ingest::{IngestOptions, add_days_to_counts};
use cdm_map::expand_by_month_length;
use cdm_model::MinimiseOptions;
use cdm_cli::output::{read_constraints, write_constraints};
use cdm_cli::pipeline::{MinimiseReport, MinimiseRequest, run_minimise};
use cdm_cli::progress::SearchProgress;

use crate::cli::{AddDaysArgs, ExpandArgs, MinimiseArgs};
use crate::types::{AddDaysResult, ExpandResult};

/// Options file first, then individual flags on top.
pub fn resolve_options(args: &MinimiseArgs) -> Result<MinimiseOptions> {
    let mut options = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read {}", path.display()))?;
            toml::from_str::<MinimiseOptions>(&text)
                .with_context(|| format!("parse {}", path.display()))?
        }
        None => MinimiseOptions::default(),
    };
    if let Some(rounds) = args.max_rounds {
        options.max_rounds = rounds;
    }
    if let Some(fields) = args.max_fields {
        options.max_fields = fields;
    }
    if args.target_constraints.is_some() {
        options.target_constraints = args.target_constraints;
    }
    if let Some(strategy) = args.strategy {
        options.strategy = strategy.into();
    }
    if args.no_verify {
        options.verify_lossless = false;
    }
    Ok(options)
}

pub fn run_minimise_command(args: &MinimiseArgs, show_progress: bool) -> Result<MinimiseReport> {
    let request = MinimiseRequest {
        input: args.input.clone(),
        ingest: IngestOptions::default()
            .with_delimiter(args.delimiter)
            .with_remove_zero_counts(!args.keep_zero_counts),
        options: resolve_options(args)?,
        partition: args.partition.clone(),
        reference: args.reference.clone(),
        vocabulary: args.vocabulary.clone(),
        map_output: !args.no_map,
    };

    let progress =
        SearchProgress::new(show_progress && !args.no_progress && io::stderr().is_terminal());
    let report = run_minimise(&request, &progress);
    progress.finish();
    let report = report?;

    write_constraints(&args.output, &report.output)?;
    info!(
        output = %args.output.display(),
        constraints = report.output.len(),
        "wrote constraints"
    );
    Ok(report)
}

pub fn run_add_days(args: &AddDaysArgs) -> Result<AddDaysResult> {
    let span = info_span!("add_days", input = %args.input.display());
    let _guard = span.enter();
    let (output, rows) = add_days_to_counts(&args.input, args.delimiter)
        .with_context(|| format!("add days to {}", args.input.display()))?;
    Ok(AddDaysResult {
        input: args.input.clone(),
        output,
        rows,
    })
}

pub fn run_expand(args: &ExpandArgs) -> Result<ExpandResult> {
    let span = info_span!("expand", input = %args.input.display());
    let _guard = span.enter();
    let constraints = read_constraints(&args.input)?;
    let mut expanded = Vec::with_capacity(constraints.len());
    for constraint in &constraints {
        expanded.extend(expand_by_month_length(constraint).context("expand by month length")?);
    }
    write_constraints(&args.output, &expanded)?;
    info!(
        output = %args.output.display(),
        constraints = expanded.len(),
        "wrote expanded constraints"
    );
    Ok(ExpandResult {
        input: args.input.clone(),
        output: args.output.clone(),
        constraints_in: constraints.len(),
        constraints_out: expanded.len(),
    })
}
