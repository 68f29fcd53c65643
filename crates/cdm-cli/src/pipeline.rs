//! Stages behind the `minimise` command: ingest, refine, validate, map.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use cdm_ingest::{IngestOptions, LoadedRecords, load_records};
use cdm_map::{DomainMapper, Vocabulary};
use cdm_minimise::{Refinement, SearchObserver, refine};
use cdm_model::{ConstraintMap, FieldName, MinimiseOptions};
use cdm_validate::{CompletenessReport, ReferenceCatalog, check_required_values, resolve_partition};

#[derive(Debug, Clone, Default)]
pub struct MinimiseRequest {
    pub input: PathBuf,
    pub ingest: IngestOptions,
    pub options: MinimiseOptions,
    /// Dataset partition for the completeness check; falls back to the domain column.
    pub partition: Option<String>,
    /// Reference catalog replacing the built-in one.
    pub reference: Option<PathBuf>,
    /// Vocabulary replacing the built-in one.
    pub vocabulary: Option<PathBuf>,
    /// Translate and calendar-expand the result before writing.
    pub map_output: bool,
}

#[derive(Debug, Clone)]
pub struct MinimiseReport {
    pub input: PathBuf,
    pub fields: Vec<FieldName>,
    pub rows_read: usize,
    pub zero_count_rows: usize,
    pub records: usize,
    pub refinement: Refinement,
    pub completeness: Option<CompletenessReport>,
    /// What gets written: mapped constraints, or the raw ones when mapping is off.
    pub output: Vec<ConstraintMap>,
}

impl MinimiseReport {
    /// Records covered by the final constraints, before mapping.
    pub fn covered_records(&self) -> usize {
        self.refinement.constraints.cardinality()
    }
}

pub fn run_minimise(request: &MinimiseRequest, observer: &dyn SearchObserver) -> Result<MinimiseReport> {
    let span = info_span!("minimise", input = %request.input.display());
    let _guard = span.enter();

    let ingest_start = Instant::now();
    let LoadedRecords {
        records,
        domain_tags,
        rows_read,
        zero_count_rows,
    } = info_span!("ingest").in_scope(|| load_records(&request.input, &request.ingest))?;
    info!(
        records = records.len(),
        fields = records.fields().len(),
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );

    let refine_start = Instant::now();
    let refinement = info_span!("refine")
        .in_scope(|| refine(&records, &request.options, observer))
        .context("minimise records")?;
    info!(
        constraints = refinement.constraints.len(),
        rounds = refinement.rounds.len(),
        duration_ms = refine_start.elapsed().as_millis(),
        "refinement complete"
    );

    let completeness = info_span!("validate").in_scope(|| {
        check_completeness(
            request.partition.as_deref(),
            request.reference.as_deref(),
            &domain_tags,
            &refinement,
        )
    })?;

    let raw = refinement.constraints.to_maps();
    let output = if request.map_output {
        let vocabulary = match &request.vocabulary {
            Some(path) => Vocabulary::load(path)?,
            None => Vocabulary::builtin()?,
        };
        DomainMapper::new(vocabulary)
            .map_constraints(&raw)
            .context("map constraints")?
    } else {
        raw
    };

    Ok(MinimiseReport {
        input: request.input.clone(),
        fields: records.fields().to_vec(),
        rows_read,
        zero_count_rows,
        records: records.len(),
        refinement,
        completeness,
        output,
    })
}

fn check_completeness(
    partition: Option<&str>,
    reference: Option<&Path>,
    domain_tags: &std::collections::BTreeSet<String>,
    refinement: &Refinement,
) -> Result<Option<CompletenessReport>> {
    let Some(partition) = resolve_partition(partition, domain_tags)? else {
        info!("no dataset partition given or found, skipping completeness check");
        return Ok(None);
    };
    let catalog = match reference {
        Some(path) => ReferenceCatalog::load(path)?,
        None => ReferenceCatalog::builtin()?,
    };
    let report = check_required_values(&catalog, &partition, &refinement.constraints)?;
    Ok(Some(report))
}
