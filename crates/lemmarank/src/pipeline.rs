//! End-to-end batch run: load, aggregate, consolidate, rank, write.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use lemma_freq::{aggregate, consolidate, rank, zero_frequency_lemmas};
use lemma_index::{SourceFile, read_candidate_table};
use lemma_types::RunSummary;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;
use crate::output::write_ranking;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("lemma CSV not found: {}", .0.display())]
    MissingLemmaTable(PathBuf),
    #[error("frequency list not found: {}", .0.display())]
    MissingFreqList(PathBuf),
}

/// Run the whole pipeline described by `config`.
///
/// Both inputs are checked before anything is read, and the output file is
/// only created once the ranking is complete.
pub fn run(config: &Config) -> Result<RunSummary> {
    if !config.lemma_csv.exists() {
        return Err(InputError::MissingLemmaTable(config.lemma_csv.clone()).into());
    }
    if !config.freq_list.exists() {
        return Err(InputError::MissingFreqList(config.freq_list.clone()).into());
    }

    let start = Instant::now();
    let (index, _) = read_candidate_table(&config.lemma_csv, config.load_mode)?;
    info!("candidate index built in {} ms", start.elapsed().as_millis());

    let source = SourceFile::open(&config.freq_list, config.load_mode)?;
    let lines = source
        .lines()
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("reading {}", config.freq_list.display()))?;

    let agg_start = Instant::now();
    let mut agg = aggregate(&index, lines);
    info!(
        "aggregated {} observed surfaces in {} ms",
        agg.surface_freqs.observed(),
        agg_start.elapsed().as_millis()
    );
    if agg.malformed > 0 {
        debug!("skipped {} malformed frequency lines", agg.malformed);
    }

    let report = consolidate(&mut agg.totals, &index, &agg.surface_freqs);
    info!(
        "consolidated {} of {} ambiguous surfaces ({} unobserved or zero)",
        report.resolutions.len(),
        report.ambiguous,
        report.skipped
    );

    let rows = rank(&index, &agg.totals);
    let zero_frequency = zero_frequency_lemmas(&agg.totals);
    let rows_written = write_ranking(&config.output, &rows, &config.output_options())
        .with_context(|| format!("writing {}", config.output.display()))?;

    let summary = RunSummary {
        surfaces: index.surface_count(),
        lemmas: index.lemma_count(),
        matched: agg.matched,
        unmatched: agg.unmatched,
        zero_frequency_lemmas: zero_frequency,
        rows_written,
    };
    info!(
        "Loaded {} surface entries covering {} lemmas.",
        summary.surfaces, summary.lemmas
    );
    info!(
        "Matched {} surface frequencies and skipped {} lines without a lemma.",
        summary.matched, summary.unmatched
    );
    info!(
        "{} lemmas had zero surface frequency; wrote {} rows to {}.",
        summary.zero_frequency_lemmas,
        summary.rows_written,
        config.output.display()
    );
    Ok(summary)
}
