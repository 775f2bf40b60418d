//! CSV candidate-table loader.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::source::{LoadMode, SourceFile};
use crate::{CandidateIndex, CandidateIndexBuilder, LoadStats};

/// Load a `surface,pos,lemma` CSV into a [`CandidateIndex`].
///
/// Rows may have any number of fields; header handling follows
/// [`CandidateIndexBuilder::push_record`]. A table that yields no lemmas is
/// an error carrying [`crate::IndexError::NoLemmas`].
pub fn read_candidate_table(
    path: impl AsRef<Path>,
    mode: LoadMode,
) -> Result<(CandidateIndex, LoadStats)> {
    let path = path.as_ref();
    let source = SourceFile::open(path, mode)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source.bytes());

    let mut builder = CandidateIndexBuilder::new();
    for (recno, record) in reader.records().enumerate() {
        let record =
            record.with_context(|| format!("read record {} in {}", recno + 1, path.display()))?;
        builder.push_record(record.iter())?;
    }

    let (index, stats) = builder
        .finish()
        .with_context(|| format!("no lemmas parsed from {}", path.display()))?;

    if stats.header_skipped {
        debug!("skipped header row in {}", path.display());
    }
    if stats.dropped > 0 {
        debug!("dropped {} incomplete rows from {}", stats.dropped, path.display());
    }
    info!(
        "loaded {} surface entries covering {} lemmas ({} ambiguous surfaces)",
        index.surface_count(),
        index.lemma_count(),
        index.ambiguous_surface_count()
    );
    Ok((index, stats))
}
