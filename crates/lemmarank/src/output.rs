//! Ranked output writers (CSV, JSON, JSON Lines).
//!
//! [`write_ranking`] writes into a temporary file next to the destination and
//! renames it into place, so a failed run never leaves a partial file behind.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use lemma_types::RankedRow;
use serde::Serialize;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::config::OutputFormat;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to write CSV row: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to move output into place: {0}")]
    Persist(#[from] tempfile::PersistError),
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub include_freq: bool,
    /// JSON only: wrap the array as `{ key: [...] }`.
    pub json_key: Option<String>,
    /// JSON only: no indentation. Wins over `tabs`.
    pub minify: bool,
    /// JSON only: indent with tabs instead of two spaces.
    pub tabs: bool,
}

#[derive(Serialize)]
struct RankOnly<'a> {
    lemma: &'a str,
    rank: usize,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Record<'a> {
    Full(&'a RankedRow),
    RankOnly(RankOnly<'a>),
}

impl<'a> Record<'a> {
    fn new(row: &'a RankedRow, include_freq: bool) -> Self {
        if include_freq {
            Record::Full(row)
        } else {
            Record::RankOnly(RankOnly {
                lemma: &row.lemma,
                rank: row.rank,
            })
        }
    }
}

/// Atomically write `rows` to `path`, creating parent directories.
///
/// Returns the number of rows written.
pub fn write_ranking(
    path: &Path,
    rows: &[RankedRow],
    options: &OutputOptions,
) -> Result<usize, OutputError> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;
    write_rows(BufWriter::new(temp.as_file()), rows, options)?;
    temp.persist(path)?;
    Ok(rows.len())
}

/// Encode `rows` into any writer. The writer is flushed on success.
pub fn write_rows<W: Write>(
    mut writer: W,
    rows: &[RankedRow],
    options: &OutputOptions,
) -> Result<(), OutputError> {
    let records = rows.iter().map(|row| Record::new(row, options.include_freq));
    match options.format {
        OutputFormat::Csv => {
            let mut csv = csv::Writer::from_writer(writer);
            if options.include_freq {
                csv.write_record(["lemma", "freq", "rank"])?;
            } else {
                csv.write_record(["lemma", "rank"])?;
            }
            for row in rows {
                let rank = row.rank.to_string();
                if options.include_freq {
                    let freq = row.freq.to_string();
                    csv.write_record([row.lemma.as_str(), freq.as_str(), rank.as_str()])?;
                } else {
                    csv.write_record([row.lemma.as_str(), rank.as_str()])?;
                }
            }
            csv.flush()?;
        }
        OutputFormat::Json => {
            let records: Vec<Record<'_>> = records.collect();
            let array = serde_json::to_value(&records)?;
            let value = match &options.json_key {
                Some(key) => {
                    let mut wrapped = serde_json::Map::new();
                    wrapped.insert(key.clone(), array);
                    serde_json::Value::Object(wrapped)
                }
                None => array,
            };
            if options.minify {
                serde_json::to_writer(&mut writer, &value)?;
            } else if options.tabs {
                let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
                let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
                value.serialize(&mut ser)?;
            } else {
                serde_json::to_writer_pretty(&mut writer, &value)?;
            }
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        OutputFormat::Jsonl => {
            for record in records {
                serde_json::to_writer(&mut writer, &record)?;
                writer.write_all(b"\n")?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}
