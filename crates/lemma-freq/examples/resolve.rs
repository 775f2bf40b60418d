use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use lemma_freq::{aggregate, consolidate};
use lemma_index::{LoadMode, SourceFile, read_candidate_table};

fn main() -> Result<()> {
    let usage = "usage: cargo run -p lemma-freq --example resolve -- <lemma-table.csv> <freq-list.txt> [surface...]";
    let mut args = env::args().skip(1);
    let table = args.next().map(PathBuf::from).context(usage)?;
    let freq_list = args.next().map(PathBuf::from).context(usage)?;
    let wanted: Vec<String> = args.collect();

    let (index, _) = read_candidate_table(&table, LoadMode::Mmap)
        .with_context(|| format!("loading candidate table from {}", table.display()))?;
    let source = SourceFile::open(&freq_list, LoadMode::Mmap)?;
    let lines = source.lines().collect::<Result<Vec<_>>>()?;

    let mut agg = aggregate(&index, lines);
    let raw = agg.totals.clone();
    let report = consolidate(&mut agg.totals, &index, &agg.surface_freqs);
    if report.resolutions.is_empty() {
        bail!("no ambiguous surface was observed in {}", freq_list.display());
    }

    for res in &report.resolutions {
        let surface = index.surface(res.surface);
        if !wanted.is_empty() && !wanted.iter().any(|w| w == surface) {
            continue;
        }
        println!("\nSurface: {} ({})", surface, res.freq);
        println!(
            "  keep   {:<16} {:>10}",
            index.lemma(res.winner),
            raw.get(res.winner)
        );
        for loser in &res.losers {
            println!(
                "  drop   {:<16} {:>10} -> {}",
                index.lemma(*loser),
                raw.get(*loser),
                agg.totals.get(*loser)
            );
        }
    }

    Ok(())
}
