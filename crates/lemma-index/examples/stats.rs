use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use lemma_index::{LoadMode, read_candidate_table};

fn main() -> Result<()> {
    let table = env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: cargo run -p lemma-index --example stats -- <lemma-table.csv>")?;

    let (index, stats) = read_candidate_table(&table, LoadMode::Mmap)
        .with_context(|| format!("loading candidate table from {}", table.display()))?;

    let mut widest = 0usize;
    let mut widest_surface = None;
    for surface in index.surfaces() {
        let n = index.candidates_of(surface).len();
        if n > widest {
            widest = n;
            widest_surface = Some(surface);
        }
    }

    println!("Table        : {}", table.display());
    println!("Header row   : {}", if stats.header_skipped { "yes" } else { "no" });
    println!("Records used : {}", stats.records);
    println!("Dropped rows : {}", stats.dropped);
    println!("Surfaces     : {}", index.surface_count());
    println!("Lemmas       : {}", index.lemma_count());
    println!("Ambiguous    : {}", index.ambiguous_surface_count());
    if let Some(surface) = widest_surface {
        let lemmas: Vec<&str> = index
            .candidates_of(surface)
            .iter()
            .map(|id| index.lemma(*id))
            .collect();
        println!(
            "Most candidates: {} -> {}",
            index.surface(surface),
            lemmas.join(", ")
        );
    }

    Ok(())
}
