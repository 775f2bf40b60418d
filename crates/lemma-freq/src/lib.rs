//! Lemma frequency ranking from surface-form frequencies.
//!
//! A surface form that maps to several candidate lemmas carries no context to
//! say which lemma a given occurrence belongs to. This crate resolves that
//! with a three-step batch pipeline over a [`CandidateIndex`]:
//!
//! 1. [`aggregate`] credits every candidate of a matched surface with the
//!    surface's full frequency (over-counts ambiguous surfaces on purpose).
//! 2. [`consolidate`] walks ambiguous surfaces in first-seen order and gives
//!    each surface's frequency to its best-supported candidate only, taking it
//!    back from the other candidates.
//! 3. [`rank`] orders lemmas by frequency (descending) then lemma text and
//!    assigns dense ranks `1..=N`.
//!
//! The two tie-break rules are independent: consolidation prefers the
//! earliest candidate in the surface's candidate list, ranking prefers the
//! lexically smaller lemma.
//!
//! # Example
//! ```rust
//! use lemma_freq::{aggregate, consolidate, rank};
//! use lemma_index::CandidateIndex;
//!
//! let index = CandidateIndex::from_records([
//!     ["kello", "NOUN", "kello"],
//!     ["kello", "VERB", "kellota"],
//!     ["aika", "NOUN", "aika"],
//! ])
//! .unwrap();
//!
//! let mut agg = aggregate(&index, ["kello 100", "aika 50", "muu 30"]);
//! assert_eq!((agg.matched, agg.unmatched), (2, 1));
//!
//! consolidate(&mut agg.totals, &index, &agg.surface_freqs);
//! let rows = rank(&index, &agg.totals);
//! let flat: Vec<(&str, u64, usize)> = rows
//!     .iter()
//!     .map(|r| (r.lemma.as_str(), r.freq, r.rank))
//!     .collect();
//! assert_eq!(flat, [("kello", 100, 1), ("aika", 50, 2), ("kellota", 0, 3)]);
//! ```

use lemma_index::CandidateIndex;
use lemma_types::{LemmaId, SurfaceId};

pub mod aggregate;
pub mod consolidate;
pub mod rank;

pub use aggregate::{Aggregation, Aggregator, aggregate, parse_frequency_line};
pub use consolidate::{
    ConsolidationReport, Resolution, best_candidate, consolidate, consolidate_in_order,
};
pub use rank::{rank, zero_frequency_lemmas};

/// Running frequency total for every lemma of an index.
///
/// Totals start at zero for all known lemmas and never go negative.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LemmaTotals {
    counts: Vec<u64>,
}

impl LemmaTotals {
    pub fn zeroed(index: &CandidateIndex) -> Self {
        Self {
            counts: vec![0; index.lemma_count()],
        }
    }

    pub fn get(&self, lemma: LemmaId) -> u64 {
        self.counts[lemma.index()]
    }

    pub fn credit(&mut self, lemma: LemmaId, amount: u64) {
        let slot = &mut self.counts[lemma.index()];
        *slot = slot.saturating_add(amount);
    }

    /// Subtract `amount`, flooring at zero.
    pub fn debit(&mut self, lemma: LemmaId, amount: u64) {
        let slot = &mut self.counts[lemma.index()];
        *slot = slot.saturating_sub(amount);
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (LemmaId, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(i, count)| (LemmaId::new(i as u32), *count))
    }
}

/// Last observed frequency of each surface (last write wins).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SurfaceFrequencies {
    values: Vec<Option<u64>>,
}

impl SurfaceFrequencies {
    pub fn empty(index: &CandidateIndex) -> Self {
        Self {
            values: vec![None; index.surface_count()],
        }
    }

    /// Frequency recorded for a surface, if it was observed at all.
    pub fn get(&self, surface: SurfaceId) -> Option<u64> {
        self.values[surface.index()]
    }

    /// Record a frequency, returning the value it replaced.
    pub fn record(&mut self, surface: SurfaceId, count: u64) -> Option<u64> {
        self.values[surface.index()].replace(count)
    }

    /// Number of surfaces with a recorded frequency.
    pub fn observed(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}
