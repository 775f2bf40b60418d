//! Greedy reassignment of ambiguous surface frequencies.
//!
//! Each ambiguous surface hands its whole frequency to the candidate with the
//! highest *current* total and takes it back from the others. Because totals
//! are read and written during the same walk, the result depends on the
//! order surfaces are visited in. [`consolidate`] always uses the first-seen
//! order of the candidate table; [`consolidate_in_order`] takes an explicit
//! worklist.

use lemma_index::CandidateIndex;
use lemma_types::{LemmaId, SurfaceId};
use tracing::debug;

use crate::{LemmaTotals, SurfaceFrequencies};

/// How one ambiguous surface was resolved.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Resolution {
    pub surface: SurfaceId,
    pub freq: u64,
    pub winner: LemmaId,
    pub losers: Vec<LemmaId>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ConsolidationReport {
    /// Ambiguous surfaces visited.
    pub ambiguous: usize,
    /// Ambiguous surfaces left alone because they were never observed or
    /// observed with frequency zero.
    pub skipped: usize,
    pub resolutions: Vec<Resolution>,
}

/// First candidate whose current total equals the maximum.
pub fn best_candidate(candidates: &[LemmaId], totals: &LemmaTotals) -> Option<LemmaId> {
    let mut best: Option<(LemmaId, u64)> = None;
    for &lemma in candidates {
        let total = totals.get(lemma);
        match best {
            Some((_, best_total)) if total <= best_total => {}
            _ => best = Some((lemma, total)),
        }
    }
    best.map(|(lemma, _)| lemma)
}

/// Consolidate every ambiguous surface in first-seen order.
pub fn consolidate(
    totals: &mut LemmaTotals,
    index: &CandidateIndex,
    surface_freqs: &SurfaceFrequencies,
) -> ConsolidationReport {
    consolidate_in_order(totals, index, surface_freqs, index.surfaces())
}

/// Consolidate the surfaces of `order`, in that order.
///
/// Unambiguous surfaces in the worklist are passed over.
pub fn consolidate_in_order<I>(
    totals: &mut LemmaTotals,
    index: &CandidateIndex,
    surface_freqs: &SurfaceFrequencies,
    order: I,
) -> ConsolidationReport
where
    I: IntoIterator<Item = SurfaceId>,
{
    let mut report = ConsolidationReport::default();

    for surface in order {
        let candidates = index.candidates_of(surface);
        if candidates.len() < 2 {
            continue;
        }
        report.ambiguous += 1;

        let freq = match surface_freqs.get(surface) {
            Some(freq) if freq > 0 => freq,
            _ => {
                report.skipped += 1;
                continue;
            }
        };
        let Some(winner) = best_candidate(candidates, totals) else {
            continue;
        };

        let losers: Vec<LemmaId> = candidates
            .iter()
            .copied()
            .filter(|lemma| *lemma != winner)
            .collect();
        for lemma in &losers {
            totals.debit(*lemma, freq);
        }

        debug!(
            "{} ({}): kept by {}, removed from {}",
            index.surface(surface),
            freq,
            index.lemma(winner),
            losers
                .iter()
                .map(|lemma| index.lemma(*lemma))
                .collect::<Vec<_>>()
                .join(", ")
        );
        report.resolutions.push(Resolution {
            surface,
            freq,
            winner,
            losers,
        });
    }

    report
}
