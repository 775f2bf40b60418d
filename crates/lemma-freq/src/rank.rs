//! Deterministic dense ranking of lemma totals.

use std::cmp::Reverse;

use lemma_index::CandidateIndex;
use lemma_types::RankedRow;

use crate::LemmaTotals;

/// Rank every lemma: frequency descending, then lemma text ascending.
///
/// Ranks run `1..=N` with no ties; equal frequencies are ordered by text.
pub fn rank(index: &CandidateIndex, totals: &LemmaTotals) -> Vec<RankedRow> {
    let mut ordered: Vec<(&str, u64)> = totals
        .iter()
        .map(|(lemma, freq)| (index.lemma(lemma), freq))
        .collect();
    // Lemma text is unique, so the key is a total order.
    ordered.sort_unstable_by_key(|&(lemma, freq)| (Reverse(freq), lemma));

    ordered
        .into_iter()
        .enumerate()
        .map(|(i, (lemma, freq))| RankedRow {
            lemma: lemma.to_string(),
            freq,
            rank: i + 1,
        })
        .collect()
}

/// Number of lemmas whose total is zero.
pub fn zero_frequency_lemmas(totals: &LemmaTotals) -> usize {
    totals.iter().filter(|(_, freq)| *freq == 0).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate;

    #[test]
    fn equal_frequencies_get_distinct_ranks_in_text_order() {
        let index = CandidateIndex::from_records([
            ["c", "NOUN", "gamma"],
            ["b", "NOUN", "beta"],
            ["a", "NOUN", "alfa"],
            ["d", "NOUN", "delta"],
        ])
        .unwrap();
        let agg = aggregate(&index, ["a 5", "b 5", "c 5", "d 9"]);
        let rows = rank(&index, &agg.totals);
        let flat: Vec<(&str, u64, usize)> = rows
            .iter()
            .map(|r| (r.lemma.as_str(), r.freq, r.rank))
            .collect();
        assert_eq!(
            flat,
            [
                ("delta", 9, 1),
                ("alfa", 5, 2),
                ("beta", 5, 3),
                ("gamma", 5, 4)
            ]
        );
    }

    #[test]
    fn every_lemma_appears_once_including_zeros() {
        let index = CandidateIndex::from_records([
            ["talo", "NOUN", "talo"],
            ["puu", "NOUN", "puu"],
            ["kivi", "NOUN", "kivi"],
        ])
        .unwrap();
        let agg = aggregate(&index, ["puu 2"]);
        let rows = rank(&index, &agg.totals);

        assert_eq!(rows.len(), index.lemma_count());
        assert_eq!(zero_frequency_lemmas(&agg.totals), 2);
        let ranks: Vec<usize> = rows.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, [1, 2, 3]);
        assert_eq!(rows[0].lemma, "puu");
        assert!(rows[1..].iter().all(|r| r.freq == 0));
        assert!(rows[1].lemma < rows[2].lemma);
    }

    #[test]
    fn text_order_is_by_code_point() {
        let index = CandidateIndex::from_records([
            ["a", "NOUN", "äiti"],
            ["b", "NOUN", "Zeta"],
            ["c", "NOUN", "aamu"],
        ])
        .unwrap();
        let agg = aggregate(&index, Vec::<&str>::new());
        let names: Vec<String> = rank(&index, &agg.totals)
            .into_iter()
            .map(|r| r.lemma)
            .collect();
        assert_eq!(names, ["Zeta", "aamu", "äiti"]);
    }
}
