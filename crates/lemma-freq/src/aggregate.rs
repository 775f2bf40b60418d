//! Raw per-lemma accumulation from a surface frequency list.

use lemma_index::CandidateIndex;
use lemma_types::FrequencyObservation;
use tracing::{debug, warn};

use crate::{LemmaTotals, SurfaceFrequencies};

/// Output of the aggregation pass.
#[derive(Clone, Debug)]
pub struct Aggregation {
    /// Raw totals: every candidate of a matched surface credited in full.
    pub totals: LemmaTotals,
    pub surface_freqs: SurfaceFrequencies,
    pub matched: u64,
    pub unmatched: u64,
    /// Non-blank lines skipped as malformed. Not part of matched/unmatched.
    pub malformed: u64,
    /// Matched observations that replaced an earlier value for the same surface.
    pub duplicate_surfaces: u64,
}

/// Parse `surface frequency [ignored...]`.
///
/// Returns `None` for lines with fewer than two whitespace-separated fields or
/// a frequency that is not a non-negative integer.
pub fn parse_frequency_line(line: &str) -> Option<FrequencyObservation<'_>> {
    let mut fields = line.split_whitespace();
    let surface = fields.next()?;
    let count = fields.next()?.parse::<u64>().ok()?;
    Some(FrequencyObservation { surface, count })
}

/// Accumulates observations against a candidate index one at a time.
pub struct Aggregator<'a> {
    index: &'a CandidateIndex,
    out: Aggregation,
}

impl<'a> Aggregator<'a> {
    pub fn new(index: &'a CandidateIndex) -> Self {
        Self {
            index,
            out: Aggregation {
                totals: LemmaTotals::zeroed(index),
                surface_freqs: SurfaceFrequencies::empty(index),
                matched: 0,
                unmatched: 0,
                malformed: 0,
                duplicate_surfaces: 0,
            },
        }
    }

    /// Feed one raw line. Blank lines are ignored without being counted.
    pub fn feed_line(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        match parse_frequency_line(line) {
            Some(obs) => self.observe(obs),
            None => self.out.malformed += 1,
        }
    }

    pub fn observe(&mut self, obs: FrequencyObservation<'_>) {
        let Some(surface) = self.index.surface_id(obs.surface) else {
            self.out.unmatched += 1;
            return;
        };
        self.out.matched += 1;

        if let Some(previous) = self.out.surface_freqs.record(surface, obs.count) {
            self.out.duplicate_surfaces += 1;
            debug!(
                "surface {} observed again ({} -> {}); keeping the last value",
                obs.surface, previous, obs.count
            );
        }
        for lemma in self.index.candidates_of(surface) {
            self.out.totals.credit(*lemma, obs.count);
        }
    }

    pub fn finish(self) -> Aggregation {
        if self.out.duplicate_surfaces > 0 {
            warn!(
                "{} frequency lines repeated an earlier surface; raw totals include every \
                 occurrence but consolidation uses the last value only",
                self.out.duplicate_surfaces
            );
        }
        self.out
    }
}

/// Aggregate a whole frequency list against `index`.
pub fn aggregate<I, S>(index: &CandidateIndex, lines: I) -> Aggregation
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut aggregator = Aggregator::new(index);
    for line in lines {
        aggregator.feed_line(line.as_ref());
    }
    aggregator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kello_index() -> CandidateIndex {
        CandidateIndex::from_records([
            ["kello", "NOUN", "kello"],
            ["kello", "VERB", "kellota"],
            ["aika", "NOUN", "aika"],
        ])
        .unwrap()
    }

    fn total(index: &CandidateIndex, agg: &Aggregation, lemma: &str) -> u64 {
        agg.totals.get(index.lemma_id(lemma).unwrap())
    }

    #[test]
    fn parses_surface_and_frequency_ignoring_extra_fields() {
        assert_eq!(
            parse_frequency_line("kello 100 extra stuff"),
            Some(FrequencyObservation {
                surface: "kello",
                count: 100
            })
        );
        assert_eq!(
            parse_frequency_line("\tkello\t\t7  ").map(|o| o.count),
            Some(7)
        );
    }

    #[test]
    fn rejects_short_lines_and_bad_numbers() {
        assert_eq!(parse_frequency_line("kello"), None);
        assert_eq!(parse_frequency_line("kello many"), None);
        assert_eq!(parse_frequency_line("kello 1.5"), None);
        assert_eq!(parse_frequency_line("kello -3"), None);
        assert_eq!(parse_frequency_line(""), None);
    }

    #[test]
    fn credits_every_candidate_of_a_matched_surface() {
        let index = kello_index();
        let agg = aggregate(&index, ["kello 100", "aika 50", "muu 30"]);
        assert_eq!(agg.matched, 2);
        assert_eq!(agg.unmatched, 1);
        assert_eq!(total(&index, &agg, "kello"), 100);
        assert_eq!(total(&index, &agg, "kellota"), 100);
        assert_eq!(total(&index, &agg, "aika"), 50);
    }

    #[test]
    fn malformed_lines_do_not_touch_counters() {
        let index = kello_index();
        let agg = aggregate(&index, ["", "kello", "kello x", "   ", "muu 1"]);
        assert_eq!(agg.matched, 0);
        assert_eq!(agg.unmatched, 1);
        assert_eq!(agg.malformed, 2);
        assert!(agg.totals.iter().all(|(_, count)| count == 0));
    }

    #[test]
    fn duplicate_surface_sums_raw_but_records_last_value() {
        let index = kello_index();
        let agg = aggregate(&index, ["aika 5", "aika 20"]);
        assert_eq!(agg.matched, 2);
        assert_eq!(agg.duplicate_surfaces, 1);
        assert_eq!(total(&index, &agg, "aika"), 25);
        let aika = index.surface_id("aika").unwrap();
        assert_eq!(agg.surface_freqs.get(aika), Some(20));
    }

    #[test]
    fn unobserved_surfaces_have_no_recorded_frequency() {
        let index = kello_index();
        let agg = aggregate(&index, ["aika 5"]);
        let kello = index.surface_id("kello").unwrap();
        assert_eq!(agg.surface_freqs.get(kello), None);
        assert_eq!(agg.surface_freqs.observed(), 1);
    }
}
