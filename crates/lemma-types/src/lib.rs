//! Shared types for building lemma frequency rankings.
//!
//! Surface forms and lemmas are interned once by the candidate index and
//! referred to everywhere else through dense handles ([`SurfaceId`],
//! [`LemmaId`]). Handles are assigned in first-seen order of the candidate
//! table, so iterating them in numeric order is reproducible across runs.
//!
//! ```rust
//! use lemma_types::{LemmaId, RankedRow, is_candidate_header};
//!
//! let id = LemmaId::new(3);
//! assert_eq!(id.index(), 3);
//! assert!(is_candidate_header(&["Surface_Form", " POS ", "lemma"]));
//!
//! let row = RankedRow { lemma: "kello".into(), freq: 100, rank: 1 };
//! assert_eq!(row.rank, 1);
//! ```

use std::fmt;

use serde::Serialize;

/// Header rows recognised at the top of a candidate table (compared
/// case-insensitively after trimming).
pub const CANDIDATE_HEADERS: [[&str; 3]; 2] = [
    ["surface_form", "pos", "lemma"],
    ["surface form", "pos", "lemma"],
];

/// Dense handle for a lemma, assigned in first-seen order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct LemmaId(u32);

impl LemmaId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// Position of this lemma in per-lemma tables.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for LemmaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// Dense handle for a surface form, assigned in first-seen order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SurfaceId(u32);

impl SurfaceId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// Position of this surface in per-surface tables.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

/// One `surface count` line from a frequency list, borrowing the surface text.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FrequencyObservation<'a> {
    pub surface: &'a str,
    pub count: u64,
}

/// A lemma with its final frequency and 1-based rank.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RankedRow {
    pub lemma: String,
    pub freq: u64,
    pub rank: usize,
}

/// Counters reported at the end of a run.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RunSummary {
    pub surfaces: usize,
    pub lemmas: usize,
    pub matched: u64,
    pub unmatched: u64,
    pub zero_frequency_lemmas: usize,
    pub rows_written: usize,
}

/// Whether the first three fields of a record spell a recognised header.
///
/// Records with fewer than three fields never match.
pub fn is_candidate_header<S: AsRef<str>>(fields: &[S]) -> bool {
    if fields.len() < 3 {
        return false;
    }
    CANDIDATE_HEADERS.iter().any(|header| {
        header
            .iter()
            .zip(fields)
            .all(|(expected, field)| field.as_ref().trim().eq_ignore_ascii_case(expected))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_both_header_spellings() {
        assert!(is_candidate_header(&["surface_form", "pos", "lemma"]));
        assert!(is_candidate_header(&["Surface Form", "POS", "Lemma"]));
        assert!(is_candidate_header(&["surface_form", "pos", "lemma", "extra"]));
    }

    #[test]
    fn rejects_data_rows_and_short_records() {
        assert!(!is_candidate_header(&["kello", "NOUN", "kello"]));
        assert!(!is_candidate_header(&["surface_form", "pos"]));
        assert!(!is_candidate_header(&["lemma", "pos", "surface_form"]));
    }

    #[test]
    fn ranked_row_serializes_with_freq_field() {
        let row = RankedRow {
            lemma: "aika".into(),
            freq: 50,
            rank: 2,
        };
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"lemma":"aika","freq":50,"rank":2}"#);
    }
}
