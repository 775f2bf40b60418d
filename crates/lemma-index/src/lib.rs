//! Surface-form to candidate-lemma index.
//!
//! The index is built once from a candidate table: records of
//! `(surface, pos, lemma)` where the part of speech is ignored. Every surface
//! maps to an ordered, deduplicated list of candidate lemmas (first-seen
//! order), and every distinct lemma gets a dense [`LemmaId`]. Surfaces get
//! dense [`SurfaceId`]s in first-seen order as well, which is the order the
//! consolidation pass walks them in.
//!
//! Records are cleaned as they arrive:
//! - a record with an empty surface or lemma (after trimming) is dropped;
//! - the very first record with at least one field is skipped if it is a
//!   recognised header (see [`lemma_types::CANDIDATE_HEADERS`]), otherwise it
//!   is data.
//!
//! # Example
//! ```rust
//! use lemma_index::CandidateIndex;
//!
//! let index = CandidateIndex::from_records([
//!     ["surface_form", "pos", "lemma"],
//!     ["kello", "NOUN", "kello"],
//!     ["kello", "VERB", "kellota"],
//!     ["aika", "NOUN", "aika"],
//! ])
//! .unwrap();
//!
//! let kello = index.candidates("kello").unwrap();
//! let names: Vec<&str> = kello.iter().map(|id| index.lemma(*id)).collect();
//! assert_eq!(names, ["kello", "kellota"]);
//! assert_eq!(index.lemma_count(), 3);
//! ```

use std::collections::HashMap;

use lemma_types::{LemmaId, SurfaceId, is_candidate_header};
use thiserror::Error;

pub mod source;
pub mod table;

pub use source::{LoadMode, SourceFile};
pub use table::read_candidate_table;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("no lemmas collected from candidate table")]
    NoLemmas,
    #[error("candidate table exceeds {0} distinct entries")]
    Capacity(usize),
}

/// Counters describing how a candidate table was consumed.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LoadStats {
    /// Records that contributed a (surface, lemma) association.
    pub records: usize,
    /// Records dropped because the surface or lemma was empty.
    pub dropped: usize,
    pub header_skipped: bool,
}

struct SurfaceEntry {
    text: String,
    candidates: Vec<LemmaId>,
}

/// Read-only mapping from surface forms to their candidate lemmas.
pub struct CandidateIndex {
    surfaces: Vec<SurfaceEntry>,
    surface_ids: HashMap<String, SurfaceId>,
    lemmas: Vec<String>,
    lemma_ids: HashMap<String, LemmaId>,
}

impl CandidateIndex {
    /// Build an index from raw records, failing if no lemma was collected.
    pub fn from_records<R, I, S>(records: R) -> Result<Self, IndexError>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = CandidateIndexBuilder::new();
        for record in records {
            builder.push_record(record)?;
        }
        builder.finish().map(|(index, _)| index)
    }

    /// Candidate lemmas for a surface, in first-seen order.
    pub fn candidates(&self, surface: &str) -> Option<&[LemmaId]> {
        self.surface_ids
            .get(surface)
            .map(|id| self.candidates_of(*id))
    }

    /// Candidate lemmas for an interned surface.
    pub fn candidates_of(&self, surface: SurfaceId) -> &[LemmaId] {
        &self.surfaces[surface.index()].candidates
    }

    pub fn surface_id(&self, surface: &str) -> Option<SurfaceId> {
        self.surface_ids.get(surface).copied()
    }

    pub fn lemma_id(&self, lemma: &str) -> Option<LemmaId> {
        self.lemma_ids.get(lemma).copied()
    }

    pub fn surface(&self, id: SurfaceId) -> &str {
        &self.surfaces[id.index()].text
    }

    pub fn lemma(&self, id: LemmaId) -> &str {
        &self.lemmas[id.index()]
    }

    /// All surfaces in first-seen order.
    pub fn surfaces(&self) -> impl ExactSizeIterator<Item = SurfaceId> + '_ {
        (0..self.surfaces.len()).map(|i| SurfaceId::new(i as u32))
    }

    /// All lemmas in first-seen order.
    pub fn lemmas(&self) -> impl ExactSizeIterator<Item = LemmaId> + '_ {
        (0..self.lemmas.len()).map(|i| LemmaId::new(i as u32))
    }

    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    pub fn lemma_count(&self) -> usize {
        self.lemmas.len()
    }

    /// Number of surfaces with more than one candidate lemma.
    pub fn ambiguous_surface_count(&self) -> usize {
        self.surfaces
            .iter()
            .filter(|entry| entry.candidates.len() > 1)
            .count()
    }
}

/// Incremental builder used by [`CandidateIndex::from_records`] and the
/// table loader.
pub struct CandidateIndexBuilder {
    index: CandidateIndex,
    stats: LoadStats,
    header_checked: bool,
}

impl Default for CandidateIndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidateIndexBuilder {
    pub fn new() -> Self {
        Self {
            index: CandidateIndex {
                surfaces: Vec::new(),
                surface_ids: HashMap::new(),
                lemmas: Vec::new(),
                lemma_ids: HashMap::new(),
            },
            stats: LoadStats::default(),
            header_checked: false,
        }
    }

    /// Feed one record. Only the first three fields are looked at.
    pub fn push_record<I, S>(&mut self, record: I) -> Result<(), IndexError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fields: Vec<S> = record.into_iter().take(3).collect();
        // Only a record with no fields at all is blank; `""` is a record.
        if fields.is_empty() {
            return Ok(());
        }

        if !self.header_checked {
            self.header_checked = true;
            if is_candidate_header(&fields) {
                self.stats.header_skipped = true;
                return Ok(());
            }
        }

        let surface = fields[0].as_ref().trim();
        let lemma = fields.get(2).map(|f| f.as_ref().trim()).unwrap_or("");
        if surface.is_empty() || lemma.is_empty() {
            self.stats.dropped += 1;
            return Ok(());
        }

        self.insert(surface, lemma)?;
        self.stats.records += 1;
        Ok(())
    }

    /// Finish building; an index without lemmas is an error.
    pub fn finish(self) -> Result<(CandidateIndex, LoadStats), IndexError> {
        if self.index.lemmas.is_empty() {
            return Err(IndexError::NoLemmas);
        }
        Ok((self.index, self.stats))
    }

    fn insert(&mut self, surface: &str, lemma: &str) -> Result<(), IndexError> {
        let index = &mut self.index;

        let lemma_id = match index.lemma_ids.get(lemma) {
            Some(id) => *id,
            None => {
                let id = LemmaId::new(next_id(index.lemmas.len())?);
                index.lemmas.push(lemma.to_string());
                index.lemma_ids.insert(lemma.to_string(), id);
                id
            }
        };

        let surface_id = match index.surface_ids.get(surface) {
            Some(id) => *id,
            None => {
                let id = SurfaceId::new(next_id(index.surfaces.len())?);
                index.surfaces.push(SurfaceEntry {
                    text: surface.to_string(),
                    candidates: Vec::new(),
                });
                index.surface_ids.insert(surface.to_string(), id);
                id
            }
        };

        let candidates = &mut index.surfaces[surface_id.index()].candidates;
        if !candidates.contains(&lemma_id) {
            candidates.push(lemma_id);
        }
        Ok(())
    }
}

fn next_id(len: usize) -> Result<u32, IndexError> {
    u32::try_from(len).map_err(|_| IndexError::Capacity(u32::MAX as usize))
}
