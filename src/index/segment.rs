//! A self-contained indexed corpus.
//!
//! A [`Segment`] owns everything one indexing session produced: per-field
//! term dictionaries with their posting lists, per-document field lengths,
//! numeric field values for range queries, and the stored field table keyed
//! by document id. Readers only ever see committed segments, which are never
//! mutated afterwards.
//!
//! # File format
//!
//! ```text
//! +--------+---------+-------+--------+-------------------+
//! | "KZSG" | version | crc32 | length | bincode payload   |
//! | 4 B    | u32 LE  | u32 LE| u64 LE | `length` bytes    |
//! +--------+---------+-------+--------+-------------------+
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::io::{Cursor, Read};
use std::ops::Bound;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::AnalyzerKind;
use crate::document::field::FieldValue;
use crate::error::{KazsearchError, Result};
use crate::index::posting::{DocId, PostingList};

const MAGIC: &[u8; 4] = b"KZSG";
const FORMAT_VERSION: u32 = 2;
const HEADER_LEN: usize = 4 + 4 + 4 + 8;

/// Stored field values of one document, by field name.
pub type StoredFields = BTreeMap<String, FieldValue>;

/// The inverted index of a single field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldIndex {
    terms: BTreeMap<String, PostingList>,
    lengths: BTreeMap<DocId, u32>,
    /// Live documents with a non-zero length, kept in step with
    /// `Segment::insert` and `Segment::delete`.
    live_docs: u64,
}

impl FieldIndex {
    /// Posting list of a term.
    pub fn postings(&self, term: &str) -> Option<&PostingList> {
        self.terms.get(term)
    }

    /// Iterate terms in lexicographic order.
    pub fn terms(&self) -> impl Iterator<Item = (&str, &PostingList)> {
        self.terms.iter().map(|(t, p)| (t.as_str(), p))
    }

    /// Iterate terms that start with `prefix`.
    pub fn terms_with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a PostingList)> + 'a {
        self.terms
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |(t, _)| t.starts_with(prefix))
            .map(|(t, p)| (t.as_str(), p))
    }

    /// Number of distinct terms.
    pub fn unique_terms(&self) -> usize {
        self.terms.len()
    }

    /// Number of live documents with at least one term in the field.
    pub fn doc_count(&self) -> u64 {
        self.live_docs
    }

    /// Number of terms the field had in a document.
    pub fn length(&self, doc_id: DocId) -> Option<u32> {
        self.lengths.get(&doc_id).copied()
    }
}

/// Analysis output for one document, ready to be appended to a segment.
#[derive(Debug, Clone, Default)]
pub struct AnalyzedDocument {
    /// Term frequencies and field length per indexed text field.
    pub terms: Vec<(String, BTreeMap<String, u32>, u32)>,
    /// Indexed integer values.
    pub numbers: Vec<(String, i64)>,
    /// Values to keep for retrieval.
    pub stored: StoredFields,
}

/// Per-field statistics, as reported by [`Segment::stats`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldStats {
    /// Field name.
    pub field: String,
    /// Distinct terms in the field.
    pub unique_terms: usize,
    /// Number of (term, live document) pairs.
    pub sum_doc_freq: u64,
    /// Sum of term frequencies over live documents.
    pub sum_total_term_freq: u64,
}

/// Segment-wide statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexStats {
    /// Analyzer the segment was written with.
    pub analyzer: AnalyzerKind,
    /// Number of ids ever assigned.
    pub doc_count: u64,
    /// Number of documents not deleted.
    pub live_doc_count: u64,
    /// Number of deleted documents.
    pub deleted_count: u64,
    /// Text field statistics, by field name.
    pub fields: Vec<FieldStats>,
    /// Names of integer fields.
    pub numeric_fields: Vec<String>,
}

/// One indexing session's worth of documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    analyzer: AnalyzerKind,
    fields: BTreeMap<String, FieldIndex>,
    numeric: BTreeMap<String, Vec<(DocId, i64)>>,
    stored: Vec<StoredFields>,
    deleted: BTreeSet<DocId>,
}

impl Segment {
    /// Create an empty segment written with `analyzer`.
    pub fn new(analyzer: AnalyzerKind) -> Self {
        Segment {
            analyzer,
            fields: BTreeMap::new(),
            numeric: BTreeMap::new(),
            stored: Vec::new(),
            deleted: BTreeSet::new(),
        }
    }

    /// Analyzer the segment's terms were produced with.
    pub fn analyzer_kind(&self) -> AnalyzerKind {
        self.analyzer
    }

    /// Number of ids ever assigned, deleted ones included.
    pub fn doc_count(&self) -> u64 {
        self.stored.len() as u64
    }

    /// Number of documents that have not been deleted.
    pub fn live_doc_count(&self) -> u64 {
        self.doc_count() - self.deleted.len() as u64
    }

    /// Check if a document id was assigned and not deleted.
    pub fn is_live(&self, doc_id: DocId) -> bool {
        doc_id < self.doc_count() && !self.deleted.contains(&doc_id)
    }

    /// Iterate live document ids in ascending order.
    pub fn live_doc_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        (0..self.doc_count()).filter(|id| !self.deleted.contains(id))
    }

    /// The inverted index of a text field.
    pub fn field(&self, field: &str) -> Option<&FieldIndex> {
        self.fields.get(field)
    }

    /// Names of indexed text fields.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Posting list of `(field, term)`. May include deleted documents.
    pub fn postings(&self, field: &str, term: &str) -> Option<&PostingList> {
        self.fields.get(field)?.postings(term)
    }

    /// Number of live documents containing `(field, term)`.
    pub fn doc_freq(&self, field: &str, term: &str) -> u64 {
        self.postings(field, term)
            .map(|list| list.iter().filter(|p| self.is_live(p.doc_id)).count() as u64)
            .unwrap_or(0)
    }

    /// Number of live documents with at least one term in `field`.
    pub fn field_doc_count(&self, field: &str) -> u64 {
        self.fields.get(field).map_or(0, FieldIndex::doc_count)
    }

    /// Sum of term frequencies across all live documents for a field.
    pub fn term_doc_frequency(&self, field: &str) -> u64 {
        self.live_postings(field)
            .map(|(_, freq)| u64::from(freq))
            .sum()
    }

    /// Number of (term, live document) pairs in a field.
    pub fn sum_doc_freq(&self, field: &str) -> u64 {
        self.live_postings(field).count() as u64
    }

    fn live_postings<'a>(&'a self, field: &str) -> impl Iterator<Item = (DocId, u32)> + 'a {
        self.fields
            .get(field)
            .into_iter()
            .flat_map(|f| f.terms.values())
            .flat_map(|list| list.iter())
            .filter(|p| self.is_live(p.doc_id))
            .map(|p| (p.doc_id, p.frequency))
    }

    /// Integer values of a field, ordered by document id. May include
    /// deleted documents.
    pub fn numeric_values(&self, field: &str) -> &[(DocId, i64)] {
        self.numeric.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Stored fields of a document.
    ///
    /// Fails with `NotFound` if the id was never assigned or was deleted.
    pub fn stored_fields(&self, doc_id: DocId) -> Result<&StoredFields> {
        if self.deleted.contains(&doc_id) {
            return Err(KazsearchError::not_found(format!(
                "document {doc_id} has been deleted"
            )));
        }
        usize::try_from(doc_id)
            .ok()
            .and_then(|i| self.stored.get(i))
            .ok_or_else(|| KazsearchError::not_found(format!("document {doc_id}")))
    }

    /// Collect statistics over the live documents.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            analyzer: self.analyzer,
            doc_count: self.doc_count(),
            live_doc_count: self.live_doc_count(),
            deleted_count: self.deleted.len() as u64,
            fields: self
                .fields
                .iter()
                .map(|(name, index)| FieldStats {
                    field: name.clone(),
                    unique_terms: index.unique_terms(),
                    sum_doc_freq: self.sum_doc_freq(name),
                    sum_total_term_freq: self.term_doc_frequency(name),
                })
                .collect(),
            numeric_fields: self.numeric.keys().cloned().collect(),
        }
    }

    /// Reserve room for `additional` more documents.
    pub(crate) fn try_reserve(&mut self, additional: usize) -> Result<()> {
        self.stored.try_reserve(additional).map_err(|e| {
            KazsearchError::corpus_exhausted(format!(
                "cannot grow stored field table by {additional}: {e}"
            ))
        })
    }

    /// Append an analyzed document under the next id.
    pub(crate) fn insert(&mut self, doc: AnalyzedDocument) -> Result<DocId> {
        let doc_id = self.doc_count();

        for (field, freqs, length) in doc.terms {
            let index = self.fields.entry(field).or_default();
            let slot = index.lengths.entry(doc_id).or_insert(0);
            let was_empty = *slot == 0;
            *slot += length;
            if was_empty && *slot > 0 {
                index.live_docs += 1;
            }
            for (term, freq) in freqs {
                index.terms.entry(term).or_default().add(doc_id, freq)?;
            }
        }

        for (field, value) in doc.numbers {
            self.numeric.entry(field).or_default().push((doc_id, value));
        }

        self.stored.push(doc.stored);
        Ok(doc_id)
    }

    /// Mark a document as deleted.
    pub(crate) fn delete(&mut self, doc_id: DocId) -> Result<()> {
        if !self.is_live(doc_id) {
            return Err(KazsearchError::not_found(format!("document {doc_id}")));
        }
        for index in self.fields.values_mut() {
            if index.length(doc_id).is_some_and(|len| len > 0) {
                index.live_docs -= 1;
            }
        }
        self.deleted.insert(doc_id);
        Ok(())
    }

    /// Encode into the segment file format.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let payload = bincode::serialize(self)?;

        let mut buf = Vec::with_capacity(HEADER_LEN + payload.len());
        buf.extend_from_slice(MAGIC);
        buf.write_u32::<LittleEndian>(FORMAT_VERSION)?;
        buf.write_u32::<LittleEndian>(crc32fast::hash(&payload))?;
        buf.write_u64::<LittleEndian>(payload.len() as u64)?;
        buf.extend_from_slice(&payload);
        Ok(buf)
    }

    /// Decode a segment file, verifying header and checksum.
    pub fn decode(bytes: &[u8]) -> Result<Segment> {
        if bytes.len() < HEADER_LEN {
            return Err(KazsearchError::storage(format!(
                "segment file too short: {} bytes",
                bytes.len()
            )));
        }

        let mut cursor = Cursor::new(bytes);
        let mut magic = [0u8; 4];
        cursor.read_exact(&mut magic)?;
        if &magic != MAGIC {
            return Err(KazsearchError::storage("not a segment file (bad magic)"));
        }

        let version = cursor.read_u32::<LittleEndian>()?;
        if version != FORMAT_VERSION {
            return Err(KazsearchError::storage(format!(
                "unsupported segment format version {version}"
            )));
        }

        let checksum = cursor.read_u32::<LittleEndian>()?;
        let length = cursor.read_u64::<LittleEndian>()?;
        let payload = &bytes[HEADER_LEN..];
        if payload.len() as u64 != length {
            return Err(KazsearchError::storage(format!(
                "segment payload is {} bytes, header says {length}",
                payload.len()
            )));
        }
        if crc32fast::hash(payload) != checksum {
            return Err(KazsearchError::storage("segment checksum mismatch"));
        }

        Ok(bincode::deserialize(payload)?)
    }
}
