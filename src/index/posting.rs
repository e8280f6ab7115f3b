//! Postings and posting lists.

use serde::{Deserialize, Serialize};

use crate::error::{KazsearchError, Result};

/// Document identifier, assigned sequentially from 0 within a segment.
pub type DocId = u64;

/// One document's entry in a term's posting list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    /// The document containing the term.
    pub doc_id: DocId,
    /// How often the term occurs in the document's field.
    pub frequency: u32,
}

impl Posting {
    /// Create a posting.
    pub fn new(doc_id: DocId, frequency: u32) -> Self {
        Posting { doc_id, frequency }
    }
}

/// Postings of one term, strictly ascending by document id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingList {
    postings: Vec<Posting>,
}

impl PostingList {
    /// Create an empty posting list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a posting. The id must be greater than every id already in
    /// the list.
    pub fn push(&mut self, doc_id: DocId, frequency: u32) -> Result<()> {
        if let Some(last) = self.postings.last() {
            if last.doc_id >= doc_id {
                return Err(KazsearchError::invalid_argument(format!(
                    "posting for document {doc_id} out of order (last is {})",
                    last.doc_id
                )));
            }
        }
        self.postings.push(Posting::new(doc_id, frequency));
        Ok(())
    }

    /// Add `frequency` occurrences for `doc_id`, merging into the last
    /// posting when it belongs to the same document.
    pub fn add(&mut self, doc_id: DocId, frequency: u32) -> Result<()> {
        match self.postings.last_mut() {
            Some(last) if last.doc_id == doc_id => {
                last.frequency += frequency;
                Ok(())
            }
            _ => self.push(doc_id, frequency),
        }
    }

    /// Get the posting for a document.
    pub fn get(&self, doc_id: DocId) -> Option<&Posting> {
        self.postings
            .binary_search_by_key(&doc_id, |p| p.doc_id)
            .ok()
            .map(|i| &self.postings[i])
    }

    /// Iterate postings in document id order.
    pub fn iter(&self) -> std::slice::Iter<'_, Posting> {
        self.postings.iter()
    }

    /// Number of postings.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Sum of frequencies over all postings.
    pub fn total_frequency(&self) -> u64 {
        self.postings.iter().map(|p| u64::from(p.frequency)).sum()
    }
}

impl<'a> IntoIterator for &'a PostingList {
    type Item = &'a Posting;
    type IntoIter = std::slice::Iter<'a, Posting>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_order() {
        let mut list = PostingList::new();
        list.push(0, 2).unwrap();
        list.push(3, 1).unwrap();

        assert!(list.push(3, 1).is_err());
        assert!(list.push(1, 1).is_err());
        assert_eq!(list.len(), 2);
        assert_eq!(list.total_frequency(), 3);
    }

    #[test]
    fn test_add_merges_same_document() {
        let mut list = PostingList::new();
        list.add(1, 1).unwrap();
        list.add(1, 2).unwrap();
        list.add(4, 1).unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list.get(1).map(|p| p.frequency), Some(3));
    }

    #[test]
    fn test_get() {
        let mut list = PostingList::new();
        list.push(2, 4).unwrap();
        list.push(5, 1).unwrap();

        assert_eq!(list.get(2), Some(&Posting::new(2, 4)));
        assert_eq!(list.get(3), None);
        assert_eq!(
            list.iter().map(|p| p.doc_id).collect::<Vec<_>>(),
            vec![2, 5]
        );
    }
}
