//! Candidate sets: matching documents with partial scores.

use std::collections::BTreeMap;

use crate::index::posting::DocId;

/// Documents matching a query, ascending by id, each with a score.
///
/// Set operations are linear merges over the sorted entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Candidates {
    entries: Vec<(DocId, f32)>,
}

impl Candidates {
    /// An empty candidate set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from entries already ascending by id without duplicates.
    pub fn from_sorted(entries: Vec<(DocId, f32)>) -> Self {
        debug_assert!(entries.windows(2).all(|w| w[0].0 < w[1].0));
        Candidates { entries }
    }

    /// Build from a map of scores.
    pub fn from_map(scores: BTreeMap<DocId, f32>) -> Self {
        Candidates {
            entries: scores.into_iter().collect(),
        }
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no candidates.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(doc_id, score)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (DocId, f32)> + '_ {
        self.entries.iter().copied()
    }

    /// Candidate ids in ascending order.
    pub fn doc_ids(&self) -> Vec<DocId> {
        self.entries.iter().map(|&(id, _)| id).collect()
    }

    /// Score of a candidate.
    pub fn score(&self, doc_id: DocId) -> Option<f32> {
        self.entries
            .binary_search_by_key(&doc_id, |&(id, _)| id)
            .ok()
            .map(|i| self.entries[i].1)
    }

    /// Documents in both sets; scores are summed.
    pub fn intersect(&self, other: &Candidates) -> Candidates {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j) = (0, 0);
        let mut out = Vec::with_capacity(a.len().min(b.len()));
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    out.push((a[i].0, a[i].1 + b[j].1));
                    i += 1;
                    j += 1;
                }
            }
        }
        Candidates { entries: out }
    }

    /// Documents in either set; scores of shared documents are summed.
    pub fn union(&self, other: &Candidates) -> Candidates {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j) = (0, 0);
        let mut out = Vec::with_capacity(a.len() + b.len());
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => {
                    out.push(a[i]);
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    out.push(b[j]);
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    out.push((a[i].0, a[i].1 + b[j].1));
                    i += 1;
                    j += 1;
                }
            }
        }
        out.extend_from_slice(&a[i..]);
        out.extend_from_slice(&b[j..]);
        Candidates { entries: out }
    }

    /// Documents of `self` not in `other`; scores unchanged.
    pub fn subtract(&self, other: &Candidates) -> Candidates {
        let b = &other.entries;
        let mut j = 0;
        let mut out = Vec::with_capacity(self.entries.len());
        for &(id, score) in &self.entries {
            while j < b.len() && b[j].0 < id {
                j += 1;
            }
            if j >= b.len() || b[j].0 != id {
                out.push((id, score));
            }
        }
        Candidates { entries: out }
    }

    /// Documents of `self`, with the scores `other` has for them added.
    /// Membership is decided by `self` alone.
    pub fn add_scores(&self, other: &Candidates) -> Candidates {
        let b = &other.entries;
        let mut j = 0;
        let mut out = Vec::with_capacity(self.entries.len());
        for &(id, score) in &self.entries {
            while j < b.len() && b[j].0 < id {
                j += 1;
            }
            let extra = if j < b.len() && b[j].0 == id { b[j].1 } else { 0.0 };
            out.push((id, score + extra));
        }
        Candidates { entries: out }
    }

    /// Replace every score with `score`.
    pub fn with_constant_score(mut self, score: f32) -> Candidates {
        for entry in &mut self.entries {
            entry.1 = score;
        }
        self
    }
}

impl FromIterator<(DocId, f32)> for Candidates {
    /// Collect pairs in any order; scores of repeated ids are summed.
    fn from_iter<I: IntoIterator<Item = (DocId, f32)>>(iter: I) -> Self {
        let mut scores = BTreeMap::new();
        for (id, score) in iter {
            *scores.entry(id).or_insert(0.0) += score;
        }
        Candidates::from_map(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(entries: &[(DocId, f32)]) -> Candidates {
        Candidates::from_sorted(entries.to_vec())
    }

    #[test]
    fn test_intersect_sums_scores() {
        let a = set(&[(0, 1.0), (2, 1.0), (5, 2.0)]);
        let b = set(&[(2, 0.5), (3, 1.0), (5, 1.0)]);

        assert_eq!(a.intersect(&b), set(&[(2, 1.5), (5, 3.0)]));
    }

    #[test]
    fn test_union() {
        let a = set(&[(0, 1.0), (2, 1.0)]);
        let b = set(&[(2, 0.5), (3, 1.0)]);

        assert_eq!(a.union(&b), set(&[(0, 1.0), (2, 1.5), (3, 1.0)]));
        assert_eq!(a.union(&Candidates::new()), a);
    }

    #[test]
    fn test_subtract() {
        let a = set(&[(0, 1.0), (2, 1.0), (4, 1.0)]);
        let b = set(&[(1, 1.0), (2, 1.0)]);

        assert_eq!(a.subtract(&b).doc_ids(), vec![0, 4]);
    }

    #[test]
    fn test_add_scores_keeps_membership() {
        let a = set(&[(0, 1.0), (2, 1.0)]);
        let b = set(&[(1, 5.0), (2, 0.5)]);

        assert_eq!(a.add_scores(&b), set(&[(0, 1.0), (2, 1.5)]));
    }

    #[test]
    fn test_constant_score_and_lookup() {
        let a = set(&[(1, 3.0), (7, 0.2)]).with_constant_score(1.0);

        assert_eq!(a.score(7), Some(1.0));
        assert_eq!(a.score(3), None);
    }

    #[test]
    fn test_from_iter_merges_duplicates() {
        let c: Candidates = vec![(3, 1.0), (1, 1.0), (3, 2.0)].into_iter().collect();

        assert_eq!(c, set(&[(1, 1.0), (3, 3.0)]));
    }
}
