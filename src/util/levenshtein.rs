//! Levenshtein edit distance over Unicode scalar values.
//!
//! Distances count insertions, deletions and substitutions of `char`s, so a
//! Cyrillic letter costs the same as a Latin one. Transpositions count as two
//! edits.

use std::cmp::min;

/// Compute the Levenshtein distance between two strings.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    distance_rows(&a, &b, usize::MAX).unwrap_or(usize::MAX)
}

/// Compute the distance, giving up with `None` as soon as it must exceed
/// `threshold`.
pub fn levenshtein_distance_threshold(s1: &str, s2: &str, threshold: usize) -> Option<usize> {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    distance_rows(&a, &b, threshold)
}

fn distance_rows(a: &[char], b: &[char], threshold: usize) -> Option<usize> {
    if a.len().abs_diff(b.len()) > threshold {
        return None;
    }
    if a.is_empty() || b.is_empty() {
        return Some(a.len().max(b.len()));
    }

    let mut prev_row: Vec<usize> = (0..=b.len()).collect();
    let mut curr_row = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr_row[0] = i + 1;
        let mut row_min = curr_row[0];

        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr_row[j + 1] = min(
                min(prev_row[j + 1] + 1, curr_row[j] + 1),
                prev_row[j] + cost,
            );
            row_min = min(row_min, curr_row[j + 1]);
        }

        if row_min > threshold {
            return None;
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    let distance = prev_row[b.len()];
    (distance <= threshold).then_some(distance)
}

/// Matches candidate terms against one query term.
///
/// The first `prefix_length` characters must match exactly; only the rest of
/// the term is subject to edits.
#[derive(Debug, Clone)]
pub struct LevenshteinMatcher {
    prefix: Vec<char>,
    rest: Vec<char>,
}

impl LevenshteinMatcher {
    /// Create a matcher for `query` with a required exact prefix.
    pub fn new(query: &str, prefix_length: usize) -> Self {
        let chars: Vec<char> = query.chars().collect();
        let split = prefix_length.min(chars.len());
        LevenshteinMatcher {
            prefix: chars[..split].to_vec(),
            rest: chars[split..].to_vec(),
        }
    }

    /// The exact prefix every match must start with.
    pub fn prefix(&self) -> String {
        self.prefix.iter().collect()
    }

    /// Distance from the query to `candidate`, or `None` when it exceeds
    /// `max_edits` or the prefix differs.
    pub fn distance(&self, candidate: &str, max_edits: usize) -> Option<usize> {
        let chars: Vec<char> = candidate.chars().collect();
        if chars.len() < self.prefix.len() || chars[..self.prefix.len()] != self.prefix[..] {
            return None;
        }
        distance_rows(&self.rest, &chars[self.prefix.len()..], max_edits)
    }
}
