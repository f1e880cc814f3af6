//! Edit distances between strings
//!
//! All distances count Unicode scalar values, not bytes.

use serde::{Deserialize, Serialize};

/// Which edit distance to use for normalized comparisons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditMetric {
    #[default]
    Levenshtein,
    /// Levenshtein plus adjacent transpositions (optimal string alignment)
    DamerauLevenshtein,
}

impl EditMetric {
    pub fn distance(self, a: &str, b: &str) -> u32 {
        match self {
            EditMetric::Levenshtein => levenshtein(a, b),
            EditMetric::DamerauLevenshtein => damerau_levenshtein(a, b),
        }
    }
}

/// Levenshtein distance (insert/delete/substitute, each cost 1)
///
/// Example: "kitten" → "sitting" = 3 edits
pub fn levenshtein(a: &str, b: &str) -> u32 {
    let mut short: Vec<char> = a.chars().collect();
    let mut long: Vec<char> = b.chars().collect();
    if short.len() > long.len() {
        std::mem::swap(&mut short, &mut long);
    }
    if short.is_empty() {
        return long.len() as u32;
    }

    // Rolling rows over the shorter string
    let mut prev_row: Vec<u32> = (0..=short.len() as u32).collect();
    let mut curr_row: Vec<u32> = vec![0; short.len() + 1];

    for (j, &lc) in long.iter().enumerate() {
        curr_row[0] = j as u32 + 1;
        for (i, &sc) in short.iter().enumerate() {
            let cost = u32::from(sc != lc);
            curr_row[i + 1] = (prev_row[i + 1] + 1) // deletion
                .min(curr_row[i] + 1) // insertion
                .min(prev_row[i] + cost); // substitution
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[short.len()]
}

/// Damerau-Levenshtein distance, optimal string alignment variant.
///
/// A swap of two adjacent characters counts as one edit, so "teh" → "the"
/// is 1. Unlike [`levenshtein`] this does not satisfy the triangle
/// inequality and should not back a [`crate::BkTree`].
pub fn damerau_levenshtein(a: &str, b: &str) -> u32 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (m, n) = (a.len(), b.len());
    if m == 0 {
        return n as u32;
    }
    if n == 0 {
        return m as u32;
    }

    let mut d = vec![vec![0u32; n + 1]; m + 1];
    for (i, row) in d.iter_mut().enumerate() {
        row[0] = i as u32;
    }
    for (j, cell) in d[0].iter_mut().enumerate() {
        *cell = j as u32;
    }

    for i in 1..=m {
        for j in 1..=n {
            let cost = u32::from(a[i - 1] != b[j - 1]);
            let mut best = (d[i - 1][j] + 1)
                .min(d[i][j - 1] + 1)
                .min(d[i - 1][j - 1] + cost);
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                best = best.min(d[i - 2][j - 2] + 1);
            }
            d[i][j] = best;
        }
    }

    d[m][n]
}

/// Distance scaled by the longer length: 0 = identical, 1 = nothing shared
pub fn normalized_distance(a: &str, b: &str, metric: EditMetric) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 0.0;
    }
    f64::from(metric.distance(a, b)) / longest as f64
}

/// `1 - normalized_distance`
pub fn similarity(a: &str, b: &str, metric: EditMetric) -> f64 {
    1.0 - normalized_distance(a, b, metric)
}
