//! Typo-tolerant string matching: edit distances, n-grams and a BK-tree

mod bk_tree;
mod distance;
mod ngram;

pub use bk_tree::{BkTree, Metric, Suggestion};
pub use distance::{damerau_levenshtein, levenshtein, normalized_distance, similarity, EditMetric};
pub use ngram::{find_candidates, ngram_similarity, ngrams};
