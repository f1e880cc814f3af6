//! Character n-grams for cheap candidate blocking

use std::collections::HashSet;

/// Contiguous character n-grams of `text`.
///
/// Example: "hello" with n=2 => ["he", "el", "ll", "lo"]. Empty when `n`
/// is zero or the text is shorter than `n`.
pub fn ngrams(text: &str, n: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if n == 0 || chars.len() < n {
        return Vec::new();
    }
    chars.windows(n).map(|window| window.iter().collect()).collect()
}

/// Jaccard coefficient of the two n-gram sets.
///
/// Strings too short to produce any n-gram compare by equality.
pub fn ngram_similarity(a: &str, b: &str, n: usize) -> f64 {
    let grams_a: HashSet<String> = ngrams(a, n).into_iter().collect();
    let grams_b: HashSet<String> = ngrams(b, n).into_iter().collect();

    match (grams_a.is_empty(), grams_b.is_empty()) {
        (true, true) => {
            if a == b {
                1.0
            } else {
                0.0
            }
        }
        (true, false) | (false, true) => 0.0,
        (false, false) => {
            let shared = grams_a.intersection(&grams_b).count();
            let union = grams_a.len() + grams_b.len() - shared;
            shared as f64 / union as f64
        }
    }
}

/// Keep the candidates whose n-gram similarity to `query` reaches
/// `min_similarity`. Meant as a pre-filter before exact edit distances.
pub fn find_candidates<'a, I>(query: &str, candidates: I, min_similarity: f64, n: usize) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    candidates
        .into_iter()
        .filter(|candidate| ngram_similarity(query, candidate, n) >= min_similarity)
        .collect()
}
