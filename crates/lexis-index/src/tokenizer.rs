//! Pluggable text tokenization

use regex::Regex;
use std::sync::OnceLock;

static SPLIT_RE: OnceLock<Regex> = OnceLock::new();

/// Converts text into an ordered sequence of normalized terms.
///
/// Must be pure: the same text always yields the same terms. Any
/// `Fn(&str) -> Vec<String>` is a tokenizer.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

impl<T> Tokenizer for T
where
    T: Fn(&str) -> Vec<String> + Send + Sync,
{
    fn tokenize(&self, text: &str) -> Vec<String> {
        self(text)
    }
}

/// Lowercases and splits on whitespace and punctuation
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTokenizer;

impl Tokenizer for DefaultTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let re = SPLIT_RE.get_or_init(|| {
            Regex::new(r#"[\s\-_.,;:!?'"()\[\]{}|\\/<>@#$%^&*+=~`]+"#)
                .expect("token separator pattern is valid")
        });
        re.split(&text.to_lowercase())
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// [`DefaultTokenizer`] followed by light English suffix stemming.
///
/// Not a full Porter stemmer: it strips plurals, past tense, `-ing` and a
/// handful of derivational suffixes.
#[derive(Debug, Clone, Copy, Default)]
pub struct StemmedTokenizer;

impl Tokenizer for StemmedTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        DefaultTokenizer
            .tokenize(text)
            .into_iter()
            .map(|token| stem(&token))
            .collect()
    }
}

fn stem(word: &str) -> String {
    let len = word.chars().count();
    if len < 3 {
        return word.to_string();
    }

    // Plurals
    if let Some(base) = word.strip_suffix("ies") {
        if len > 4 {
            return format!("{base}y");
        }
    }
    if let Some(base) = word.strip_suffix("es") {
        if len > 3 {
            let double = ["sses", "xes", "zes", "shes", "ches"];
            if double.iter().any(|suffix| word.ends_with(suffix)) {
                return base.to_string();
            }
            return word[..word.len() - 1].to_string();
        }
    }
    if let Some(base) = word.strip_suffix('s') {
        if !word.ends_with("ss") && len > 3 {
            return base.to_string();
        }
    }

    // Past tense
    if let Some(base) = word.strip_suffix("ied") {
        if len > 4 {
            return format!("{base}y");
        }
    }
    if let Some(base) = word.strip_suffix("ed") {
        if len > 4 {
            return base.to_string();
        }
    }

    if let Some(base) = word.strip_suffix("ing") {
        if len > 5 {
            return base.to_string();
        }
    }

    if let Some(base) = word.strip_suffix("ational") {
        if len > 8 {
            return format!("{base}ate");
        }
    }
    if let Some(base) = word.strip_suffix("tion") {
        if len > 5 {
            return format!("{base}te");
        }
    }

    // (suffix, minimum word length exclusive)
    const SUFFIXES: &[(&str, usize)] = &[
        ("ness", 5),
        ("ment", 5),
        ("able", 5),
        ("ible", 5),
        ("ful", 4),
        ("ous", 4),
        ("ive", 4),
        ("ly", 4),
    ];
    for &(suffix, min_len) in SUFFIXES {
        if let Some(base) = word.strip_suffix(suffix) {
            if len > min_len {
                return base.to_string();
            }
        }
    }

    word.to_string()
}
