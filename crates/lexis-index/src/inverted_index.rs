//! Inverted index for a single field.
//!
//! Maps terms to postings lists (document slot + term frequency). Documents
//! are identified by the `u32` slots handed out by [`crate::Bm25Index`].
//! Field lengths are tracked for BM25 length normalization.

use std::collections::HashMap;

/// A single entry in a term's postings list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    /// Internal document slot.
    pub doc: u32,
    /// Number of times the term appears in this field of the document.
    pub term_frequency: u32,
}

#[derive(Debug, Clone)]
struct IndexedField {
    length: u32,
    /// Distinct terms in first-occurrence order
    terms: Vec<String>,
}

#[derive(Debug, Default, Clone)]
pub struct InvertedIndex {
    postings: HashMap<String, Vec<Posting>>,
    documents: HashMap<u32, IndexedField>,
    total_length: u64,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the tokens of one document. Replaces any previous entry for `doc`.
    pub fn add(&mut self, doc: u32, tokens: &[String]) {
        self.remove(doc);

        let mut term_frequencies: HashMap<&str, u32> = HashMap::new();
        let mut terms = Vec::new();
        for token in tokens {
            let tf = term_frequencies.entry(token.as_str()).or_insert(0);
            if *tf == 0 {
                terms.push(token.clone());
            }
            *tf += 1;
        }

        for term in &terms {
            let term_frequency = term_frequencies.get(term.as_str()).copied().unwrap_or(0);
            self.postings.entry(term.clone()).or_default().push(Posting {
                doc,
                term_frequency,
            });
        }

        let length = tokens.len() as u32;
        self.total_length += u64::from(length);
        self.documents.insert(doc, IndexedField { length, terms });
    }

    /// Drop every posting of `doc`. Returns false if it was not indexed.
    pub fn remove(&mut self, doc: u32) -> bool {
        let Some(field) = self.documents.remove(&doc) else {
            return false;
        };

        self.total_length -= u64::from(field.length);
        for term in &field.terms {
            if let Some(list) = self.postings.get_mut(term) {
                list.retain(|posting| posting.doc != doc);
                if list.is_empty() {
                    self.postings.remove(term);
                }
            }
        }
        true
    }

    pub fn postings(&self, term: &str) -> Option<&[Posting]> {
        self.postings.get(term).map(Vec::as_slice)
    }

    pub fn document_frequency(&self, term: &str) -> usize {
        self.postings.get(term).map_or(0, Vec::len)
    }

    /// Number of documents carrying this field
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn field_length(&self, doc: u32) -> Option<u32> {
        self.documents.get(&doc).map(|field| field.length)
    }

    pub fn document_terms(&self, doc: u32) -> Option<&[String]> {
        self.documents.get(&doc).map(|field| field.terms.as_slice())
    }

    /// Average field length over the documents carrying this field
    pub fn average_length(&self) -> f64 {
        if self.documents.is_empty() {
            return 0.0;
        }
        self.total_length as f64 / self.documents.len() as f64
    }

    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.postings.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_add_updates_postings() {
        let mut idx = InvertedIndex::new();
        idx.add(0, &toks("quick brown fox"));
        assert_eq!(idx.document_count(), 1);
        assert_eq!(idx.term_count(), 3);
        assert_eq!(idx.document_frequency("fox"), 1);
        assert_eq!(idx.document_frequency("dog"), 0);
    }

    #[test]
    fn test_term_frequency() {
        let mut idx = InvertedIndex::new();
        idx.add(0, &toks("hello hello hello world"));
        let postings = idx.postings("hello").unwrap();
        assert_eq!(postings.len(), 1);
        assert_eq!(postings[0].term_frequency, 3);
        assert_eq!(idx.field_length(0), Some(4));
        assert_eq!(
            idx.document_terms(0).unwrap(),
            ["hello".to_string(), "world".to_string()]
        );
    }

    #[test]
    fn test_remove_document() {
        let mut idx = InvertedIndex::new();
        idx.add(0, &toks("hello world"));
        idx.add(1, &toks("hello rust"));
        assert!(idx.remove(0));

        assert_eq!(idx.document_count(), 1);
        // "world" only appeared in doc 0
        assert!(idx.postings("world").is_none());
        let postings = idx.postings("hello").unwrap();
        assert_eq!(postings.len(), 1);
        assert_eq!(postings[0].doc, 1);
        assert_eq!(idx.average_length(), 2.0);
    }

    #[test]
    fn test_remove_nonexistent_doc() {
        let mut idx = InvertedIndex::new();
        idx.add(0, &toks("hello world"));
        assert!(!idx.remove(99));
        assert_eq!(idx.document_count(), 1);
    }

    #[test]
    fn test_re_add_replaces_previous_entry() {
        let mut idx = InvertedIndex::new();
        idx.add(0, &toks("one two three"));
        idx.add(0, &toks("four"));

        assert_eq!(idx.document_count(), 1);
        assert_eq!(idx.term_count(), 1);
        assert_eq!(idx.average_length(), 1.0);
    }

    #[test]
    fn test_average_length() {
        let mut idx = InvertedIndex::new();
        assert_eq!(idx.average_length(), 0.0);
        idx.add(0, &toks("one two three"));
        idx.add(1, &toks("four five six seven eight"));
        assert_eq!(idx.average_length(), 4.0);
    }

    #[test]
    fn test_empty_field_counts_as_present() {
        let mut idx = InvertedIndex::new();
        idx.add(0, &[]);
        assert_eq!(idx.document_count(), 1);
        assert_eq!(idx.field_length(0), Some(0));
        assert_eq!(idx.term_count(), 0);
    }
}
