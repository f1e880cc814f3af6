//! Okapi BM25 over multiple boosted fields
//!
//! Every field keeps its own [`InvertedIndex`], so idf and average length
//! are computed per field. A document's score is the boosted sum of its
//! per-field, per-term BM25 contributions.

use crate::error::{IndexError, Result};
use crate::field::{Document, Field, FieldMatches, SearchResult};
use crate::inverted_index::InvertedIndex;
use crate::tokenizer::{DefaultTokenizer, Tokenizer};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

const DEFAULT_K1: f64 = 1.2;
const DEFAULT_B: f64 = 0.75;

/// BM25 tuning parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bm25Params {
    /// Term frequency saturation
    pub k1: f64,
    /// Length normalization (0 = none, 1 = full)
    pub b: f64,
}

impl Bm25Params {
    pub fn new(k1: f64, b: f64) -> Result<Self> {
        let params = Self { k1, b };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.k1.is_finite() || self.k1 < 0.0 {
            return Err(IndexError::InvalidParameter {
                name: "k1",
                value: self.k1,
            });
        }
        if !(0.0..=1.0).contains(&self.b) {
            return Err(IndexError::InvalidParameter {
                name: "b",
                value: self.b,
            });
        }
        Ok(())
    }
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self {
            k1: DEFAULT_K1,
            b: DEFAULT_B,
        }
    }
}

#[derive(Debug, Clone)]
struct FieldIndex<F> {
    field: F,
    boost: f64,
    index: InvertedIndex,
}

/// Relevance-ranked full-text index with per-field boosts.
///
/// Fields must be defined before the first document is added. Re-adding a
/// document id replaces the previous version.
#[derive(Clone)]
pub struct Bm25Index<F: Field> {
    params: Bm25Params,
    tokenizer: Arc<dyn Tokenizer>,
    /// Definition order; scores are accumulated in this order
    fields: Vec<FieldIndex<F>>,
    slots: HashMap<String, u32>,
    /// Id per slot; `None` once removed
    ids: Vec<Option<String>>,
    /// Removed slots awaiting reuse
    free_slots: Vec<u32>,
    sealed: bool,
}

impl<F: Field> Bm25Index<F> {
    pub fn new(params: Bm25Params, tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self {
            params,
            tokenizer,
            fields: Vec::new(),
            slots: HashMap::new(),
            ids: Vec::new(),
            free_slots: Vec::new(),
            sealed: false,
        }
    }

    pub fn with_tokenizer(tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self::new(Bm25Params::default(), tokenizer)
    }

    /// Register a searchable field.
    ///
    /// Redefining a field before any document replaces its boost. Once a
    /// document has been indexed the field set is frozen: an identical
    /// redefinition is accepted as a no-op, anything else is rejected.
    pub fn define_field(&mut self, field: F, boost: f64) -> Result<()> {
        if !boost.is_finite() || boost <= 0.0 {
            return Err(IndexError::InvalidBoost {
                field: field.name(),
                boost,
            });
        }

        match self.fields.iter_mut().find(|def| def.field == field) {
            Some(def) if def.boost == boost => Ok(()),
            _ if self.sealed => Err(IndexError::FieldsFrozen {
                field: field.name(),
            }),
            Some(def) => {
                def.boost = boost;
                Ok(())
            }
            None => {
                self.fields.push(FieldIndex {
                    field,
                    boost,
                    index: InvertedIndex::new(),
                });
                Ok(())
            }
        }
    }

    /// Index a document, replacing any earlier document with the same id.
    ///
    /// Unregistered fields are skipped. A document without any registered
    /// field leaves the index untouched.
    pub fn add_document(&mut self, document: Document<F>) {
        let mut tokens: Vec<Option<Vec<String>>> = vec![None; self.fields.len()];
        for (field, text) in &document.fields {
            match self.position(*field) {
                Some(pos) => tokens[pos]
                    .get_or_insert_with(Vec::new)
                    .extend(self.tokenizer.tokenize(text)),
                None => debug!(
                    id = %document.id,
                    field = field.name(),
                    "ignoring unregistered field"
                ),
            }
        }

        if tokens.iter().all(Option::is_none) {
            debug!(id = %document.id, "document has no registered fields; skipped");
            return;
        }

        let slot = match self.slots.get(&document.id) {
            Some(&slot) => {
                debug!(id = %document.id, "replacing previously indexed document");
                for def in &mut self.fields {
                    def.index.remove(slot);
                }
                slot
            }
            None => {
                let slot = match self.free_slots.pop() {
                    Some(slot) => {
                        self.ids[slot as usize] = Some(document.id.clone());
                        slot
                    }
                    None => {
                        self.ids.push(Some(document.id.clone()));
                        (self.ids.len() - 1) as u32
                    }
                };
                self.slots.insert(document.id, slot);
                slot
            }
        };

        for (def, field_tokens) in self.fields.iter_mut().zip(tokens) {
            if let Some(field_tokens) = field_tokens {
                def.index.add(slot, &field_tokens);
            }
        }
        self.sealed = true;
    }

    /// Remove a document. Returns false if the id was not indexed.
    pub fn remove_document(&mut self, id: &str) -> bool {
        let Some(slot) = self.slots.remove(id) else {
            return false;
        };
        for def in &mut self.fields {
            def.index.remove(slot);
        }
        self.ids[slot as usize] = None;
        self.free_slots.push(slot);
        true
    }

    /// Rank documents against a free-text query.
    ///
    /// Results are sorted by descending score, ties by ascending id.
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchResult<F>> {
        if limit == 0 || self.slots.is_empty() {
            return Vec::new();
        }

        let terms = distinct(self.tokenizer.tokenize(query));
        if terms.is_empty() {
            return Vec::new();
        }

        let Bm25Params { k1, b } = self.params;
        let mut hits: HashMap<u32, (f64, FieldMatches<F>)> = HashMap::new();

        for term in &terms {
            for def in &self.fields {
                let Some(postings) = def.index.postings(term) else {
                    continue;
                };

                let n = def.index.document_count() as f64;
                let df = postings.len() as f64;
                let idf = ((n - df + 0.5) / (df + 0.5) + 1.0).ln();
                let avg_len = def.index.average_length();

                for posting in postings {
                    let len = f64::from(def.index.field_length(posting.doc).unwrap_or(0));
                    let relative_len = if avg_len > 0.0 { len / avg_len } else { 0.0 };
                    let tf = f64::from(posting.term_frequency);
                    let tf_norm = (tf * (k1 + 1.0)) / (tf + k1 * (1.0 - b + b * relative_len));

                    let hit = hits
                        .entry(posting.doc)
                        .or_insert_with(|| (0.0, FieldMatches::new()));
                    hit.0 += def.boost * idf * tf_norm;
                    hit.1.push(def.field, term);
                }
            }
        }

        let mut results: Vec<SearchResult<F>> = hits
            .into_iter()
            .filter_map(|(slot, (score, matches))| {
                let id = self.ids.get(slot as usize)?.as_ref()?;
                Some(SearchResult {
                    id: id.clone(),
                    score,
                    matches,
                })
            })
            .collect();

        results.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
        results.truncate(limit);
        results
    }

    /// Defined fields and their boosts, in definition order
    pub fn fields(&self) -> impl Iterator<Item = (F, f64)> + '_ {
        self.fields.iter().map(|def| (def.field, def.boost))
    }

    pub fn boost(&self, field: F) -> Option<f64> {
        self.field_index(field).map(|def| def.boost)
    }

    pub fn document_count(&self) -> usize {
        self.slots.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.slots.contains_key(id)
    }

    /// Distinct terms across every field
    pub fn term_count(&self) -> usize {
        let mut vocabulary = HashSet::new();
        for def in &self.fields {
            vocabulary.extend(def.index.terms());
        }
        vocabulary.len()
    }

    /// Number of documents carrying `field`
    pub fn field_document_count(&self, field: F) -> usize {
        self.field_index(field)
            .map_or(0, |def| def.index.document_count())
    }

    pub fn average_field_length(&self, field: F) -> Option<f64> {
        self.field_index(field).map(|def| def.index.average_length())
    }

    /// Distinct terms of one document field, in first-occurrence order
    pub fn document_terms(&self, id: &str, field: F) -> Option<&[String]> {
        let slot = *self.slots.get(id)?;
        self.field_index(field)?.index.document_terms(slot)
    }

    fn position(&self, field: F) -> Option<usize> {
        self.fields.iter().position(|def| def.field == field)
    }

    fn field_index(&self, field: F) -> Option<&FieldIndex<F>> {
        self.fields.iter().find(|def| def.field == field)
    }
}

impl<F: Field> Default for Bm25Index<F> {
    fn default() -> Self {
        Self::with_tokenizer(Arc::new(DefaultTokenizer))
    }
}

impl<F: Field> fmt::Debug for Bm25Index<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bm25Index")
            .field("params", &self.params)
            .field("fields", &self.fields().collect::<Vec<_>>())
            .field("documents", &self.slots.len())
            .finish_non_exhaustive()
    }
}

fn distinct(terms: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    terms
        .into_iter()
        .filter(|term| seen.insert(term.clone()))
        .collect()
}
