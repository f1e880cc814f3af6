//! Per-language catalog indexes
//!
//! Each language owns a BM25 index over the catalog fields and a BK-tree
//! vocabulary for typo suggestions. A build constructs both off to the side
//! and publishes them together as one `Arc<LanguageIndex>`, so readers see
//! either the old pair or the new pair and a failed build changes nothing.

use crate::catalog::{to_document, CatalogEntry, CatalogField};
use crate::config::{FieldBoosts, SearchConfig};
use crate::error::ManagerError;
use lexis_fuzzy::{BkTree, Suggestion};
use lexis_index::{Bm25Index, DefaultTokenizer, Field, SearchResult, Tokenizer};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Size of a published language index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub document_count: usize,
    /// Distinct terms across all fields
    pub term_count: usize,
    /// Words available to suggestions
    pub vocabulary_size: usize,
}

/// Immutable search state for one language
#[derive(Debug)]
pub struct LanguageIndex {
    documents: Bm25Index<CatalogField>,
    vocabulary: BkTree,
}

impl LanguageIndex {
    pub fn bm25(&self) -> &Bm25Index<CatalogField> {
        &self.documents
    }

    pub fn vocabulary(&self) -> &BkTree {
        &self.vocabulary
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            document_count: self.documents.document_count(),
            term_count: self.documents.term_count(),
            vocabulary_size: self.vocabulary.len(),
        }
    }

    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchResult<CatalogField>> {
        self.documents.search(query, limit)
    }

    /// Vocabulary words within `max_distance` of the normalized query,
    /// excluding the query itself.
    pub fn suggestions(&self, query: &str, max_distance: u32) -> Vec<Suggestion> {
        let Some(query) = normalize_query(query) else {
            return Vec::new();
        };
        self.vocabulary
            .search(&query, max_distance)
            .into_iter()
            .filter(|suggestion| suggestion.word != query)
            .collect()
    }

    /// Best of [`LanguageIndex::suggestions`]: lowest distance, ties to
    /// the earliest vocabulary word.
    pub fn nearest_term(&self, query: &str, max_distance: u32) -> Option<String> {
        let query = normalize_query(query)?;
        self.vocabulary
            .nearest_within(&query, max_distance, |word| word != query)
            .map(|suggestion| suggestion.word)
    }
}

/// Owns one [`LanguageIndex`] per language code.
///
/// Builds and clears need `&mut self`; every query takes `&self`. Hosts
/// that share a manager across threads wrap it in their own lock, or hand
/// out [`SearchIndexManager::index`] snapshots which stay valid across
/// rebuilds.
pub struct SearchIndexManager {
    config: SearchConfig,
    tokenizer: Arc<dyn Tokenizer>,
    language_tokenizers: HashMap<String, Arc<dyn Tokenizer>>,
    languages: HashMap<String, Arc<LanguageIndex>>,
}

impl SearchIndexManager {
    pub fn new(config: SearchConfig) -> Result<Self, ManagerError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: SearchConfig) -> Self {
        Self {
            config,
            tokenizer: Arc::new(DefaultTokenizer),
            language_tokenizers: HashMap::new(),
            languages: HashMap::new(),
        }
    }

    /// Tokenizer for languages without an override. Applies to later builds.
    pub fn with_tokenizer(mut self, tokenizer: Arc<dyn Tokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn set_language_tokenizer(&mut self, lang: impl Into<String>, tokenizer: Arc<dyn Tokenizer>) {
        self.language_tokenizers.insert(lang.into(), tokenizer);
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Build and publish the index for `lang` with the configured boosts,
    /// replacing any previous one.
    pub fn build_index<I, E>(&mut self, lang: &str, documents: I) -> Result<IndexStats, ManagerError>
    where
        I: IntoIterator<Item = E>,
        E: CatalogEntry,
    {
        let boosts = self.config.boosts;
        self.build_index_with(lang, documents, &boosts)
    }

    /// Like [`SearchIndexManager::build_index`] with explicit field boosts.
    ///
    /// On error the previously published index for `lang` stays in place.
    pub fn build_index_with<I, E>(
        &mut self,
        lang: &str,
        documents: I,
        boosts: &FieldBoosts,
    ) -> Result<IndexStats, ManagerError>
    where
        I: IntoIterator<Item = E>,
        E: CatalogEntry,
    {
        if lang.is_empty() {
            warn!("rejected index build with empty language code");
            return Err(ManagerError::EmptyLanguage);
        }

        let index = match self.construct(lang, documents, boosts) {
            Ok(index) => index,
            Err(e) => {
                warn!(lang, error = %e, "index build rejected; keeping previous index");
                return Err(e);
            }
        };

        let stats = index.stats();
        let replaced = self
            .languages
            .insert(lang.to_string(), Arc::new(index))
            .is_some();
        info!(
            lang,
            documents = stats.document_count,
            terms = stats.term_count,
            vocabulary = stats.vocabulary_size,
            replaced,
            "published search index"
        );
        Ok(stats)
    }

    fn construct<I, E>(&self, lang: &str, documents: I, boosts: &FieldBoosts) -> Result<LanguageIndex, ManagerError>
    where
        I: IntoIterator<Item = E>,
        E: CatalogEntry,
    {
        let tokenizer = self
            .language_tokenizers
            .get(lang)
            .unwrap_or(&self.tokenizer)
            .clone();

        let mut bm25 = Bm25Index::new(self.config.bm25, tokenizer);
        for &field in CatalogField::ALL {
            bm25.define_field(field, boosts.get(field))?;
        }

        // ids in first-seen order; a repeated id keeps its first position
        let mut ids: Vec<String> = Vec::new();
        for entry in documents {
            if !bm25.contains(entry.id()) {
                ids.push(entry.id().to_string());
            }
            bm25.add_document(to_document(&entry));
        }

        let min_len = self.config.min_vocabulary_term_len;
        let mut words: Vec<String> = Vec::new();
        for id in &ids {
            for field in [CatalogField::Title, CatalogField::Tags] {
                let terms = bm25.document_terms(id, field).unwrap_or(&[]);
                words.extend(
                    terms
                        .iter()
                        .filter(|term| term.chars().count() >= min_len)
                        .cloned(),
                );
            }
        }

        let mut vocabulary = BkTree::new();
        vocabulary.add_all(words);

        Ok(LanguageIndex {
            documents: bm25,
            vocabulary,
        })
    }

    pub fn has_index(&self, lang: &str) -> bool {
        self.languages.contains_key(lang)
    }

    pub fn stats(&self, lang: &str) -> Option<IndexStats> {
        self.languages.get(lang).map(|index| index.stats())
    }

    /// Currently published index for `lang`
    pub fn index(&self, lang: &str) -> Option<Arc<LanguageIndex>> {
        self.languages.get(lang).cloned()
    }

    /// Languages with a published index, sorted
    pub fn languages(&self) -> Vec<&str> {
        let mut langs: Vec<&str> = self.languages.keys().map(String::as_str).collect();
        langs.sort_unstable();
        langs
    }

    /// Ranked catalog hits. Empty for a language without an index.
    pub fn search(&self, lang: &str, query: &str, limit: usize) -> Vec<SearchResult<CatalogField>> {
        self.languages
            .get(lang)
            .map(|index| index.search(query, limit))
            .unwrap_or_default()
    }

    pub fn search_default(&self, lang: &str, query: &str) -> Vec<SearchResult<CatalogField>> {
        self.search(lang, query, self.config.default_limit)
    }

    /// Typo corrections for `query`, closest first.
    ///
    /// The query is trimmed and lowercased. Queries of a single character
    /// or less yield nothing, and the query itself is never suggested.
    pub fn suggest(&self, lang: &str, query: &str, max_distance: u32) -> Vec<String> {
        self.suggestions(lang, query, max_distance)
            .into_iter()
            .map(|suggestion| suggestion.word)
            .collect()
    }

    pub fn suggest_default(&self, lang: &str, query: &str) -> Vec<String> {
        self.suggest(lang, query, self.config.default_max_distance)
    }

    /// [`SearchIndexManager::suggest`] with distances
    pub fn suggestions(&self, lang: &str, query: &str, max_distance: u32) -> Vec<Suggestion> {
        self.languages
            .get(lang)
            .map(|index| index.suggestions(query, max_distance))
            .unwrap_or_default()
    }

    /// Single best correction: the closest entry of
    /// [`SearchIndexManager::suggest_default`], ties to the earliest
    /// vocabulary word. `None` exactly when that list is empty.
    pub fn nearest_term(&self, lang: &str, query: &str) -> Option<String> {
        self.nearest_term_within(lang, query, self.config.default_max_distance)
    }

    pub fn nearest_term_within(&self, lang: &str, query: &str, max_distance: u32) -> Option<String> {
        self.languages.get(lang)?.nearest_term(query, max_distance)
    }

    /// Drop the index for `lang`. Returns false if there was none.
    pub fn clear_index(&mut self, lang: &str) -> bool {
        let removed = self.languages.remove(lang).is_some();
        if removed {
            info!(lang, "cleared search index");
        }
        removed
    }

    pub fn clear_all(&mut self) {
        let count = self.languages.len();
        self.languages.clear();
        info!(languages = count, "cleared all search indexes");
    }
}

impl Default for SearchIndexManager {
    fn default() -> Self {
        let config = SearchConfig::default();
        debug_assert!(config.validate().is_ok());
        Self::with_valid_config(config)
    }
}

impl fmt::Debug for SearchIndexManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchIndexManager")
            .field("config", &self.config)
            .field("languages", &self.languages())
            .finish_non_exhaustive()
    }
}

fn normalize_query(query: &str) -> Option<String> {
    let query = query.trim().to_lowercase();
    (query.chars().count() > 1).then_some(query)
}
