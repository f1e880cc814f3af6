//! Configuration for catalog search

use crate::catalog::CatalogField;
use lexis_index::{Bm25Params, Field, IndexError};
use serde::{Deserialize, Serialize};

/// Boost per catalog field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldBoosts {
    pub title: f64,
    pub tags: f64,
    pub summary: f64,
}

impl FieldBoosts {
    pub fn new() -> Self {
        Self {
            title: 2.0,
            tags: 1.5,
            summary: 1.0,
        }
    }

    pub fn get(&self, field: CatalogField) -> f64 {
        match field {
            CatalogField::Title => self.title,
            CatalogField::Tags => self.tags,
            CatalogField::Summary => self.summary,
        }
    }

    pub fn validate(&self) -> Result<(), IndexError> {
        for (field, boost) in [
            (CatalogField::Title, self.title),
            (CatalogField::Tags, self.tags),
            (CatalogField::Summary, self.summary),
        ] {
            if !boost.is_finite() || boost <= 0.0 {
                return Err(IndexError::InvalidBoost {
                    field: field.name(),
                    boost,
                });
            }
        }
        Ok(())
    }
}

impl Default for FieldBoosts {
    fn default() -> Self {
        Self::new()
    }
}

/// Search manager configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// BM25 k1/b
    pub bm25: Bm25Params,

    /// Field boosts used when a build does not override them
    pub boosts: FieldBoosts,

    /// Shortest title/tag term (in characters) fed to the suggestion vocabulary
    pub min_vocabulary_term_len: usize,

    /// Result limit for `search_default`
    pub default_limit: usize,

    /// Edit distance for `suggest_default`
    pub default_max_distance: u32,
}

impl SearchConfig {
    pub fn new() -> Self {
        Self {
            bm25: Bm25Params::default(),
            boosts: FieldBoosts::new(),
            min_vocabulary_term_len: 3,
            default_limit: 20,
            default_max_distance: 2,
        }
    }

    pub fn validate(&self) -> Result<(), IndexError> {
        self.bm25.validate()?;
        self.boosts.validate()
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new()
    }
}
