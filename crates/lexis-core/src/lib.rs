//! Per-language catalog search: BM25 ranking plus typo suggestions

mod catalog;
mod config;
mod error;
mod manager;

pub use catalog::{CatalogDocument, CatalogEntry, CatalogField};
pub use config::{FieldBoosts, SearchConfig};
pub use error::ManagerError;
pub use manager::{IndexStats, LanguageIndex, SearchIndexManager};

pub use lexis_fuzzy::Suggestion;
pub use lexis_index::{
    Bm25Params, DefaultTokenizer, Field, IndexError, SearchResult, StemmedTokenizer, Tokenizer,
};
