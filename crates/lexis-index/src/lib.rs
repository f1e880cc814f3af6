//! BM25 ranked full-text index over a closed set of fields

mod bm25;
mod error;
mod field;
mod inverted_index;
mod tokenizer;

pub use bm25::{Bm25Index, Bm25Params};
pub use error::{IndexError, Result};
pub use field::{Document, Field, FieldMatches, SearchResult};
pub use inverted_index::{InvertedIndex, Posting};
pub use tokenizer::{DefaultTokenizer, StemmedTokenizer, Tokenizer};
