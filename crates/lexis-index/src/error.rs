//! Index configuration errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndexError {
    #[error("invalid boost {boost} for field `{field}`: boosts must be positive and finite")]
    InvalidBoost { field: &'static str, boost: f64 },

    #[error("invalid BM25 parameter {name} = {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("field `{field}` cannot be redefined once documents have been indexed")]
    FieldsFrozen { field: &'static str },
}
