//! Errors raised while building a language index

use lexis_index::IndexError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ManagerError {
    #[error("language code must not be empty")]
    EmptyLanguage,

    #[error(transparent)]
    Index(#[from] IndexError),
}
