//! Listing configuration errors.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type for listing APIs.
pub type ListResult<T> = Result<T, ConfigurationError>;

/// Contract violation between a query and the field registry it runs against.
///
/// These are programming errors: a typo'd field key or a sort on a column
/// that was never meant to be sortable. Empty inputs and zero matches are
/// never errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Registry was built with a blank field key.
    EmptyFieldKey,
    /// Registry was built with the same key twice.
    DuplicateField(String),
    /// Query references a key absent from the registry.
    UnknownField(String),
    /// Search scope names a field that is not searchable.
    NotSearchable(String),
    /// Sort names a field that is not comparable.
    NotComparable(String),
    /// Pagination was requested with a page size of zero.
    ZeroPageSize,
}

impl Display for ConfigurationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFieldKey => write!(f, "field key cannot be empty"),
            Self::DuplicateField(key) => write!(f, "field `{key}` is registered twice"),
            Self::UnknownField(key) => write!(f, "unknown field `{key}`"),
            Self::NotSearchable(key) => write!(f, "field `{key}` is not searchable"),
            Self::NotComparable(key) => write!(f, "field `{key}` is not sortable"),
            Self::ZeroPageSize => write!(f, "page size must be greater than zero"),
        }
    }
}

impl Error for ConfigurationError {}
