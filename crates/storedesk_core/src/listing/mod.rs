//! Generic list query engine shared by every list screen.
//!
//! # Responsibility
//! - Filter, sort, paginate and pad record sets for display.
//! - Describe per-list fields through validated registries.
//!
//! # Invariants
//! - The engine is a pure transform; callers own query state and records.
//! - Invalid field references fail fast with `ConfigurationError`.

mod engine;
mod error;
mod field;
mod query;
mod record;
pub mod registry;

pub use engine::{apply, ResultPage};
pub use error::{ConfigurationError, ListResult};
pub use field::{FieldDescriptor, FieldRegistry};
pub use query::{ListOptions, Query, SearchScope, SortDirection, SortSpec};
pub use record::{FieldValue, Record};

/// Projection of a domain type into a listable record.
pub trait ToRecord {
    fn to_record(&self) -> Record;
}
