//! Caller-owned list query state.
//!
//! The engine keeps no session state. Keyword, scope, sort and page live in
//! the caller and are passed in on every call.

use serde::{Deserialize, Serialize};

/// Which fields keyword filtering inspects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    /// Every searchable field in the registry.
    #[default]
    All,
    /// One specific field key.
    Field(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Flips direction, as a repeated column-header click does.
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

/// Filter/sort/page intent for one listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Free text; empty matches every record.
    pub keyword: String,
    pub scope: SearchScope,
    pub sort: Option<SortSpec>,
    /// Zero-based page index. Ignored without a page size.
    pub page: usize,
}

impl Query {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            ..Self::default()
        }
    }

    pub fn in_field(mut self, key: impl Into<String>) -> Self {
        self.scope = SearchScope::Field(key.into());
        self
    }

    pub fn sorted_by(mut self, key: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(SortSpec {
            key: key.into(),
            direction,
        });
        self
    }

    pub fn at_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }
}

/// Display shaping applied after filter and sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOptions {
    /// Rows per page. `None` returns every match on one page.
    pub page_size: Option<usize>,
    /// Minimum rows to return, filled with blank records.
    pub min_rows: Option<usize>,
}

impl ListOptions {
    pub fn paged(page_size: usize) -> Self {
        Self {
            page_size: Some(page_size),
            min_rows: None,
        }
    }

    pub fn with_min_rows(mut self, min_rows: usize) -> Self {
        self.min_rows = Some(min_rows);
        self
    }
}
