//! Shared list transform: filter, sort, paginate, pad.
//!
//! # Responsibility
//! - Turn a caller-supplied record set plus a `Query` into the page to render.
//! - Reject queries that reference fields the registry does not allow.
//!
//! # Invariants
//! - Input records are never mutated; output is a fresh sequence.
//! - Sorting is stable.
//! - `total_matched` counts filtered rows before pagination and padding.
//! - Padding rows are appended last and never filtered or sorted.

use super::error::{ConfigurationError, ListResult};
use super::field::{FieldDescriptor, FieldRegistry};
use super::query::{ListOptions, Query, SearchScope, SortDirection};
use super::record::{FieldValue, Record};
use serde::Serialize;
use std::cmp::Ordering;

/// Filtered, sorted and paginated output for one listing request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultPage {
    /// Matching rows for this page, followed by padding rows.
    pub rows: Vec<Record>,
    pub total_matched: usize,
    pub page: usize,
    /// `None` when the request was not paginated.
    pub page_size: Option<usize>,
    /// Number of trailing blank rows in `rows`.
    pub padded_rows: usize,
}

impl ResultPage {
    /// Returns `ceil(total_matched / page_size)`, or 1 when unpaginated.
    pub fn page_count(&self) -> usize {
        match self.page_size {
            Some(size) if size > 0 => self.total_matched.div_ceil(size),
            _ => 1,
        }
    }

    /// Rows without trailing padding.
    ///
    /// A hand-built page whose `padded_rows` exceeds `rows.len()` yields no
    /// rows.
    pub fn matched_rows(&self) -> &[Record] {
        &self.rows[..self.rows.len().saturating_sub(self.padded_rows)]
    }
}

/// Runs the full list transform.
///
/// # Errors
/// - `ConfigurationError` when the scope names an unknown or non-searchable
///   field, the sort names an unknown or non-comparable field, or the page
///   size is zero. Nothing is computed in that case.
pub fn apply(
    records: &[Record],
    query: &Query,
    registry: &FieldRegistry,
    options: &ListOptions,
) -> ListResult<ResultPage> {
    let scope = resolve_scope(query, registry)?;
    if let Some(sort) = query.sort.as_ref() {
        registry.require_comparable(&sort.key)?;
    }
    if options.page_size == Some(0) {
        return Err(ConfigurationError::ZeroPageSize);
    }

    let mut matched = filter_records(records, &query.keyword, &scope);
    if let Some(sort) = query.sort.as_ref() {
        sort_records(&mut matched, &sort.key, sort.direction);
    }

    let total_matched = matched.len();
    let mut rows = paginate(matched, query.page, options.page_size);

    let mut padded_rows = 0;
    if let Some(min_rows) = options.min_rows {
        while rows.len() < min_rows {
            rows.push(registry.blank_record());
            padded_rows += 1;
        }
    }

    Ok(ResultPage {
        rows,
        total_matched,
        page: query.page,
        page_size: options.page_size,
        padded_rows,
    })
}

fn resolve_scope<'r>(
    query: &Query,
    registry: &'r FieldRegistry,
) -> ListResult<Vec<&'r FieldDescriptor>> {
    match &query.scope {
        SearchScope::All => Ok(registry.searchable().collect()),
        SearchScope::Field(key) => Ok(vec![registry.require_searchable(key)?]),
    }
}

fn filter_records(records: &[Record], keyword: &str, scope: &[&FieldDescriptor]) -> Vec<Record> {
    if keyword.is_empty() {
        return records.to_vec();
    }

    let needle = keyword.to_lowercase();
    records
        .iter()
        .filter(|record| {
            scope.iter().any(|descriptor| {
                record
                    .get(&descriptor.key)
                    .is_some_and(|value| value.render().to_lowercase().contains(&needle))
            })
        })
        .cloned()
        .collect()
}

fn sort_records(records: &mut [Record], key: &str, direction: SortDirection) {
    // `sort_by` is a stable merge sort.
    records.sort_by(|left, right| {
        let ordering = compare_field(left, right, key);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

fn compare_field(left: &Record, right: &Record, key: &str) -> Ordering {
    let left = left.get(key).unwrap_or(&FieldValue::Empty);
    let right = right.get(key).unwrap_or(&FieldValue::Empty);
    left.natural_cmp(right)
}

fn paginate(records: Vec<Record>, page: usize, page_size: Option<usize>) -> Vec<Record> {
    let Some(size) = page_size else {
        return records;
    };
    let start = page.saturating_mul(size);
    records.into_iter().skip(start).take(size).collect()
}

#[cfg(test)]
mod tests {
    use super::{apply, paginate, ResultPage};
    use crate::listing::{FieldDescriptor, FieldRegistry, ListOptions, Query, Record};

    fn registry() -> FieldRegistry {
        FieldRegistry::new(vec![
            FieldDescriptor::new("id", "ID"),
            FieldDescriptor::new("status", "Status"),
        ])
        .expect("registry should be valid")
    }

    #[test]
    fn paginate_past_end_is_empty() {
        let records = vec![Record::new().with("id", "O1")];
        assert!(paginate(records, 3, Some(10)).is_empty());
    }

    #[test]
    fn huge_page_index_does_not_overflow() {
        let records = vec![Record::new().with("id", "O1")];
        assert!(paginate(records, usize::MAX, Some(2)).is_empty());
    }

    #[test]
    fn padding_counts_are_reported() {
        let records = vec![Record::new().with("id", "O1").with("status", "完了")];
        let page = apply(
            &records,
            &Query::default(),
            &registry(),
            &ListOptions::default().with_min_rows(3),
        )
        .expect("apply should succeed");
        assert_eq!(page.rows.len(), 3);
        assert_eq!(page.padded_rows, 2);
        assert_eq!(page.matched_rows().len(), 1);
        assert_eq!(page.total_matched, 1);
    }

    #[test]
    fn inconsistent_padding_count_yields_no_matched_rows() {
        let page = ResultPage {
            rows: vec![Record::new().with("name", "a")],
            total_matched: 1,
            page: 0,
            page_size: None,
            padded_rows: 3,
        };
        assert!(page.matched_rows().is_empty());
    }
}
