//! Shared glue between record sources and the list engine.
//!
//! # Invariants
//! - Log lines carry counts and field keys only, never record contents.

use crate::listing::{
    self, ConfigurationError, FieldRegistry, ListOptions, Query, ResultPage, ToRecord,
};
use crate::repo::RepoError;
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type ListServiceResult<T> = Result<T, ListServiceError>;

/// Failure of a list use-case.
#[derive(Debug)]
pub enum ListServiceError {
    /// Query does not fit the screen's field registry.
    Config(ConfigurationError),
    /// Record source failed.
    Repo(RepoError),
}

impl Display for ListServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid list query: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ListServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ConfigurationError> for ListServiceError {
    fn from(value: ConfigurationError) -> Self {
        Self::Config(value)
    }
}

impl From<RepoError> for ListServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Projects `items` into records and runs the engine for one screen.
pub(crate) fn run_listing<T: ToRecord>(
    screen: &'static str,
    items: &[T],
    query: &Query,
    registry: &FieldRegistry,
    options: &ListOptions,
) -> ListServiceResult<ResultPage> {
    let started_at = Instant::now();
    let records = items.iter().map(ToRecord::to_record).collect::<Vec<_>>();

    match listing::apply(&records, query, registry, options) {
        Ok(page) => {
            debug!(
                "event=list_apply module=service screen={screen} status=ok input={} matched={} returned={} padded={} duration_us={}",
                records.len(),
                page.total_matched,
                page.rows.len(),
                page.padded_rows,
                started_at.elapsed().as_micros()
            );
            Ok(page)
        }
        Err(err) => {
            warn!(
                "event=list_apply module=service screen={screen} status=error error_code=list_config error={err}"
            );
            Err(err.into())
        }
    }
}
