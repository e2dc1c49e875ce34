//! Repository layer: record source for list screens and statistics.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Keep SQL details out of services.
//!
//! # Invariants
//! - Writes call the entity's `validate()` before SQL mutations.
//! - Reads reject invalid persisted state instead of masking it.
//! - List reads are store-scoped and exclude soft-deleted rows.

use crate::db::DbError;
use crate::model::validation::ModelValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod customer_repo;
pub mod order_repo;
pub mod store_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by all entity repositories.
#[derive(Debug)]
pub enum RepoError {
    Validation(ModelValidationError),
    Db(DbError),
    /// Target row does not exist (or is soft-deleted).
    NotFound { entity: &'static str, id: Uuid },
    /// The order's customer belongs to another store.
    CustomerOutsideStore { customer_id: Uuid, store_id: Uuid },
    /// The order already has a delivery.
    AlreadyDelivered(Uuid),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::CustomerOutsideStore {
                customer_id,
                store_id,
            } => write!(f, "customer {customer_id} does not belong to store {store_id}"),
            Self::AlreadyDelivered(order_id) => write!(f, "order {order_id} is already delivered"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. }
            | Self::CustomerOutsideStore { .. }
            | Self::AlreadyDelivered(_)
            | Self::InvalidData(_) => None,
        }
    }
}

impl From<ModelValidationError> for RepoError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::from(value))
    }
}

pub(crate) fn parse_uuid(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

pub(crate) fn parse_deleted_flag(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid is_deleted value `{other}` in {column}"
        ))),
    }
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
