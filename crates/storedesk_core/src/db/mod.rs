//! Store database: connection bootstrap, schema migrations, SQLite error
//! classification.
//!
//! # Invariants
//! - Repositories only see connections whose schema is fully migrated.
//! - Constraint failures surface as typed `DbError` variants so repositories
//!   can turn them into domain errors.

use rusqlite::ErrorCode;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

// Extended result codes, see https://www.sqlite.org/rescode.html.
const SQLITE_CONSTRAINT_FOREIGNKEY: i32 = 787;
const SQLITE_CONSTRAINT_UNIQUE: i32 = 2067;
const SQLITE_CONSTRAINT_PRIMARYKEY: i32 = 1555;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// A UNIQUE or PRIMARY KEY constraint rejected the write.
    UniqueViolation(rusqlite::Error),
    /// A row references a store, customer or order that does not exist.
    ForeignKeyViolation(rusqlite::Error),
    /// The file was migrated by a newer StoreDesk build.
    SchemaTooNew { found: u32, supported: u32 },
}

impl DbError {
    /// Returns whether the write failed on a UNIQUE/PRIMARY KEY constraint.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation(_))
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UniqueViolation(err) => write!(f, "duplicate row: {err}"),
            Self::ForeignKeyViolation(err) => write!(f, "dangling reference: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "store database schema v{found} is newer than this build supports (v{supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::UniqueViolation(err) | Self::ForeignKeyViolation(err) => {
                Some(err)
            }
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        let extended_code = match &value {
            rusqlite::Error::SqliteFailure(failure, _)
                if failure.code == ErrorCode::ConstraintViolation =>
            {
                Some(failure.extended_code)
            }
            _ => None,
        };
        match extended_code {
            Some(SQLITE_CONSTRAINT_UNIQUE | SQLITE_CONSTRAINT_PRIMARYKEY) => {
                Self::UniqueViolation(value)
            }
            Some(SQLITE_CONSTRAINT_FOREIGNKEY) => Self::ForeignKeyViolation(value),
            _ => Self::Sqlite(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DbError;
    use rusqlite::Connection;

    fn failing_insert(setup: &str, insert: &str) -> DbError {
        let conn = Connection::open_in_memory().expect("in-memory db");
        conn.execute_batch(setup).expect("setup sql");
        conn.execute(insert, [])
            .map(|_| ())
            .expect_err("insert should violate a constraint")
            .into()
    }

    #[test]
    fn unique_failures_are_classified() {
        let err = failing_insert(
            "CREATE TABLE t (k TEXT UNIQUE); INSERT INTO t VALUES ('a');",
            "INSERT INTO t VALUES ('a');",
        );
        assert!(err.is_unique_violation());
    }

    #[test]
    fn foreign_key_failures_are_classified() {
        let err = failing_insert(
            "PRAGMA foreign_keys = ON;
             CREATE TABLE p (id TEXT PRIMARY KEY);
             CREATE TABLE c (p_id TEXT REFERENCES p (id));",
            "INSERT INTO c VALUES ('missing');",
        );
        assert!(matches!(err, DbError::ForeignKeyViolation(_)));
    }

    #[test]
    fn other_failures_stay_generic() {
        let conn = Connection::open_in_memory().expect("in-memory db");
        let err: DbError = conn
            .execute("SELECT * FROM no_such_table;", [])
            .expect_err("unknown table")
            .into();
        assert!(matches!(err, DbError::Sqlite(_)));
    }
}
