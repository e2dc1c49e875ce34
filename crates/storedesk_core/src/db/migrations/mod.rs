//! Schema history of the store database.
//!
//! Each step is an embedded SQL file. The version reached is stored in
//! `PRAGMA user_version`; pending steps run together in one transaction so a
//! failed upgrade leaves the file at its previous version.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[
    SchemaStep {
        version: 1,
        name: "stores_customers_orders",
        sql: include_str!("0001_init.sql"),
    },
    SchemaStep {
        version: 2,
        name: "deliveries",
        sql: include_str!("0002_deliveries.sql"),
    },
];

/// Schema version this build migrates to.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Reads the schema version recorded in the database file.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Brings the schema up to [`latest_version`].
///
/// # Errors
/// - `DbError::SchemaTooNew` when the file is ahead of this build.
/// - Any SQL failure; nothing from the failed upgrade is kept.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    let supported = latest_version();
    if found > supported {
        return Err(DbError::SchemaTooNew { found, supported });
    }

    let pending = SCHEMA_STEPS
        .iter()
        .skip_while(|step| step.version <= found)
        .collect::<Vec<_>>();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in &pending {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
        info!(
            "event=db_migrate module=db status=ok version={} step={}",
            step.version, step.name
        );
    }
    tx.commit()?;
    Ok(())
}
