//! Store repository contract and SQLite implementation.

use super::{bool_to_int, parse_deleted_flag, parse_uuid, RepoError, RepoResult};
use crate::model::store::{Store, StoreId};
use rusqlite::{params, Connection, Row};

const STORE_SELECT_SQL: &str = "SELECT uuid, name, is_deleted FROM stores";

pub trait StoreRepository {
    fn create_store(&self, store: &Store) -> RepoResult<StoreId>;
    fn get_store(&self, id: StoreId) -> RepoResult<Option<Store>>;
    /// Lists active stores ordered by name.
    fn list_stores(&self) -> RepoResult<Vec<Store>>;
    fn soft_delete_store(&self, id: StoreId) -> RepoResult<()>;
}

pub struct SqliteStoreRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStoreRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl StoreRepository for SqliteStoreRepository<'_> {
    fn create_store(&self, store: &Store) -> RepoResult<StoreId> {
        store.validate()?;
        self.conn.execute(
            "INSERT INTO stores (uuid, name, is_deleted) VALUES (?1, ?2, ?3);",
            params![
                store.id.to_string(),
                store.name.trim(),
                bool_to_int(store.is_deleted)
            ],
        )?;
        Ok(store.id)
    }

    fn get_store(&self, id: StoreId) -> RepoResult<Option<Store>> {
        let mut stmt = self.conn.prepare(&format!(
            "{STORE_SELECT_SQL} WHERE uuid = ?1 AND is_deleted = 0;"
        ))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_store_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_stores(&self) -> RepoResult<Vec<Store>> {
        let mut stmt = self.conn.prepare(&format!(
            "{STORE_SELECT_SQL} WHERE is_deleted = 0 ORDER BY name ASC, uuid ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut stores = Vec::new();
        while let Some(row) = rows.next()? {
            stores.push(parse_store_row(row)?);
        }
        Ok(stores)
    }

    fn soft_delete_store(&self, id: StoreId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE stores
             SET is_deleted = 1, updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            [id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: "store", id });
        }
        Ok(())
    }
}

fn parse_store_row(row: &Row<'_>) -> RepoResult<Store> {
    let uuid_text: String = row.get("uuid")?;
    Ok(Store {
        id: parse_uuid(&uuid_text, "stores.uuid")?,
        name: row.get("name")?,
        is_deleted: parse_deleted_flag(row.get("is_deleted")?, "stores.is_deleted")?,
    })
}
