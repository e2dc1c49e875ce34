//! Customer repository contract and SQLite implementation.
//!
//! # Invariants
//! - Customers are only visible through the store that owns them.

use super::{bool_to_int, parse_deleted_flag, parse_uuid, RepoError, RepoResult};
use crate::model::customer::{Customer, CustomerId};
use crate::model::store::StoreId;
use rusqlite::{params, Connection, Row};

const CUSTOMER_SELECT_SQL: &str = "SELECT
    uuid,
    store_uuid,
    name,
    phone,
    address,
    is_deleted
FROM customers";

pub trait CustomerRepository {
    fn create_customer(&self, customer: &Customer) -> RepoResult<CustomerId>;
    fn update_customer(&self, customer: &Customer) -> RepoResult<()>;
    fn get_customer(&self, id: CustomerId) -> RepoResult<Option<Customer>>;
    /// Lists active customers of one store, ordered by name.
    fn list_customers(&self, store_id: StoreId) -> RepoResult<Vec<Customer>>;
    fn soft_delete_customer(&self, id: CustomerId) -> RepoResult<()>;
}

pub struct SqliteCustomerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCustomerRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CustomerRepository for SqliteCustomerRepository<'_> {
    fn create_customer(&self, customer: &Customer) -> RepoResult<CustomerId> {
        customer.validate()?;
        self.conn.execute(
            "INSERT INTO customers (uuid, store_uuid, name, phone, address, is_deleted)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                customer.id.to_string(),
                customer.store_id.to_string(),
                customer.name.trim(),
                customer.phone.as_deref(),
                customer.address.as_deref(),
                bool_to_int(customer.is_deleted),
            ],
        )?;
        Ok(customer.id)
    }

    fn update_customer(&self, customer: &Customer) -> RepoResult<()> {
        customer.validate()?;
        let changed = self.conn.execute(
            "UPDATE customers
             SET
                name = ?1,
                phone = ?2,
                address = ?3,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?4
               AND is_deleted = 0;",
            params![
                customer.name.trim(),
                customer.phone.as_deref(),
                customer.address.as_deref(),
                customer.id.to_string(),
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "customer",
                id: customer.id,
            });
        }
        Ok(())
    }

    fn get_customer(&self, id: CustomerId) -> RepoResult<Option<Customer>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CUSTOMER_SELECT_SQL} WHERE uuid = ?1 AND is_deleted = 0;"
        ))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_customer_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_customers(&self, store_id: StoreId) -> RepoResult<Vec<Customer>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CUSTOMER_SELECT_SQL}
             WHERE store_uuid = ?1
               AND is_deleted = 0
             ORDER BY name ASC, uuid ASC;"
        ))?;
        let mut rows = stmt.query([store_id.to_string()])?;
        let mut customers = Vec::new();
        while let Some(row) = rows.next()? {
            customers.push(parse_customer_row(row)?);
        }
        Ok(customers)
    }

    fn soft_delete_customer(&self, id: CustomerId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE customers
             SET is_deleted = 1, updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            [id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "customer",
                id,
            });
        }
        Ok(())
    }
}

fn parse_customer_row(row: &Row<'_>) -> RepoResult<Customer> {
    let uuid_text: String = row.get("uuid")?;
    let store_text: String = row.get("store_uuid")?;
    let customer = Customer {
        id: parse_uuid(&uuid_text, "customers.uuid")?,
        store_id: parse_uuid(&store_text, "customers.store_uuid")?,
        name: row.get("name")?,
        phone: row.get("phone")?,
        address: row.get("address")?,
        is_deleted: parse_deleted_flag(row.get("is_deleted")?, "customers.is_deleted")?,
    };
    customer.validate()?;
    Ok(customer)
}
