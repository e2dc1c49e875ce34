//! Order/delivery repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist orders and the deliveries that complete them.
//! - Provide the joined order rows list screens render.
//! - Provide per-delivery lead-time samples for statistics.
//!
//! # Invariants
//! - Order lists are store-scoped, exclude soft-deleted orders, and are
//!   ordered by `ordered_on DESC, uuid ASC`.
//! - Recording a delivery and completing its order happen in one transaction.
//! - An order's customer is an active customer of the same store.
//! - A delivered order stays `Completed` and is never dated after its delivery.

use super::{bool_to_int, parse_deleted_flag, parse_uuid, RepoError, RepoResult};
use crate::db::DbError;
use crate::model::customer::CustomerId;
use crate::model::order::{Delivery, Order, OrderId, OrderStatus, OrderSummary};
use crate::model::store::StoreId;
use rusqlite::{params, Connection, Row};

const ORDER_COLUMNS: &str = "
    orders.uuid AS uuid,
    orders.store_uuid AS store_uuid,
    orders.customer_uuid AS customer_uuid,
    orders.ordered_on AS ordered_on,
    orders.note AS note,
    orders.status AS status,
    orders.is_deleted AS is_deleted";

/// Lead time of one delivered order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadTimeSample {
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub order_id: OrderId,
    /// Whole days between `ordered_on` and `delivered_on`.
    pub lead_days: i64,
}

pub trait OrderRepository {
    /// Inserts a new order for an active customer of `order.store_id`.
    fn create_order(&self, order: &Order) -> RepoResult<OrderId>;
    /// Replaces date, note and status of an active order.
    ///
    /// Store and customer of a stored order never change.
    fn update_order(&self, order: &Order) -> RepoResult<()>;
    fn get_order(&self, id: OrderId) -> RepoResult<Option<Order>>;
    /// Lists active orders of one store joined with customer names.
    fn list_orders(&self, store_id: StoreId) -> RepoResult<Vec<OrderSummary>>;
    fn soft_delete_order(&self, id: OrderId) -> RepoResult<()>;
    /// Stores a delivery and marks its order completed.
    fn record_delivery(&self, delivery: &Delivery) -> RepoResult<()>;
    fn get_delivery(&self, order_id: OrderId) -> RepoResult<Option<Delivery>>;
    /// Lead-time samples for every delivered, active order of one store.
    fn list_lead_time_samples(&self, store_id: StoreId) -> RepoResult<Vec<LeadTimeSample>>;
}

pub struct SqliteOrderRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteOrderRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn ensure_customer_in_store(
        &self,
        customer_id: CustomerId,
        store_id: StoreId,
    ) -> RepoResult<()> {
        let mut stmt = self
            .conn
            .prepare("SELECT store_uuid FROM customers WHERE uuid = ?1 AND is_deleted = 0;")?;
        let mut rows = stmt.query([customer_id.to_string()])?;
        let Some(row) = rows.next()? else {
            return Err(RepoError::NotFound {
                entity: "customer",
                id: customer_id,
            });
        };
        let store_text: String = row.get("store_uuid")?;
        if parse_uuid(&store_text, "customers.store_uuid")? != store_id {
            return Err(RepoError::CustomerOutsideStore {
                customer_id,
                store_id,
            });
        }
        Ok(())
    }
}

impl OrderRepository for SqliteOrderRepository<'_> {
    fn create_order(&self, order: &Order) -> RepoResult<OrderId> {
        order.validate()?;
        self.ensure_customer_in_store(order.customer_id, order.store_id)?;
        self.conn.execute(
            "INSERT INTO orders (
                uuid,
                store_uuid,
                customer_uuid,
                ordered_on,
                note,
                status,
                is_deleted
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                order.id.to_string(),
                order.store_id.to_string(),
                order.customer_id.to_string(),
                order.ordered_on.as_str(),
                order.note.as_str(),
                order_status_to_db(order.status),
                bool_to_int(order.is_deleted),
            ],
        )?;
        Ok(order.id)
    }

    fn update_order(&self, order: &Order) -> RepoResult<()> {
        order.validate()?;
        let tx = self.conn.unchecked_transaction()?;
        if self.get_order(order.id)?.is_none() {
            return Err(RepoError::NotFound {
                entity: "order",
                id: order.id,
            });
        }
        if let Some(delivery) = self.get_delivery(order.id)? {
            if order.status == OrderStatus::Pending {
                return Err(RepoError::AlreadyDelivered(order.id));
            }
            delivery.validate_for(order)?;
        }
        tx.execute(
            "UPDATE orders
             SET
                ordered_on = ?1,
                note = ?2,
                status = ?3,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?4
               AND is_deleted = 0;",
            params![
                order.ordered_on.as_str(),
                order.note.as_str(),
                order_status_to_db(order.status),
                order.id.to_string(),
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn get_order(&self, id: OrderId) -> RepoResult<Option<Order>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ORDER_COLUMNS}
             FROM orders
             WHERE orders.uuid = ?1
               AND orders.is_deleted = 0;"
        ))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_order_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_orders(&self, store_id: StoreId) -> RepoResult<Vec<OrderSummary>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ORDER_COLUMNS}, customers.name AS customer_name
             FROM orders
             JOIN customers
               ON customers.uuid = orders.customer_uuid
              AND customers.store_uuid = orders.store_uuid
             WHERE orders.store_uuid = ?1
               AND orders.is_deleted = 0
             ORDER BY orders.ordered_on DESC, orders.uuid ASC;"
        ))?;
        let mut rows = stmt.query([store_id.to_string()])?;
        let mut summaries = Vec::new();
        while let Some(row) = rows.next()? {
            summaries.push(OrderSummary {
                order: parse_order_row(row)?,
                customer_name: row.get("customer_name")?,
            });
        }
        Ok(summaries)
    }

    fn soft_delete_order(&self, id: OrderId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE orders
             SET is_deleted = 1, updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            [id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: "order", id });
        }
        Ok(())
    }

    fn record_delivery(&self, delivery: &Delivery) -> RepoResult<()> {
        let order = self
            .get_order(delivery.order_id)?
            .ok_or(RepoError::NotFound {
                entity: "order",
                id: delivery.order_id,
            })?;
        delivery.validate_for(&order)?;

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO deliveries (uuid, order_uuid, delivered_on) VALUES (?1, ?2, ?3);",
            params![
                delivery.id.to_string(),
                delivery.order_id.to_string(),
                delivery.delivered_on.as_str(),
            ],
        )
        .map_err(|err| match DbError::from(err) {
            db_err if db_err.is_unique_violation() => {
                RepoError::AlreadyDelivered(delivery.order_id)
            }
            db_err => RepoError::Db(db_err),
        })?;
        tx.execute(
            "UPDATE orders
             SET status = 'completed', updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            [delivery.order_id.to_string()],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn get_delivery(&self, order_id: OrderId) -> RepoResult<Option<Delivery>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, order_uuid, delivered_on FROM deliveries WHERE order_uuid = ?1;",
        )?;
        let mut rows = stmt.query([order_id.to_string()])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };
        let uuid_text: String = row.get("uuid")?;
        let order_text: String = row.get("order_uuid")?;
        Ok(Some(Delivery {
            id: parse_uuid(&uuid_text, "deliveries.uuid")?,
            order_id: parse_uuid(&order_text, "deliveries.order_uuid")?,
            delivered_on: row.get("delivered_on")?,
        }))
    }

    fn list_lead_time_samples(&self, store_id: StoreId) -> RepoResult<Vec<LeadTimeSample>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                customers.uuid AS customer_uuid,
                customers.name AS customer_name,
                orders.uuid AS order_uuid,
                CAST(julianday(deliveries.delivered_on) - julianday(orders.ordered_on) AS INTEGER)
                    AS lead_days
             FROM deliveries
             JOIN orders ON orders.uuid = deliveries.order_uuid
             JOIN customers
               ON customers.uuid = orders.customer_uuid
              AND customers.store_uuid = orders.store_uuid
             WHERE orders.store_uuid = ?1
               AND orders.is_deleted = 0
               AND customers.is_deleted = 0
             ORDER BY customers.name ASC, customers.uuid ASC, orders.ordered_on ASC;",
        )?;
        let mut rows = stmt.query([store_id.to_string()])?;
        let mut samples = Vec::new();
        while let Some(row) = rows.next()? {
            let customer_text: String = row.get("customer_uuid")?;
            let order_text: String = row.get("order_uuid")?;
            samples.push(LeadTimeSample {
                customer_id: parse_uuid(&customer_text, "customers.uuid")?,
                customer_name: row.get("customer_name")?,
                order_id: parse_uuid(&order_text, "orders.uuid")?,
                lead_days: row.get("lead_days")?,
            });
        }
        Ok(samples)
    }
}

fn parse_order_row(row: &Row<'_>) -> RepoResult<Order> {
    let uuid_text: String = row.get("uuid")?;
    let store_text: String = row.get("store_uuid")?;
    let customer_text: String = row.get("customer_uuid")?;
    let status_text: String = row.get("status")?;
    let status = parse_order_status(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid order status `{status_text}` in orders.status"))
    })?;

    let order = Order {
        id: parse_uuid(&uuid_text, "orders.uuid")?,
        store_id: parse_uuid(&store_text, "orders.store_uuid")?,
        customer_id: parse_uuid(&customer_text, "orders.customer_uuid")?,
        ordered_on: row.get("ordered_on")?,
        note: row.get("note")?,
        status,
        is_deleted: parse_deleted_flag(row.get("is_deleted")?, "orders.is_deleted")?,
    };
    order.validate()?;
    Ok(order)
}

fn order_status_to_db(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "pending",
        OrderStatus::Completed => "completed",
    }
}

fn parse_order_status(value: &str) -> Option<OrderStatus> {
    match value {
        "pending" => Some(OrderStatus::Pending),
        "completed" => Some(OrderStatus::Completed),
        _ => None,
    }
}
