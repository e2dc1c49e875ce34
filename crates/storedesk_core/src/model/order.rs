//! Order and delivery entities.
//!
//! # Responsibility
//! - Model customer orders and their lifecycle status.
//! - Model deliveries that complete an order.
//!
//! # Invariants
//! - `ordered_on` and `delivered_on` are ISO dates.
//! - A delivery is never dated before its order.
//! - An order with a recorded delivery is `Completed`.

use super::customer::CustomerId;
use super::store::StoreId;
use super::validation::{require_date, ModelValidationError};
use crate::listing::registry::{
    ORDER_CUSTOMER_NAME, ORDER_DATE, ORDER_ID, ORDER_NOTE, ORDER_STATUS,
};
use crate::listing::{Record, ToRecord};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type OrderId = Uuid;

/// Order lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Awaiting delivery.
    Pending,
    /// Delivered.
    Completed,
}

impl OrderStatus {
    /// Display text shown in list screens and matched by keyword search.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "未完了",
            Self::Completed => "完了",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub store_id: StoreId,
    pub customer_id: CustomerId,
    /// ISO `YYYY-MM-DD`.
    pub ordered_on: String,
    pub note: String,
    pub status: OrderStatus,
    pub is_deleted: bool,
}

impl Order {
    /// Creates a pending order with a generated ID.
    pub fn new(
        store_id: StoreId,
        customer_id: CustomerId,
        ordered_on: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            store_id,
            customer_id,
            ordered_on: ordered_on.into(),
            note: note.into(),
            status: OrderStatus::Pending,
            is_deleted: false,
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_date("ordered_on", &self.ordered_on)
    }
}

/// Order row joined with the customer name, as list screens show it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub order: Order,
    pub customer_name: String,
}

impl ToRecord for OrderSummary {
    fn to_record(&self) -> Record {
        Record::new()
            .with(ORDER_ID, self.order.id.to_string())
            .with(ORDER_DATE, self.order.ordered_on.as_str())
            .with(ORDER_CUSTOMER_NAME, self.customer_name.as_str())
            .with(ORDER_NOTE, self.order.note.as_str())
            .with(ORDER_STATUS, self.order.status.label())
    }
}

/// Completed hand-over of one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    pub id: Uuid,
    pub order_id: OrderId,
    /// ISO `YYYY-MM-DD`.
    pub delivered_on: String,
}

impl Delivery {
    pub fn new(order_id: OrderId, delivered_on: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_id,
            delivered_on: delivered_on.into(),
        }
    }

    /// Validates the delivery against the order it completes.
    ///
    /// ISO dates compare correctly as strings.
    pub fn validate_for(&self, order: &Order) -> Result<(), ModelValidationError> {
        require_date("delivered_on", &self.delivered_on)?;
        if self.delivered_on < order.ordered_on {
            return Err(ModelValidationError::DeliveryBeforeOrder {
                ordered_on: order.ordered_on.clone(),
                delivered_on: self.delivered_on.clone(),
            });
        }
        Ok(())
    }
}
