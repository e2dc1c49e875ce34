//! Order use-case service.
//!
//! # Responsibility
//! - Create orders and record their deliveries.
//! - Serve the order list screen through the list engine.

use crate::listing::registry::order_fields;
use crate::listing::{ListOptions, Query, ResultPage};
use crate::model::customer::CustomerId;
use crate::model::order::{Delivery, Order, OrderId};
use crate::model::store::StoreId;
use crate::repo::order_repo::OrderRepository;
use crate::repo::RepoResult;
use crate::service::listing::{run_listing, ListServiceResult};
use log::info;

pub struct OrderService<R: OrderRepository> {
    repo: R,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a pending order.
    pub fn create_order(
        &self,
        store_id: StoreId,
        customer_id: CustomerId,
        ordered_on: &str,
        note: &str,
    ) -> RepoResult<OrderId> {
        let order = Order::new(store_id, customer_id, ordered_on.trim(), note.trim());
        self.repo.create_order(&order)
    }

    pub fn update_order(&self, order: &Order) -> RepoResult<()> {
        self.repo.update_order(order)
    }

    pub fn get_order(&self, id: OrderId) -> RepoResult<Option<Order>> {
        self.repo.get_order(id)
    }

    /// Records the delivery of `order_id` and completes the order.
    pub fn record_delivery(&self, order_id: OrderId, delivered_on: &str) -> RepoResult<Delivery> {
        let delivery = Delivery::new(order_id, delivered_on.trim());
        self.repo.record_delivery(&delivery)?;
        info!("event=order_delivered module=service status=ok");
        Ok(delivery)
    }

    /// Lists one store's orders through the list engine.
    pub fn list_orders(
        &self,
        store_id: StoreId,
        query: &Query,
        options: &ListOptions,
    ) -> ListServiceResult<ResultPage> {
        let orders = self.repo.list_orders(store_id)?;
        run_listing("orders", &orders, query, order_fields(), options)
    }

    pub fn soft_delete_order(&self, id: OrderId) -> RepoResult<()> {
        self.repo.soft_delete_order(id)
    }
}
