//! Core domain logic for StoreDesk.
//! This crate is the single source of truth for business invariants.

pub mod config;
pub mod db;
pub mod listing;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{AppConfig, ConfigError};
pub use listing::{
    apply, ConfigurationError, FieldDescriptor, FieldRegistry, FieldValue, ListOptions, Query,
    Record, ResultPage, SearchScope, SortDirection, SortSpec, ToRecord,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::customer::{Customer, CustomerId};
pub use model::order::{Delivery, Order, OrderId, OrderStatus, OrderSummary};
pub use model::store::{Store, StoreId};
pub use model::validation::ModelValidationError;
pub use repo::customer_repo::{CustomerRepository, SqliteCustomerRepository};
pub use repo::order_repo::{LeadTimeSample, OrderRepository, SqliteOrderRepository};
pub use repo::store_repo::{SqliteStoreRepository, StoreRepository};
pub use repo::{RepoError, RepoResult};
pub use service::customer_service::{CustomerService, NewCustomerRequest};
pub use service::listing::{ListServiceError, ListServiceResult};
pub use service::order_service::OrderService;
pub use service::statistics_service::{CustomerLeadTime, StatisticsService};
pub use service::store_service::StoreService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
