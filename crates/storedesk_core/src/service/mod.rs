//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository reads and the list engine into screen-level APIs.
//! - Keep callers decoupled from storage details.

pub mod customer_service;
pub mod listing;
pub mod order_service;
pub mod statistics_service;
pub mod store_service;
