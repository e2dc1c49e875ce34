//! Store-management domain model.
//!
//! # Responsibility
//! - Define stores, customers, orders and deliveries as used by core logic.
//! - Validate entity fields before they reach persistence.
//!
//! # Invariants
//! - Every entity is identified by a stable UUID.
//! - Deletion is a soft-delete tombstone, not a hard delete.
//! - Calendar dates are ISO `YYYY-MM-DD` strings.

pub mod customer;
pub mod order;
pub mod store;
pub mod validation;
