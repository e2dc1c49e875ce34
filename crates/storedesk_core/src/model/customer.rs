//! Customer entity.
//!
//! # Invariants
//! - `name` is non-blank.
//! - `phone`, when present, looks like a phone number.

use super::store::StoreId;
use super::validation::{check_phone, require_name, ModelValidationError};
use crate::listing::registry::{CUSTOMER_ADDRESS, CUSTOMER_ID, CUSTOMER_NAME, CUSTOMER_PHONE};
use crate::listing::{Record, ToRecord};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type CustomerId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    /// Owning store; customers are only visible within it.
    pub store_id: StoreId,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_deleted: bool,
}

impl Customer {
    pub fn new(store_id: StoreId, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            store_id,
            name: name.into(),
            phone: None,
            address: None,
            is_deleted: false,
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_name("customer name", &self.name)?;
        check_phone(self.phone.as_deref())
    }
}

impl ToRecord for Customer {
    fn to_record(&self) -> Record {
        Record::new()
            .with(CUSTOMER_ID, self.id.to_string())
            .with(CUSTOMER_NAME, self.name.as_str())
            .with(CUSTOMER_PHONE, self.phone.clone())
            .with(CUSTOMER_ADDRESS, self.address.clone())
    }
}
