//! Store entity. Every customer and order belongs to exactly one store.

use super::validation::{require_name, ModelValidationError};
use crate::listing::registry::{STORE_ID, STORE_NAME};
use crate::listing::{Record, ToRecord};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type StoreId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    pub is_deleted: bool,
}

impl Store {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            is_deleted: false,
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_name("store name", &self.name)
    }
}

impl ToRecord for Store {
    fn to_record(&self) -> Record {
        Record::new()
            .with(STORE_ID, self.id.to_string())
            .with(STORE_NAME, self.name.as_str())
    }
}
