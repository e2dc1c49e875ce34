//! Built-in field registries, one per list screen.

use super::field::{FieldDescriptor, FieldRegistry};
use once_cell::sync::Lazy;

pub const ORDER_ID: &str = "id";
pub const ORDER_DATE: &str = "date";
pub const ORDER_CUSTOMER_NAME: &str = "customer_name";
pub const ORDER_NOTE: &str = "note";
pub const ORDER_STATUS: &str = "status";

pub const CUSTOMER_ID: &str = "id";
pub const CUSTOMER_NAME: &str = "name";
pub const CUSTOMER_PHONE: &str = "phone";
pub const CUSTOMER_ADDRESS: &str = "address";

pub const STORE_ID: &str = "id";
pub const STORE_NAME: &str = "name";

pub const LEAD_TIME_CUSTOMER_ID: &str = "customer_id";
pub const LEAD_TIME_CUSTOMER_NAME: &str = "customer_name";
pub const LEAD_TIME_DAYS: &str = "lead_time";
pub const LEAD_TIME_SAMPLES: &str = "samples";

static ORDER_FIELDS: Lazy<FieldRegistry> = Lazy::new(|| {
    FieldRegistry::new(vec![
        FieldDescriptor::new(ORDER_ID, "注文ID"),
        FieldDescriptor::new(ORDER_DATE, "注文日"),
        FieldDescriptor::new(ORDER_CUSTOMER_NAME, "顧客名"),
        FieldDescriptor::new(ORDER_NOTE, "備考").not_comparable(),
        FieldDescriptor::new(ORDER_STATUS, "状態"),
    ])
    .expect("valid order registry")
});

static CUSTOMER_FIELDS: Lazy<FieldRegistry> = Lazy::new(|| {
    FieldRegistry::new(vec![
        FieldDescriptor::new(CUSTOMER_ID, "顧客ID"),
        FieldDescriptor::new(CUSTOMER_NAME, "顧客名"),
        FieldDescriptor::new(CUSTOMER_PHONE, "電話番号").not_comparable(),
        FieldDescriptor::new(CUSTOMER_ADDRESS, "住所").not_comparable(),
    ])
    .expect("valid customer registry")
});

static STORE_FIELDS: Lazy<FieldRegistry> = Lazy::new(|| {
    FieldRegistry::new(vec![
        FieldDescriptor::new(STORE_ID, "店舗ID"),
        FieldDescriptor::new(STORE_NAME, "店舗名"),
    ])
    .expect("valid store registry")
});

static LEAD_TIME_FIELDS: Lazy<FieldRegistry> = Lazy::new(|| {
    FieldRegistry::new(vec![
        FieldDescriptor::new(LEAD_TIME_CUSTOMER_ID, "顧客ID"),
        FieldDescriptor::new(LEAD_TIME_CUSTOMER_NAME, "顧客名"),
        FieldDescriptor::new(LEAD_TIME_DAYS, "平均リードタイム"),
        FieldDescriptor::new(LEAD_TIME_SAMPLES, "件数").not_searchable(),
    ])
    .expect("valid lead time registry")
});

/// Columns of the order list.
pub fn order_fields() -> &'static FieldRegistry {
    &ORDER_FIELDS
}

/// Columns of the customer list.
pub fn customer_fields() -> &'static FieldRegistry {
    &CUSTOMER_FIELDS
}

pub fn store_fields() -> &'static FieldRegistry {
    &STORE_FIELDS
}

/// Columns of the per-customer lead-time statistics list.
pub fn lead_time_fields() -> &'static FieldRegistry {
    &LEAD_TIME_FIELDS
}

#[cfg(test)]
mod tests {
    use super::{customer_fields, lead_time_fields, order_fields, store_fields};

    #[test]
    fn built_in_registries_initialize() {
        assert_eq!(order_fields().descriptors().len(), 5);
        assert_eq!(customer_fields().descriptors().len(), 4);
        assert_eq!(store_fields().descriptors().len(), 2);
        assert_eq!(lead_time_fields().descriptors().len(), 4);
    }

    #[test]
    fn order_note_is_searchable_but_not_sortable() {
        let note = order_fields().get("note").expect("note field");
        assert!(note.searchable);
        assert!(!note.comparable);
    }
}
