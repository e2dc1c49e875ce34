//! Field descriptors and per-list registries.
//!
//! # Responsibility
//! - Describe which fields of a list type may be searched or sorted.
//! - Validate registry shape once, at construction.
//!
//! # Invariants
//! - Keys are non-blank and unique within one registry.
//! - Registry order is the column order used for padding rows.

use super::error::{ConfigurationError, ListResult};
use super::record::{FieldValue, Record};
use serde::Serialize;

/// Metadata for one column of a list screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub key: String,
    /// Display text for column headers and field pickers.
    pub label: String,
    /// Whether column-header sorting is allowed.
    pub comparable: bool,
    /// Whether free-text filtering inspects this field.
    pub searchable: bool,
}

impl FieldDescriptor {
    /// Creates a descriptor that is both searchable and comparable.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            comparable: true,
            searchable: true,
        }
    }

    pub fn not_searchable(mut self) -> Self {
        self.searchable = false;
        self
    }

    pub fn not_comparable(mut self) -> Self {
        self.comparable = false;
        self
    }
}

/// Validated descriptor set for one record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRegistry {
    descriptors: Vec<FieldDescriptor>,
}

impl FieldRegistry {
    /// Builds a registry, rejecting blank and duplicate keys.
    pub fn new(descriptors: Vec<FieldDescriptor>) -> ListResult<Self> {
        for (index, descriptor) in descriptors.iter().enumerate() {
            if descriptor.key.trim().is_empty() {
                return Err(ConfigurationError::EmptyFieldKey);
            }
            if descriptors[..index]
                .iter()
                .any(|earlier| earlier.key == descriptor.key)
            {
                return Err(ConfigurationError::DuplicateField(descriptor.key.clone()));
            }
        }
        Ok(Self { descriptors })
    }

    pub fn get(&self, key: &str) -> Option<&FieldDescriptor> {
        self.descriptors.iter().find(|descriptor| descriptor.key == key)
    }

    pub fn descriptors(&self) -> &[FieldDescriptor] {
        &self.descriptors
    }

    /// Searchable descriptors in registry order.
    pub fn searchable(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.descriptors.iter().filter(|descriptor| descriptor.searchable)
    }

    /// Resolves a key that a search scope may name.
    pub fn require_searchable(&self, key: &str) -> ListResult<&FieldDescriptor> {
        let descriptor = self
            .get(key)
            .ok_or_else(|| ConfigurationError::UnknownField(key.to_string()))?;
        if !descriptor.searchable {
            return Err(ConfigurationError::NotSearchable(key.to_string()));
        }
        Ok(descriptor)
    }

    /// Resolves a key that a sort may name.
    pub fn require_comparable(&self, key: &str) -> ListResult<&FieldDescriptor> {
        let descriptor = self
            .get(key)
            .ok_or_else(|| ConfigurationError::UnknownField(key.to_string()))?;
        if !descriptor.comparable {
            return Err(ConfigurationError::NotComparable(key.to_string()));
        }
        Ok(descriptor)
    }

    /// Builds a padding row: every registered key mapped to `Empty`.
    pub fn blank_record(&self) -> Record {
        self.descriptors
            .iter()
            .fold(Record::new(), |record, descriptor| {
                record.with(descriptor.key.as_str(), FieldValue::Empty)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldDescriptor, FieldRegistry};
    use crate::listing::ConfigurationError;

    fn sample() -> FieldRegistry {
        FieldRegistry::new(vec![
            FieldDescriptor::new("id", "ID"),
            FieldDescriptor::new("note", "Note").not_comparable(),
            FieldDescriptor::new("lead_time", "Lead time").not_searchable(),
        ])
        .expect("sample registry should be valid")
    }

    #[test]
    fn rejects_duplicate_keys() {
        let err = FieldRegistry::new(vec![
            FieldDescriptor::new("id", "ID"),
            FieldDescriptor::new("id", "Other"),
        ])
        .expect_err("duplicate key must be rejected");
        assert_eq!(err, ConfigurationError::DuplicateField("id".to_string()));
    }

    #[test]
    fn rejects_blank_key() {
        let err = FieldRegistry::new(vec![FieldDescriptor::new("  ", "Blank")])
            .expect_err("blank key must be rejected");
        assert_eq!(err, ConfigurationError::EmptyFieldKey);
    }

    #[test]
    fn require_checks_capabilities() {
        let registry = sample();
        assert!(registry.require_searchable("id").is_ok());
        assert_eq!(
            registry.require_searchable("lead_time"),
            Err(ConfigurationError::NotSearchable("lead_time".to_string()))
        );
        assert_eq!(
            registry.require_comparable("note"),
            Err(ConfigurationError::NotComparable("note".to_string()))
        );
        assert_eq!(
            registry.require_comparable("foo"),
            Err(ConfigurationError::UnknownField("foo".to_string()))
        );
    }

    #[test]
    fn blank_record_follows_registry_order() {
        let blank = sample().blank_record();
        let keys = blank.fields().map(|(key, _)| key).collect::<Vec<_>>();
        assert_eq!(keys, vec!["id", "note", "lead_time"]);
        assert!(blank.is_blank());
    }
}
