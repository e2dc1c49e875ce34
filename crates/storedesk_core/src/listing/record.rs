//! Listable record shape.
//!
//! # Responsibility
//! - Hold one row of a list screen as an ordered field-key to value mapping.
//! - Define the textual rendering used for keyword filtering.
//! - Define the natural ordering used for column sorting.
//!
//! # Invariants
//! - Field order is the insertion order chosen by the projecting caller.
//! - Numeric values render in plain base-10 with no grouping separators.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// Scalar value stored under one field key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    /// No value. Used by padding rows and nullable columns.
    Empty,
    Text(String),
    Integer(i64),
    Decimal(f64),
}

impl FieldValue {
    /// Renders the value as the text keyword filtering inspects.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Natural ordering for sorting.
    ///
    /// Numbers compare numerically (integers and decimals against each
    /// other), text compares lexicographically by code point. Across kinds,
    /// `Empty < number < text`.
    pub fn natural_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            (Self::Decimal(a), Self::Decimal(b)) => a.total_cmp(b),
            (Self::Integer(a), Self::Decimal(b)) => (*a as f64).total_cmp(b),
            (Self::Decimal(a), Self::Integer(b)) => a.total_cmp(&(*b as f64)),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }

    /// Returns whether this is the `Empty` value.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Integer(_) | Self::Decimal(_) => 1,
            Self::Text(_) => 2,
        }
    }
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(value) => f.write_str(value),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Decimal(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Decimal(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

/// One listable row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; replaces an existing value under the same key
    /// in place so field order stays stable.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Iterates fields in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns whether every field holds `FieldValue::Empty`.
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|(_, value)| value.is_empty())
    }
}
