//! Generic record store: equality filters, first-match fetch and insert
//! over a single table.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreResult;

mod memory;
mod postgres;

pub use memory::MemoryRecordStore;
pub use postgres::PgRecordStore;

/// Raw row as returned by a store, before it is decoded into a typed record.
pub type Row = Value;

/// Column values for an insert.
pub type Fields = BTreeMap<String, FieldValue>;

/// Scalar used for filters and inserts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Int(i64),
    Text(String),
}

impl FieldValue {
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Int(v) => Value::from(*v),
            FieldValue::Text(v) => Value::from(v.as_str()),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

/// Pending equality filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub field: String,
    pub value: FieldValue,
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Table this store is bound to.
    fn table(&self) -> &str;

    /// Add an equality filter. Filters are AND-combined.
    fn set_where(&mut self, field: &str, value: FieldValue) -> &mut Self;

    /// Discard pending filters.
    fn clear(&mut self) -> &mut Self;

    /// Run the pending query and return the first match, ordered by key.
    /// Pending filters are consumed.
    async fn get_first(&mut self) -> StoreResult<Option<Row>>;

    /// Persist a new row and return its assigned key.
    async fn insert(&mut self, fields: Fields) -> StoreResult<i64>;
}
