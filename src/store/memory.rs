use std::{collections::HashSet, sync::Arc};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::{FieldValue, Fields, Filter, RecordStore, Row};
use crate::error::{StoreError, StoreResult};

#[derive(Debug, Default)]
struct Table {
    rows: Vec<Row>,
    next_id: i64,
}

/// In-process store. Clones share the table but not pending filters.
#[derive(Debug)]
pub struct MemoryRecordStore {
    table_name: String,
    key: String,
    unique: HashSet<String>,
    defaults: Map<String, Value>,
    table: Arc<Mutex<Table>>,
    filters: Vec<Filter>,
}

impl Clone for MemoryRecordStore {
    fn clone(&self) -> Self {
        Self {
            table_name: self.table_name.clone(),
            key: self.key.clone(),
            unique: self.unique.clone(),
            defaults: self.defaults.clone(),
            table: Arc::clone(&self.table),
            filters: Vec::new(),
        }
    }
}

fn row_matches(row: &Row, filters: &[Filter]) -> bool {
    filters
        .iter()
        .all(|f| row.get(&f.field) == Some(&f.value.to_json()))
}

fn key_of(row: &Row, key: &str) -> i64 {
    row.get(key).and_then(Value::as_i64).unwrap_or(i64::MAX)
}

impl MemoryRecordStore {
    pub fn new(table: &str, key: &str) -> Self {
        Self {
            table_name: table.to_string(),
            key: key.to_string(),
            unique: HashSet::new(),
            defaults: Map::new(),
            table: Arc::new(Mutex::new(Table {
                rows: Vec::new(),
                next_id: 1,
            })),
            filters: Vec::new(),
        }
    }

    /// Reject inserts that repeat an existing value of `column`.
    pub fn unique_on(mut self, column: &str) -> Self {
        self.unique.insert(column.to_string());
        self
    }

    /// Value stored for `column` when an insert leaves it out.
    pub fn with_default(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.defaults.insert(column.to_string(), value.into());
        self
    }

    /// Push a row as-is, bypassing key assignment and constraints.
    pub async fn push_raw(&self, row: Row) {
        self.table.lock().await.rows.push(row);
    }

    pub async fn len(&self) -> usize {
        self.table.lock().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn rows(&self) -> Vec<Row> {
        self.table.lock().await.rows.clone()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    fn table(&self) -> &str {
        &self.table_name
    }

    fn set_where(&mut self, field: &str, value: FieldValue) -> &mut Self {
        self.filters.push(Filter {
            field: field.to_string(),
            value,
        });
        self
    }

    fn clear(&mut self) -> &mut Self {
        self.filters.clear();
        self
    }

    async fn get_first(&mut self) -> StoreResult<Option<Row>> {
        let filters = std::mem::take(&mut self.filters);
        let table = self.table.lock().await;
        let found = table
            .rows
            .iter()
            .filter(|row| row_matches(row, &filters))
            .min_by_key(|row| key_of(row, &self.key))
            .cloned();
        debug!(table = %self.table_name, filters = filters.len(), hit = found.is_some(), "get_first");
        Ok(found)
    }

    async fn insert(&mut self, fields: Fields) -> StoreResult<i64> {
        let mut table = self.table.lock().await;

        for column in &self.unique {
            if let Some(value) = fields.get(column) {
                let value = value.to_json();
                if table.rows.iter().any(|r| r.get(column) == Some(&value)) {
                    warn!(table = %self.table_name, %column, "unique constraint violated");
                    return Err(StoreError::ConstraintViolation(format!(
                        "duplicate key value violates unique constraint on {}.{}",
                        self.table_name, column
                    )));
                }
            }
        }

        let id = table.next_id;
        table.next_id += 1;

        let mut row = self.defaults.clone();
        for (column, value) in &fields {
            row.insert(column.clone(), value.to_json());
        }
        row.insert(self.key.clone(), Value::from(id));
        table.rows.push(Value::Object(row));

        debug!(table = %self.table_name, id, "row inserted");
        Ok(id)
    }
}
