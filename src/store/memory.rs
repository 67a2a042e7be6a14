//! In-process table store
//!
//! Mirrors the filter semantics of the hosted store and enforces primary key
//! uniqueness, so services and the console can be exercised without a
//! network.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::{Filter, Table, TableStore};
use crate::error::{StoreError, StoreResult};

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<Table, Vec<Map<String, Value>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every row in `table`, in insertion order
    pub fn rows(&self, table: Table) -> Vec<Value> {
        self.lock()
            .get(&table)
            .map(|rows| rows.iter().cloned().map(Value::Object).collect())
            .unwrap_or_default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Table, Vec<Map<String, Value>>>> {
        // Rows are only replaced whole, so a poisoned lock still holds valid data
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl TableStore for MemoryStore {
    async fn insert(&self, table: Table, row: Value) -> StoreResult<u64> {
        let Value::Object(row) = row else {
            return Err(StoreError::Rejected {
                status: 400,
                message: format!("Row for {} must be a JSON object", table),
            });
        };

        let key = table.primary_key();
        let mut tables = self.lock();
        let rows = tables.entry(table).or_default();

        if let Some(id) = row.get(key) {
            if rows.iter().any(|r| r.get(key).is_some_and(|v| values_equal(v, id))) {
                return Err(StoreError::Rejected {
                    status: 409,
                    message: format!(
                        "duplicate key value violates unique constraint \"{}_pkey\"",
                        table
                    ),
                });
            }
        }

        rows.push(row);
        Ok(1)
    }

    async fn select(&self, table: Table, filters: Vec<Filter>) -> StoreResult<Vec<Value>> {
        let tables = self.lock();
        Ok(tables
            .get(&table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| matches_all(row, &filters))
                    .cloned()
                    .map(Value::Object)
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn update(&self, table: Table, patch: Value, filters: Vec<Filter>) -> StoreResult<u64> {
        let Value::Object(patch) = patch else {
            return Err(StoreError::Rejected {
                status: 400,
                message: format!("Patch for {} must be a JSON object", table),
            });
        };

        let mut tables = self.lock();
        let mut affected = 0;
        for row in tables.entry(table).or_default().iter_mut() {
            if matches_all(row, &filters) {
                for (column, value) in &patch {
                    row.insert(column.clone(), value.clone());
                }
                affected += 1;
            }
        }
        Ok(affected)
    }

    async fn delete(&self, table: Table, filters: Vec<Filter>) -> StoreResult<u64> {
        let mut tables = self.lock();
        let rows = tables.entry(table).or_default();
        let before = rows.len();
        rows.retain(|row| !matches_all(row, &filters));
        Ok((before - rows.len()) as u64)
    }
}

fn matches_all(row: &Map<String, Value>, filters: &[Filter]) -> bool {
    filters.iter().all(|filter| matches(row, filter))
}

fn matches(row: &Map<String, Value>, filter: &Filter) -> bool {
    let cell = row.get(filter.column()).unwrap_or(&Value::Null);
    match filter {
        Filter::Eq(_, value) => values_equal(cell, value),
        Filter::ILike(_, keyword) => cell
            .as_str()
            .is_some_and(|s| s.to_lowercase().contains(&keyword.to_lowercase())),
        Filter::In(_, values) => values.iter().any(|v| values_equal(cell, v)),
        Filter::IsNull(_) => cell.is_null(),
    }
}

/// Numbers compare by value so `1` and `1.0` match, as they would in SQL
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => x.as_f64() == y.as_f64(),
        },
        _ => a == b,
    }
}
