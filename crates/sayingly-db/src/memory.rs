//! In-memory [`DataService`] implementation.
//!
//! Backs the query layer with plain table maps: used by the test suite and
//! by embedders that want the catalog logic without a database. Semantics
//! mirror [`PgDataService`](crate::data_service::PgDataService): textual
//! filter comparison, stable ordering, row caps.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use sayingly_core::{RawRow, Result};

use crate::data_service::{DataService, OrderDirection, SelectQuery};

/// In-process table store.
#[derive(Default)]
pub struct MemoryDataService {
    tables: RwLock<HashMap<String, Vec<RawRow>>>,
    select_calls: AtomicUsize,
}

impl MemoryDataService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row to a table, creating the table on first insert.
    pub async fn insert_row(&self, table: &str, row: RawRow) {
        self.tables
            .write()
            .await
            .entry(table.to_string())
            .or_default()
            .push(row);
    }

    /// Append several rows to a table.
    pub async fn insert_rows(&self, table: &str, rows: impl IntoIterator<Item = RawRow>) {
        self.tables
            .write()
            .await
            .entry(table.to_string())
            .or_default()
            .extend(rows);
    }

    /// Number of `select` calls served so far. Lets tests assert that
    /// memoized repositories hit the backend once per cache key.
    pub fn select_calls(&self) -> usize {
        self.select_calls.load(Ordering::Relaxed)
    }
}

/// Read a cell as comparison text, mirroring the `::text` casts the
/// Postgres implementation applies.
fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn compare_cells(a: Option<&Value>, b: Option<&Value>) -> std::cmp::Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(std::cmp::Ordering::Equal),
        (x, y) => {
            let x = x.map(cell_text).unwrap_or_default();
            let y = y.map(cell_text).unwrap_or_default();
            x.cmp(&y)
        }
    }
}

#[async_trait]
impl DataService for MemoryDataService {
    async fn select(&self, query: SelectQuery) -> Result<Vec<RawRow>> {
        self.select_calls.fetch_add(1, Ordering::Relaxed);

        let tables = self.tables.read().await;
        let mut rows: Vec<RawRow> = tables
            .get(&query.table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| {
                        query.eq.iter().all(|(column, value)| {
                            row.get(column).map(cell_text).unwrap_or_default() == *value
                        }) && query.ne.iter().all(|(column, value)| {
                            row.get(column).map(cell_text).unwrap_or_default() != *value
                        })
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let ordering = compare_cells(a.get(&order.column), b.get(&order.column));
                match order.direction {
                    OrderDirection::Asc => ordering,
                    OrderDirection::Desc => ordering.reverse(),
                }
            });
        }

        if let Some(limit) = query.limit {
            rows.truncate(limit.max(0) as usize);
        }

        Ok(rows)
    }

    async fn select_one(&self, table: &str, id: &str) -> Result<Option<RawRow>> {
        let tables = self.tables.read().await;
        Ok(tables.get(table).and_then(|rows| {
            rows.iter()
                .find(|row| row.get("id").map(cell_text).unwrap_or_default() == id)
                .cloned()
        }))
    }
}
