//! The Backend Data Service capability.
//!
//! The catalog repository never talks to an ambient global client; it is
//! handed a [`DataService`] — an object-safe async query capability. The
//! production implementation is [`PgDataService`] over sqlx/Postgres; tests
//! and embedders without a database use
//! [`MemoryDataService`](crate::memory::MemoryDataService).

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{Pool, Postgres, Row};
use tracing::debug;

use sayingly_core::{Error, RawRow, Result};

/// Sort direction for a select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
        }
    }
}

/// Ordering specification for a select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSpec {
    pub column: String,
    pub direction: OrderDirection,
}

/// A declarative select over one table: equality and inequality filters,
/// optional ordering, optional row cap. Rows come back as raw JSON maps so
/// the field mapper sees each table's native column names.
#[derive(Debug, Clone, Default)]
pub struct SelectQuery {
    pub table: String,
    /// Conjunctive equality filters, compared textually.
    pub eq: Vec<(String, String)>,
    /// Conjunctive not-equal filters, compared textually.
    pub ne: Vec<(String, String)>,
    pub order: Option<OrderSpec>,
    pub limit: Option<i64>,
}

impl SelectQuery {
    pub fn table(name: impl Into<String>) -> Self {
        Self {
            table: name.into(),
            ..Default::default()
        }
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.eq.push((column.into(), value.into()));
        self
    }

    pub fn ne(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.ne.push((column.into(), value.into()));
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, direction: OrderDirection) -> Self {
        self.order = Some(OrderSpec {
            column: column.into(),
            direction,
        });
        self
    }

    pub fn limit(mut self, n: i64) -> Self {
        self.limit = Some(n);
        self
    }
}

/// Asynchronous query capability over the backing data store.
///
/// Read-only; operations may fail with a transport or query error
/// (`Error::Database`). Implementations must be shareable across tasks.
#[async_trait]
pub trait DataService: Send + Sync {
    /// Fetch every row matching the query.
    async fn select(&self, query: SelectQuery) -> Result<Vec<RawRow>>;

    /// Fetch one row by its id column, `None` when absent.
    async fn select_one(&self, table: &str, id: &str) -> Result<Option<RawRow>>;
}

/// Validate a table or column identifier before SQL interpolation.
///
/// Identifiers must be non-empty, at most 63 characters (the PostgreSQL
/// limit), start with a lowercase letter or underscore, and contain only
/// lowercase alphanumerics and underscores. Everything that reaches a query
/// string goes through this; values are always bound.
pub fn validate_identifier(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidInput("identifier cannot be empty".to_string()));
    }
    if name.len() > 63 {
        return Err(Error::InvalidInput(format!(
            "identifier exceeds 63 character limit: {} characters",
            name.len()
        )));
    }
    let mut chars = name.chars();
    let first = chars.next().unwrap_or('_');
    if !first.is_ascii_lowercase() && first != '_' {
        return Err(Error::InvalidInput(format!(
            "identifier must start with a lowercase letter or underscore, found: '{first}'"
        )));
    }
    for ch in name.chars() {
        if !ch.is_ascii_lowercase() && !ch.is_ascii_digit() && ch != '_' {
            return Err(Error::InvalidInput(format!(
                "identifier contains invalid character: '{ch}'"
            )));
        }
    }
    Ok(())
}

/// PostgreSQL implementation of [`DataService`].
///
/// Each row is selected as `to_jsonb(t)` so the caller receives the table's
/// native column set, matching what a hosted query API returns.
pub struct PgDataService {
    pool: Pool<Postgres>,
}

impl PgDataService {
    /// Create a new PgDataService with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DataService for PgDataService {
    async fn select(&self, query: SelectQuery) -> Result<Vec<RawRow>> {
        validate_identifier(&query.table)?;
        for (column, _) in query.eq.iter().chain(query.ne.iter()) {
            validate_identifier(column)?;
        }

        let mut sql = format!("SELECT to_jsonb(t) AS row FROM {} t", query.table);
        let mut param = 0usize;
        let mut clauses = Vec::new();
        for (column, _) in &query.eq {
            param += 1;
            clauses.push(format!("t.{column}::text = ${param}"));
        }
        for (column, _) in &query.ne {
            param += 1;
            clauses.push(format!("t.{column}::text <> ${param}"));
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        if let Some(order) = &query.order {
            validate_identifier(&order.column)?;
            sql.push_str(&format!(
                " ORDER BY t.{} {}",
                order.column,
                order.direction.as_sql()
            ));
        }
        if query.limit.is_some() {
            param += 1;
            sql.push_str(&format!(" LIMIT ${param}"));
        }

        let mut q = sqlx::query(&sql);
        for (_, value) in &query.eq {
            q = q.bind(value.as_str());
        }
        for (_, value) in &query.ne {
            q = q.bind(value.as_str());
        }
        if let Some(limit) = query.limit {
            q = q.bind(limit);
        }

        let rows = q.fetch_all(&self.pool).await.map_err(Error::Database)?;

        debug!(
            subsystem = "db",
            op = "select",
            db_table = %query.table,
            result_count = rows.len(),
            "select completed"
        );

        rows.into_iter()
            .map(|row| {
                let value: Value = row.get("row");
                value
                    .as_object()
                    .cloned()
                    .ok_or_else(|| Error::Internal("row did not decode to an object".to_string()))
            })
            .collect()
    }

    async fn select_one(&self, table: &str, id: &str) -> Result<Option<RawRow>> {
        validate_identifier(table)?;

        let sql = format!("SELECT to_jsonb(t) AS row FROM {table} t WHERE t.id::text = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        row.map(|r| {
            let value: Value = r.get("row");
            value
                .as_object()
                .cloned()
                .ok_or_else(|| Error::Internal("row did not decode to an object".to_string()))
        })
        .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_identifier_accepts_table_names() {
        assert!(validate_identifier("idioms").is_ok());
        assert!(validate_identifier("myths_legends").is_ok());
        assert!(validate_identifier("_internal").is_ok());
        assert!(validate_identifier("rank2").is_ok());
    }

    #[test]
    fn test_validate_identifier_rejects_sql_meta() {
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("idioms; drop table idioms").is_err());
        assert!(validate_identifier("idioms--").is_err());
        assert!(validate_identifier("\"idioms\"").is_err());
        assert!(validate_identifier("2fast").is_err());
        assert!(validate_identifier("Idioms").is_err());
        assert!(validate_identifier(&"a".repeat(64)).is_err());
    }

    #[test]
    fn test_select_query_builder() {
        let query = SelectQuery::table("idioms")
            .eq("language_code", "nl")
            .ne("id", "5")
            .order_by("popularity_rank", OrderDirection::Desc)
            .limit(3);

        assert_eq!(query.table, "idioms");
        assert_eq!(query.eq, vec![("language_code".to_string(), "nl".to_string())]);
        assert_eq!(query.ne, vec![("id".to_string(), "5".to_string())]);
        assert_eq!(
            query.order,
            Some(OrderSpec {
                column: "popularity_rank".to_string(),
                direction: OrderDirection::Desc,
            })
        );
        assert_eq!(query.limit, Some(3));
    }

    #[test]
    fn test_order_direction_sql() {
        assert_eq!(OrderDirection::Asc.as_sql(), "ASC");
        assert_eq!(OrderDirection::Desc.as_sql(), "DESC");
    }
}
