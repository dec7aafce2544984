//! Database connection pool and the content-store capability.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Column, PgPool, Row};

use crate::errors::AppError;
use crate::models::pattern::SearchPattern;

/// Create a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Read-only access to the scanned content tables.
///
/// The orchestrator only sees this trait, so tests run against an in-memory
/// implementation.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn table_exists(&self, table: &str) -> Result<bool, AppError>;

    /// True match count for a column, across all patterns.
    async fn count_matches(
        &self,
        table: &str,
        column: &str,
        patterns: &[SearchPattern],
    ) -> Result<i64, AppError>;

    /// Up to `limit` matching rows in natural storage order, each row a map
    /// of field name to text value (NULLs as empty strings). Selects the
    /// scanned column plus `extra_fields`.
    async fn fetch_matches(
        &self,
        table: &str,
        column: &str,
        patterns: &[SearchPattern],
        extra_fields: &[&str],
        limit: i64,
    ) -> Result<Vec<HashMap<String, String>>, AppError>;
}

/// `ContentStore` over a live PostgreSQL pool.
pub struct PgContentStore {
    pool: PgPool,
}

impl PgContentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// OR of one `LIKE $n` comparison per pattern. Table and column names come
/// only from the fixed configuration and are interpolated quoted; pattern
/// values are always bound.
fn like_conditions(column: &str, pattern_count: usize) -> String {
    (1..=pattern_count)
        .map(|i| format!("\"{column}\" LIKE ${i}"))
        .collect::<Vec<_>>()
        .join(" OR ")
}

/// Select list casting every field to text, aliased quoted so the row map
/// keys preserve the configured field case.
fn select_list(column: &str, extra_fields: &[&str]) -> String {
    std::iter::once(column)
        .chain(extra_fields.iter().copied().filter(|f| *f != column))
        .map(|f| format!("CAST(\"{f}\" AS TEXT) AS \"{f}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

#[async_trait]
impl ContentStore for PgContentStore {
    async fn table_exists(&self, table: &str) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM information_schema.tables WHERE table_name = $1)",
        )
        .bind(table)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn count_matches(
        &self,
        table: &str,
        column: &str,
        patterns: &[SearchPattern],
    ) -> Result<i64, AppError> {
        let sql = format!(
            "SELECT COUNT(*) FROM \"{table}\" WHERE {}",
            like_conditions(column, patterns.len())
        );
        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        for pattern in patterns {
            query = query.bind(pattern.as_like());
        }
        Ok(query.fetch_one(&self.pool).await?)
    }

    async fn fetch_matches(
        &self,
        table: &str,
        column: &str,
        patterns: &[SearchPattern],
        extra_fields: &[&str],
        limit: i64,
    ) -> Result<Vec<HashMap<String, String>>, AppError> {
        let sql = format!(
            "SELECT {} FROM \"{table}\" WHERE {} LIMIT {limit}",
            select_list(column, extra_fields),
            like_conditions(column, patterns.len())
        );
        let mut query = sqlx::query(&sql);
        for pattern in patterns {
            query = query.bind(pattern.as_like());
        }
        let rows = query.fetch_all(&self.pool).await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let mut fields = HashMap::with_capacity(row.columns().len());
            for col in row.columns() {
                let value: Option<String> = row.try_get(col.ordinal())?;
                fields.insert(col.name().to_string(), value.unwrap_or_default());
            }
            out.push(fields);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_conditions_numbers_placeholders() {
        assert_eq!(
            like_conditions("post_content", 2),
            "\"post_content\" LIKE $1 OR \"post_content\" LIKE $2"
        );
    }

    #[test]
    fn like_conditions_single_pattern() {
        assert_eq!(like_conditions("meta_value", 1), "\"meta_value\" LIKE $1");
    }

    #[test]
    fn select_list_casts_and_aliases() {
        assert_eq!(
            select_list("meta_value", &["meta_id", "post_id"]),
            "CAST(\"meta_value\" AS TEXT) AS \"meta_value\", \
             CAST(\"meta_id\" AS TEXT) AS \"meta_id\", \
             CAST(\"post_id\" AS TEXT) AS \"post_id\""
        );
    }

    #[test]
    fn select_list_skips_duplicate_scanned_column() {
        assert_eq!(
            select_list("id", &["id", "action_type"]),
            "CAST(\"id\" AS TEXT) AS \"id\", CAST(\"action_type\" AS TEXT) AS \"action_type\""
        );
    }

    #[test]
    fn select_list_without_extras() {
        assert_eq!(
            select_list("option_value", &[]),
            "CAST(\"option_value\" AS TEXT) AS \"option_value\""
        );
    }
}
