//! Catalogue executor.
//!
//! Runs a [`CompiledQuery`] against the catalogue table and shapes the result
//! rows. Each call acquires its own pooled connection and returns it to the
//! pool when the call ends, on success and failure alike.

use std::time::Instant;

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::{debug, instrument, warn};

use toolfinder_core::{
    defaults, CatalogueRepository, CatalogueRow, CompiledQuery, Error, Result,
};

use crate::validation::validate_identifier;

/// PostgreSQL implementation of [`CatalogueRepository`].
#[derive(Clone)]
pub struct PgCatalogueRepository {
    pool: PgPool,
    table: String,
    max_results: Option<i64>,
}

impl PgCatalogueRepository {
    /// Catalogue repository over the default `tools` table with no row cap.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            table: defaults::CATALOGUE_TABLE.to_string(),
            max_results: None,
        }
    }

    /// Point the repository at a different table.
    ///
    /// The name is validated because it is interpolated into the statement.
    pub fn with_table(mut self, table: impl Into<String>) -> Result<Self> {
        let table = table.into();
        validate_identifier(&table)?;
        self.table = table;
        Ok(self)
    }

    /// Cap the number of returned rows. `None` or zero means no cap.
    pub fn with_max_results(mut self, max_results: Option<i64>) -> Self {
        self.max_results = max_results.filter(|n| *n > 0);
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn max_results(&self) -> Option<i64> {
        self.max_results
    }

    /// Full statement for a compiled filter.
    ///
    /// The limit, when set, takes the placeholder after the filter's own.
    pub fn select_sql(&self, query: &CompiledQuery) -> String {
        let alias = defaults::CATALOGUE_ALIAS;
        let mut sql = format!(
            "SELECT row_to_json({alias}) AS tool FROM {table} {alias} WHERE {filter}",
            alias = alias,
            table = self.table,
            filter = query.filter,
        );
        if self.max_results.is_some() {
            sql.push_str(&format!(" LIMIT ${}", query.params.len() + 1));
        }
        sql
    }
}

#[async_trait]
impl CatalogueRepository for PgCatalogueRepository {
    #[instrument(
        skip(self, query),
        fields(subsystem = "db", component = "catalogue", op = "execute")
    )]
    async fn execute(&self, query: &CompiledQuery) -> Result<Vec<CatalogueRow>> {
        let start = Instant::now();
        let sql = self.select_sql(query);

        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| Error::StoreUnavailable(format!("Failed to acquire connection: {}", e)))?;

        let mut q = sqlx::query(&sql);
        for param in &query.params {
            q = q.bind(param);
        }
        if let Some(limit) = self.max_results {
            q = q.bind(limit);
        }

        let rows = q.fetch_all(&mut *conn).await.map_err(|e| {
            let err = Error::from(e);
            warn!(
                error_kind = err.kind(),
                error = %err,
                table = %self.table,
                "Catalogue query failed"
            );
            err
        })?;

        let tools = rows
            .into_iter()
            .map(|row| {
                let value: serde_json::Value = row.try_get("tool")?;
                CatalogueRow::try_from(value)
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            table = %self.table,
            param_count = query.params.len(),
            result_count = tools.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Catalogue query complete"
        );

        Ok(tools)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
