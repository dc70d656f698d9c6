//! # toolfinder-db
//!
//! PostgreSQL layer for toolfinder.
//!
//! This crate provides:
//! - Connection pool management
//! - The classification-to-filter compiler
//! - The catalogue executor (`PgCatalogueRepository`)
//! - Identifier validation for the configurable catalogue table
//!
//! ## Example
//!
//! ```rust,ignore
//! use toolfinder_db::{CatalogueRepository, Classification, Database, FieldJoin, FilterCompiler};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/toolfinder").await?;
//!
//!     let classification = Classification::new().with("best", ["reviews", "description"]);
//!     let compiled = FilterCompiler::new(FieldJoin::Any).compile(&classification);
//!     let tools = db.catalogue.execute(&compiled).await?;
//!
//!     println!("{} matching tools", tools.len());
//!     Ok(())
//! }
//! ```
pub mod catalogue;
pub mod filter_compiler;
pub mod pool;
pub mod validation;

// Test fixtures for integration tests
// Note: Always compiled so integration tests (in tests/) can use DEFAULT_TEST_DATABASE_URL
pub mod test_fixtures;

// Re-export core types
pub use toolfinder_core::*;

/// Escape LIKE/ILIKE wildcard characters (`%`, `_`, `\`) in user input.
pub fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

pub use catalogue::PgCatalogueRepository;
pub use filter_compiler::{like_pattern, FilterCompiler};
pub use pool::{create_pool, create_pool_with_config, log_pool_metrics, PoolConfig};
pub use validation::validate_identifier;

/// Database context: the shared pool plus the catalogue repository.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Catalogue executor.
    pub catalogue: PgCatalogueRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            catalogue: PgCatalogueRepository::new(pool.clone()),
            pool,
        }
    }

    /// Replace the catalogue repository, e.g. to change table or row cap.
    pub fn with_catalogue(mut self, catalogue: PgCatalogueRepository) -> Self {
        self.catalogue = catalogue;
        self
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Connect to test database (for integration tests).
    #[cfg(test)]
    pub async fn connect_test() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| crate::test_fixtures::DEFAULT_TEST_DATABASE_URL.to_string());
        Self::connect(&database_url).await
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::from(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }
}
