//! # sayingly-db
//!
//! Data access layer for the Sayingly catalog query layer.
//!
//! This crate provides:
//! - Connection pool management
//! - The [`DataService`] capability (PostgreSQL and in-memory backends)
//! - The [`CatalogRepository`] over the eight content collections
//!
//! ## Example
//!
//! ```rust,ignore
//! use sayingly_db::{Catalog, FetchOptions};
//! use sayingly_core::{build_facets, filter_items, sample, ContentType, FacetDef, FilterState, QueryProfile};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let catalog = Catalog::connect("postgres://localhost/sayingly").await?;
//!
//!     let idioms = catalog
//!         .content
//!         .fetch_all(ContentType::Idiom, &FetchOptions::default())
//!         .await?;
//!
//!     let facets = build_facets(&idioms, &[FacetDef::language()]);
//!     let state = FilterState::new().with_term("arm").select("language", "nl");
//!     let matching = filter_items(&idioms, &state, &QueryProfile::for_type(ContentType::Idiom));
//!     if let Some(pick) = sample(&matching) {
//!         println!("surprise: {}", pick.original);
//!     }
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod data_service;
pub mod memory;
pub mod pool;

// Test fixtures for integration tests
// Note: Always compiled so integration tests (in tests/) can use DEFAULT_TEST_DATABASE_URL
pub mod test_fixtures;

// Re-export core types
pub use sayingly_core::*;

use std::sync::Arc;

pub use catalog::{CatalogRepository, FetchOptions, LANGUAGE_TABLE};
pub use data_service::{
    validate_identifier, DataService, OrderDirection, OrderSpec, PgDataService, SelectQuery,
};
pub use memory::MemoryDataService;
pub use pool::{create_pool, create_pool_with_config, log_pool_metrics, PoolConfig};

/// Combined database context: pool plus the content repository.
pub struct Catalog {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Content repository over the eight collections.
    pub content: CatalogRepository,
}

impl Catalog {
    /// Create a new Catalog instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        let service = Arc::new(PgDataService::new(pool.clone()));
        Self {
            content: CatalogRepository::new(service),
            pool,
        }
    }

    /// Create a new Catalog instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }
}
