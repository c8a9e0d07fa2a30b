//! Core pagehaus functionality
//!
//! This module contains the main Pagehaus struct, which ties configuration,
//! the dialect pagination strategy and the PostgreSQL connection pool together.

use sqlx::PgPool;
use std::time::Duration;

use crate::errors::PagehausError;
use crate::paginator::{Page, Paginator};
use crate::postgres::PgStatementExecutor;
use clause_builder::{Ordering, Predicate};
use config::{AppConfig, ConfigError, DatabaseConfig, PaginationConfig};
use dialect_engine::{EngineOptions, PaginationRequest, PaginationResult, PaginationStrategy};
use type_mapping::Dialect;

/// Main pagehaus coordinator
pub struct Pagehaus {
    pool: Option<PgPool>,
    strategy: PaginationStrategy,
    strict_builders: bool,
}

impl Pagehaus {
    /// Connect to PostgreSQL using `config.database`
    pub async fn connect(config: &AppConfig) -> Result<Self, PagehausError> {
        config.validate()?;
        let strategy = build_strategy(&config.pagination)?;

        if strategy.dialect() != Dialect::Postgres {
            return Err(ConfigError::Invalid(format!(
                "The bundled executor targets PostgreSQL, configured dialect is {}",
                strategy.dialect()
            ))
            .into());
        }
        let database = config.database.as_ref().ok_or_else(|| {
            ConfigError::Invalid("A [database] section is required to connect".to_string())
        })?;

        let pool = connect_pool(database).await?;
        debug_log!(host = %database.host, database = %database.database, "connected");

        Ok(Self {
            pool: Some(pool),
            strategy,
            strict_builders: config.pagination.strict_builders,
        })
    }

    /// Statement planning only; [`Pagehaus::fetch_page`] is unavailable
    pub fn offline(config: &PaginationConfig) -> Result<Self, PagehausError> {
        config.validate()?;
        Ok(Self {
            pool: None,
            strategy: build_strategy(config)?,
            strict_builders: config.strict_builders,
        })
    }

    pub fn dialect(&self) -> Dialect {
        self.strategy.dialect()
    }

    pub fn strategy(&self) -> &PaginationStrategy {
        &self.strategy
    }

    /// Get database pool reference, if connected
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    /// A predicate builder honoring the configured strictness
    pub fn predicate(&self) -> Predicate {
        if self.strict_builders {
            Predicate::strict()
        } else {
            Predicate::new()
        }
    }

    /// An order builder using the configured dialect's random function
    pub fn ordering(&self) -> Ordering {
        Ordering::new().with_dialect(self.dialect())
    }

    pub fn plan(&self, request: &PaginationRequest) -> Result<PaginationResult, PagehausError> {
        Ok(self.strategy.paginate(request)?)
    }

    pub fn paginator<T>(&self) -> Result<Paginator<PgStatementExecutor<T>>, PagehausError>
    where
        T: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
    {
        let pool = self.require_pool()?;
        Ok(Paginator::new(
            PgStatementExecutor::new(pool.clone()),
            self.strategy.clone(),
        ))
    }

    /// Count, then fetch one page decoded into `T`
    pub async fn fetch_page<T>(&self, request: &PaginationRequest) -> Result<Page<T>, PagehausError>
    where
        T: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
    {
        self.paginator::<T>()?.fetch_page(request).await
    }

    /// Check database connection health
    pub async fn health_check(&self) -> Result<(), PagehausError> {
        let pool = self.require_pool()?;
        sqlx::query("SELECT 1").fetch_one(pool).await?;
        Ok(())
    }

    fn require_pool(&self) -> Result<&PgPool, PagehausError> {
        self.pool.as_ref().ok_or_else(|| {
            PagehausError::MissingExecutor("coordinator was created offline".to_string())
        })
    }
}

fn build_strategy(config: &PaginationConfig) -> Result<PaginationStrategy, ConfigError> {
    let options = EngineOptions {
        default_page_size: config.default_page_size,
        max_page_size: config.max_page_size,
        count_alias: config.count_alias.clone(),
    };
    Ok(PaginationStrategy::new(config.dialect()?).with_options(options))
}

async fn connect_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let connection_string = config.connection_string();

    let mut pool_options = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds));

    // Set max lifetime if specified
    if config.max_lifetime_seconds > 0 {
        pool_options = pool_options.max_lifetime(Duration::from_secs(config.max_lifetime_seconds));
    }

    pool_options.connect(&connection_string).await
}
