//! # Configuration Management for Pagehaus
//!
//! This crate provides the configuration structures used by the pagehaus
//! coordinator: an optional PostgreSQL connection and the pagination engine
//! settings.
//!
//! ## Quick Start
//!
//! ### Programmatic Configuration
//! ```rust
//! use config::{DatabaseConfig, PaginationConfig};
//!
//! let db_config = DatabaseConfig::new(
//!     "localhost".to_string(), 5432, "myapp".to_string(),
//!     "postgres".to_string(), "password".to_string(),
//!     1, 10, 30, 600, 3600,
//! );
//!
//! let pagination = PaginationConfig::new("postgres");
//! assert_eq!(pagination.default_page_size, 10);
//! ```
//!
//! ### TOML File Configuration
//! ```toml
//! [database]
//! host = "localhost"
//! port = 5432
//! database = "myapp"
//! username = "postgres"
//! password = "password"
//! min_connections = 1
//! max_connections = 10
//! connection_timeout_seconds = 30
//! idle_timeout_seconds = 600
//! max_lifetime_seconds = 3600
//!
//! [pagination]
//! dialect = "postgres"
//! default_page_size = 20
//! max_page_size = 500
//! count_alias = "pagehaus_count"
//! strict_builders = false
//! ```
//!
//! Load configuration:
//! ```rust,no_run
//! use config::AppConfig;
//!
//! // Load from PAGEHAUS_CONFIG or ./pagehaus.toml
//! let config = AppConfig::load()?;
//!
//! // Or load from custom path
//! let config = AppConfig::from_file("config/production.toml")?;
//! # Ok::<(), config::ConfigError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::{env, path::Path};
use thiserror::Error;
use type_mapping::Dialect;

const DEFAULT_CONFIG_PATH: &str = "./pagehaus.toml";
const CONFIG_PATH_VAR: &str = "PAGEHAUS_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Dotenvy error: {0}")]
    Dotenvy(#[from] dotenvy::Error),
    #[error("Dialect error: {0}")]
    Dialect(#[from] type_mapping::ParseDialectError),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Absent for offline use (statement planning only)
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub pagination: PaginationConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    pub min_connections: u32,
    pub max_connections: u32,
    pub connection_timeout_seconds: u64,
    pub idle_timeout_seconds: u64,
    pub max_lifetime_seconds: u64,
}

/// Pagination engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Dialect name, e.g. `mysql`, `postgres`, `sqlserver`, `oracle-legacy`
    #[serde(default = "default_dialect")]
    pub dialect: String,
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    /// 0 disables the cap
    #[serde(default)]
    pub max_page_size: u64,
    #[serde(default = "default_count_alias")]
    pub count_alias: String,
    /// Builders handed out by the coordinator report ignored input
    #[serde(default)]
    pub strict_builders: bool,
}

fn default_dialect() -> String {
    Dialect::default().name().to_string()
}

fn default_page_size() -> u64 {
    10
}

fn default_count_alias() -> String {
    "pagehaus_count".to_string()
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            dialect: default_dialect(),
            default_page_size: default_page_size(),
            max_page_size: 0,
            count_alias: default_count_alias(),
            strict_builders: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML file specified in .env or defaults
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env file is fine, a malformed one is not
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                return Err(err.into());
            }
        }

        let config = if let Ok(config_path) = env::var(CONFIG_PATH_VAR) {
            Self::from_file(&config_path)
        } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::from_file(DEFAULT_CONFIG_PATH)
        } else {
            Err(ConfigError::Invalid(format!(
                "Config path must be specified in .env file as {} or in {} file",
                CONFIG_PATH_VAR, DEFAULT_CONFIG_PATH
            )))
        }?;

        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.pagination.validate()
    }
}

impl DatabaseConfig {
    /// Create a new database configuration
    pub fn new(
        host: String,
        port: u16,
        database: String,
        username: String,
        password: String,
        min_connections: u32,
        max_connections: u32,
        connection_timeout_seconds: u64,
        idle_timeout_seconds: u64,
        max_lifetime_seconds: u64,
    ) -> Self {
        Self {
            host,
            port,
            database,
            username,
            password,
            min_connections,
            max_connections,
            connection_timeout_seconds,
            idle_timeout_seconds,
            max_lifetime_seconds,
        }
    }

    /// Build connection string
    pub fn connection_string(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database
        )
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.host.is_empty() {
            return Err(ConfigError::Invalid(
                "Database host cannot be empty".to_string(),
            ));
        }
        if self.port == 0 {
            return Err(ConfigError::Invalid(
                "Database port cannot be zero".to_string(),
            ));
        }
        if self.database.is_empty() {
            return Err(ConfigError::Invalid(
                "Database name cannot be empty".to_string(),
            ));
        }
        if self.username.is_empty() {
            return Err(ConfigError::Invalid(
                "Database username cannot be empty".to_string(),
            ));
        }
        if self.min_connections == 0 {
            return Err(ConfigError::Invalid(
                "Database min_connections must be greater than 0".to_string(),
            ));
        }
        if self.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "Database max_connections must be greater than 0".to_string(),
            ));
        }
        if self.min_connections > self.max_connections {
            return Err(ConfigError::Invalid(
                "Database min_connections cannot be greater than max_connections".to_string(),
            ));
        }
        if self.connection_timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "Database connection_timeout_seconds must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl PaginationConfig {
    /// Create a pagination configuration with default sizes
    pub fn new(dialect: impl Into<String>) -> Self {
        Self {
            dialect: dialect.into(),
            ..Self::default()
        }
    }

    /// Parsed dialect
    pub fn dialect(&self) -> Result<Dialect, ConfigError> {
        Ok(self.dialect.parse()?)
    }

    /// Validate dialect, page sizes and alias
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.dialect()?;
        if self.default_page_size == 0 {
            return Err(ConfigError::Invalid(
                "Pagination default_page_size must be greater than 0".to_string(),
            ));
        }
        if self.max_page_size > 0 && self.default_page_size > self.max_page_size {
            return Err(ConfigError::Invalid(
                "Pagination default_page_size cannot be greater than max_page_size".to_string(),
            ));
        }
        if self.count_alias.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "Pagination count_alias cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
