//! SQL dialect definitions
//!
//! This module enumerates the supported database families and the
//! conventions each one uses for placeholders, random ordering and aliases.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Database families the pagination engine can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    MySql,
    MariaDb,
    TiDb,
    OceanBase,
    ClickHouse,
    Sqlite,
    Postgres,
    SqlServer,
    /// Oracle 12c and later (OFFSET ... FETCH NEXT)
    Oracle,
    /// Oracle before 12c (ROWNUM wrapping)
    OracleLegacy,
}

/// How positional parameters are spelled in a statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    Question, // ?
    Dollar,   // $1, $2, ...
    AtP,      // @p1, @p2, ...
    Colon,    // :1, :2, ...
}

/// Clause family used to cut a page out of a result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitSyntax {
    LimitOffset, // LIMIT n OFFSET m
    OffsetFetch, // OFFSET m ROWS FETCH NEXT n ROWS ONLY
    RowNum,      // nested ROWNUM filter
}

impl PlaceholderStyle {
    /// Render the placeholder for a 1-based parameter index
    pub fn render(&self, index: usize) -> String {
        match self {
            PlaceholderStyle::Question => "?".to_string(),
            PlaceholderStyle::Dollar => format!("${}", index),
            PlaceholderStyle::AtP => format!("@p{}", index),
            PlaceholderStyle::Colon => format!(":{}", index),
        }
    }
}

impl Dialect {
    pub const ALL: [Dialect; 10] = [
        Dialect::MySql,
        Dialect::MariaDb,
        Dialect::TiDb,
        Dialect::OceanBase,
        Dialect::ClickHouse,
        Dialect::Sqlite,
        Dialect::Postgres,
        Dialect::SqlServer,
        Dialect::Oracle,
        Dialect::OracleLegacy,
    ];

    pub fn placeholder_style(&self) -> PlaceholderStyle {
        match self {
            Dialect::Postgres => PlaceholderStyle::Dollar,
            Dialect::SqlServer => PlaceholderStyle::AtP,
            Dialect::Oracle | Dialect::OracleLegacy => PlaceholderStyle::Colon,
            Dialect::MySql
            | Dialect::MariaDb
            | Dialect::TiDb
            | Dialect::OceanBase
            | Dialect::ClickHouse
            | Dialect::Sqlite => PlaceholderStyle::Question,
        }
    }

    pub fn limit_syntax(&self) -> LimitSyntax {
        match self {
            Dialect::SqlServer | Dialect::Oracle => LimitSyntax::OffsetFetch,
            Dialect::OracleLegacy => LimitSyntax::RowNum,
            _ => LimitSyntax::LimitOffset,
        }
    }

    /// Function used by `ORDER BY` for random ordering
    pub fn random_function(&self) -> &'static str {
        match self {
            Dialect::MySql | Dialect::MariaDb | Dialect::TiDb | Dialect::OceanBase => "RAND()",
            Dialect::ClickHouse => "rand()",
            Dialect::Sqlite | Dialect::Postgres => "RANDOM()",
            Dialect::SqlServer => "NEWID()",
            Dialect::Oracle | Dialect::OracleLegacy => "DBMS_RANDOM.VALUE",
        }
    }

    /// Oracle rejects `AS` in front of a derived-table alias
    pub fn supports_table_alias_as(&self) -> bool {
        !matches!(self, Dialect::Oracle | Dialect::OracleLegacy)
    }

    /// Render `<alias>` or `AS <alias>` for a derived table
    pub fn derived_table_alias(&self, alias: &str) -> String {
        if self.supports_table_alias_as() {
            format!("AS {}", alias)
        } else {
            alias.to_string()
        }
    }

    /// Whether offset pagination is only legal after an ORDER BY
    pub fn requires_order_for_offset(&self) -> bool {
        matches!(self, Dialect::SqlServer)
    }

    /// Whether a paged statement may keep a trailing `FOR UPDATE`.
    /// Oracle refuses locking over row limiting and over ROWNUM views.
    pub fn supports_locking_with_limit(&self) -> bool {
        !matches!(self, Dialect::Oracle | Dialect::OracleLegacy)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dialect::MySql => "mysql",
            Dialect::MariaDb => "mariadb",
            Dialect::TiDb => "tidb",
            Dialect::OceanBase => "oceanbase",
            Dialect::ClickHouse => "clickhouse",
            Dialect::Sqlite => "sqlite",
            Dialect::Postgres => "postgres",
            Dialect::SqlServer => "sqlserver",
            Dialect::Oracle => "oracle",
            Dialect::OracleLegacy => "oracle-legacy",
        }
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Dialect::MySql
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown SQL dialect: {0}")]
pub struct ParseDialectError(pub String);

impl FromStr for Dialect {
    type Err = ParseDialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "mysql" => Ok(Dialect::MySql),
            "mariadb" => Ok(Dialect::MariaDb),
            "tidb" => Ok(Dialect::TiDb),
            "oceanbase" => Ok(Dialect::OceanBase),
            "clickhouse" => Ok(Dialect::ClickHouse),
            "sqlite" | "sqlite3" => Ok(Dialect::Sqlite),
            "postgres" | "postgresql" | "pg" => Ok(Dialect::Postgres),
            "sqlserver" | "mssql" | "sql-server" => Ok(Dialect::SqlServer),
            "oracle" => Ok(Dialect::Oracle),
            "oracle-legacy" | "oracle11" | "oracle11g" => Ok(Dialect::OracleLegacy),
            _ => Err(ParseDialectError(s.to_string())),
        }
    }
}
