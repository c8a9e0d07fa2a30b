//! Dialect pagination strategy
//!
//! One strategy per dialect family, selected by [`Dialect::limit_syntax`].
//! The strategy classifies the source once, normalizes it, derives the count
//! statement and appends the dialect's limiting clause to the page statement.

use crate::classifier::classify;
use crate::count::derive_count;
use crate::errors::PaginationError;
use crate::request::{PageWindow, PaginationRequest, PaginationResult};
use crate::scanner::{Scan, ROW_LIMITING_CLAUSES};
use crate::statement::normalize;
use type_mapping::{rewrite_placeholders, Dialect, LimitSyntax};

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const DEFAULT_COUNT_ALIAS: &str = "pagehaus_count";

const PAGE_ALIAS: &str = "pagehaus_page";
const NEUTRAL_ORDER: &str = "(SELECT NULL)";

/// Tuning knobs shared by every dialect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    /// Used when a request asks for `page_size <= 0`
    pub default_page_size: u64,
    /// Upper bound for `page_size`; 0 means unlimited
    pub max_page_size: u64,
    /// Derived table alias used by wrapped count statements
    pub count_alias: String,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: 0,
            count_alias: DEFAULT_COUNT_ALIAS.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationStrategy {
    dialect: Dialect,
    options: EngineOptions,
}

impl PaginationStrategy {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            options: EngineOptions::default(),
        }
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Produce the count and page statements for `request`.
    ///
    /// Both statements share the returned parameter list and use the
    /// dialect's placeholder style.
    pub fn paginate(
        &self,
        request: &PaginationRequest,
    ) -> Result<PaginationResult, PaginationError> {
        let profile = classify(&request.source);
        let (fragment, values) = request.filter.render()?;
        let statement = normalize(request, &profile, &fragment, values, self.dialect)?;

        let window = PageWindow::new(
            request.page,
            request.page_size,
            self.options.default_page_size,
            self.options.max_page_size,
        );

        let count_sql = derive_count(
            &statement.sql,
            &profile,
            self.dialect,
            &self.options.count_alias,
        );
        let page_sql = self.page_statement(&statement.sql, &request.order_fragments(), &window)?;

        tracing::debug!(
            dialect = %self.dialect,
            page = window.page,
            page_size = window.page_size,
            complex = profile.is_complex,
            parameters = statement.parameters.len(),
            "planned pagination statements"
        );

        let style = self.dialect.placeholder_style();
        Ok(PaginationResult {
            count_statement: rewrite_placeholders(&count_sql, style),
            page_statement: rewrite_placeholders(&page_sql, style),
            parameters: statement.parameters,
            window,
            dialect: self.dialect,
        })
    }

    fn page_statement(
        &self,
        sql: &str,
        order: &[String],
        window: &PageWindow,
    ) -> Result<String, PaginationError> {
        // A statement that already limits its rows is paged as a derived table
        let sql = if Scan::new(sql).find_first_top_level(ROW_LIMITING_CLAUSES, 0).is_some() {
            format!(
                "SELECT * FROM ({}) {}",
                sql,
                self.dialect.derived_table_alias(PAGE_ALIAS)
            )
        } else {
            sql.to_string()
        };

        let scan = Scan::new(&sql);
        let has_order = scan.find_top_level(" ORDER BY ", 0).is_some();
        let split = scan.find_top_level(" FOR UPDATE", 0).unwrap_or(sql.len());
        let (head, locking) = sql.split_at(split);

        if !locking.is_empty() && !self.dialect.supports_locking_with_limit() {
            return Err(PaginationError::UnsupportedLocking {
                dialect: self.dialect,
                statement: sql.to_string(),
            });
        }

        let mut page = head.trim_end().to_string();
        if !has_order {
            if !order.is_empty() {
                page.push_str(" ORDER BY ");
                page.push_str(&order.join(", "));
            } else if self.dialect.requires_order_for_offset() {
                page.push_str(" ORDER BY ");
                page.push_str(NEUTRAL_ORDER);
            }
        }

        let page = match self.dialect.limit_syntax() {
            LimitSyntax::LimitOffset => {
                page.push_str(&format!(" LIMIT {} OFFSET {}", window.page_size, window.offset));
                page.push_str(locking);
                page
            }
            LimitSyntax::OffsetFetch => {
                page.push_str(&format!(
                    " OFFSET {} ROWS FETCH NEXT {} ROWS ONLY",
                    window.offset, window.page_size
                ));
                page.push_str(locking);
                page
            }
            LimitSyntax::RowNum => format!(
                "SELECT * FROM (SELECT row_.*, ROWNUM rownum_ FROM ({}) row_ WHERE ROWNUM <= {}) \
                 WHERE rownum_ > {}",
                page,
                window.end(),
                window.offset
            ),
        };
        Ok(page)
    }
}

/// Paginate with default options
pub fn paginate(
    dialect: Dialect,
    request: &PaginationRequest,
) -> Result<PaginationResult, PaginationError> {
    PaginationStrategy::new(dialect).paginate(request)
}
