//! Pagination request and result types

use clause_builder::{Filter, Ordering};
use serde::Serialize;
use serde_json::Value;
use type_mapping::Dialect;

/// Input to [`crate::PaginationStrategy::paginate`].
///
/// `source` is a table name, a bare predicate (with `table` set) or a full
/// `SELECT` statement. `parameters` are the values for `?` placeholders that
/// appear in `source` itself; filter values are merged in at the right position.
#[derive(Debug, Clone, Default)]
pub struct PaginationRequest {
    pub source: String,
    pub table: Option<String>,
    pub parameters: Vec<Value>,
    pub filter: Filter,
    pub order: Vec<String>,
    pub page: i64,
    pub page_size: i64,
}

impl PaginationRequest {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            page: 1,
            ..Self::default()
        }
    }

    /// Table used when `source` is a bare predicate
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn parameters(mut self, parameters: Vec<Value>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn filter(mut self, filter: impl Into<Filter>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Add an ordering fragment; a leading `ORDER BY` is accepted and removed
    pub fn order_by(mut self, fragment: impl Into<String>) -> Self {
        self.order.push(fragment.into());
        self
    }

    pub fn ordering(self, ordering: &Ordering) -> Self {
        if ordering.is_empty() {
            return self;
        }
        let fragment = ordering.fragment().to_string();
        self.order_by(fragment)
    }

    pub fn page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    pub fn page_size(mut self, page_size: i64) -> Self {
        self.page_size = page_size;
        self
    }

    /// Order fragments with any `ORDER BY` prefix removed, empties dropped
    pub(crate) fn order_fragments(&self) -> Vec<String> {
        self.order
            .iter()
            .map(|f| strip_order_by_prefix(f.trim()).trim().to_string())
            .filter(|f| !f.is_empty())
            .collect()
    }
}

fn strip_order_by_prefix(fragment: &str) -> &str {
    let prefix = "ORDER BY ";
    match fragment.get(..prefix.len()) {
        Some(head) if head.eq_ignore_ascii_case(prefix) => &fragment[prefix.len()..],
        _ => fragment,
    }
}

/// Normalized page position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub page: u64,
    pub page_size: u64,
    pub offset: u64,
}

impl PageWindow {
    /// `page <= 0` becomes 1, `page_size <= 0` becomes `default_size`, and a
    /// non-zero `max_size` caps the page size.
    pub fn new(page: i64, page_size: i64, default_size: u64, max_size: u64) -> Self {
        let page = if page <= 0 { 1 } else { page as u64 };
        let mut page_size = if page_size <= 0 {
            default_size.max(1)
        } else {
            page_size as u64
        };
        if max_size > 0 {
            page_size = page_size.min(max_size);
        }
        Self {
            page,
            page_size,
            offset: (page - 1).saturating_mul(page_size),
        }
    }

    /// Last row number (1-based) included in the page
    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.page_size)
    }
}

/// Count and page statements for one request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginationResult {
    pub count_statement: String,
    pub page_statement: String,
    pub parameters: Vec<Value>,
    pub window: PageWindow,
    pub dialect: Dialect,
}
