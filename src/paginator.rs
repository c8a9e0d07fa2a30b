//! Paginated fetching over a statement executor

use crate::errors::PagehausError;
use crate::executor::StatementExecutor;
use dialect_engine::{PageWindow, PaginationRequest, PaginationResult, PaginationStrategy};
use serde::Serialize;

/// A page of results with pagination metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    /// 1-based page number
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, window: &PageWindow, total_elements: u64) -> Self {
        let total_pages = if window.page_size == 0 {
            0
        } else {
            total_elements.div_ceil(window.page_size)
        };
        Self {
            content,
            page: window.page,
            size: window.page_size,
            total_elements,
            total_pages,
        }
    }

    pub fn empty(window: &PageWindow) -> Self {
        Self::new(Vec::new(), window, 0)
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}

/// Runs planned statements through an executor.
///
/// The page statement is skipped entirely when the count is zero.
pub struct Paginator<E> {
    executor: E,
    strategy: PaginationStrategy,
}

impl<E> Paginator<E>
where
    E: StatementExecutor,
{
    pub fn new(executor: E, strategy: PaginationStrategy) -> Self {
        Self { executor, strategy }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn strategy(&self) -> &PaginationStrategy {
        &self.strategy
    }

    /// Build statements without running them
    pub fn plan(&self, request: &PaginationRequest) -> Result<PaginationResult, PagehausError> {
        Ok(self.strategy.paginate(request)?)
    }

    pub async fn fetch_page(
        &self,
        request: &PaginationRequest,
    ) -> Result<Page<E::Row>, PagehausError> {
        let plan = self.plan(request)?;

        let total = self
            .executor
            .count(&plan.count_statement, &plan.parameters)
            .await
            .map_err(PagehausError::Count)?;

        if total == 0 {
            debug_log!(dialect = %plan.dialect, "count returned zero, skipping page query");
            return Ok(Page::empty(&plan.window));
        }

        let rows = self
            .executor
            .query(&plan.page_statement, &plan.parameters)
            .await
            .map_err(PagehausError::Query)?;

        debug_log!(
            page = plan.window.page,
            rows = rows.len(),
            total,
            "fetched page"
        );

        Ok(Page::new(rows, &plan.window, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        let window = PageWindow::new(2, 10, 10, 0);
        let page = Page::new(vec![1, 2, 3], &window, 23);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next());
        assert!(page.has_previous());
    }

    #[test]
    fn test_empty_page() {
        let window = PageWindow::new(1, 10, 10, 0);
        let page: Page<u8> = Page::empty(&window);
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn test_map_keeps_metadata() {
        let window = PageWindow::new(3, 2, 10, 0);
        let page = Page::new(vec![1, 2], &window, 6).map(|n| n * 10);
        assert_eq!(page.content, vec![10, 20]);
        assert_eq!(page.page, 3);
        assert_eq!(page.total_pages, 3);
        assert!(!page.has_next());
    }
}
