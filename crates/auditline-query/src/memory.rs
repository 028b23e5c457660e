//! A cursor over pages held in memory.

use async_trait::async_trait;
use auditline_types::EventNode;

use crate::cursor::PageCursor;
use crate::error::QueryError;

/// Serves pre-supplied pages without any I/O.
///
/// Used as a test double for [`RemoteCursor`](crate::RemoteCursor) and for
/// replaying results that were already fetched.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCursor {
    pages: Vec<Vec<EventNode>>,
    current: usize,
}

impl InMemoryCursor {
    pub fn new(pages: Vec<Vec<EventNode>>) -> Self {
        Self { pages, current: 0 }
    }

    /// A cursor with no pages and no results.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Splits `nodes` into pages of at most `page_size` results.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidPageSize`] if `page_size` is zero.
    pub fn from_nodes(nodes: Vec<EventNode>, page_size: usize) -> Result<Self, QueryError> {
        if page_size == 0 {
            return Err(QueryError::InvalidPageSize);
        }
        let pages = nodes
            .chunks(page_size)
            .map(<[EventNode]>::to_vec)
            .collect();
        Ok(Self::new(pages))
    }
}

#[async_trait]
impl PageCursor for InMemoryCursor {
    async fn next_page(&mut self) -> Result<(), QueryError> {
        if !self.has_next_page() {
            return Err(QueryError::NoMoreItems);
        }
        self.current += 1;
        Ok(())
    }

    fn total_pages(&self) -> usize {
        self.pages.len()
    }

    fn total_count(&self) -> usize {
        self.pages.iter().map(Vec::len).sum()
    }

    fn current_page_number(&self) -> usize {
        self.current
    }

    fn current_results(&self) -> &[EventNode] {
        self.pages
            .get(self.current)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
