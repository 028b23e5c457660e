//! The page cursor capability.

use async_trait::async_trait;
use auditline_types::EventNode;

use crate::error::QueryError;

/// One loaded page of ordered query results plus pagination metadata.
///
/// Page numbers are zero-based. `total_pages` and `total_count` are fixed
/// once the first page is known; only [`next_page`](Self::next_page)
/// changes the loaded page.
#[async_trait]
pub trait PageCursor: Send {
    /// Loads the page after the current one.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NoMoreItems`] when already on the last page, or
    /// [`QueryError::Transport`] when the fetch fails. On error the cursor
    /// stays on the page it was on.
    async fn next_page(&mut self) -> Result<(), QueryError>;

    fn total_pages(&self) -> usize;

    fn total_count(&self) -> usize;

    fn current_page_number(&self) -> usize;

    /// Results of the loaded page, in service order.
    fn current_results(&self) -> &[EventNode];

    fn has_next_page(&self) -> bool {
        self.current_page_number() + 1 < self.total_pages()
    }

    fn has_previous_page(&self) -> bool {
        self.current_page_number() > 0
    }
}

#[async_trait]
impl<C: PageCursor + ?Sized> PageCursor for Box<C> {
    async fn next_page(&mut self) -> Result<(), QueryError> {
        (**self).next_page().await
    }

    fn total_pages(&self) -> usize {
        (**self).total_pages()
    }

    fn total_count(&self) -> usize {
        (**self).total_count()
    }

    fn current_page_number(&self) -> usize {
        (**self).current_page_number()
    }

    fn current_results(&self) -> &[EventNode] {
        (**self).current_results()
    }

    fn has_next_page(&self) -> bool {
        (**self).has_next_page()
    }

    fn has_previous_page(&self) -> bool {
        (**self).has_previous_page()
    }
}
