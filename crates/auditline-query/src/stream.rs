//! One-record-at-a-time reading over a page cursor.

use auditline_types::EventNode;
use tokio::sync::Mutex;

use crate::cursor::PageCursor;
use crate::error::QueryError;

struct ReaderState<C> {
    cursor: C,
    /// Index of the next unread result on the current page.
    position: usize,
}

/// Flattens a [`PageCursor`] into a lazy sequence of [`EventNode`]s.
///
/// Every result is delivered exactly once and in service order, across page
/// boundaries. `read` may be called concurrently through a shared
/// reference: the read-and-advance step runs under an async mutex that is
/// held across page fetches, so no two callers see the same result and at
/// most one fetch is in flight.
pub struct StreamReader<C> {
    state: Mutex<ReaderState<C>>,
}

impl<C: PageCursor> StreamReader<C> {
    /// Wraps a cursor whose first page is already loaded.
    pub fn new(cursor: C) -> Self {
        Self {
            state: Mutex::new(ReaderState {
                cursor,
                position: 0,
            }),
        }
    }

    /// Returns the next unread result, or `Ok(None)` once every page is
    /// exhausted.
    ///
    /// `Ok(None)` is terminal: later calls keep returning it. Empty pages in
    /// the middle of a result set are skipped.
    ///
    /// # Errors
    ///
    /// Propagates the cursor's error when a page fetch fails. The reader's
    /// position is unchanged, so a later call retries the same fetch.
    pub async fn read(&self) -> Result<Option<EventNode>, QueryError> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;

        while state.position >= state.cursor.current_results().len() {
            if !state.cursor.has_next_page() {
                return Ok(None);
            }
            state.cursor.next_page().await?;
            state.position = 0;
        }

        let node = state.cursor.current_results().get(state.position).cloned();
        state.position += 1;
        Ok(node)
    }

    /// Total number of results reported by the cursor.
    pub async fn total_count(&self) -> usize {
        self.state.lock().await.cursor.total_count()
    }

    /// Consumes the reader and returns the wrapped cursor.
    pub fn into_inner(self) -> C {
        self.state.into_inner().cursor
    }
}

impl<C> std::fmt::Debug for StreamReader<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamReader").finish_non_exhaustive()
    }
}
