//! A cursor that fetches pages from the audit-log service on demand.

use async_trait::async_trait;
use auditline_types::{EventNode, EventNodeMask, StructuredQuery, TransportError};
use std::sync::Arc;

use crate::cursor::PageCursor;
use crate::error::QueryError;

/// Everything the transport needs to fetch one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub query: StructuredQuery,
    pub mask: EventNodeMask,
    /// Index of the first result on the requested page.
    pub offset: usize,
    pub page_size: usize,
}

/// One page of results as returned by the transport.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub nodes: Vec<EventNode>,
    /// Total number of results matching the query, across all pages.
    pub total_count: usize,
}

/// The network collaborator that executes page requests.
///
/// Query-language rendering, request encoding, authentication and retries
/// all belong to the implementation.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetches the page described by `request`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the page cannot be retrieved.
    async fn fetch_page(&self, request: &PageRequest) -> Result<Page, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Page, TransportError> {
        (**self).fetch_page(request).await
    }
}

/// A [`PageCursor`] backed by a [`Transport`], issuing exactly one fetch per
/// page.
#[derive(Debug)]
pub struct RemoteCursor<T> {
    transport: T,
    request: PageRequest,
    current_page: usize,
    total_pages: usize,
    total_count: usize,
    results: Vec<EventNode>,
}

impl<T: Transport> RemoteCursor<T> {
    /// Fetches the first page and fixes the pagination totals.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidPageSize`] if `page_size` is zero, or
    /// [`QueryError::Transport`] if the first fetch fails.
    pub async fn open(
        transport: T,
        query: StructuredQuery,
        mask: EventNodeMask,
        page_size: usize,
    ) -> Result<Self, QueryError> {
        if page_size == 0 {
            return Err(QueryError::InvalidPageSize);
        }

        let request = PageRequest {
            query,
            mask,
            offset: 0,
            page_size,
        };
        let page = transport.fetch_page(&request).await?;
        let total_pages = page.total_count.div_ceil(page_size);

        tracing::debug!(
            total_count = page.total_count,
            total_pages,
            page_size,
            "opened remote cursor"
        );

        Ok(Self {
            transport,
            request,
            current_page: 0,
            total_pages,
            total_count: page.total_count,
            results: page.nodes,
        })
    }

    pub fn page_size(&self) -> usize {
        self.request.page_size
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

#[async_trait]
impl<T: Transport> PageCursor for RemoteCursor<T> {
    async fn next_page(&mut self) -> Result<(), QueryError> {
        if !self.has_next_page() {
            return Err(QueryError::NoMoreItems);
        }

        let next = self.current_page + 1;
        self.request.offset = next * self.request.page_size;
        let page = self.transport.fetch_page(&self.request).await?;

        if page.total_count != self.total_count {
            tracing::debug!(
                page = next,
                reported = page.total_count,
                fixed = self.total_count,
                "total count changed while paging; keeping the original"
            );
        }
        tracing::debug!(page = next, results = page.nodes.len(), "fetched page");

        self.current_page = next;
        self.results = page.nodes;
        Ok(())
    }

    fn total_pages(&self) -> usize {
        self.total_pages
    }

    fn total_count(&self) -> usize {
        self.total_count
    }

    fn current_page_number(&self) -> usize {
        self.current_page
    }

    fn current_results(&self) -> &[EventNode] {
        &self.results
    }
}
