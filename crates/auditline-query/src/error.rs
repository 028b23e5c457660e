//! Error types for paginated queries.

use auditline_types::TransportError;

/// Errors that can occur while paging through query results.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// `next_page` was called while already on the last page.
    #[error("no more pages")]
    NoMoreItems,

    /// A cursor was opened with a page size of zero.
    #[error("page size must be greater than zero")]
    InvalidPageSize,

    /// The transport failed to fetch a page.
    #[error(transparent)]
    Transport(#[from] TransportError),
}
