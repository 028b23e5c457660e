//! Error types for the export pipeline.

use auditline_query::QueryError;

/// Errors that abort an export.
///
/// Cancellation is not an error; it is reported through
/// [`ExportSummary::cancelled`](crate::ExportSummary::cancelled).
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Reading the next result failed.
    #[error("failed to read query results: {0}")]
    Query(#[from] QueryError),

    /// Writing a row to the sink, or the final flush, failed.
    #[error("failed to write export output: {0}")]
    Sink(#[from] std::io::Error),
}
