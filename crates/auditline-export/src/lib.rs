//! Streaming export of audit-log query results.
//!
//! [`export`] drains a [`StreamReader`](auditline_query::StreamReader) into
//! a [`RowSink`] under an
//! [`EventNodeMask`](auditline_types::EventNodeMask) projection. Reading and
//! writing overlap, memory stays bounded to a single in-flight result, and a
//! [`CancellationToken`](tokio_util::sync::CancellationToken) stops the
//! export cleanly at any point.
//!
//! # Usage
//!
//! ```rust,ignore
//! use auditline_export::{export, CsvSink};
//!
//! let file = tokio::fs::File::create("events.csv").await?;
//! let mut sink = CsvSink::new(file);
//! let summary = export(&reader, &mask, &mut sink, &cancel).await?;
//! tracing::info!(rows = summary.rows_written, "done");
//! ```

mod error;
mod pipeline;
mod sink;

pub use error::ExportError;
pub use pipeline::{export, ExportSummary};
pub use sink::{encode_record, CsvSink, RowSink};
