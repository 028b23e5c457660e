//! Paginated query results for the auditline client.
//!
//! The service answers queries one page at a time. A [`PageCursor`] holds
//! the currently loaded page plus the pagination totals, and
//! [`StreamReader`] flattens a cursor into a lazy, one-record-at-a-time
//! sequence that is safe to share between tasks.
//!
//! # Cursor variants
//!
//! | Type | Source of pages |
//! |------|-----------------|
//! | [`RemoteCursor`] | one [`Transport::fetch_page`] call per page |
//! | [`InMemoryCursor`] | pages supplied up front, for tests and replays |
//!
//! # Usage
//!
//! ```rust,ignore
//! use auditline_query::{RemoteCursor, StreamReader};
//!
//! let cursor = RemoteCursor::open(transport, query, mask, 1000).await?;
//! let reader = StreamReader::new(cursor);
//! while let Some(node) = reader.read().await? {
//!     println!("{} {}", node.id, node.action);
//! }
//! ```

mod cursor;
mod error;
mod memory;
mod remote;
mod stream;

pub use cursor::PageCursor;
pub use error::QueryError;
pub use memory::InMemoryCursor;
pub use remote::{Page, PageRequest, RemoteCursor, Transport};
pub use stream::StreamReader;
