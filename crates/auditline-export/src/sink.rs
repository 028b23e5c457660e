//! Row-oriented output destinations.

use async_trait::async_trait;
use std::io;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};

/// A destination that accepts formatted rows one at a time.
///
/// The export pipeline calls [`flush`](Self::flush) exactly once, after the
/// last row, on every exit path.
#[async_trait]
pub trait RowSink: Send {
    async fn write_row(&mut self, row: &[String]) -> io::Result<()>;

    async fn flush(&mut self) -> io::Result<()>;
}

#[async_trait]
impl<S: RowSink + ?Sized> RowSink for Box<S> {
    async fn write_row(&mut self, row: &[String]) -> io::Result<()> {
        (**self).write_row(row).await
    }

    async fn flush(&mut self) -> io::Result<()> {
        (**self).flush().await
    }
}

/// Writes rows as RFC 4180 CSV records terminated by `\n`.
pub struct CsvSink<W> {
    writer: BufWriter<W>,
    line: String,
}

impl<W: AsyncWrite + Unpin + Send> CsvSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
            line: String::new(),
        }
    }

    /// Returns the underlying writer. Buffered bytes that were never flushed
    /// are discarded.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> RowSink for CsvSink<W> {
    async fn write_row(&mut self, row: &[String]) -> io::Result<()> {
        self.line.clear();
        encode_record(row, &mut self.line);
        self.writer.write_all(self.line.as_bytes()).await
    }

    async fn flush(&mut self) -> io::Result<()> {
        self.writer.flush().await
    }
}

impl<W> std::fmt::Debug for CsvSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvSink").finish_non_exhaustive()
    }
}

fn needs_quotes(field: &str) -> bool {
    field.starts_with(' ') || field.contains([',', '"', '\r', '\n'])
}

/// Appends one CSV record, including the trailing newline, to `out`.
pub fn encode_record(fields: &[String], out: &mut String) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if needs_quotes(field) {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out.push('\n');
}
