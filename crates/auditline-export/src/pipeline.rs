//! Concurrent, cancellable export of a result stream into a sink.

use auditline_query::{PageCursor, QueryError, StreamReader};
use auditline_types::{EventNode, EventNodeMask};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::ExportError;
use crate::sink::RowSink;

/// Outcome of an export that did not fail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Data rows written, not counting the header.
    pub rows_written: u64,
    /// `true` when the export stopped because `cancel` fired.
    pub cancelled: bool,
}

/// Drains `reader` into `sink`, one row per result, formatted through `mask`.
///
/// The header row is written first. A producer reads results and a consumer
/// writes rows; they run concurrently inside this call and are joined by a
/// single-slot item queue, so the producer is at most one result ahead of
/// the sink. A read failure travels through a single-slot error queue and
/// ends the export after the rows that preceded it have been written.
///
/// Cancelling `cancel` stops both sides at their next suspension point
/// (page fetch, enqueue or dequeue). The sink is flushed exactly once before
/// this function returns, whatever the outcome.
///
/// # Errors
///
/// Returns [`ExportError::Query`] when reading results fails and
/// [`ExportError::Sink`] when writing or flushing fails. Rows written before
/// the failure remain in the sink.
pub async fn export<C, S>(
    reader: &StreamReader<C>,
    mask: &EventNodeMask,
    sink: &mut S,
    cancel: &CancellationToken,
) -> Result<ExportSummary, ExportError>
where
    C: PageCursor,
    S: RowSink + ?Sized,
{
    let outcome = run(reader, mask, sink, cancel).await;
    let flushed = sink.flush().await;

    match (outcome, flushed) {
        (Ok(summary), Ok(())) => {
            tracing::info!(
                rows = summary.rows_written,
                cancelled = summary.cancelled,
                "export finished"
            );
            Ok(summary)
        }
        (Ok(_), Err(e)) => Err(ExportError::Sink(e)),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(flush_err)) => {
            tracing::warn!(error = %flush_err, "flush after failed export also failed");
            Err(e)
        }
    }
}

async fn run<C, S>(
    reader: &StreamReader<C>,
    mask: &EventNodeMask,
    sink: &mut S,
    cancel: &CancellationToken,
) -> Result<ExportSummary, ExportError>
where
    C: PageCursor,
    S: RowSink + ?Sized,
{
    sink.write_row(&mask.headers()).await?;

    let scope = cancel.child_token();
    let (item_tx, item_rx) = mpsc::channel::<EventNode>(1);
    let (err_tx, err_rx) = mpsc::channel::<QueryError>(1);

    let ((), result) = tokio::join!(
        produce(reader, item_tx, err_tx, &scope),
        consume(mask, sink, item_rx, err_rx, &scope),
    );
    result
}

async fn produce<C: PageCursor>(
    reader: &StreamReader<C>,
    items: mpsc::Sender<EventNode>,
    errors: mpsc::Sender<QueryError>,
    scope: &CancellationToken,
) {
    loop {
        let next = tokio::select! {
            biased;
            () = scope.cancelled() => return,
            next = reader.read() => next,
        };

        match next {
            Ok(Some(node)) => {
                tokio::select! {
                    biased;
                    () = scope.cancelled() => return,
                    sent = items.send(node) => {
                        if sent.is_err() {
                            return;
                        }
                    }
                }
            }
            Ok(None) => return,
            Err(err) => {
                tracing::debug!(error = %err, "export producer stopping on read failure");
                // The error is queued before `items` drops, so the consumer
                // always finds it once the item queue closes.
                let _ = errors.try_send(err);
                return;
            }
        }
    }
}

async fn consume<S: RowSink + ?Sized>(
    mask: &EventNodeMask,
    sink: &mut S,
    mut items: mpsc::Receiver<EventNode>,
    mut errors: mpsc::Receiver<QueryError>,
    scope: &CancellationToken,
) -> Result<ExportSummary, ExportError> {
    // Stops the producer if the consumer returns early for any reason.
    let _stop_producer = scope.clone().drop_guard();
    let mut rows_written = 0u64;

    loop {
        let next = tokio::select! {
            biased;
            () = scope.cancelled() => {
                return Ok(ExportSummary { rows_written, cancelled: true });
            }
            next = items.recv() => next,
        };

        let Some(node) = next else {
            return match errors.try_recv() {
                Ok(err) => Err(err.into()),
                Err(_) => Ok(ExportSummary {
                    rows_written,
                    cancelled: false,
                }),
            };
        };

        sink.write_row(&mask.row(&node)).await?;
        rows_written += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use auditline_query::InMemoryCursor;
    use auditline_types::Column;
    use std::io;

    #[derive(Default)]
    struct RecordingSink {
        rows: Vec<Vec<String>>,
        flushes: usize,
        fail_flush: bool,
    }

    #[async_trait]
    impl RowSink for RecordingSink {
        async fn write_row(&mut self, row: &[String]) -> io::Result<()> {
            self.rows.push(row.to_vec());
            Ok(())
        }

        async fn flush(&mut self) -> io::Result<()> {
            self.flushes += 1;
            if self.fail_flush {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
            }
            Ok(())
        }
    }

    fn node(id: &str, action: &str) -> EventNode {
        EventNode {
            id: id.to_string(),
            action: action.to_string(),
            ..EventNode::default()
        }
    }

    #[tokio::test]
    async fn writes_header_then_rows_in_order() {
        let reader = StreamReader::new(InMemoryCursor::new(vec![
            vec![node("1", "user.login"), node("2", "user.logout")],
            vec![node("3", "doc.delete")],
        ]));
        let mask = EventNodeMask::with_columns(&[Column::Id, Column::Action]);
        let mut sink = RecordingSink::default();

        let summary = export(&reader, &mask, &mut sink, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(
            summary,
            ExportSummary {
                rows_written: 3,
                cancelled: false
            }
        );
        assert_eq!(
            sink.rows,
            vec![
                vec!["id".to_string(), "action".to_string()],
                vec!["1".to_string(), "user.login".to_string()],
                vec!["2".to_string(), "user.logout".to_string()],
                vec!["3".to_string(), "doc.delete".to_string()],
            ]
        );
        assert_eq!(sink.flushes, 1);
    }

    #[tokio::test]
    async fn empty_result_set_writes_only_the_header() {
        let reader = StreamReader::new(InMemoryCursor::empty());
        let mask = EventNodeMask::with_columns(&[Column::Id]);
        let mut sink = RecordingSink::default();

        let summary = export(&reader, &mask, &mut sink, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(summary.rows_written, 0);
        assert!(!summary.cancelled);
        assert_eq!(sink.rows, vec![vec!["id".to_string()]]);
        assert_eq!(sink.flushes, 1);
    }

    #[tokio::test]
    async fn already_cancelled_export_still_flushes_once() {
        let reader = StreamReader::new(InMemoryCursor::new(vec![vec![node("1", "a")]]));
        let mask = EventNodeMask::with_columns(&[Column::Id]);
        let mut sink = RecordingSink::default();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let summary = export(&reader, &mask, &mut sink, &cancel).await.unwrap();

        assert!(summary.cancelled);
        assert_eq!(summary.rows_written, 0);
        assert_eq!(sink.rows.len(), 1, "header only");
        assert_eq!(sink.flushes, 1);
    }

    #[tokio::test]
    async fn failed_flush_is_reported() {
        let reader = StreamReader::new(InMemoryCursor::empty());
        let mut sink = RecordingSink {
            fail_flush: true,
            ..RecordingSink::default()
        };

        let err = export(
            &reader,
            &EventNodeMask::all(),
            &mut sink,
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ExportError::Sink(_)));
        assert_eq!(sink.flushes, 1);
    }
}
