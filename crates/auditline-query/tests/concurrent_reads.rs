//! Concurrency tests for `StreamReader`.
//!
//! These tests verify that a reader shared between tasks:
//! - hands every result to exactly one caller, in order per caller
//! - never runs two page fetches at the same time
//! - surfaces transport failures without losing its position

use async_trait::async_trait;
use auditline_query::{Page, PageRequest, QueryError, RemoteCursor, StreamReader, Transport};
use auditline_types::{EventNode, EventNodeMask, StructuredQuery, TransportError};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Serves numbered results and tracks how many fetches overlap.
#[derive(Default)]
struct SlowTransport {
    total: usize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    fetches: AtomicUsize,
    fail_next: AtomicBool,
}

impl SlowTransport {
    fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }
}

#[async_trait]
impl Transport for SlowTransport {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Page, TransportError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.fetches.fetch_add(1, Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(5)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(TransportError::new("upstream timed out"));
        }

        let end = (request.offset + request.page_size).min(self.total);
        Ok(Page {
            nodes: (request.offset..end)
                .map(|i| EventNode {
                    id: i.to_string(),
                    ..EventNode::default()
                })
                .collect(),
            total_count: self.total,
        })
    }
}

async fn open_reader(
    transport: Arc<SlowTransport>,
    page_size: usize,
) -> StreamReader<RemoteCursor<Arc<SlowTransport>>> {
    let cursor = RemoteCursor::open(
        transport,
        StructuredQuery::default(),
        EventNodeMask::all(),
        page_size,
    )
    .await
    .expect("first page should load");
    StreamReader::new(cursor)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_readers_receive_each_result_once() {
    let transport = Arc::new(SlowTransport::new(203));
    let reader = Arc::new(open_reader(transport.clone(), 10).await);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let reader = reader.clone();
        handles.push(tokio::spawn(async move {
            let mut seen = Vec::new();
            while let Some(node) = reader.read().await.expect("read should succeed") {
                seen.push(node.id.parse::<usize>().expect("ids are numeric"));
            }
            seen
        }));
    }

    let mut all = Vec::new();
    for handle in handles {
        let seen = handle.await.expect("task should not panic");
        assert!(
            seen.windows(2).all(|w| w[0] < w[1]),
            "each caller observes increasing ids"
        );
        all.extend(seen);
    }

    assert_eq!(all.len(), 203, "no result duplicated or dropped");
    let unique: HashSet<usize> = all.iter().copied().collect();
    assert_eq!(unique.len(), 203);
    assert_eq!(unique, (0..203).collect());

    assert_eq!(transport.fetches.load(Ordering::SeqCst), 21, "one fetch per page");
    assert_eq!(
        transport.max_in_flight.load(Ordering::SeqCst),
        1,
        "page fetches must never overlap"
    );
}

#[tokio::test]
async fn transport_failure_is_propagated_and_retried_on_next_read() {
    let transport = Arc::new(SlowTransport::new(4));
    let reader = open_reader(transport.clone(), 2).await;

    assert_eq!(reader.read().await.unwrap().map(|n| n.id), Some("0".into()));
    assert_eq!(reader.read().await.unwrap().map(|n| n.id), Some("1".into()));

    transport.fail_next.store(true, Ordering::SeqCst);
    let err = reader.read().await.unwrap_err();
    assert!(matches!(err, QueryError::Transport(_)));

    assert_eq!(reader.read().await.unwrap().map(|n| n.id), Some("2".into()));
    assert_eq!(reader.read().await.unwrap().map(|n| n.id), Some("3".into()));
    assert!(reader.read().await.unwrap().is_none());
}
