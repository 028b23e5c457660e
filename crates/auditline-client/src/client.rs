//! The client facade tying submission, verification and querying together.

use async_trait::async_trait;
use auditline_export::{export, CsvSink, ExportSummary};
use auditline_integrity::{verify_hash, VerifyError};
use auditline_query::{InMemoryCursor, PageCursor, RemoteCursor, StreamReader, Transport};
use auditline_types::{Event, EventNodeMask, ServerRecord, StructuredQuery, TransportError};
use std::sync::Arc;
use tokio::io::AsyncWrite;
use tokio_util::sync::CancellationToken;

use crate::config::ClientConfig;
use crate::error::ClientError;

/// The network collaborator that submits events.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Submits `event` and returns the id and hash the service assigned.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the submission fails.
    async fn publish(&self, event: &Event) -> Result<ServerRecord, TransportError>;
}

#[async_trait]
impl<P: Publisher + ?Sized> Publisher for Arc<P> {
    async fn publish(&self, event: &Event) -> Result<ServerRecord, TransportError> {
        (**self).publish(event).await
    }
}

/// Reports events and queries the audit log of one project.
///
/// `T` is the network layer; it implements [`Publisher`] to submit events
/// and [`Transport`] to fetch query pages.
#[derive(Debug)]
pub struct Client<T> {
    config: ClientConfig,
    transport: Arc<T>,
}

impl<T> Client<T> {
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if `config` fails validation.
    pub fn new(config: ClientConfig, transport: T) -> Result<Self, ClientError> {
        config.validate()?;
        Ok(Self {
            config,
            transport: Arc::new(transport),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: Publisher> Client<T> {
    /// Submits `event` and checks that the service recorded it unaltered.
    ///
    /// The configured component and version are stamped onto the event when
    /// it leaves them empty.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Verify`] with [`VerifyError::MissingField`] if the
    ///   action is empty; nothing is sent.
    /// - [`ClientError::Transport`] if the submission fails.
    /// - [`ClientError::Verify`] with [`VerifyError::Integrity`] if the
    ///   returned hash does not match.
    pub async fn report_event(&self, event: &Event) -> Result<ServerRecord, ClientError> {
        if event.action.is_empty() {
            return Err(VerifyError::MissingField("action").into());
        }

        let mut event = event.clone();
        if event.component.is_empty() {
            event.component.clone_from(&self.config.component);
        }
        if event.version.is_empty() {
            event.version.clone_from(&self.config.version);
        }

        let record = self.transport.publish(&event).await?;
        verify_hash(&event, &record)?;

        tracing::debug!(record_id = %record.id, action = %event.action, "event recorded");
        Ok(record)
    }
}

impl<T: Transport + 'static> Client<T> {
    /// Opens a cursor over the results of `query`, fetching the first page.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Query`] if `page_size` is zero or the first
    /// fetch fails.
    pub async fn query(
        &self,
        query: StructuredQuery,
        mask: EventNodeMask,
        page_size: usize,
    ) -> Result<RemoteCursor<Arc<T>>, ClientError> {
        let cursor = RemoteCursor::open(self.transport.clone(), query, mask, page_size).await?;
        Ok(cursor)
    }

    /// Opens a one-result-at-a-time reader using the configured page size.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Query`] if the first fetch fails.
    pub async fn new_stream(
        &self,
        query: StructuredQuery,
        mask: EventNodeMask,
    ) -> Result<StreamReader<RemoteCursor<Arc<T>>>, ClientError> {
        let cursor = self.query(query, mask, self.config.page_size).await?;
        Ok(StreamReader::new(cursor))
    }

    /// Streams the results of `query` into `writer` as CSV.
    ///
    /// If `cancel` fires before the first page arrives, only the header is
    /// written and the summary reports the cancellation.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Query`] if the first fetch fails, before
    /// anything is written, and [`ClientError::Export`] if the export fails
    /// part-way.
    pub async fn export_csv<W>(
        &self,
        query: StructuredQuery,
        mask: EventNodeMask,
        writer: W,
        cancel: &CancellationToken,
    ) -> Result<ExportSummary, ClientError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let opened = tokio::select! {
            biased;
            () = cancel.cancelled() => None,
            cursor = RemoteCursor::open(
                self.transport.clone(),
                query,
                mask.clone(),
                self.config.page_size,
            ) => Some(cursor?),
        };

        let cursor: Box<dyn PageCursor> = match opened {
            Some(cursor) => Box::new(cursor),
            None => {
                tracing::debug!("export cancelled before the first page arrived");
                Box::new(InMemoryCursor::empty())
            }
        };

        let reader = StreamReader::new(cursor);
        let mut sink = CsvSink::new(writer);
        let summary = export(&reader, &mask, &mut sink, cancel).await?;
        Ok(summary)
    }
}
