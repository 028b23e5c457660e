//! Error type for client operations.

use auditline_export::ExportError;
use auditline_integrity::VerifyError;
use auditline_query::QueryError;
use auditline_types::TransportError;

use crate::config::ConfigError;

/// Errors returned by [`Client`](crate::Client) operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The event was rejected locally or the service recorded something
    /// other than what was sent.
    #[error("event verification failed: {0}")]
    Verify(#[from] VerifyError),

    /// Submitting an event failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Export(#[from] ExportError),
}
