//! Client for a remote audit-log service.
//!
//! [`Client`] submits [`Event`](auditline_types::Event)s and verifies that
//! the service stored exactly what was sent, then reads the log back
//! through paginated queries, one-record streams, or a CSV export.
//!
//! The network layer is supplied by the caller as an implementation of
//! [`Publisher`] and [`Transport`](auditline_query::Transport); request
//! encoding, authentication and retries live there.
//!
//! # Usage
//!
//! ```rust,ignore
//! use auditline_client::{init_tracing, load_config, Client};
//!
//! let config = load_config(Some("auditline.toml"))?;
//! init_tracing(&config.logging)?;
//!
//! let client = Client::new(config, transport)?;
//! let record = client.report_event(&Event::new("user.login")).await?;
//! ```

mod client;
pub mod config;
mod error;
mod logging;

pub use client::{Client, Publisher};
pub use config::{load_config, ClientConfig, ConfigError, LoggingConfig};
pub use error::ClientError;
pub use logging::{init_tracing, InitError};
