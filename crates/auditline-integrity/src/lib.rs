//! Event integrity for the auditline client.
//!
//! After an event is submitted the service returns a [`ServerRecord`]
//! carrying the id it assigned and a SHA-256 digest of what it stored. This
//! crate rebuilds the service's canonical form of the event locally and
//! checks that both digests agree, so a client can detect an event that was
//! altered in transit or stored incorrectly.
//!
//! Formula: `hash = hex(sha256(canonical_string(event, record.id)))`
//!
//! The canonical form is positional and colon-separated; see
//! [`canonical_string`] for the exact layout and escaping rules.
//!
//! [`ServerRecord`]: auditline_types::ServerRecord

mod canonical;
mod verify;

pub use canonical::{canonical_bytes, canonical_string};
pub use verify::{compute_hash, verify_hash, VerifyError};
