//! Digest computation and comparison against server-issued hashes.

use auditline_types::{Event, ServerRecord};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::canonical::canonical_bytes;

/// Errors produced while verifying a submitted event.
///
/// Neither variant is worth retrying: both are deterministic functions of
/// the event and the record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    /// A required event attribute was empty.
    #[error("event is missing required field `{0}`")]
    MissingField(&'static str),

    /// The locally computed digest differs from the one the service returned.
    #[error("hash mismatch: computed {computed}, server supplied {supplied}")]
    Integrity { computed: String, supplied: String },
}

/// Computes the lowercase hex SHA-256 of the canonical form of `event`
/// stored under `record_id`.
///
/// # Errors
///
/// Returns [`VerifyError::MissingField`] if `event.action` is empty.
pub fn compute_hash(event: &Event, record_id: &str) -> Result<String, VerifyError> {
    if event.action.is_empty() {
        return Err(VerifyError::MissingField("action"));
    }

    let digest = Sha256::digest(canonical_bytes(event, record_id));
    Ok(hex::encode(digest))
}

/// Checks that `record.hash` is the digest of `event` under `record.id`.
///
/// The comparison is exact, so a hash that differs only in letter case is
/// rejected too.
///
/// # Errors
///
/// Returns [`VerifyError::MissingField`] if `event.action` is empty, and
/// [`VerifyError::Integrity`] carrying both digests if they differ.
pub fn verify_hash(event: &Event, record: &ServerRecord) -> Result<(), VerifyError> {
    let computed = compute_hash(event, &record.id)?;
    if computed != record.hash {
        tracing::warn!(
            record_id = %record.id,
            action = %event.action,
            computed = %computed,
            supplied = %record.hash,
            "server hash does not match submitted event"
        );
        return Err(VerifyError::Integrity {
            computed,
            supplied: record.hash.clone(),
        });
    }
    Ok(())
}
