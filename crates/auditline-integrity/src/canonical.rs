//! Canonical serialization of an event for hashing.
//!
//! The output must match the service byte for byte. Layout:
//!
//! ```text
//! id:action:target:actor:group:source_ip:failure:anonymous:FIELDS[:external_id][:METADATA]
//! ```
//!
//! `FIELDS` is a bare `:` when the map is empty, otherwise the sorted
//! `key=value;` entries. The external id and metadata blocks are only
//! present when non-empty.

use auditline_types::{Event, Fields};

/// Escapes the field separator. `%` goes first so `%3A` cannot be produced
/// by the input itself.
fn encode_scalar(value: &str) -> String {
    value.replace('%', "%25").replace(':', "%3A")
}

/// Escapes a map key or value: the scalar pass, then the entry delimiters.
fn encode_entry(value: &str) -> String {
    encode_scalar(value).replace('=', "%3D").replace(';', "%3B")
}

fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

/// Appends `key=value;` for every entry, ordered by raw key bytes.
fn push_entries(out: &mut String, map: &Fields) {
    let mut entries: Vec<(&String, &String)> = map.iter().collect();
    entries.sort_unstable_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
    for (key, value) in entries {
        out.push_str(&encode_entry(key));
        out.push('=');
        out.push_str(&encode_entry(value));
        out.push(';');
    }
}

/// Builds the canonical string the service hashes for `event` stored under
/// `record_id`.
///
/// Missing actor, target and group render as empty segments. No validation
/// happens here; [`verify_hash`](crate::verify_hash) rejects events without
/// an action before calling this.
pub fn canonical_string(event: &Event, record_id: &str) -> String {
    let scalars = [
        encode_scalar(record_id),
        encode_scalar(&event.action),
        encode_scalar(event.target_id()),
        encode_scalar(event.actor_id()),
        encode_scalar(event.group_id()),
        encode_scalar(&event.source_ip),
        flag(event.is_failure).to_string(),
        flag(event.is_anonymous).to_string(),
    ];

    let mut out = scalars.join(":");
    out.push(':');

    if event.fields.is_empty() {
        out.push(':');
    } else {
        push_entries(&mut out, &event.fields);
    }

    if !event.external_id.is_empty() {
        out.push(':');
        out.push_str(&encode_scalar(&event.external_id));
    }

    if !event.metadata.is_empty() {
        out.push(':');
        push_entries(&mut out, &event.metadata);
    }

    out
}

/// [`canonical_string`] as bytes, ready for hashing.
pub fn canonical_bytes(event: &Event, record_id: &str) -> Vec<u8> {
    canonical_string(event, record_id).into_bytes()
}
