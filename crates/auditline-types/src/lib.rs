//! Shared types for the auditline audit-log client.
//!
//! This crate holds the data model exchanged with the remote audit-log
//! service: the [`Event`] submitted by callers, the [`ServerRecord`] the
//! service assigns in return, and the read-only [`EventNode`] snapshots
//! produced by paginated queries. It also carries the [`EventNodeMask`]
//! projection used to select and order exported columns, and the opaque
//! [`TransportError`] reported by network collaborators.
//!
//! Every other crate in the workspace depends on `auditline-types` for
//! cross-cutting definitions and on nothing else for them.

pub mod error;
pub mod fields;
pub mod mask;
pub mod node;
pub mod query;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use error::TransportError;
pub use fields::Fields;
pub use mask::{Column, EventNodeMask};
pub use node::{ActorNode, Display, EventNode, GroupNode, TargetNode};
pub use query::StructuredQuery;

/// The entity that performed an action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Unique id of the actor within the project.
    pub id: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Link back to the actor in the reporting application.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub href: String,
    /// Free-form attributes of the actor.
    #[serde(
        default,
        skip_serializing_if = "Fields::is_empty",
        deserialize_with = "fields::deserialize"
    )]
    pub fields: Fields,
}

/// The object an action was taken on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Unique id of the target.
    pub id: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Link back to the target in the reporting application.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub href: String,
    /// Kind of object, e.g. `"document"`.
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    /// Free-form attributes of the target.
    #[serde(
        default,
        skip_serializing_if = "Fields::is_empty",
        deserialize_with = "fields::deserialize"
    )]
    pub fields: Fields,
}

/// A tenant of the reporting application. Audit logs are scoped by group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Unique id of the group within the project.
    pub id: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

/// An audit event as submitted to the service.
///
/// Only `action` is strictly required. Hash verification reads `action`,
/// the actor/target/group ids, `source_ip`, both flags, `fields`,
/// `external_id` and `metadata`; the remaining attributes travel with the
/// submission but do not take part in the canonical form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Dotted action name, e.g. `"document.delete"`.
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<Actor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Group>,
    /// One of `c`, `r`, `u`, `d`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub crud: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Address the request originated from.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source_ip: String,
    #[serde(
        default,
        skip_serializing_if = "Fields::is_empty",
        deserialize_with = "fields::deserialize"
    )]
    pub fields: Fields,
    #[serde(
        default,
        skip_serializing_if = "Fields::is_empty",
        deserialize_with = "fields::deserialize"
    )]
    pub metadata: Fields,
    /// Caller-side identifier used for deduplication.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub external_id: String,
    #[serde(default)]
    pub is_failure: bool,
    #[serde(default)]
    pub is_anonymous: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    /// Name of the reporting component, e.g. `"Web Dashboard"`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub component: String,
    /// Version of the reporting component.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
}

impl Event {
    /// Creates an event with the given action and every other attribute empty.
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            ..Self::default()
        }
    }

    /// Returns the actor id, or `""` when there is no actor.
    pub fn actor_id(&self) -> &str {
        self.actor.as_ref().map_or("", |actor| actor.id.as_str())
    }

    /// Returns the target id, or `""` when there is no target.
    pub fn target_id(&self) -> &str {
        self.target.as_ref().map_or("", |target| target.id.as_str())
    }

    /// Returns the group id, or `""` when there is no group.
    pub fn group_id(&self) -> &str {
        self.group.as_ref().map_or("", |group| group.id.as_str())
    }
}

/// The record the service creates for a submitted event.
///
/// `hash` is the lowercase hex SHA-256 the service computed over the
/// canonical form of the event it stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRecord {
    pub id: String,
    pub hash: String,
}

impl ServerRecord {
    pub fn new(id: impl Into<String>, hash: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            hash: hash.into(),
        }
    }
}
