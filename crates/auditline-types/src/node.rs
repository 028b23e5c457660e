//! Read-only event snapshots returned by queries.
//!
//! Which attributes are populated depends on the [`EventNodeMask`] the
//! query was issued with; anything left out of the mask comes back empty.
//!
//! [`EventNodeMask`]: crate::EventNodeMask

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fields::{self, Fields};

/// Group attributes on a queried event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupNode {
    pub id: String,
    pub name: String,
}

/// Actor attributes on a queried event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorNode {
    pub id: String,
    pub name: String,
    pub href: String,
    #[serde(deserialize_with = "fields::deserialize")]
    pub fields: Fields,
}

/// Target attributes on a queried event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetNode {
    pub id: String,
    pub name: String,
    pub href: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(deserialize_with = "fields::deserialize")]
    pub fields: Fields,
}

/// Server-rendered presentation of an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Display {
    pub markdown: String,
}

/// A stored event as returned by a paginated query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventNode {
    pub id: String,
    pub action: String,
    pub crud: String,
    pub description: String,
    pub created: Option<DateTime<Utc>>,
    /// When the service received the event.
    pub received: Option<DateTime<Utc>>,
    /// `created` when supplied, otherwise `received`.
    pub canonical_time: Option<DateTime<Utc>>,
    pub source_ip: String,
    pub country: String,
    pub loc_subdiv1: String,
    pub loc_subdiv2: String,
    pub is_failure: bool,
    pub is_anonymous: bool,
    pub component: String,
    pub version: String,
    pub external_id: String,
    pub group: Option<GroupNode>,
    pub actor: Option<ActorNode>,
    pub target: Option<TargetNode>,
    #[serde(deserialize_with = "fields::deserialize")]
    pub fields: Fields,
    #[serde(deserialize_with = "fields::deserialize")]
    pub metadata: Fields,
    pub display: Option<Display>,
}
