//! Structured query filters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Filter criteria for a paginated event query.
///
/// This is plain data. Turning it into the service's query language is the
/// transport's responsibility; every `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuredQuery {
    /// Action name; a trailing `*` requests a prefix match.
    pub action: Option<String>,
    pub actor_id: Option<String>,
    pub target_id: Option<String>,
    pub group_id: Option<String>,
    pub crud: Option<String>,
    pub external_id: Option<String>,
    /// Free-text location, e.g. a city or region name.
    pub location: Option<String>,
    /// Inclusive lower bound on the received time.
    pub received_start: Option<DateTime<Utc>>,
    /// Exclusive upper bound on the received time.
    pub received_end: Option<DateTime<Utc>>,
}

impl StructuredQuery {
    /// Returns a query restricted to a single actor.
    pub fn for_actor(actor_id: impl Into<String>) -> Self {
        Self {
            actor_id: Some(actor_id.into()),
            ..Self::default()
        }
    }

    /// Returns `true` when no constraint is set.
    pub fn is_unfiltered(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unfiltered() {
        assert!(StructuredQuery::default().is_unfiltered());
        assert!(!StructuredQuery::for_actor("actor1*").is_unfiltered());
    }
}
