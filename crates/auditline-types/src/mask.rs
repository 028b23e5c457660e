//! Projection masks: which event attributes a query returns and how they
//! are laid out as tabular rows.
//!
//! The column order is fixed by [`Column::ALL`]; a mask only selects a
//! subset of it. [`EventNodeMask::headers`] and [`EventNodeMask::row`]
//! iterate the same selection, so header and row positions always agree.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::fields::Fields;
use crate::node::EventNode;

/// A single exportable attribute of an [`EventNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Id,
    Action,
    Crud,
    Description,
    Created,
    Received,
    CanonicalTime,
    SourceIp,
    Country,
    LocSubdiv1,
    LocSubdiv2,
    IsFailure,
    IsAnonymous,
    Component,
    Version,
    ExternalId,
    GroupId,
    GroupName,
    ActorId,
    ActorName,
    ActorHref,
    ActorFields,
    TargetId,
    TargetName,
    TargetHref,
    TargetType,
    TargetFields,
    Fields,
    Metadata,
    DisplayMarkdown,
}

impl Column {
    /// Every column, in export order.
    pub const ALL: [Column; 30] = [
        Self::Id,
        Self::Action,
        Self::Crud,
        Self::Description,
        Self::Created,
        Self::Received,
        Self::CanonicalTime,
        Self::SourceIp,
        Self::Country,
        Self::LocSubdiv1,
        Self::LocSubdiv2,
        Self::IsFailure,
        Self::IsAnonymous,
        Self::Component,
        Self::Version,
        Self::ExternalId,
        Self::GroupId,
        Self::GroupName,
        Self::ActorId,
        Self::ActorName,
        Self::ActorHref,
        Self::ActorFields,
        Self::TargetId,
        Self::TargetName,
        Self::TargetHref,
        Self::TargetType,
        Self::TargetFields,
        Self::Fields,
        Self::Metadata,
        Self::DisplayMarkdown,
    ];

    /// Header label for this column.
    pub fn label(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Action => "action",
            Self::Crud => "crud",
            Self::Description => "description",
            Self::Created => "created",
            Self::Received => "received",
            Self::CanonicalTime => "canonical_time",
            Self::SourceIp => "source_ip",
            Self::Country => "country",
            Self::LocSubdiv1 => "loc_subdiv1",
            Self::LocSubdiv2 => "loc_subdiv2",
            Self::IsFailure => "is_failure",
            Self::IsAnonymous => "is_anonymous",
            Self::Component => "component",
            Self::Version => "version",
            Self::ExternalId => "external_id",
            Self::GroupId => "group.id",
            Self::GroupName => "group.name",
            Self::ActorId => "actor.id",
            Self::ActorName => "actor.name",
            Self::ActorHref => "actor.href",
            Self::ActorFields => "actor.fields",
            Self::TargetId => "target.id",
            Self::TargetName => "target.name",
            Self::TargetHref => "target.href",
            Self::TargetType => "target.type",
            Self::TargetFields => "target.fields",
            Self::Fields => "fields",
            Self::Metadata => "metadata",
            Self::DisplayMarkdown => "display.markdown",
        }
    }

    /// Renders this column's value for `node`.
    ///
    /// Absent values render as `""`, timestamps as RFC 3339 UTC, flags as
    /// `true`/`false`, and maps as JSON objects with sorted keys.
    pub fn value(self, node: &EventNode) -> String {
        let group = node.group.as_ref();
        let actor = node.actor.as_ref();
        let target = node.target.as_ref();
        match self {
            Self::Id => node.id.clone(),
            Self::Action => node.action.clone(),
            Self::Crud => node.crud.clone(),
            Self::Description => node.description.clone(),
            Self::Created => render_time(node.created),
            Self::Received => render_time(node.received),
            Self::CanonicalTime => render_time(node.canonical_time),
            Self::SourceIp => node.source_ip.clone(),
            Self::Country => node.country.clone(),
            Self::LocSubdiv1 => node.loc_subdiv1.clone(),
            Self::LocSubdiv2 => node.loc_subdiv2.clone(),
            Self::IsFailure => node.is_failure.to_string(),
            Self::IsAnonymous => node.is_anonymous.to_string(),
            Self::Component => node.component.clone(),
            Self::Version => node.version.clone(),
            Self::ExternalId => node.external_id.clone(),
            Self::GroupId => group.map(|g| g.id.clone()).unwrap_or_default(),
            Self::GroupName => group.map(|g| g.name.clone()).unwrap_or_default(),
            Self::ActorId => actor.map(|a| a.id.clone()).unwrap_or_default(),
            Self::ActorName => actor.map(|a| a.name.clone()).unwrap_or_default(),
            Self::ActorHref => actor.map(|a| a.href.clone()).unwrap_or_default(),
            Self::ActorFields => actor.map(|a| render_map(&a.fields)).unwrap_or_default(),
            Self::TargetId => target.map(|t| t.id.clone()).unwrap_or_default(),
            Self::TargetName => target.map(|t| t.name.clone()).unwrap_or_default(),
            Self::TargetHref => target.map(|t| t.href.clone()).unwrap_or_default(),
            Self::TargetType => target.map(|t| t.kind.clone()).unwrap_or_default(),
            Self::TargetFields => target.map(|t| render_map(&t.fields)).unwrap_or_default(),
            Self::Fields => render_map(&node.fields),
            Self::Metadata => render_map(&node.metadata),
            Self::DisplayMarkdown => node
                .display
                .as_ref()
                .map(|d| d.markdown.clone())
                .unwrap_or_default(),
        }
    }
}

fn render_time(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.to_rfc3339_opts(SecondsFormat::AutoSi, true))
        .unwrap_or_default()
}

fn render_map(map: &Fields) -> String {
    if map.is_empty() {
        return String::new();
    }
    let sorted: BTreeMap<&str, &str> = map.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    serde_json::to_string(&sorted).unwrap_or_default()
}

/// Selects which attributes a query returns and which columns an export
/// writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventNodeMask {
    pub id: bool,
    pub action: bool,
    pub crud: bool,
    pub description: bool,
    pub created: bool,
    pub received: bool,
    pub canonical_time: bool,
    pub source_ip: bool,
    pub country: bool,
    pub loc_subdiv1: bool,
    pub loc_subdiv2: bool,
    pub is_failure: bool,
    pub is_anonymous: bool,
    pub component: bool,
    pub version: bool,
    pub external_id: bool,
    pub group_id: bool,
    pub group_name: bool,
    pub actor_id: bool,
    pub actor_name: bool,
    pub actor_href: bool,
    pub actor_fields: bool,
    pub target_id: bool,
    pub target_name: bool,
    pub target_href: bool,
    pub target_type: bool,
    pub target_fields: bool,
    pub fields: bool,
    pub metadata: bool,
    pub display_markdown: bool,
}

impl EventNodeMask {
    /// A mask selecting every column.
    pub fn all() -> Self {
        let mut mask = Self::default();
        for column in Column::ALL {
            *mask.flag_mut(column) = true;
        }
        mask
    }

    /// Builds a mask from an explicit column list.
    pub fn with_columns(columns: &[Column]) -> Self {
        let mut mask = Self::default();
        for &column in columns {
            *mask.flag_mut(column) = true;
        }
        mask
    }

    /// Returns `true` if `column` is selected.
    pub fn includes(&self, column: Column) -> bool {
        match column {
            Column::Id => self.id,
            Column::Action => self.action,
            Column::Crud => self.crud,
            Column::Description => self.description,
            Column::Created => self.created,
            Column::Received => self.received,
            Column::CanonicalTime => self.canonical_time,
            Column::SourceIp => self.source_ip,
            Column::Country => self.country,
            Column::LocSubdiv1 => self.loc_subdiv1,
            Column::LocSubdiv2 => self.loc_subdiv2,
            Column::IsFailure => self.is_failure,
            Column::IsAnonymous => self.is_anonymous,
            Column::Component => self.component,
            Column::Version => self.version,
            Column::ExternalId => self.external_id,
            Column::GroupId => self.group_id,
            Column::GroupName => self.group_name,
            Column::ActorId => self.actor_id,
            Column::ActorName => self.actor_name,
            Column::ActorHref => self.actor_href,
            Column::ActorFields => self.actor_fields,
            Column::TargetId => self.target_id,
            Column::TargetName => self.target_name,
            Column::TargetHref => self.target_href,
            Column::TargetType => self.target_type,
            Column::TargetFields => self.target_fields,
            Column::Fields => self.fields,
            Column::Metadata => self.metadata,
            Column::DisplayMarkdown => self.display_markdown,
        }
    }

    fn flag_mut(&mut self, column: Column) -> &mut bool {
        match column {
            Column::Id => &mut self.id,
            Column::Action => &mut self.action,
            Column::Crud => &mut self.crud,
            Column::Description => &mut self.description,
            Column::Created => &mut self.created,
            Column::Received => &mut self.received,
            Column::CanonicalTime => &mut self.canonical_time,
            Column::SourceIp => &mut self.source_ip,
            Column::Country => &mut self.country,
            Column::LocSubdiv1 => &mut self.loc_subdiv1,
            Column::LocSubdiv2 => &mut self.loc_subdiv2,
            Column::IsFailure => &mut self.is_failure,
            Column::IsAnonymous => &mut self.is_anonymous,
            Column::Component => &mut self.component,
            Column::Version => &mut self.version,
            Column::ExternalId => &mut self.external_id,
            Column::GroupId => &mut self.group_id,
            Column::GroupName => &mut self.group_name,
            Column::ActorId => &mut self.actor_id,
            Column::ActorName => &mut self.actor_name,
            Column::ActorHref => &mut self.actor_href,
            Column::ActorFields => &mut self.actor_fields,
            Column::TargetId => &mut self.target_id,
            Column::TargetName => &mut self.target_name,
            Column::TargetHref => &mut self.target_href,
            Column::TargetType => &mut self.target_type,
            Column::TargetFields => &mut self.target_fields,
            Column::Fields => &mut self.fields,
            Column::Metadata => &mut self.metadata,
            Column::DisplayMarkdown => &mut self.display_markdown,
        }
    }

    /// Selected columns in export order.
    pub fn columns(&self) -> Vec<Column> {
        Column::ALL
            .into_iter()
            .filter(|&column| self.includes(column))
            .collect()
    }

    /// Header labels in export order.
    pub fn headers(&self) -> Vec<String> {
        self.columns()
            .into_iter()
            .map(|column| column.label().to_string())
            .collect()
    }

    /// Values of `node` for each selected column, in header order.
    pub fn row(&self, node: &EventNode) -> Vec<String> {
        self.columns()
            .into_iter()
            .map(|column| column.value(node))
            .collect()
    }
}
