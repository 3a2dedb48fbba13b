//! Event module wire models.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open-ended per-module configuration. Its shape depends on the module kind.
pub type ConfigBag = Map<String, Value>;

/// Module kind as stored by the server.
///
/// Kinds the client does not recognize decode to [`ServerKind::Unknown`]
/// rather than failing the whole module list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerKind {
    Program,
    EventList,
    Map,
    Registration,
    ExternalLink,
    CustomPage,
    Assistant,
    News,
    Messages,
    #[serde(other)]
    Unknown,
}

impl ServerKind {
    pub const ALL: &[ServerKind] = &[
        ServerKind::Program,
        ServerKind::EventList,
        ServerKind::Map,
        ServerKind::Registration,
        ServerKind::ExternalLink,
        ServerKind::CustomPage,
        ServerKind::Assistant,
        ServerKind::News,
        ServerKind::Messages,
    ];

    /// Wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            ServerKind::Program => "program",
            ServerKind::EventList => "event_list",
            ServerKind::Map => "map",
            ServerKind::Registration => "registration",
            ServerKind::ExternalLink => "external_link",
            ServerKind::CustomPage => "custom_page",
            ServerKind::Assistant => "assistant",
            ServerKind::News => "news",
            ServerKind::Messages => "messages",
            ServerKind::Unknown => "unknown",
        }
    }

    /// Parse a wire string; anything unrecognized is [`ServerKind::Unknown`].
    pub fn parse(s: &str) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .unwrap_or(ServerKind::Unknown)
    }
}

impl fmt::Display for ServerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Badge style shown on a module tile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeType {
    #[default]
    None,
    Count,
    Dot,
}

fn default_enabled() -> bool {
    true
}

/// A module as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub id: String,
    pub event_id: String,
    #[serde(rename = "type")]
    pub kind: ServerKind,
    pub title: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub badge_type: BadgeType,
    #[serde(default)]
    pub badge_value: Option<String>,
    #[serde(default)]
    pub config: ConfigBag,
    #[serde(default, with = "super::datetime::option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "super::datetime::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// `POST /modules` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleCreate {
    pub event_id: String,
    #[serde(rename = "type")]
    pub kind: ServerKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub enabled: bool,
    pub order: i32,
    pub badge_type: BadgeType,
    #[serde(default)]
    pub badge_value: Option<String>,
    pub config: ConfigBag,
}

/// `PUT /modules/{id}` body. Only present fields are changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleUpdate {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ServerKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge_type: Option<BadgeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ConfigBag>,
}

impl ModuleUpdate {
    /// Update carrying only the enabled flag.
    pub fn enabled(enabled: bool) -> Self {
        Self {
            enabled: Some(enabled),
            ..Self::default()
        }
    }

    /// Update carrying only the title.
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

/// `PUT /modules/reorder/{event_id}` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleReorder {
    pub module_ids: Vec<String>,
}

/// Entry of `GET /admin/modules/types`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleTypeDefinition {
    #[serde(rename = "type")]
    pub kind: ServerKind,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub default_config: ConfigBag,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_server_module_with_defaults() {
        let module: Module = serde_json::from_value(json!({
            "id": "m1",
            "event_id": "e1",
            "type": "custom_page",
            "title": "Partners",
            "created_at": "2025-05-01T09:00:00",
        }))
        .expect("decode");
        assert_eq!(module.kind, ServerKind::CustomPage);
        assert!(module.enabled);
        assert_eq!(module.order, 0);
        assert_eq!(module.badge_type, BadgeType::None);
        assert!(module.config.is_empty());
        assert!(module.created_at.is_some());
        assert!(module.updated_at.is_none());
    }

    #[test]
    fn unrecognized_kind_decodes_as_unknown() {
        let module: Module = serde_json::from_value(json!({
            "id": "m1",
            "event_id": "e1",
            "type": "livestream",
            "title": "Stream",
        }))
        .expect("decode");
        assert_eq!(module.kind, ServerKind::Unknown);
        assert_eq!(ServerKind::parse("livestream"), ServerKind::Unknown);
        assert_eq!(ServerKind::parse("event_list"), ServerKind::EventList);
    }

    #[test]
    fn update_skips_absent_fields() {
        let body = serde_json::to_value(ModuleUpdate::enabled(false)).expect("encode");
        assert_eq!(body, json!({ "enabled": false }));
    }

    #[test]
    fn create_uses_type_key() {
        let body = serde_json::to_value(ModuleCreate {
            event_id: "e1".into(),
            kind: ServerKind::Messages,
            title: "Networking".into(),
            icon: None,
            enabled: true,
            order: 3,
            badge_type: BadgeType::None,
            badge_value: None,
            config: ConfigBag::new(),
        })
        .expect("encode");
        assert_eq!(body["type"], "messages");
        assert_eq!(body["badge_type"], "none");
        assert!(body.get("icon").is_none());
    }
}
