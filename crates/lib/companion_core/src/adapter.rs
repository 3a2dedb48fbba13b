//! Server module ↔ UI module mapping.
//!
//! The kind mapping is a many-to-one projection in both directions, so a
//! kind does not survive a round trip in general: `news` and `custom_page`
//! both read as [`UiKind::Info`], and `info` and `partners` both write as
//! [`ServerKind::CustomPage`]. `info` is the canonical UI kind of
//! `custom_page`. Everything except the kind round-trips.

use serde::{Deserialize, Serialize};

use crate::models::{BadgeType, ConfigBag, Module, ModuleCreate, ModuleUpdate, ServerKind};
use crate::templates::{
    self, Category, FALLBACK_ICON, ModuleField, ModuleTemplate, UiKind,
};
use crate::uuid::local_module_id;

impl ServerKind {
    /// UI kind a stored module is presented as.
    pub fn to_ui(self) -> UiKind {
        match self {
            ServerKind::Program | ServerKind::EventList | ServerKind::Registration => {
                UiKind::Program
            }
            ServerKind::Map => UiKind::Map,
            ServerKind::ExternalLink => UiKind::Custom,
            ServerKind::CustomPage | ServerKind::News => UiKind::Info,
            ServerKind::Assistant => UiKind::Assistant,
            ServerKind::Messages => UiKind::Networking,
            ServerKind::Unknown => UiKind::Custom,
        }
    }
}

impl UiKind {
    /// Server kind a UI module is written back as.
    pub fn to_server(self) -> ServerKind {
        match self {
            UiKind::Program | UiKind::Speakers => ServerKind::Program,
            UiKind::Map => ServerKind::Map,
            UiKind::Networking => ServerKind::Messages,
            UiKind::Assistant => ServerKind::Assistant,
            UiKind::Info | UiKind::Partners => ServerKind::CustomPage,
            UiKind::Custom => ServerKind::ExternalLink,
        }
    }
}

/// Editing representation of a module: server identity plus template data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiModule {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: UiKind,
    pub name: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub enabled: bool,
    pub order: i32,
    #[serde(default)]
    pub config: ConfigBag,
    #[serde(default)]
    pub fields: Vec<ModuleField>,
    pub category: Category,
    #[serde(default)]
    pub is_premium: bool,
}

impl UiModule {
    pub fn template(&self) -> Option<&'static ModuleTemplate> {
        templates::template(self.kind)
    }

    pub fn field(&self, id: &str) -> Option<&ModuleField> {
        self.fields.iter().find(|f| f.id == id)
    }
}

/// Shallow merge: every stored key wins, missing keys take the default.
pub fn merge_config(defaults: &ConfigBag, stored: &ConfigBag) -> ConfigBag {
    let mut merged = defaults.clone();
    for (key, value) in stored {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Server → UI.
pub fn to_ui_module(module: &Module) -> UiModule {
    let kind = module.kind.to_ui();
    let template = templates::template(kind);
    let config = merge_config(&templates::default_config(kind), &module.config);
    let icon = module
        .icon
        .clone()
        .filter(|i| !i.is_empty())
        .unwrap_or_else(|| templates::icon_for(kind).to_string());

    UiModule {
        id: module.id.clone(),
        kind,
        name: module.title.clone(),
        icon,
        description: template.map(|t| t.description.clone()),
        enabled: module.enabled,
        order: module.order,
        config,
        fields: template.map(|t| t.fields.clone()).unwrap_or_default(),
        category: templates::category_for(kind),
        is_premium: template.is_some_and(|t| t.is_premium),
    }
}

pub fn to_ui_modules(modules: &[Module]) -> Vec<UiModule> {
    modules.iter().map(to_ui_module).collect()
}

/// UI → server, as a full create payload.
pub fn to_server_module(module: &UiModule, event_id: &str) -> ModuleCreate {
    ModuleCreate {
        event_id: event_id.to_string(),
        kind: module.kind.to_server(),
        title: module.name.clone(),
        icon: Some(module.icon.clone()),
        enabled: module.enabled,
        order: module.order,
        badge_type: BadgeType::None,
        badge_value: None,
        config: module.config.clone(),
    }
}

/// UI → server, as an update touching every editable field.
pub fn to_module_update(module: &UiModule) -> ModuleUpdate {
    ModuleUpdate {
        kind: Some(module.kind.to_server()),
        title: Some(module.name.clone()),
        icon: Some(module.icon.clone()),
        enabled: Some(module.enabled),
        order: Some(module.order),
        badge_type: Some(BadgeType::None),
        badge_value: None,
        config: Some(module.config.clone()),
    }
}

/// Instantiate a template as an enabled placeholder with a local id.
pub fn from_template(template: &ModuleTemplate, order: i32) -> UiModule {
    UiModule {
        id: local_module_id(),
        kind: template.kind,
        name: template.name.clone(),
        icon: if template.icon.is_empty() {
            FALLBACK_ICON.to_string()
        } else {
            template.icon.clone()
        },
        description: Some(template.description.clone()),
        enabled: true,
        order,
        config: template.default_config.clone(),
        fields: template.fields.clone(),
        category: template.category,
        is_premium: template.is_premium,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::all_templates;
    use serde_json::json;

    fn server_module(kind: ServerKind, config: serde_json::Value) -> Module {
        Module {
            id: "m1".into(),
            event_id: "e1".into(),
            kind,
            title: "Sessions".into(),
            icon: Some("📅".into()),
            enabled: false,
            order: 4,
            badge_type: BadgeType::None,
            badge_value: None,
            config: config.as_object().cloned().unwrap_or_default(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Write payload as the server would store and echo it back.
    fn echo(create: ModuleCreate, id: &str) -> Module {
        Module {
            id: id.into(),
            event_id: create.event_id,
            kind: create.kind,
            title: create.title,
            icon: create.icon,
            enabled: create.enabled,
            order: create.order,
            badge_type: create.badge_type,
            badge_value: create.badge_value,
            config: create.config,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn kind_projection_is_many_to_one() {
        assert_eq!(ServerKind::News.to_ui(), UiKind::Info);
        assert_eq!(ServerKind::CustomPage.to_ui(), UiKind::Info);
        assert_eq!(ServerKind::EventList.to_ui(), UiKind::Program);
        assert_eq!(ServerKind::Registration.to_ui(), UiKind::Program);
        assert_eq!(ServerKind::Unknown.to_ui(), UiKind::Custom);
        assert_eq!(UiKind::Info.to_server(), ServerKind::CustomPage);
        assert_eq!(UiKind::Partners.to_server(), ServerKind::CustomPage);
        assert_eq!(UiKind::Speakers.to_server(), ServerKind::Program);
        assert_eq!(UiKind::Custom.to_server(), ServerKind::ExternalLink);
    }

    #[test]
    fn stored_config_wins_over_defaults() {
        let module = server_module(ServerKind::Program, json!({ "defaultView": "grid", "extra": 1 }));
        let ui = to_ui_module(&module);
        assert_eq!(ui.kind, UiKind::Program);
        assert_eq!(ui.config["defaultView"], json!("grid"));
        assert_eq!(ui.config["showFilters"], json!(true));
        assert_eq!(ui.config["extra"], json!(1));
        assert_eq!(ui.icon, "📅");
        assert_eq!(ui.category, Category::Core);
        assert!(!ui.fields.is_empty());
    }

    #[test]
    fn merge_is_idempotent() {
        let defaults = templates::default_config(UiKind::Partners);
        let stored = json!({ "gridColumns": 4, "showLogo": false })
            .as_object()
            .cloned()
            .expect("object");
        let once = merge_config(&defaults, &stored);
        let twice = merge_config(&defaults, &once);
        assert_eq!(once, twice);
        assert_eq!(merge_config(&once, &stored), once);
    }

    #[test]
    fn unknown_kind_degrades_to_custom() {
        let mut module = server_module(ServerKind::Unknown, json!({ "url": "https://x" }));
        module.icon = None;
        let ui = to_ui_module(&module);
        assert_eq!(ui.kind, UiKind::Custom);
        assert_eq!(ui.icon, FALLBACK_ICON);
        assert_eq!(ui.category, Category::Custom);
        assert!(ui.fields.is_empty());
        assert_eq!(ui.config["url"], json!("https://x"));
        assert_eq!(to_server_module(&ui, "e1").kind, ServerKind::ExternalLink);
    }

    #[test]
    fn round_trip_preserves_everything_but_kind() {
        for kind in ServerKind::ALL {
            let original = server_module(*kind, json!({ "showFilters": false, "custom": "x" }));
            let ui = to_ui_module(&original);
            let back = to_ui_module(&echo(to_server_module(&ui, "e1"), "m1"));
            assert_eq!(back.enabled, original.enabled, "{kind}");
            assert_eq!(back.name, original.title, "{kind}");
            assert_eq!(back.icon, "📅", "{kind}");
            assert_eq!(back.order, original.order, "{kind}");
            for (key, value) in &original.config {
                assert_eq!(back.config.get(key), Some(value), "{kind}.{key}");
            }
        }
    }

    #[test]
    fn info_and_partners_both_come_back_as_info() {
        let info = from_template(templates::template(UiKind::Info).expect("info"), 1);
        let partners = from_template(templates::template(UiKind::Partners).expect("partners"), 2);

        let info_back = to_ui_module(&echo(to_server_module(&info, "e1"), "a"));
        let partners_back = to_ui_module(&echo(to_server_module(&partners, "e1"), "b"));

        assert_eq!(info_back.kind, UiKind::Info);
        assert_eq!(partners_back.kind, UiKind::Info);
        // partners config survives even though the kind does not
        assert_eq!(partners_back.config["gridColumns"], json!(3));
    }

    #[test]
    fn template_instantiation_uses_defaults() {
        for t in all_templates() {
            let ui = from_template(t, 7);
            assert!(crate::uuid::is_local_id(&ui.id));
            assert_eq!(ui.config, t.default_config);
            assert_eq!(ui.order, 7);
            assert!(ui.enabled);
        }
    }

    #[test]
    fn update_carries_all_editable_fields() {
        let ui = to_ui_module(&server_module(ServerKind::Map, json!({})));
        let update = to_module_update(&ui);
        assert_eq!(update.kind, Some(ServerKind::Map));
        assert_eq!(update.enabled, Some(false));
        assert_eq!(update.order, Some(4));
        assert_eq!(update.config.as_ref().map(|c| c["defaultZoom"].clone()), Some(json!(100)));
    }
}
