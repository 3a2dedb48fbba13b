//! Dashboard tile projection.

use serde::Serialize;

use crate::models::{BadgeType, Module};
use crate::templates::{self, UiKind};

/// Marker rendered for `dot` badges.
pub const DOT_BADGE: &str = "•";

/// One entry on the attendee dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    pub module_id: String,
    pub title: String,
    pub icon: String,
    pub kind: UiKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
}

/// Badge text for a module. Both styles need a non-empty `badge_value`;
/// counts show it as given.
pub fn badge_text(module: &Module) -> Option<String> {
    let value = module
        .badge_value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())?;
    match module.badge_type {
        BadgeType::None => None,
        BadgeType::Dot => Some(DOT_BADGE.to_string()),
        BadgeType::Count => Some(value.to_string()),
    }
}

/// Enabled modules as tiles, sorted by `order`.
pub fn tiles(modules: &[Module]) -> Vec<Tile> {
    let mut enabled: Vec<&Module> = modules.iter().filter(|m| m.enabled).collect();
    enabled.sort_by_key(|m| m.order);
    enabled
        .into_iter()
        .map(|m| {
            let kind = m.kind.to_ui();
            Tile {
                module_id: m.id.clone(),
                title: m.title.clone(),
                icon: m
                    .icon
                    .clone()
                    .filter(|i| !i.is_empty())
                    .unwrap_or_else(|| templates::icon_for(kind).to_string()),
                kind,
                badge: badge_text(m),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ServerKind;

    fn module(id: &str, order: i32, enabled: bool) -> Module {
        Module {
            id: id.into(),
            event_id: "e1".into(),
            kind: ServerKind::News,
            title: id.to_uppercase(),
            icon: None,
            enabled,
            order,
            badge_type: BadgeType::None,
            badge_value: None,
            config: Default::default(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn only_enabled_in_order() {
        let modules = vec![module("c", 3, true), module("a", 1, true), module("b", 2, false)];
        let ids: Vec<String> = tiles(&modules).into_iter().map(|t| t.module_id).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn icon_falls_back_to_template() {
        let tile = &tiles(&[module("n", 1, true)])[0];
        assert_eq!(tile.kind, UiKind::Info);
        assert_eq!(tile.icon, templates::icon_for(UiKind::Info));
    }

    #[test]
    fn badges() {
        let mut m = module("n", 1, true);
        m.badge_value = Some("3".into());
        assert_eq!(badge_text(&m), None);

        m.badge_type = BadgeType::Count;
        assert_eq!(badge_text(&m).as_deref(), Some("3"));
        m.badge_value = Some(" 99+ ".into());
        assert_eq!(badge_text(&m).as_deref(), Some("99+"));
        m.badge_value = Some("NEW".into());
        assert_eq!(badge_text(&m).as_deref(), Some("NEW"));
        m.badge_value = Some("  ".into());
        assert_eq!(badge_text(&m), None);
        m.badge_value = None;
        assert_eq!(badge_text(&m), None);

        m.badge_type = BadgeType::Dot;
        assert_eq!(badge_text(&m), None);
        m.badge_value = Some("1".into());
        assert_eq!(badge_text(&m).as_deref(), Some(DOT_BADGE));
    }
}
