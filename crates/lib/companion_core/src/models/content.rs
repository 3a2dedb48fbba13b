//! Read models behind the attendee pages: program, speakers, map, news and
//! registrations.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Program entry (session, workshop, talk).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventItem {
    pub id: String,
    pub event_id: String,
    #[serde(default)]
    pub module_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "super::datetime::option")]
    pub date_start: Option<DateTime<Utc>>,
    #[serde(default, with = "super::datetime::option")]
    pub date_end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location_id: Option<String>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub capacity: Option<i32>,
    #[serde(default)]
    pub registered_count: i32,
    #[serde(default)]
    pub available_spots: Option<i32>,
    #[serde(default)]
    pub is_full: bool,
    #[serde(rename = "type", default)]
    pub item_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
    #[serde(default)]
    pub speakers: Vec<Speaker>,
}

impl EventItem {
    /// `registered / capacity` label, or just the count when uncapped.
    pub fn occupancy(&self) -> String {
        match self.capacity {
            Some(capacity) => format!("{}/{}", self.registered_count, capacity),
            None => self.registered_count.to_string(),
        }
    }
}

/// Query parameters of `GET /events/{id}/items`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ItemFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub available_only: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Speaker {
    pub id: String,
    pub event_id: String,
    pub name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub social_links: HashMap<String, String>,
}

impl Speaker {
    /// "Position, Company" with whichever parts are present.
    pub fn affiliation(&self) -> Option<String> {
        match (self.position.as_deref(), self.company.as_deref()) {
            (Some(p), Some(c)) => Some(format!("{p}, {c}")),
            (Some(p), None) => Some(p.to_string()),
            (None, Some(c)) => Some(c.to_string()),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct News {
    pub id: String,
    pub event_id: String,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, with = "super::datetime::option")]
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub event_id: String,
    pub name: String,
    #[serde(default)]
    pub floor: Option<i32>,
    #[serde(default)]
    pub coordinates: HashMap<String, Value>,
    #[serde(default)]
    pub map_data: HashMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub event_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub floor: Option<i32>,
    #[serde(default)]
    pub zone_id: Option<String>,
    #[serde(default)]
    pub zone_name: Option<String>,
    #[serde(default)]
    pub coordinates: HashMap<String, Value>,
}

/// `GET /events/{id}/map` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapData {
    #[serde(default)]
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub locations: Vec<Location>,
}

impl MapData {
    /// Locations belonging to `zone_id`.
    pub fn locations_in<'a>(&'a self, zone_id: &'a str) -> impl Iterator<Item = &'a Location> {
        self.locations
            .iter()
            .filter(move |l| l.zone_id.as_deref() == Some(zone_id))
    }

    /// Locations not assigned to any zone.
    pub fn unzoned_locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter().filter(|l| l.zone_id.is_none())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub id: String,
    pub event_item_id: String,
    pub user_id: String,
    pub status: String,
    #[serde(default, with = "super::datetime::option")]
    pub registered_at: Option<DateTime<Utc>>,
    #[serde(default, with = "super::datetime::option")]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub event_item_title: Option<String>,
}

/// `POST /event-items/{id}/register` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationResult {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub registration_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// `GET /registrations/{item_id}/check` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationCheck {
    pub registered: bool,
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filters_skip_unset_parameters() {
        let filters = ItemFilters {
            day: Some("2025-06-01".into()),
            available_only: false,
            ..ItemFilters::default()
        };
        let value = serde_json::to_value(&filters).expect("encode");
        assert_eq!(value, json!({ "day": "2025-06-01" }));

        let only_available = ItemFilters {
            available_only: true,
            ..ItemFilters::default()
        };
        let value = serde_json::to_value(&only_available).expect("encode");
        assert_eq!(value, json!({ "available_only": true }));
    }

    #[test]
    fn occupancy_label() {
        let mut item: EventItem = serde_json::from_value(json!({
            "id": "i1",
            "event_id": "e1",
            "title": "Rust workshop",
            "capacity": 30,
            "registered_count": 12,
        }))
        .expect("decode");
        assert_eq!(item.occupancy(), "12/30");
        item.capacity = None;
        assert_eq!(item.occupancy(), "12");
    }

    #[test]
    fn map_groups_locations_by_zone() {
        let map: MapData = serde_json::from_value(json!({
            "zones": [{ "id": "z1", "event_id": "e1", "name": "Hall A" }],
            "locations": [
                { "id": "l1", "event_id": "e1", "name": "Stage", "zone_id": "z1" },
                { "id": "l2", "event_id": "e1", "name": "Cloakroom" },
            ],
        }))
        .expect("decode");
        let in_zone: Vec<_> = map.locations_in("z1").map(|l| l.name.as_str()).collect();
        assert_eq!(in_zone, vec!["Stage"]);
        assert_eq!(map.unzoned_locations().count(), 1);
    }

    #[test]
    fn speaker_affiliation() {
        let speaker: Speaker = serde_json::from_value(json!({
            "id": "s1",
            "event_id": "e1",
            "name": "Ada",
            "company": "Analytical Engines",
        }))
        .expect("decode");
        assert_eq!(speaker.affiliation().as_deref(), Some("Analytical Engines"));
    }
}
