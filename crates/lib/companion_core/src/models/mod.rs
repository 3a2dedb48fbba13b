//! Wire models exchanged with the companion API.
//!
//! Field names follow the API's snake_case JSON. Timestamps are accepted
//! either as RFC 3339 or as naive ISO-8601 (interpreted as UTC), since the
//! server emits both depending on the column.

pub mod assistant;
pub mod auth;
pub mod content;
pub mod event;
pub mod module;

use serde::{Deserialize, Serialize};

pub use assistant::{AssistantAction, ChatContext, ChatRequest, ChatResponse, MESSAGE_MAX_CHARS};
pub use auth::{AdminLogin, AdminMe, AdminToken, AuthValidation, User, UserRole};
pub use content::{
    EventItem, ItemFilters, Location, MapData, News, Registration, RegistrationCheck,
    RegistrationResult, Speaker, Zone,
};
pub use event::{Event, EventCreate, EventList, EventStatus, EventUpdate};
pub use module::{
    BadgeType, ConfigBag, Module, ModuleCreate, ModuleReorder, ModuleTypeDefinition,
    ModuleUpdate, ServerKind,
};

/// Generic `{ "success": bool }` acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Lenient timestamp (de)serialization.
pub mod datetime {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Parse RFC 3339 first, then naive ISO-8601 as UTC.
    pub fn parse(s: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
    }

    /// Same rules for `Option<DateTime<Utc>>`; `null` and missing map to `None`.
    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(dt: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error> {
            match dt {
                Some(dt) => s.serialize_str(&dt.to_rfc3339()),
                None => s.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            d: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            match Option::<String>::deserialize(d)? {
                Some(raw) => super::parse(&raw).map(Some).ok_or_else(|| {
                    serde::de::Error::custom(format!("invalid timestamp: {raw}"))
                }),
                None => Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339_and_naive_timestamps() {
        let a = datetime::parse("2025-06-01T10:00:00Z").expect("rfc3339");
        let b = datetime::parse("2025-06-01T10:00:00").expect("naive");
        let c = datetime::parse("2025-06-01T10:00:00.123456").expect("naive fractional");
        assert_eq!(a, b);
        assert!(c > b);
        assert!(datetime::parse("yesterday").is_none());
    }

    #[test]
    fn ack_without_message() {
        let ack: Ack = serde_json::from_str(r#"{"success": true}"#).expect("parse");
        assert!(ack.success);
        assert!(ack.message.is_none());
    }
}
