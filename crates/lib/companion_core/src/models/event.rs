//! Event wire models.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const TITLE_MAX: usize = 255;
const LOCATION_MAX: usize = 255;

/// Event lifecycle status, owned by the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Upcoming,
    Active,
    Finished,
}

impl EventStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EventStatus::Upcoming => "upcoming",
            EventStatus::Active => "active",
            EventStatus::Finished => "finished",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(EventStatus::Upcoming),
            "active" => Ok(EventStatus::Active),
            "finished" => Ok(EventStatus::Finished),
            other => Err(ValidationError::InvalidValue {
                field: "status".into(),
                reason: format!("expected upcoming, active or finished, got '{other}'"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "super::datetime")]
    pub date_start: DateTime<Utc>,
    #[serde(with = "super::datetime")]
    pub date_end: DateTime<Utc>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default, with = "super::datetime::option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "super::datetime::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// `{ items, total }` envelope of the event listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventList {
    pub items: Vec<Event>,
    pub total: i64,
}

/// `POST /admin/events` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventCreate {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "super::datetime")]
    pub date_start: DateTime<Utc>,
    #[serde(with = "super::datetime")]
    pub date_end: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub status: EventStatus,
}

impl EventCreate {
    /// Form-level checks mirroring the server's schema limits.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)?;
        validate_location(self.location.as_deref())?;
        if self.date_end < self.date_start {
            return Err(ValidationError::EndsBeforeStart);
        }
        Ok(())
    }
}

/// `PUT /admin/events/{id}` body. Only present fields are changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::datetime::option"
    )]
    pub date_start: Option<DateTime<Utc>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::datetime::option"
    )]
    pub date_end: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
}

impl EventUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        validate_location(self.location.as_deref())?;
        if let (Some(start), Some(end)) = (self.date_start, self.date_end)
            && end < start
        {
            return Err(ValidationError::EndsBeforeStart);
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::Required("title"));
    }
    if title.chars().count() > TITLE_MAX {
        return Err(ValidationError::TooLong {
            field: "title",
            max: TITLE_MAX,
        });
    }
    Ok(())
}

fn validate_location(location: Option<&str>) -> Result<(), ValidationError> {
    match location {
        Some(l) if l.chars().count() > LOCATION_MAX => Err(ValidationError::TooLong {
            field: "location",
            max: LOCATION_MAX,
        }),
        _ => Ok(()),
    }
}
