//! Module template registry.
//!
//! A compiled-in catalog describing every UI module kind: display metadata,
//! default configuration and the ordered list of configurable fields.
//! Lookups never fail loudly; unknown kinds yield `None` and callers fall
//! back to [`FALLBACK_ICON`], [`Category::Custom`] and an empty field list.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::ValidationError;
use crate::models::ConfigBag;

/// Icon used when neither the server nor a template supplies one.
pub const FALLBACK_ICON: &str = "Info";

/// Module kind as presented in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiKind {
    Program,
    Speakers,
    Map,
    Networking,
    Assistant,
    Info,
    Partners,
    Custom,
}

impl UiKind {
    pub const ALL: &[UiKind] = &[
        UiKind::Program,
        UiKind::Speakers,
        UiKind::Map,
        UiKind::Networking,
        UiKind::Assistant,
        UiKind::Info,
        UiKind::Partners,
        UiKind::Custom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            UiKind::Program => "program",
            UiKind::Speakers => "speakers",
            UiKind::Map => "map",
            UiKind::Networking => "networking",
            UiKind::Assistant => "assistant",
            UiKind::Info => "info",
            UiKind::Partners => "partners",
            UiKind::Custom => "custom",
        }
    }
}

impl fmt::Display for UiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UiKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UiKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownKind(s.to_string()))
    }
}

/// Grouping used by the module library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Core,
    Engagement,
    Information,
    Custom,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Core => "core",
            Category::Engagement => "engagement",
            Category::Information => "information",
            Category::Custom => "custom",
        }
    }
}

/// Editor widget of a configurable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Number,
    Toggle,
    Select,
    Radio,
    Multiselect,
    Slider,
    Color,
}

impl FieldType {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Textarea => "textarea",
            FieldType::Number => "number",
            FieldType::Toggle => "toggle",
            FieldType::Select => "select",
            FieldType::Radio => "radio",
            FieldType::Multiselect => "multiselect",
            FieldType::Slider => "slider",
            FieldType::Color => "color",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    pub label: String,
    pub value: String,
}

/// Show a field only while `field` currently equals `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conditional {
    pub field: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleField {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional: Option<Conditional>,
}

impl ModuleField {
    fn new(id: &str, label: &str, field_type: FieldType, default_value: Option<Value>) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            field_type,
            default_value,
            options: Vec::new(),
            min: None,
            max: None,
            step: None,
            placeholder: None,
            description: None,
            required: false,
            is_premium: false,
            conditional: None,
        }
    }

    pub fn toggle(id: &str, label: &str, default: bool) -> Self {
        Self::new(id, label, FieldType::Toggle, Some(Value::Bool(default)))
    }

    pub fn text(id: &str, label: &str) -> Self {
        Self::new(id, label, FieldType::Text, None)
    }

    pub fn textarea(id: &str, label: &str) -> Self {
        Self::new(id, label, FieldType::Textarea, None)
    }

    pub fn color(id: &str, label: &str) -> Self {
        Self::new(id, label, FieldType::Color, None)
    }

    pub fn radio(id: &str, label: &str, default: &str, options: &[(&str, &str)]) -> Self {
        Self::new(id, label, FieldType::Radio, Some(json!(default))).with_options(options)
    }

    pub fn select(id: &str, label: &str, default: &str, options: &[(&str, &str)]) -> Self {
        Self::new(id, label, FieldType::Select, Some(json!(default))).with_options(options)
    }

    pub fn multiselect(id: &str, label: &str, options: &[(&str, &str)]) -> Self {
        Self::new(id, label, FieldType::Multiselect, None).with_options(options)
    }

    pub fn slider(id: &str, label: &str, default: i64, min: i64, max: i64, step: i64) -> Self {
        Self {
            min: Some(min as f64),
            max: Some(max as f64),
            step: Some(step as f64),
            ..Self::new(id, label, FieldType::Slider, Some(json!(default)))
        }
    }

    pub fn number(id: &str, label: &str, default: i64, min: i64, max: i64) -> Self {
        Self {
            min: Some(min as f64),
            max: Some(max as f64),
            ..Self::new(id, label, FieldType::Number, Some(json!(default)))
        }
    }

    fn with_options(mut self, options: &[(&str, &str)]) -> Self {
        self.options = options
            .iter()
            .map(|(label, value)| FieldOption {
                label: label.to_string(),
                value: value.to_string(),
            })
            .collect();
        self
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn premium(mut self) -> Self {
        self.is_premium = true;
        self
    }

    pub fn when(mut self, field: &str, value: Value) -> Self {
        self.conditional = Some(Conditional {
            field: field.to_string(),
            value,
        });
        self
    }

    /// Whether `value` is one of this field's declared options.
    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleTemplate {
    #[serde(rename = "type")]
    pub kind: UiKind,
    pub name: String,
    pub icon: String,
    pub description: String,
    pub category: Category,
    pub default_config: ConfigBag,
    pub fields: Vec<ModuleField>,
    pub is_premium: bool,
}

impl ModuleTemplate {
    fn new(
        kind: UiKind,
        name: &str,
        icon: &str,
        description: &str,
        category: Category,
        fields: Vec<ModuleField>,
    ) -> Self {
        // Defaults mirror each field's declared default.
        let default_config = fields
            .iter()
            .filter_map(|f| f.default_value.clone().map(|v| (f.id.clone(), v)))
            .collect();
        Self {
            kind,
            name: name.to_string(),
            icon: icon.to_string(),
            description: description.to_string(),
            category,
            default_config,
            fields,
            is_premium: false,
        }
    }

    fn with_default(mut self, key: &str, value: Value) -> Self {
        self.default_config.insert(key.to_string(), value);
        self
    }

    fn premium(mut self) -> Self {
        self.is_premium = true;
        self
    }

    pub fn field(&self, id: &str) -> Option<&ModuleField> {
        self.fields.iter().find(|f| f.id == id)
    }
}

static CATALOG: LazyLock<Vec<ModuleTemplate>> = LazyLock::new(build_catalog);

/// Every template, in library display order.
pub fn all_templates() -> &'static [ModuleTemplate] {
    &CATALOG
}

/// Template of a UI kind. `Custom` has none.
pub fn template(kind: UiKind) -> Option<&'static ModuleTemplate> {
    CATALOG.iter().find(|t| t.kind == kind)
}

/// Template for a kind string; `None` for anything unknown.
pub fn template_by_name(name: &str) -> Option<&'static ModuleTemplate> {
    name.parse::<UiKind>().ok().and_then(template)
}

/// Fields of a kind, empty when it has no template.
pub fn fields_for(kind: UiKind) -> &'static [ModuleField] {
    template(kind).map(|t| t.fields.as_slice()).unwrap_or(&[])
}

pub fn default_config(kind: UiKind) -> ConfigBag {
    template(kind)
        .map(|t| t.default_config.clone())
        .unwrap_or_default()
}

pub fn icon_for(kind: UiKind) -> &'static str {
    template(kind).map(|t| t.icon.as_str()).unwrap_or(FALLBACK_ICON)
}

pub fn category_for(kind: UiKind) -> Category {
    template(kind).map(|t| t.category).unwrap_or(Category::Custom)
}

fn build_catalog() -> Vec<ModuleTemplate> {
    vec![
        program_template(),
        speakers_template(),
        map_template(),
        networking_template(),
        assistant_template(),
        info_template(),
        partners_template(),
    ]
}

fn program_template() -> ModuleTemplate {
    ModuleTemplate::new(
        UiKind::Program,
        "Program",
        "Calendar",
        "Schedule of sessions and workshops with registration",
        Category::Core,
        vec![
            ModuleField::toggle("showFilters", "Show filters", true)
                .describe("Lets attendees filter sessions by category and tag"),
            ModuleField::toggle("showSearch", "Show search", true)
                .describe("Search across session titles and descriptions"),
            ModuleField::radio(
                "defaultView",
                "Default view",
                "list",
                &[("List", "list"), ("Grid", "grid"), ("Timeline", "timeline")],
            )
            .describe("How sessions are laid out when the module opens"),
            ModuleField::toggle("allowRegistration", "Allow registration", true)
                .describe("Attendees can register for sessions from the app"),
            ModuleField::toggle("showSpeakerPhotos", "Show speaker photos", true),
            ModuleField::toggle("showCapacity", "Show capacity", true)
                .describe("Displays registered / capacity"),
            ModuleField::toggle("groupByDay", "Group by day", true),
            ModuleField::toggle("showTags", "Show tags", true),
            ModuleField::toggle("enableFavorites", "Enable favorites", true)
                .describe("Attendees can bookmark sessions"),
            ModuleField::radio(
                "timeFormat",
                "Time format",
                "24h",
                &[("24-hour", "24h"), ("12-hour (AM/PM)", "12h")],
            ),
            ModuleField::toggle("enableNotifications", "Session reminders", false)
                .describe("Push a reminder before a session starts"),
        ],
    )
}

fn speakers_template() -> ModuleTemplate {
    ModuleTemplate::new(
        UiKind::Speakers,
        "Speakers",
        "Users",
        "Profiles of speakers, experts and guests",
        Category::Core,
        vec![
            ModuleField::radio(
                "displayStyle",
                "Display style",
                "grid",
                &[("Grid", "grid"), ("List", "list"), ("Carousel", "carousel")],
            ),
            ModuleField::slider("gridColumns", "Columns", 2, 2, 4, 1)
                .when("displayStyle", json!("grid")),
            ModuleField::toggle("showBio", "Show biography", true),
            ModuleField::toggle("showCompany", "Show company", true),
            ModuleField::toggle("showSocials", "Show social links", false)
                .describe("Links to the speaker's social profiles"),
            ModuleField::toggle("allowMessaging", "Allow messages", false)
                .describe("Attendees can message speakers"),
            ModuleField::toggle("showSessions", "Show sessions", true)
                .describe("The speaker's talks at this event"),
            ModuleField::toggle("enableSearch", "Enable search", true),
            ModuleField::toggle("enableFilters", "Enable filters", false)
                .describe("Filter by company, industry and topic"),
            ModuleField::select(
                "sortBy",
                "Sort by",
                "name",
                &[
                    ("Name", "name"),
                    ("Company", "company"),
                    ("Number of sessions", "sessions"),
                ],
            ),
        ],
    )
}

fn map_template() -> ModuleTemplate {
    ModuleTemplate::new(
        UiKind::Map,
        "Venue map",
        "Map",
        "Interactive map with zones, stages and navigation",
        Category::Core,
        vec![
            ModuleField::toggle("showLegend", "Show legend", true)
                .describe("Legend describing the map zones"),
            ModuleField::toggle("allowZoom", "Allow zoom", true),
            ModuleField::slider("defaultZoom", "Default zoom", 100, 50, 200, 10)
                .describe("Initial map scale, in percent"),
            ModuleField::toggle("showLabels", "Show labels", true).describe("Zone names on the map"),
            ModuleField::toggle("interactiveZones", "Interactive zones", true)
                .describe("Tapping a zone shows its details and sessions"),
            ModuleField::toggle("showCurrentLocation", "Show current location", false),
            ModuleField::toggle("show3DView", "3D view", false)
                .describe("Three-dimensional venue rendering")
                .premium(),
            ModuleField::toggle("enableNavigation", "Enable navigation", false)
                .describe("Route to a zone"),
            ModuleField::toggle("highlightActiveZones", "Highlight active zones", true)
                .describe("Zones with a running session are highlighted"),
        ],
    )
}

fn networking_template() -> ModuleTemplate {
    ModuleTemplate::new(
        UiKind::Networking,
        "Networking",
        "MessageCircle",
        "Attendee chat and AI-assisted contact matching",
        Category::Engagement,
        vec![
            ModuleField::toggle("enableChat", "Enable chat", true)
                .describe("Direct messages between attendees"),
            ModuleField::toggle("enableMatching", "Enable matching", true)
                .describe("Suggests relevant people to meet"),
            ModuleField::radio(
                "matchingAlgorithm",
                "Matching algorithm",
                "interests",
                &[
                    ("By interests", "interests"),
                    ("By industry", "industry"),
                    ("Random", "random"),
                ],
            )
            .when("enableMatching", json!(true)),
            ModuleField::toggle("showOnlineStatus", "Show online status", true),
            ModuleField::toggle("allowGroupCreation", "Allow group chats", false),
            ModuleField::toggle("showInterests", "Show interests", true)
                .describe("Interests and topics on profiles"),
            ModuleField::toggle("enableScheduling", "Meeting scheduling", false),
            ModuleField::number(
                "maxConnectionsPerDay",
                "Max new contacts per day",
                50,
                10,
                200,
            )
            .describe("Limits spam"),
        ],
    )
}

fn assistant_template() -> ModuleTemplate {
    ModuleTemplate::new(
        UiKind::Assistant,
        "AI assistant",
        "Sparkles",
        "Smart helper for finding your way around the event",
        Category::Engagement,
        vec![
            ModuleField::toggle("enableAI", "Enable AI", true)
                .describe("AI-backed answers")
                .premium(),
            ModuleField::toggle("showQuickActions", "Quick actions", true)
                .describe("Common questions as one-tap buttons"),
            ModuleField::toggle("enableVoice", "Voice input", false),
            ModuleField::radio(
                "language",
                "Language",
                "ru",
                &[("Русский", "ru"), ("English", "en")],
            ),
            ModuleField::toggle("personalizedSuggestions", "Personalized suggestions", true),
            ModuleField::toggle("contextAware", "Context awareness", true)
                .describe("Takes the current location and time into account"),
            ModuleField::toggle("showFAQ", "Show FAQ", true),
        ],
    )
    .premium()
}

fn info_template() -> ModuleTemplate {
    ModuleTemplate::new(
        UiKind::Info,
        "Information",
        "Info",
        "Venue, transport and contact details",
        Category::Information,
        vec![
            ModuleField::toggle("showVenue", "Show venue", true),
            ModuleField::toggle("showSchedule", "Show schedule", true),
            ModuleField::toggle("showFAQ", "Show FAQ", true),
            ModuleField::toggle("showContacts", "Show contacts", true),
            ModuleField::toggle("showWiFi", "Show Wi-Fi", true)
                .describe("Wi-Fi network at the venue"),
            ModuleField::toggle("showTransport", "Show transport", true)
                .describe("How to get to the venue"),
            ModuleField::toggle("showAccommodation", "Show accommodation", false)
                .describe("Nearby hotels"),
            ModuleField::toggle("showEmergency", "Emergency contacts", true),
        ],
    )
    .with_default("customSections", json!([]))
}

fn partners_template() -> ModuleTemplate {
    ModuleTemplate::new(
        UiKind::Partners,
        "Partners",
        "Briefcase",
        "Event partners and sponsors",
        Category::Information,
        vec![
            ModuleField::radio(
                "displayStyle",
                "Display style",
                "grid",
                &[
                    ("Grid", "grid"),
                    ("Carousel", "carousel"),
                    ("Masonry", "masonry"),
                ],
            ),
            ModuleField::slider("gridColumns", "Columns", 3, 2, 4, 1)
                .when("displayStyle", json!("grid")),
            ModuleField::toggle("showTiers", "Show tiers", true)
                .describe("General, gold, silver partner and so on"),
            ModuleField::toggle("showDescription", "Show description", true),
            ModuleField::toggle("allowClick", "Allow click-through", true)
                .describe("Opens partner details or website"),
            ModuleField::toggle("showLogo", "Show logo", true),
            ModuleField::toggle("showBooth", "Show booth", false)
                .describe("Booth number in the exhibition area"),
            ModuleField::toggle("enableSearch", "Enable search", false),
        ],
    )
}
