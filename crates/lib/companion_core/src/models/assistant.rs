//! Assistant chat wire models.

use serde::{Deserialize, Serialize};

/// Upper bound the server enforces on a chat message.
pub const MESSAGE_MAX_CHARS: usize = 2000;

/// Optional narrowing of a question to a module or program item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
}

/// `POST /assistant/chat` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub event_id: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ChatContext>,
}

/// Follow-up action suggested alongside an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssistantAction {
    OpenMap {
        #[serde(default)]
        label: Option<String>,
        location_id: String,
    },
    OpenAdmin {
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        url: Option<String>,
    },
}

impl AssistantAction {
    /// Button label, falling back to a generic one per action type.
    pub fn label(&self) -> &str {
        match self {
            AssistantAction::OpenMap { label, .. } => label.as_deref().unwrap_or("Show on map"),
            AssistantAction::OpenAdmin { label, .. } => {
                label.as_deref().unwrap_or("Open admin console")
            }
        }
    }
}

/// `POST /assistant/chat` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub actions: Vec<AssistantAction>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_typed_actions() {
        let resp: ChatResponse = serde_json::from_value(json!({
            "response": "The workshop is in Hall B.",
            "actions": [
                { "type": "open_map", "location_id": "l-7" },
                { "type": "open_admin", "label": "Edit", "url": "/admin" },
            ],
        }))
        .expect("decode");
        assert!(resp.sources.is_empty());
        assert_eq!(
            resp.actions[0],
            AssistantAction::OpenMap {
                label: None,
                location_id: "l-7".into()
            }
        );
        assert_eq!(resp.actions[0].label(), "Show on map");
        assert_eq!(resp.actions[1].label(), "Edit");
    }

    #[test]
    fn request_omits_empty_context() {
        let req = ChatRequest {
            event_id: "e1".into(),
            message: "Where is lunch?".into(),
            context: None,
        };
        let value = serde_json::to_value(&req).expect("encode");
        assert!(value.get("context").is_none());
    }
}
