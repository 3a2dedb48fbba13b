//! Assistant chat transcript.
//!
//! A [`Conversation`] holds the messages shown in a chat session. Sending is
//! split in two so the caller owns the I/O: [`Conversation::prepare`]
//! validates and records the user message and returns the request body, then
//! the caller reports the outcome through [`Conversation::record_reply`] or
//! [`Conversation::record_failure`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::models::{AssistantAction, ChatContext, ChatRequest, ChatResponse, MESSAGE_MAX_CHARS};

/// Shown in place of an answer when the chat request fails.
pub const FALLBACK_REPLY: &str =
    "Sorry, something went wrong. Please try again later or contact the organizers.";

const WELCOME_ID: &str = "welcome";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<AssistantAction>,
}

impl Message {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: ::uuid::Uuid::now_v7().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
            actions: Vec::new(),
        }
    }
}

/// Welcome line naming the event.
pub fn welcome_text(event_title: Option<&str>) -> String {
    let title = event_title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or("the event");
    format!(
        "Hi! I'm the AI assistant for \"{title}\". Ask me anything about the program, the speakers or finding your way around."
    )
}

#[derive(Debug, Clone)]
pub struct Conversation {
    event_id: String,
    messages: Vec<Message>,
    pending: bool,
}

impl Conversation {
    pub fn new(event_id: impl Into<String>, event_title: Option<&str>) -> Self {
        let mut welcome = Message::new(Role::Assistant, welcome_text(event_title));
        welcome.id = WELCOME_ID.to_string();
        Self {
            event_id: event_id.into(),
            messages: vec![welcome],
            pending: false,
        }
    }

    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// True between `prepare` and the matching `record_*` call.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Validate `input`, append it as a user message and build the request.
    pub fn prepare(
        &mut self,
        input: &str,
        context: Option<ChatContext>,
    ) -> Result<ChatRequest, ValidationError> {
        let request = build_request(&self.event_id, input, context)?;
        self.messages
            .push(Message::new(Role::User, request.message.clone()));
        self.pending = true;
        Ok(request)
    }

    pub fn record_reply(&mut self, reply: ChatResponse) -> &Message {
        let mut message = Message::new(Role::Assistant, reply.response);
        message.actions = reply.actions;
        self.push_reply(message)
    }

    pub fn record_failure(&mut self) -> &Message {
        self.push_reply(Message::new(Role::Assistant, FALLBACK_REPLY))
    }

    fn push_reply(&mut self, message: Message) -> &Message {
        self.pending = false;
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }
}

/// Build a chat request, trimming the message and enforcing its length.
pub fn build_request(
    event_id: &str,
    input: &str,
    context: Option<ChatContext>,
) -> Result<ChatRequest, ValidationError> {
    let message = input.trim();
    if message.is_empty() {
        return Err(ValidationError::Required("message"));
    }
    if message.chars().count() > MESSAGE_MAX_CHARS {
        return Err(ValidationError::TooLong {
            field: "message",
            max: MESSAGE_MAX_CHARS,
        });
    }
    Ok(ChatRequest {
        event_id: event_id.to_string(),
        message: message.to_string(),
        context: context.filter(|c| c.module_id.is_some() || c.item_id.is_some()),
    })
}
