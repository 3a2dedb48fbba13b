//! Client error types.

use companion_core::ValidationError;
use serde_json::Value;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response; `message` is the server's explanation.
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid API URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Token store error: {0}")]
    TokenStore(#[from] std::io::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

/// Human-readable message for a failed response.
///
/// Uses `detail` when it is a string, the first `msg` of a validation
/// `detail` array, then `message`; otherwise `HTTP error <status>`.
pub fn error_message(status: u16, body: &str) -> String {
    let fallback = || format!("HTTP error {status}");
    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return fallback();
    };
    match json.get("detail") {
        Some(Value::String(detail)) if !detail.is_empty() => return detail.clone(),
        Some(Value::Array(items)) => {
            if let Some(msg) = items
                .iter()
                .find_map(|i| i.get("msg").and_then(Value::as_str))
            {
                return msg.to_string();
            }
        }
        _ => {}
    }
    json.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .unwrap_or_else(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_string_wins() {
        assert_eq!(
            error_message(404, r#"{"detail":"Event not found"}"#),
            "Event not found"
        );
    }

    #[test]
    fn validation_detail_array() {
        let body = r#"{"detail":[{"loc":["body","message"],"msg":"field required"}]}"#;
        assert_eq!(error_message(422, body), "field required");
    }

    #[test]
    fn message_then_status_fallback() {
        assert_eq!(error_message(400, r#"{"message":"Bad"}"#), "Bad");
        assert_eq!(error_message(502, "<html>bad gateway</html>"), "HTTP error 502");
        assert_eq!(error_message(500, r#"{"detail":""}"#), "HTTP error 500");
    }

    #[test]
    fn status_helpers() {
        let err = ApiError::Http {
            status: 404,
            message: "No active event".into(),
        };
        assert!(err.is_not_found());
        assert!(!err.is_unauthorized());
        assert_eq!(err.to_string(), "No active event");
    }
}
