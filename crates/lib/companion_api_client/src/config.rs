//! Client configuration.

use url::Url;

use crate::error::{ApiError, ApiResult};

/// Base URL used when `COMPANION_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Configuration for the API client.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// API root; endpoint paths are appended to it.
    pub base_url: Url,
}

impl ClientConfig {
    /// Parse and normalize `base_url` (trailing slash kept so joins append).
    pub fn new(base_url: &str) -> ApiResult<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let url = Url::parse(&format!("{trimmed}/")).map_err(|source| ApiError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;
        Ok(Self { base_url: url })
    }

    /// Reads configuration from environment variables.
    ///
    /// | Variable            | Default                      |
    /// |---------------------|------------------------------|
    /// | `COMPANION_API_URL` | `http://localhost:8000/api`  |
    pub fn from_env() -> ApiResult<Self> {
        let url = std::env::var("COMPANION_API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self::new(&url)
    }

    /// Absolute URL of an endpoint path such as `/events/active`.
    pub fn endpoint(&self, path: &str) -> ApiResult<Url> {
        let relative = path.trim_start_matches('/');
        self.base_url
            .join(relative)
            .map_err(|source| ApiError::InvalidUrl {
                url: path.to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_keep_api_prefix() {
        let config = ClientConfig::new("http://localhost:8000/api").expect("url");
        assert_eq!(
            config.endpoint("/events/active").expect("join").as_str(),
            "http://localhost:8000/api/events/active"
        );
        let config = ClientConfig::new("http://example.com/api/").expect("url");
        assert_eq!(
            config.endpoint("modules/reorder/e1").expect("join").as_str(),
            "http://example.com/api/modules/reorder/e1"
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            ClientConfig::new("not a url"),
            Err(ApiError::InvalidUrl { .. })
        ));
    }
}
