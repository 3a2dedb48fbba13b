//! # companion_api_client
//!
//! Typed HTTP client for the event companion API.
//!
//! - [`ApiClient`] — one method per endpoint, bearer credential attached
//! - [`ClientConfig`] — base URL, from `COMPANION_API_URL`
//! - [`credential`] — [`Credential`] plus file and in-memory [`TokenStore`]s
//!
//! `ApiClient` implements [`companion_core::store::ModuleStore`], so it can
//! back a [`companion_core::builder::ModuleBuilder`] directly.

pub mod client;
pub mod config;
pub mod credential;
pub mod error;

pub use client::ApiClient;
pub use config::{ClientConfig, DEFAULT_API_URL};
pub use credential::{Credential, FileTokenStore, MemoryTokenStore, TOKEN_KEY, TokenStore};
pub use error::{ApiError, ApiResult};
