//! # companion_core
//!
//! Core domain logic for the event companion client.
//!
//! - [`models`] — wire types exchanged with the companion API
//! - [`templates`] — compiled-in catalog of module templates
//! - [`adapter`] — server module ↔ UI module mapping
//! - [`fields`] — field value resolution and visibility
//! - [`builder`] — editable, ordered module list for the admin console
//! - [`dashboard`] — dashboard tile projection
//! - [`conversation`] — assistant chat transcript

pub mod adapter;
pub mod builder;
pub mod conversation;
pub mod dashboard;
pub mod error;
pub mod fields;
pub mod models;
pub mod store;
pub mod templates;
pub mod uuid;

pub use error::ValidationError;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
