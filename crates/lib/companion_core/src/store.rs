//! Persistence seam for the module builder.
//!
//! The builder never talks HTTP itself; it goes through a [`ModuleStore`].
//! `companion_api_client::ApiClient` is the production implementation.

use async_trait::async_trait;

use crate::models::{Module, ModuleCreate, ModuleUpdate};

/// Error type a store reports. Rendered to the user as-is.
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

#[async_trait]
pub trait ModuleStore: Send + Sync {
    /// All modules of an event, including disabled ones.
    async fn list_modules(&self, event_id: &str) -> Result<Vec<Module>, StoreError>;

    async fn create_module(&self, module: &ModuleCreate) -> Result<Module, StoreError>;

    async fn update_module(
        &self,
        module_id: &str,
        update: &ModuleUpdate,
    ) -> Result<Module, StoreError>;

    async fn delete_module(&self, module_id: &str) -> Result<(), StoreError>;

    /// Persist the display order as the full ordered id list.
    async fn reorder_modules(&self, event_id: &str, module_ids: &[String])
    -> Result<(), StoreError>;
}
