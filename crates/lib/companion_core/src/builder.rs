//! Module builder: the admin console's editable, ordered module list.
//!
//! Local operations (`reorder`, `toggle`, `remove`, `update_field_value`,
//! `rename`, `add_from_template`) only touch in-memory state. The
//! `*_persisted` variants and [`ModuleBuilder::save`] push changes through a
//! [`ModuleStore`].
//!
//! Failure policy: toggle and remove are applied locally first and are not
//! rolled back when the store call fails, so the list may drift from the
//! server until the next [`ModuleBuilder::load`]. A failed toggle stays
//! marked as edited and goes out with the next `save`. A failed `save` leaves the
//! server partially updated; reload to recover.

use std::collections::HashSet;

use serde_json::Value;
use thiserror::Error;

use crate::adapter::{self, UiModule};
use crate::models::{Module, ModuleUpdate};
use crate::store::{ModuleStore, StoreError};
use crate::templates::{self, ModuleTemplate};
use crate::uuid::is_local_id;

#[derive(Debug, Error)]
pub enum BuilderError {
    #[error("Module not found: {0}")]
    ModuleNotFound(String),

    #[error("Position {index} is out of range for {len} modules")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("{0}")]
    Store(StoreError),
}

pub type BuilderResult<T> = Result<T, BuilderError>;

/// Move the element at `from` to `to` and renumber `order` to 1-based
/// positions.
pub fn reorder_in_place(modules: &mut Vec<UiModule>, from: usize, to: usize) -> BuilderResult<()> {
    let len = modules.len();
    for index in [from, to] {
        if index >= len {
            return Err(BuilderError::IndexOutOfRange { index, len });
        }
    }
    let moved = modules.remove(from);
    modules.insert(to, moved);
    renumber(modules);
    Ok(())
}

fn renumber(modules: &mut [UiModule]) {
    for (i, module) in modules.iter_mut().enumerate() {
        module.order = i as i32 + 1;
    }
}

/// Working state of one event's modules during an editing session.
#[derive(Debug, Clone)]
pub struct ModuleBuilder {
    event_id: String,
    modules: Vec<UiModule>,
    /// Modules whose config, title or `enabled` changed since the last
    /// load/save.
    edited: HashSet<String>,
}

impl ModuleBuilder {
    pub fn new(event_id: impl Into<String>) -> Self {
        Self {
            event_id: event_id.into(),
            modules: Vec::new(),
            edited: HashSet::new(),
        }
    }

    /// Builder seeded from server modules, kept in the given order.
    pub fn from_modules(event_id: impl Into<String>, modules: &[Module]) -> Self {
        let mut builder = Self::new(event_id);
        builder.replace_all(modules);
        builder
    }

    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn modules(&self) -> &[UiModule] {
        &self.modules
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&UiModule> {
        self.modules.iter().find(|m| m.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.modules.iter().position(|m| m.id == id)
    }

    /// Ids in display order, as submitted to the reorder endpoint.
    pub fn ordered_ids(&self) -> Vec<String> {
        self.modules.iter().map(|m| m.id.clone()).collect()
    }

    /// Enabled modules sorted by `order`, as the attendee preview shows them.
    pub fn enabled_in_order(&self) -> Vec<&UiModule> {
        let mut enabled: Vec<&UiModule> = self.modules.iter().filter(|m| m.enabled).collect();
        enabled.sort_by_key(|m| m.order);
        enabled
    }

    /// Templates whose kind is not on the list yet.
    pub fn available_templates(&self) -> Vec<&'static ModuleTemplate> {
        templates::all_templates()
            .iter()
            .filter(|t| !self.modules.iter().any(|m| m.kind == t.kind))
            .collect()
    }

    pub fn is_edited(&self, id: &str) -> bool {
        self.edited.contains(id)
    }

    pub fn has_unsaved_changes(&self) -> bool {
        !self.edited.is_empty() || self.modules.iter().any(|m| is_local_id(&m.id))
    }

    /// Replace the whole list with server state, dropping local edits.
    pub fn replace_all(&mut self, modules: &[Module]) {
        self.modules = adapter::to_ui_modules(modules);
        self.edited.clear();
    }

    pub fn reorder(&mut self, from: usize, to: usize) -> BuilderResult<()> {
        reorder_in_place(&mut self.modules, from, to)
    }

    /// Flip `enabled`; returns the new value.
    pub fn toggle(&mut self, id: &str) -> BuilderResult<bool> {
        let module = self.module_mut(id)?;
        module.enabled = !module.enabled;
        let enabled = module.enabled;
        self.edited.insert(id.to_string());
        Ok(enabled)
    }

    /// Remove a module. Confirmation is the caller's job.
    pub fn remove(&mut self, id: &str) -> BuilderResult<UiModule> {
        let index = self
            .position(id)
            .ok_or_else(|| BuilderError::ModuleNotFound(id.to_string()))?;
        self.edited.remove(id);
        Ok(self.modules.remove(index))
    }

    /// Write `value` at `field_id` in the module's config. Visibility rules
    /// are a rendering concern and do not block the write.
    pub fn update_field_value(
        &mut self,
        module_id: &str,
        field_id: &str,
        value: Value,
    ) -> BuilderResult<()> {
        let module = self.module_mut(module_id)?;
        module.config.insert(field_id.to_string(), value);
        self.edited.insert(module_id.to_string());
        Ok(())
    }

    pub fn rename(&mut self, id: &str, name: impl Into<String>) -> BuilderResult<()> {
        let module = self.module_mut(id)?;
        module.name = name.into();
        self.edited.insert(id.to_string());
        Ok(())
    }

    /// Append a placeholder instantiated from `template`; returns its local id.
    pub fn add_from_template(&mut self, template: &ModuleTemplate) -> String {
        let module = adapter::from_template(template, self.modules.len() as i32 + 1);
        let id = module.id.clone();
        self.modules.push(module);
        id
    }

    pub async fn load<S: ModuleStore + ?Sized>(&mut self, store: &S) -> BuilderResult<()> {
        let modules = store
            .list_modules(&self.event_id)
            .await
            .map_err(BuilderError::Store)?;
        log::debug!("loaded {} modules for event {}", modules.len(), self.event_id);
        self.replace_all(&modules);
        Ok(())
    }

    /// Placeholders are only flipped locally; `save` creates them.
    pub async fn toggle_persisted<S: ModuleStore + ?Sized>(
        &mut self,
        store: &S,
        id: &str,
    ) -> BuilderResult<bool> {
        let had_edits = self.edited.contains(id);
        let enabled = self.toggle(id)?;
        if is_local_id(id) {
            return Ok(enabled);
        }
        let updated = store
            .update_module(id, &ModuleUpdate::enabled(enabled))
            .await
            .map_err(|e| {
                log::warn!("toggle of module {id} was not persisted: {e}");
                BuilderError::Store(e)
            })?;
        if !had_edits {
            self.edited.remove(id);
        }
        self.reconcile(id, &updated);
        Ok(updated.enabled)
    }

    pub async fn remove_persisted<S: ModuleStore + ?Sized>(
        &mut self,
        store: &S,
        id: &str,
    ) -> BuilderResult<UiModule> {
        let removed = self.remove(id)?;
        if !is_local_id(id) {
            store.delete_module(id).await.map_err(|e| {
                log::warn!("delete of module {id} was not persisted: {e}");
                BuilderError::Store(e)
            })?;
        }
        Ok(removed)
    }

    /// Send the new title first; the local name changes only on success.
    /// Placeholders are renamed locally and created by `save`.
    pub async fn rename_persisted<S: ModuleStore + ?Sized>(
        &mut self,
        store: &S,
        id: &str,
        name: &str,
    ) -> BuilderResult<()> {
        if is_local_id(id) {
            return self.rename(id, name);
        }
        self.module_mut(id)?;
        store
            .update_module(id, &ModuleUpdate::title(name))
            .await
            .map_err(BuilderError::Store)?;
        if let Ok(module) = self.module_mut(id) {
            module.name = name.to_string();
        }
        Ok(())
    }

    /// Create a module from `template` on the server and append it.
    /// Returns the server-assigned id. The placeholder is dropped on failure.
    pub async fn add_persisted<S: ModuleStore + ?Sized>(
        &mut self,
        store: &S,
        template: &ModuleTemplate,
    ) -> BuilderResult<String> {
        let placeholder_id = self.add_from_template(template);
        let payload = match self.get(&placeholder_id) {
            Some(module) => adapter::to_server_module(module, &self.event_id),
            None => return Err(BuilderError::ModuleNotFound(placeholder_id)),
        };
        match store.create_module(&payload).await {
            Ok(created) => {
                let id = created.id.clone();
                self.replace_module(&placeholder_id, &created);
                Ok(id)
            }
            Err(e) => {
                self.modules.retain(|m| m.id != placeholder_id);
                Err(BuilderError::Store(e))
            }
        }
    }

    /// Persist the whole session: create placeholders, update edited
    /// modules, then submit the full ordered id list.
    pub async fn save<S: ModuleStore + ?Sized>(&mut self, store: &S) -> BuilderResult<()> {
        renumber(&mut self.modules);

        for index in 0..self.modules.len() {
            let module = &self.modules[index];
            if is_local_id(&module.id) {
                let payload = adapter::to_server_module(module, &self.event_id);
                let created = store
                    .create_module(&payload)
                    .await
                    .map_err(BuilderError::Store)?;
                let local_id = std::mem::replace(&mut self.modules[index].id, created.id.clone());
                self.edited.remove(&local_id);
            } else if self.edited.contains(&module.id) {
                let id = module.id.clone();
                store
                    .update_module(&id, &adapter::to_module_update(module))
                    .await
                    .map_err(BuilderError::Store)?;
                self.edited.remove(&id);
            }
        }

        store
            .reorder_modules(&self.event_id, &self.ordered_ids())
            .await
            .map_err(BuilderError::Store)?;
        log::debug!("saved {} modules for event {}", self.modules.len(), self.event_id);
        Ok(())
    }

    fn module_mut(&mut self, id: &str) -> BuilderResult<&mut UiModule> {
        self.modules
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| BuilderError::ModuleNotFound(id.to_string()))
    }

    /// Take the server's view of a module. Unsaved local edits keep their
    /// config and title; only `enabled` is taken from the server then.
    fn reconcile(&mut self, id: &str, server: &Module) {
        let edited = self.edited.contains(id);
        if let Ok(module) = self.module_mut(id) {
            if edited {
                module.enabled = server.enabled;
            } else {
                let order = module.order;
                *module = adapter::to_ui_module(server);
                module.order = order;
            }
        }
    }

    fn replace_module(&mut self, id: &str, server: &Module) {
        if let Ok(module) = self.module_mut(id) {
            let order = module.order;
            *module = adapter::to_ui_module(server);
            module.order = order;
        }
    }
}
