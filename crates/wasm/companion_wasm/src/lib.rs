//! WebAssembly bindings for the module builder.
//!
//! Every export takes and returns JSON strings, so the host keeps its own
//! types and only the mapping rules live here.

use companion_core::adapter::{self, UiModule};
use companion_core::builder::reorder_in_place;
use companion_core::models::{ConfigBag, Module};
use companion_core::templates::{self, ModuleField};
use companion_core::{dashboard, fields};
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

type Inner = Result<String, String>;

fn parse<T: DeserializeOwned>(what: &str, json: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("invalid {what}: {e}"))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Inner {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

fn export(result: Inner) -> Result<String, JsError> {
    result.map_err(|e| JsError::new(&e))
}

/// Returns the version of the companion core.
#[wasm_bindgen]
pub fn version() -> String {
    companion_core::version().to_string()
}

fn module_templates_json() -> Inner {
    to_json(templates::all_templates())
}

/// The template catalog.
#[wasm_bindgen(js_name = moduleTemplates)]
pub fn module_templates() -> Result<String, JsError> {
    export(module_templates_json())
}

fn adapt_modules_json(modules: &str) -> Inner {
    let modules: Vec<Module> = parse("modules", modules)?;
    to_json(&adapter::to_ui_modules(&modules))
}

/// Server modules to UI modules.
#[wasm_bindgen(js_name = adaptModules)]
pub fn adapt_modules(modules: &str) -> Result<String, JsError> {
    export(adapt_modules_json(modules))
}

fn to_server_module_json(module: &str, event_id: &str) -> Inner {
    let module: UiModule = parse("module", module)?;
    to_json(&adapter::to_server_module(&module, event_id))
}

/// UI module to a server create payload.
#[wasm_bindgen(js_name = toServerModule)]
pub fn to_server_module(module: &str, event_id: &str) -> Result<String, JsError> {
    export(to_server_module_json(module, event_id))
}

fn reorder_modules_json(modules: &str, from: usize, to: usize) -> Inner {
    let mut modules: Vec<UiModule> = parse("modules", modules)?;
    reorder_in_place(&mut modules, from, to).map_err(|e| e.to_string())?;
    to_json(&modules)
}

/// Move one module and renumber `order` from 1.
#[wasm_bindgen(js_name = reorderModules)]
pub fn reorder_modules(modules: &str, from: usize, to: usize) -> Result<String, JsError> {
    export(reorder_modules_json(modules, from, to))
}

fn resolve_field_value_json(field: &str, config: &str) -> Inner {
    let field: ModuleField = parse("field", field)?;
    let config: ConfigBag = parse("config", config)?;
    to_json(&fields::resolve_value(&field, &config))
}

#[wasm_bindgen(js_name = resolveFieldValue)]
pub fn resolve_field_value(field: &str, config: &str) -> Result<String, JsError> {
    export(resolve_field_value_json(field, config))
}

fn visible_fields_json(field_list: &str, config: &str) -> Inner {
    let field_list: Vec<ModuleField> = parse("fields", field_list)?;
    let config: ConfigBag = parse("config", config)?;
    let ids: Vec<&str> = fields::visible_fields(&field_list, &config)
        .into_iter()
        .map(|f| f.id.as_str())
        .collect();
    to_json(&ids)
}

/// Ids of the fields to render.
#[wasm_bindgen(js_name = visibleFields)]
pub fn visible_fields(field_list: &str, config: &str) -> Result<String, JsError> {
    export(visible_fields_json(field_list, config))
}

fn dashboard_tiles_json(modules: &str) -> Inner {
    let modules: Vec<Module> = parse("modules", modules)?;
    to_json(&dashboard::tiles(&modules))
}

#[wasm_bindgen(js_name = dashboardTiles)]
pub fn dashboard_tiles(modules: &str) -> Result<String, JsError> {
    export(dashboard_tiles_json(modules))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn value(s: &str) -> Value {
        serde_json::from_str(s).expect("json")
    }

    #[test]
    fn catalog_is_exported() {
        let catalog = value(&module_templates_json().expect("catalog"));
        assert_eq!(catalog.as_array().map(Vec::len), Some(templates::all_templates().len()));
    }

    #[test]
    fn adapt_then_write_back() {
        let server = json!([{ "id": "m1", "event_id": "e1", "type": "messages",
                              "title": "Meet", "order": 1, "config": { "enableChat": false } }]);
        let ui = value(&adapt_modules_json(&server.to_string()).expect("adapt"));
        assert_eq!(ui[0]["type"], "networking");
        assert_eq!(ui[0]["config"]["enableChat"], false);

        let create = value(&to_server_module_json(&ui[0].to_string(), "e1").expect("write"));
        assert_eq!(create["type"], "messages");
        assert_eq!(create["event_id"], "e1");
    }

    #[test]
    fn reorder_renumbers() {
        let server = json!([
            { "id": "a", "event_id": "e1", "type": "program", "title": "A", "order": 1 },
            { "id": "b", "event_id": "e1", "type": "map", "title": "B", "order": 2 },
            { "id": "c", "event_id": "e1", "type": "news", "title": "C", "order": 3 },
        ]);
        let ui = adapt_modules_json(&server.to_string()).expect("adapt");
        let moved = value(&reorder_modules_json(&ui, 2, 0).expect("reorder"));
        let ids: Vec<&str> = moved
            .as_array()
            .expect("array")
            .iter()
            .map(|m| m["id"].as_str().expect("id"))
            .collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        assert_eq!(moved[0]["order"], 1);
        assert!(reorder_modules_json(&ui, 0, 3).is_err());
    }

    #[test]
    fn field_helpers() {
        let speakers = templates::template(templates::UiKind::Speakers).expect("speakers");
        let columns = to_json(speakers.field("gridColumns").expect("field")).expect("json");
        assert_eq!(resolve_field_value_json(&columns, "{}").expect("value"), "2");

        let all = to_json(&speakers.fields).expect("json");
        let visible = value(
            &visible_fields_json(&all, r#"{"displayStyle":"list"}"#).expect("visible"),
        );
        assert!(!visible.as_array().expect("array").contains(&json!("gridColumns")));
    }

    #[test]
    fn bad_input_is_an_error() {
        assert!(adapt_modules_json("not json").unwrap_err().starts_with("invalid modules"));
    }

    #[test]
    fn tiles_skip_disabled() {
        let server = json!([
            { "id": "a", "event_id": "e1", "type": "program", "title": "A", "order": 1 },
            { "id": "b", "event_id": "e1", "type": "map", "title": "B", "order": 2, "enabled": false },
        ]);
        let tiles = value(&dashboard_tiles_json(&server.to_string()).expect("tiles"));
        assert_eq!(tiles.as_array().map(Vec::len), Some(1));
        assert_eq!(tiles[0]["moduleId"], "a");
    }
}
