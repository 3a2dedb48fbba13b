//! Admin console: events and the module builder.

use chrono::{DateTime, Utc};
use companion_core::ValidationError;
use companion_core::builder::{BuilderError, ModuleBuilder};
use companion_core::fields;
use companion_core::models::{EventCreate, EventStatus, EventUpdate, datetime};
use companion_core::templates::{self, UiKind};

use super::{Context, confirm, templates::describe_field};
use crate::cli::EventArg;
use crate::{Error, Result};

fn parse_date(field: &str, raw: &str) -> Result<DateTime<Utc>> {
    datetime::parse(raw).ok_or_else(|| {
        ValidationError::InvalidValue {
            field: field.to_string(),
            reason: format!("expected RFC 3339 or YYYY-MM-DDTHH:MM:SS, got '{raw}'"),
        }
        .into()
    })
}

fn parse_opt_date(field: &str, raw: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    raw.map(|r| parse_date(field, r)).transpose()
}

// -- events ---------------------------------------------------------------

pub async fn events(ctx: &Context) -> Result<()> {
    let list = ctx.client.admin_events().await?;
    if ctx.emit_json(&list)? {
        return Ok(());
    }
    println!("{} events", list.total);
    for event in &list.items {
        println!(
            "{}  {:<9} {}  {}",
            event.id,
            event.status.as_str(),
            event.date_start.format("%Y-%m-%d"),
            event.title
        );
    }
    Ok(())
}

pub struct EventFields<'a> {
    pub title: Option<&'a str>,
    pub start: Option<&'a str>,
    pub end: Option<&'a str>,
    pub description: Option<&'a str>,
    pub location: Option<&'a str>,
    pub status: Option<&'a str>,
}

pub async fn create_event(ctx: &Context, input: EventFields<'_>) -> Result<()> {
    let create = EventCreate {
        title: input.title.unwrap_or_default().to_string(),
        description: input.description.map(str::to_string),
        date_start: parse_date("start", input.start.unwrap_or_default())?,
        date_end: parse_date("end", input.end.unwrap_or_default())?,
        location: input.location.map(str::to_string),
        status: input.status.unwrap_or("upcoming").parse::<EventStatus>()?,
    };
    let event = ctx.client.admin_create_event(&create).await?;
    if !ctx.emit_json(&event)? {
        println!("Created event {} ({}).", event.title, event.id);
    }
    Ok(())
}

pub async fn update_event(ctx: &Context, id: &str, input: EventFields<'_>) -> Result<()> {
    let update = EventUpdate {
        title: input.title.map(str::to_string),
        description: input.description.map(str::to_string),
        date_start: parse_opt_date("start", input.start)?,
        date_end: parse_opt_date("end", input.end)?,
        location: input.location.map(str::to_string),
        status: input.status.map(str::parse::<EventStatus>).transpose()?,
    };
    if update.is_empty() {
        return Err(Error::Custom("Nothing to update".to_string()));
    }
    let event = ctx.client.admin_update_event(id, &update).await?;
    if !ctx.emit_json(&event)? {
        println!("Updated event {} ({}).", event.title, event.id);
    }
    Ok(())
}

pub async fn delete_event(ctx: &Context, id: &str, yes: bool) -> Result<()> {
    if !yes && !confirm(&format!("Delete event {id} and all of its content?"))? {
        println!("Cancelled.");
        return Ok(());
    }
    ctx.client.admin_delete_event(id).await?;
    println!("Deleted event {id}.");
    Ok(())
}

pub async fn module_types(ctx: &Context) -> Result<()> {
    let types = ctx.client.admin_module_types().await?;
    if ctx.emit_json(&types)? {
        return Ok(());
    }
    for t in &types {
        println!(
            "{:<13} -> {:<11} {}",
            t.kind.as_str(),
            t.kind.to_ui().as_str(),
            t.name
        );
    }
    Ok(())
}

// -- module builder -------------------------------------------------------

async fn load_builder(ctx: &Context, arg: &EventArg) -> Result<ModuleBuilder> {
    let event_id = ctx.event_id(arg).await?;
    let mut builder = ModuleBuilder::new(event_id);
    builder.load(&ctx.client).await?;
    Ok(builder)
}

/// Module by id, or by 1-based position in the builder list.
fn resolve_module(builder: &ModuleBuilder, selector: &str) -> Result<String> {
    if builder.get(selector).is_some() {
        return Ok(selector.to_string());
    }
    selector.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| builder.modules().get(i))
        .map(|m| m.id.clone())
        .ok_or_else(|| BuilderError::ModuleNotFound(selector.to_string()).into())
}

fn print_modules(builder: &ModuleBuilder) {
    if builder.is_empty() {
        println!("No modules. Add one with `companion admin add <kind>`.");
    }
    for (i, m) in builder.modules().iter().enumerate() {
        let state = if m.enabled { "on " } else { "off" };
        println!(
            "{:>2}. [{}] {} {:<11} {}  {}",
            i + 1,
            state,
            m.icon,
            m.kind.as_str(),
            m.name,
            m.id
        );
    }
}

pub async fn modules(ctx: &Context, arg: &EventArg) -> Result<()> {
    let builder = load_builder(ctx, arg).await?;
    if ctx.emit_json(builder.modules())? {
        return Ok(());
    }
    print_modules(&builder);
    Ok(())
}

pub async fn show_fields(ctx: &Context, arg: &EventArg, module: &str, all: bool) -> Result<()> {
    let builder = load_builder(ctx, arg).await?;
    let id = resolve_module(&builder, module)?;
    let Some(module) = builder.get(&id) else {
        return Err(BuilderError::ModuleNotFound(id).into());
    };
    if ctx.emit_json(&module.config)? {
        return Ok(());
    }
    println!("{} {} ({})", module.icon, module.name, module.kind);
    if module.fields.is_empty() {
        println!("  free-form config: {}", serde_json::to_string(&module.config)?);
    }
    for field in &module.fields {
        let visible = fields::is_visible(field, &module.fields, &module.config);
        if !visible && !all {
            continue;
        }
        let value = fields::resolve_value(field, &module.config);
        let hidden = if visible { "" } else { " (hidden)" };
        println!("  {}{}", describe_field(field, &value), hidden);
    }
    Ok(())
}

pub async fn toggle(ctx: &Context, arg: &EventArg, module: &str) -> Result<()> {
    let mut builder = load_builder(ctx, arg).await?;
    let id = resolve_module(&builder, module)?;
    let enabled = builder.toggle_persisted(&ctx.client, &id).await?;
    let name = builder.get(&id).map(|m| m.name.as_str()).unwrap_or(&id);
    println!("{name} is now {}.", if enabled { "enabled" } else { "disabled" });
    Ok(())
}

pub async fn rename(ctx: &Context, arg: &EventArg, module: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required("name").into());
    }
    let mut builder = load_builder(ctx, arg).await?;
    let id = resolve_module(&builder, module)?;
    builder.rename_persisted(&ctx.client, &id, name.trim()).await?;
    println!("Renamed {id} to {}.", name.trim());
    Ok(())
}

pub async fn move_module(ctx: &Context, arg: &EventArg, from: usize, to: usize) -> Result<()> {
    let mut builder = load_builder(ctx, arg).await?;
    let len = builder.len();
    let index = |pos: usize| {
        pos.checked_sub(1)
            .ok_or(BuilderError::IndexOutOfRange { index: pos, len })
    };
    builder.reorder(index(from)?, index(to)?)?;
    builder.save(&ctx.client).await?;
    print_modules(&builder);
    Ok(())
}

pub async fn add(ctx: &Context, arg: &EventArg, kind: &str) -> Result<()> {
    let kind: UiKind = kind.parse()?;
    let Some(template) = templates::template(kind) else {
        return Err(Error::Custom(format!(
            "No template for '{kind}'; choose one of: {}",
            templates::all_templates()
                .iter()
                .map(|t| t.kind.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )));
    };
    let mut builder = load_builder(ctx, arg).await?;
    if !builder.available_templates().iter().any(|t| t.kind == kind) {
        return Err(Error::Custom(format!(
            "This event already has a {kind} module"
        )));
    }
    let id = builder.add_persisted(&ctx.client, template).await?;
    println!("Added {} ({id}).", template.name);
    Ok(())
}

pub async fn remove(ctx: &Context, arg: &EventArg, module: &str, yes: bool) -> Result<()> {
    let mut builder = load_builder(ctx, arg).await?;
    let id = resolve_module(&builder, module)?;
    let name = builder.get(&id).map(|m| m.name.clone()).unwrap_or_else(|| id.clone());
    if !yes && !confirm(&format!("Remove module {name}?"))? {
        println!("Cancelled.");
        return Ok(());
    }
    builder.remove_persisted(&ctx.client, &id).await?;
    println!("Removed {name}.");
    Ok(())
}

pub async fn set(
    ctx: &Context,
    arg: &EventArg,
    module: &str,
    field_id: &str,
    raw: &str,
) -> Result<()> {
    let mut builder = load_builder(ctx, arg).await?;
    let id = resolve_module(&builder, module)?;
    let Some(module) = builder.get(&id) else {
        return Err(BuilderError::ModuleNotFound(id).into());
    };
    let value = match module.field(field_id) {
        Some(field) => {
            if !fields::is_visible(field, &module.fields, &module.config) {
                log::warn!(
                    "{field_id} is hidden by its condition; the value is stored but not shown"
                );
            }
            fields::parse_input(field, raw)?
        }
        // Template-less modules keep a free-form config.
        None if module.fields.is_empty() => serde_json::from_str(raw)
            .unwrap_or_else(|_| serde_json::Value::String(raw.to_string())),
        None => {
            return Err(ValidationError::UnknownField {
                kind: module.kind.to_string(),
                field: field_id.to_string(),
            }
            .into());
        }
    };
    builder.update_field_value(&id, field_id, value.clone())?;
    builder.save(&ctx.client).await?;
    println!("{field_id} = {value}");
    Ok(())
}
