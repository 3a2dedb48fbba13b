use companion_core::fields;
use companion_core::templates::{self, ModuleField, UiKind};
use serde_json::Value;

use crate::Result;

pub fn run(kind: Option<&str>, json: bool) -> Result<()> {
    match kind {
        None => list(json),
        Some(kind) => show(kind.parse()?, json),
    }
}

fn list(json: bool) -> Result<()> {
    let all = templates::all_templates();
    if json {
        println!("{}", serde_json::to_string_pretty(all)?);
        return Ok(());
    }
    for t in all {
        let premium = if t.is_premium { " [premium]" } else { "" };
        println!(
            "{} {:<11} {:<10} {}{}",
            t.icon,
            t.kind.as_str(),
            t.category.as_str(),
            t.description,
            premium
        );
    }
    Ok(())
}

fn show(kind: UiKind, json: bool) -> Result<()> {
    let Some(template) = templates::template(kind) else {
        println!("{kind}: no template, free-form config only");
        return Ok(());
    };
    if json {
        println!("{}", serde_json::to_string_pretty(template)?);
        return Ok(());
    }
    println!("{} {} ({})", template.icon, template.name, template.kind);
    println!("{}", template.description);
    for field in &template.fields {
        let value = fields::resolve_value(field, &template.default_config);
        println!("  {}", describe_field(field, &value));
    }
    Ok(())
}

/// One-line field summary: id, type, current value, label and condition.
pub fn describe_field(field: &ModuleField, value: &Value) -> String {
    let mut line = format!(
        "{:<22} {:<11} = {:<10} {}",
        field.id,
        field.field_type.as_str(),
        value.to_string(),
        field.label
    );
    if let Some(cond) = &field.conditional {
        line.push_str(&format!(" [when {} = {}]", cond.field, cond.value));
    }
    if field.is_premium {
        line.push_str(" [premium]");
    }
    line
}
