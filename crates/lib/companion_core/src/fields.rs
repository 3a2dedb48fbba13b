//! Field value resolution and visibility.
//!
//! A rendered value follows the chain: explicit config value → the field's
//! declared default → a baseline for the field type. `null` counts as
//! missing. Visibility never gates writes; a hidden field keeps whatever
//! value it had.

use serde_json::{Number, Value};

use crate::error::ValidationError;
use crate::models::ConfigBag;
use crate::templates::{FieldType, ModuleField};

/// Baseline for color fields without a value or default.
pub const DEFAULT_COLOR: &str = "#D32F2F";

/// Type-specific value used when neither config nor default provides one.
pub fn baseline(field: &ModuleField) -> Value {
    match field.field_type {
        FieldType::Text | FieldType::Textarea => Value::String(String::new()),
        FieldType::Toggle => Value::Bool(false),
        FieldType::Select | FieldType::Radio => field
            .options
            .first()
            .map(|o| Value::String(o.value.clone()))
            .unwrap_or_else(|| Value::String(String::new())),
        FieldType::Multiselect => Value::Array(Vec::new()),
        FieldType::Number => field
            .min
            .map(number)
            .unwrap_or_else(|| Value::String(String::new())),
        FieldType::Slider => number(field.min.unwrap_or(0.0)),
        FieldType::Color => Value::String(DEFAULT_COLOR.to_string()),
    }
}

/// The value a renderer shows for `field` given the module's config.
pub fn resolve_value(field: &ModuleField, config: &ConfigBag) -> Value {
    match config.get(&field.id) {
        Some(v) if !v.is_null() => v.clone(),
        _ => field
            .default_value
            .clone()
            .filter(|v| !v.is_null())
            .unwrap_or_else(|| baseline(field)),
    }
}

/// Whether `field` is shown, given its siblings and the current config.
///
/// The referenced field is compared by its resolved value, so an unset
/// toggle that defaults to `true` satisfies a `true` condition.
pub fn is_visible(field: &ModuleField, siblings: &[ModuleField], config: &ConfigBag) -> bool {
    let Some(cond) = &field.conditional else {
        return true;
    };
    let current = match siblings.iter().find(|f| f.id == cond.field) {
        Some(sibling) => resolve_value(sibling, config),
        None => config.get(&cond.field).cloned().unwrap_or(Value::Null),
    };
    current == cond.value
}

/// Fields to render, in declaration order.
pub fn visible_fields<'a>(fields: &'a [ModuleField], config: &ConfigBag) -> Vec<&'a ModuleField> {
    fields
        .iter()
        .filter(|f| is_visible(f, fields, config))
        .collect()
}

/// Turn textual input (CLI argument, form value) into a typed config value.
pub fn parse_input(field: &ModuleField, raw: &str) -> Result<Value, ValidationError> {
    let invalid = |reason: String| ValidationError::InvalidValue {
        field: field.id.clone(),
        reason,
    };
    match field.field_type {
        FieldType::Text | FieldType::Textarea => Ok(Value::String(raw.to_string())),
        FieldType::Color => {
            let hex = raw.strip_prefix('#').unwrap_or("");
            if (hex.len() == 6 || hex.len() == 3) && hex.chars().all(|c| c.is_ascii_hexdigit()) {
                Ok(Value::String(raw.to_string()))
            } else {
                Err(invalid(format!("expected a #RRGGBB color, got '{raw}'")))
            }
        }
        FieldType::Toggle => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "on" | "yes" | "1" => Ok(Value::Bool(true)),
            "false" | "off" | "no" | "0" => Ok(Value::Bool(false)),
            other => Err(invalid(format!("expected true or false, got '{other}'"))),
        },
        FieldType::Select | FieldType::Radio => {
            let value = raw.trim();
            if field.has_option(value) {
                Ok(Value::String(value.to_string()))
            } else {
                Err(invalid(format!(
                    "expected one of [{}], got '{value}'",
                    option_list(field)
                )))
            }
        }
        FieldType::Multiselect => {
            let mut picked = Vec::new();
            for value in raw.split(',').map(str::trim).filter(|v| !v.is_empty()) {
                if !field.has_option(value) {
                    return Err(invalid(format!(
                        "expected values from [{}], got '{value}'",
                        option_list(field)
                    )));
                }
                if !picked.iter().any(|p: &Value| p == value) {
                    picked.push(Value::String(value.to_string()));
                }
            }
            Ok(Value::Array(picked))
        }
        FieldType::Number | FieldType::Slider => {
            let n: f64 = raw
                .trim()
                .parse()
                .map_err(|_| invalid(format!("expected a number, got '{raw}'")))?;
            if let Some(min) = field.min
                && n < min
            {
                return Err(invalid(format!("must be at least {min}")));
            }
            if let Some(max) = field.max
                && n > max
            {
                return Err(invalid(format!("must be at most {max}")));
            }
            Ok(number(n))
        }
    }
}

fn option_list(field: &ModuleField) -> String {
    field
        .options
        .iter()
        .map(|o| o.value.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Integral floats become JSON integers so `2.0` compares equal to `2`.
fn number(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Value::Number(Number::from(n as i64))
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}
