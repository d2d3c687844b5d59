//! Coerce loosely shaped tray JSON into the current [`Tray`] schema.
//!
//! Every field gets its own guard that either accepts the stored value or falls
//! back to a default. Only `name` can reject a record.

use serde_json::{Map, Number, Value};

use crate::error::{Result, TrayError};
use crate::model::{FlexDirection, Tray};
use crate::utils::{Clock, SystemClock};

pub const DEFAULT_BORDER_COLOR: &str = "#000000";

/// Normalize a record using the system clock for a missing `lastModified`.
///
/// Returns `None` when the record has no usable name and should be discarded.
pub fn normalize_tray(record: &Map<String, Value>) -> Option<Tray> {
    normalize_tray_with(record, &SystemClock)
}

pub fn normalize_tray_with(record: &Map<String, Value>, clock: &dyn Clock) -> Option<Tray> {
    // Checked before anything else is built.
    let name = name_field(record.get("name"))?;

    Some(Tray {
        uuid: string_field(record.get("uuid"), ""),
        name,
        is_folded: bool_field(record.get("isFolded")),
        border_color: string_field(record.get("borderColor"), DEFAULT_BORDER_COLOR),
        children: string_list(record.get("children")).unwrap_or_default(),
        last_modified: number_field(record.get("lastModified"), clock),
        meta_data: object_field(record.get("metaData")),
        parent_uuid: string_list(record.get("parentUuid")),
        main: nullable_string(record.get("main")),
        flex_direction: FlexDirection::Column,
        editing_start: bool_field(record.get("editingStart")),
    })
}

/// Normalize an arbitrary parsed JSON document.
///
/// Anything other than an object is an error rather than a discard, so the
/// caller can report it instead of deleting the source.
pub fn normalize_value(document: &Value, clock: &dyn Clock) -> Result<Option<Tray>> {
    match document {
        Value::Object(record) => Ok(normalize_tray_with(record, clock)),
        other => Err(TrayError::NotAnObject(json_type_name(other))),
    }
}

fn name_field(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(name)) if !name.is_empty() => Some(name.clone()),
        _ => None,
    }
}

fn string_field(value: Option<&Value>, default: &str) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        _ => default.to_string(),
    }
}

fn bool_field(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Bool(true)))
}

/// `Some` only for arrays; non-string elements are dropped.
fn string_list(value: Option<&Value>) -> Option<Vec<String>> {
    match value {
        Some(Value::Array(items)) => Some(
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
        ),
        _ => None,
    }
}

fn number_field(value: Option<&Value>, clock: &dyn Clock) -> Number {
    match value {
        Some(Value::Number(n)) => n.clone(),
        _ => Number::from_f64(clock.now_secs()).unwrap_or_else(|| Number::from(0)),
    }
}

fn object_field(value: Option<&Value>) -> Map<String, Value> {
    match value {
        Some(Value::Object(map)) => map.clone(),
        _ => Map::new(),
    }
}

fn nullable_string(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
