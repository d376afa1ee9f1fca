use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::utils::io;

// === Pure Formatting Functions ===

/// Parse JSON string into an untyped document.
pub fn from_str(s: &str, context: &str) -> Result<Value> {
    serde_json::from_str(s).map_err(|e| Error::validation_invalid_json(e, Some(context.to_string())))
}

/// Serialize value to 2-space indented JSON with a trailing newline.
///
/// Non-ASCII text is written as-is, not escaped.
pub fn to_string_pretty<T: Serialize>(data: &T) -> Result<String> {
    let mut out = serde_json::to_string_pretty(data)
        .map_err(|e| Error::internal_json(e.to_string(), Some("serialize json".to_string())))?;
    out.push('\n');
    Ok(out)
}

// === Document I/O ===

/// Read a JSON file whose top level must be an object.
pub fn read_object(path: &Path) -> Result<Map<String, Value>> {
    let raw = io::read_file(path, "read")?;
    match from_str(&raw, &format!("parse {}", path.display()))? {
        Value::Object(map) => Ok(map),
        other => Err(Error::validation_invalid_json(
            <serde_json::Error as serde::de::Error>::custom(format!(
                "expected a JSON object, found {}",
                value_type_name(&other)
            )),
            Some(format!("parse {}", path.display())),
        )),
    }
}

/// Serialize the whole document first, then replace the file in one step.
pub fn write_object(path: &Path, document: &Map<String, Value>) -> Result<()> {
    let content = to_string_pretty(document)?;
    io::write_file_atomic(path, &content, &format!("write {}", path.display()))
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
