//! JSON formatting

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value as JsonValue;

/// JSON formatting options
#[derive(Debug, Clone)]
pub struct JsonFormatterOptions {
    /// Indentation in spaces
    pub indent: usize,
    /// Sort keys alphabetically
    pub sort_keys: bool,
}

impl Default for JsonFormatterOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            sort_keys: true,
        }
    }
}

/// Decode a JSON document and re-encode it indented
pub fn format_json(
    body: &[u8],
    options: &JsonFormatterOptions,
) -> Result<String, serde_json::Error> {
    let value: JsonValue = serde_json::from_slice(body)?;
    let value = if options.sort_keys {
        sort_json_keys(&value)
    } else {
        value
    };

    let indent = vec![b' '; options.indent];
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(&indent);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;

    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Maximum recursion depth for JSON key sorting to prevent stack overflow
const MAX_JSON_DEPTH: usize = 128;

fn sort_json_keys(value: &JsonValue) -> JsonValue {
    sort_json_keys_with_depth(value, 0)
}

fn sort_json_keys_with_depth(value: &JsonValue, depth: usize) -> JsonValue {
    if depth >= MAX_JSON_DEPTH {
        return value.clone();
    }

    match value {
        JsonValue::Object(map) => {
            let mut sorted: Vec<_> = map.iter().collect();
            sorted.sort_by(|a, b| a.0.cmp(b.0));

            JsonValue::Object(
                sorted
                    .into_iter()
                    .map(|(k, v)| (k.clone(), sort_json_keys_with_depth(v, depth + 1)))
                    .collect(),
            )
        }
        JsonValue::Array(arr) => {
            JsonValue::Array(arr.iter().map(|v| sort_json_keys_with_depth(v, depth + 1)).collect())
        }
        _ => value.clone(),
    }
}
