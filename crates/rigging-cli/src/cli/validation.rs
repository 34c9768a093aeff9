use serde_json::{Map, Value};

/// Parse a command-line argument as a JSON object.
///
/// Valid: `{}`, `{"a": 1}`
/// Invalid: `[1, 2]`, `"text"`, malformed JSON
///
/// # Errors
///
/// Returns an error message if the input is not valid JSON or not an object.
pub fn parse_record(s: &str) -> Result<Map<String, Value>, String> {
    match serde_json::from_str::<Value>(s) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(format!(
            "Expected a JSON object, got {}",
            json_kind(&other)
        )),
        Err(e) => Err(format!("Invalid JSON: {}", e)),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
