use serde_json::Value;

/// Pull a displayable `message` out of a JSON error body.
///
/// Non-string scalars are stringified; missing, null or blank messages yield
/// `None` so callers can fall back to their own text.
pub fn message_field(body: &Value) -> Option<String> {
    let message = match body.get("message")? {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    };
    let message = sanitize(message);
    if message.trim().is_empty() {
        None
    } else {
        Some(message)
    }
}

fn sanitize(s: String) -> String {
    s.chars().filter(|c| !c.is_control()).collect()
}
