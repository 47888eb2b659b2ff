use serde_json::{Map, Value};
use tracing::debug;

/// Parsed structured model output. An empty map is the failure sentinel;
/// callers must treat it as "no data", never as a valid empty result.
pub type RecoveredPayload = Map<String, Value>;

/// Coerce raw model text into a structured payload. Never fails.
///
/// Tries a direct parse first, then the substring between the first `{` and
/// the last `}`, which recovers the common case of valid JSON wrapped in
/// explanatory prose. Multiple payloads or deeper corruption are not
/// recoverable; the raw text is logged for diagnosis and an empty map is
/// returned.
pub fn recover(text: &str) -> RecoveredPayload {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(text) {
        return map;
    }

    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if start < end {
            if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(&text[start..=end]) {
                return map;
            }
        }
    }

    debug!(raw = text, "failed to recover structured payload");
    Map::new()
}
