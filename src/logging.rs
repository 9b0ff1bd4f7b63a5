use log::{Level, LevelFilter};

/// Installs the browser console as the `log` backend. Natively this only
/// sets the level filter; tests and the binary stub log nowhere.
pub fn init(level: LevelFilter) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(level) = level.to_level() {
            let _ = console_log::init_with_level(level);
        }
    }
    log::set_max_level(level);
}

/// One structured event per line: `ts`, `level`, `event` and any object
/// fields given.
pub fn log_event(level: Level, event: &str, fields: serde_json::Value) {
    if level > log::max_level() {
        return;
    }
    log::log!(level, "{}", event_line(level, event, fields));
}

pub fn event_line(level: Level, event: &str, fields: serde_json::Value) -> String {
    let mut payload = serde_json::Map::new();
    payload.insert(
        "ts".to_string(),
        serde_json::Value::Number(serde_json::Number::from(now_unix_millis())),
    );
    payload.insert(
        "level".to_string(),
        serde_json::Value::String(level.as_str().to_ascii_lowercase()),
    );
    payload.insert("event".to_string(), serde_json::Value::String(event.to_string()));

    if let serde_json::Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    serde_json::Value::Object(payload).to_string()
}

#[cfg(target_arch = "wasm32")]
fn now_unix_millis() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_unix_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn event_line_merges_fields() {
        let line = event_line(Level::Warn, "setup_failed", json!({ "component": "canvas" }));
        let parsed: serde_json::Value = serde_json::from_str(&line).expect("line is json");

        assert_eq!(parsed["level"], "warn");
        assert_eq!(parsed["event"], "setup_failed");
        assert_eq!(parsed["component"], "canvas");
        assert!(parsed["ts"].as_u64().is_some());
    }

    #[test]
    fn non_object_fields_are_ignored() {
        let line = event_line(Level::Info, "boot", json!(["ignored"]));
        let parsed: serde_json::Value = serde_json::from_str(&line).expect("line is json");
        assert_eq!(parsed.as_object().map(|object| object.len()), Some(3));
    }
}
