use serde_json::{Map, Value};

/// Attach the entity the gateway submitted to the engine's reply, so callers
/// can compare what they sent with what was accepted.
pub fn attach(result: Value, key: &str, entity: Value) -> Value {
    let mut map = match result {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            let mut map = Map::new();
            map.insert("result".to_string(), other);
            map
        }
    };
    map.insert(key.to_string(), entity);
    Value::Object(map)
}
