use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::{Map, Value};

use shared_models::validation::{as_object, FieldReader, Presence};
use shared_models::{NormalizedConfig, ValidationError};

use super::monitor_type::MonitorType;
use super::probe::Probe;

/// Settings every monitor carries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommonSettings {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub interval: i64,
    #[serde(rename = "retryInterval")]
    pub retry_interval: i64,
    #[serde(rename = "resendInterval")]
    pub resend_interval: i64,
    pub maxretries: i64,
    #[serde(rename = "upsideDown")]
    pub upside_down: bool,
    #[serde(rename = "notificationIDList", skip_serializing_if = "Option::is_none")]
    pub notification_ids: Option<Vec<i64>>,
    pub conditions: Vec<Value>,
}

impl CommonSettings {
    fn read(r: &mut FieldReader<'_>) -> Self {
        Self {
            name: r.required_str("name"),
            parent: r.optional_int("parent", 1),
            description: r.optional_str("description"),
            interval: r.int_or("interval", 60, 1),
            retry_interval: r.int_or("retryInterval", 60, 0),
            resend_interval: r.int_or("resendInterval", 0, 0),
            maxretries: r.int_or("maxretries", 1, 0),
            upside_down: r.bool_or("upsideDown", false),
            notification_ids: read_notification_ids(r),
            conditions: r.list_or("conditions", Vec::new()),
        }
    }
}

/// Notification references form a set; duplicates collapse.
fn read_notification_ids(r: &mut FieldReader<'_>) -> Option<Vec<i64>> {
    let items = r.optional_list("notificationIDList")?;
    let mut ids = BTreeSet::new();
    for item in items {
        match item.as_i64() {
            Some(id) if id >= 1 => {
                ids.insert(id);
            }
            _ => {
                r.reject("notificationIDList", "must contain only positive integer ids");
                return None;
            }
        }
    }
    Some(ids.into_iter().collect())
}

/// A complete, validated monitor definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitorConfig {
    #[serde(flatten)]
    pub common: CommonSettings,
    #[serde(flatten)]
    pub probe: Probe,
}

impl MonitorConfig {
    pub fn monitor_type(&self) -> MonitorType {
        self.probe.monitor_type()
    }

    pub fn to_normalized(&self) -> Result<NormalizedConfig, ValidationError> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => Ok(NormalizedConfig::new(map)),
            _ => Err(ValidationError::single("body", "could not be normalized")),
        }
    }
}

/// What a payload is being validated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission<'a> {
    Create,
    /// A partial update. `current_type` is the stored monitor's type, used
    /// when the patch does not change it. A patch that switches away from a
    /// known type must carry every key the new type requires.
    Update { current_type: Option<MonitorType> },
    /// A partial update checked against the full stored record. On a type
    /// switch, keys the new type requires may come from the stored record.
    UpdateStored { stored: &'a Map<String, Value> },
}

fn read_type(r: &mut FieldReader<'_>) -> Option<MonitorType> {
    match r.presence("type") {
        Presence::Absent => {
            if !r.is_partial() {
                r.reject("type", "is required");
            }
            None
        }
        Presence::Null => {
            r.reject("type", "is required");
            None
        }
        Presence::Value(Value::String(raw)) => {
            let parsed = MonitorType::parse(raw);
            if parsed.is_none() {
                r.reject("type", format!("unknown monitor type '{}'", raw));
            }
            parsed
        }
        Presence::Value(_) => {
            r.reject("type", "must be a string");
            None
        }
    }
}

/// Validate a monitor payload and produce the mapping to send upstream.
///
/// On create the result is the full definition with defaults applied and
/// keys outside the type's scope dropped. On update it holds only the keys
/// the client supplied that the (new or current) type accepts, with their
/// raw values and explicit nulls preserved.
pub fn validate_monitor(payload: &Value, submission: Submission<'_>) -> Result<NormalizedConfig, ValidationError> {
    let raw = as_object(payload)?;

    match submission {
        Submission::Create => {
            let mut reader = FieldReader::new(raw, false);
            let kind = read_type(&mut reader);
            let common = CommonSettings::read(&mut reader);
            let probe = kind.map(|kind| Probe::read(kind, &mut reader));
            reader.finish()?;

            match probe {
                Some(probe) => MonitorConfig { common, probe }.to_normalized(),
                None => Err(ValidationError::single("type", "is required")),
            }
        }
        Submission::Update { current_type } => validate_patch(raw, current_type, None),
        Submission::UpdateStored { stored } => {
            let current_type = stored
                .get("type")
                .and_then(Value::as_str)
                .and_then(MonitorType::parse);
            validate_patch(raw, current_type, Some(stored))
        }
    }
}

fn validate_patch(
    raw: &Map<String, Value>,
    current_type: Option<MonitorType>,
    stored: Option<&Map<String, Value>>,
) -> Result<NormalizedConfig, ValidationError> {
    let mut reader = FieldReader::new(raw, true);
    let declared = read_type(&mut reader);
    CommonSettings::read(&mut reader);
    let kind = declared.or(current_type);
    if let Some(kind) = kind {
        Probe::read(kind, &mut reader);
    }

    if let Some(new_type) = declared {
        let switching = match stored {
            Some(_) => current_type != Some(new_type),
            None => current_type.is_some_and(|current| current != new_type),
        };
        if switching {
            let message = format!("is required when changing the type to '{}'", new_type.as_str());
            reader.require_filled(new_type.required_fields(), stored, &message);
        }
    }
    reader.finish()?;

    let scope = match kind {
        Some(kind) => kind.fields(),
        None => MonitorType::all_fields(),
    };
    Ok(NormalizedConfig::new(patch_subset(raw, &scope, declared)))
}

fn patch_subset(raw: &Map<String, Value>, scope: &[&str], declared: Option<MonitorType>) -> Map<String, Value> {
    raw.iter()
        .filter(|(key, _)| scope.contains(&key.as_str()))
        .map(|(key, value)| match (key.as_str(), declared) {
            ("type", Some(kind)) => (key.clone(), Value::String(kind.as_str().to_string())),
            _ => (key.clone(), value.clone()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_applies_common_defaults() {
        let normalized = validate_monitor(
            &json!({ "type": "http", "name": "web", "url": "https://example.com" }),
            Submission::Create,
        )
        .unwrap();

        assert_eq!(normalized.get("interval"), Some(&json!(60)));
        assert_eq!(normalized.get("retryInterval"), Some(&json!(60)));
        assert_eq!(normalized.get("resendInterval"), Some(&json!(0)));
        assert_eq!(normalized.get("maxretries"), Some(&json!(1)));
        assert_eq!(normalized.get("upsideDown"), Some(&json!(false)));
        assert_eq!(normalized.get("conditions"), Some(&json!([])));
    }

    #[test]
    fn test_notification_ids_are_deduplicated() {
        let normalized = validate_monitor(
            &json!({ "type": "group", "name": "g", "notificationIDList": [3, 1, 3] }),
            Submission::Create,
        )
        .unwrap();
        assert_eq!(normalized.get("notificationIDList"), Some(&json!([1, 3])));
    }

    #[test]
    fn test_patch_keeps_type_tag_normalized() {
        let normalized = validate_monitor(
            &json!({ "type": "PING", "hostname": "10.0.0.1" }),
            Submission::Update { current_type: None },
        )
        .unwrap();
        assert_eq!(normalized.to_value(), json!({ "type": "ping", "hostname": "10.0.0.1" }));
    }

    #[test]
    fn test_type_switch_without_stored_record_needs_new_keys() {
        let err = validate_monitor(
            &json!({ "type": "port" }),
            Submission::Update { current_type: Some(MonitorType::Http) },
        )
        .unwrap_err();
        assert_eq!(err.fields(), vec!["hostname", "port"]);
    }

    #[test]
    fn test_same_type_patch_needs_nothing_new() {
        let normalized = validate_monitor(
            &json!({ "type": "http", "name": "renamed" }),
            Submission::Update { current_type: Some(MonitorType::Http) },
        )
        .unwrap();
        assert_eq!(normalized.len(), 2);
    }
}
