use serde::Serialize;
use serde_json::Value;

use shared_models::validation::{as_object, FieldReader};
use shared_models::{NormalizedConfig, ValidationError};

/// Banner colours an incident can be shown in.
pub const INCIDENT_STYLES: &[&str] = &["info", "warning", "danger", "primary", "light", "dark"];

/// The incident pinned to the top of a status page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Incident {
    pub title: String,
    pub content: String,
    pub style: String,
}

pub fn validate_incident(payload: &Value) -> Result<NormalizedConfig, ValidationError> {
    let raw = as_object(payload)?;
    let mut r = FieldReader::new(raw, false);
    let incident = Incident {
        title: r.required_str("title"),
        content: r.required_str("content"),
        style: r.one_of("style", "primary", INCIDENT_STYLES),
    };
    r.finish()?;

    match serde_json::to_value(&incident) {
        Ok(Value::Object(map)) => Ok(NormalizedConfig::new(map)),
        _ => Err(ValidationError::single("body", "could not be normalized")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_style_defaults_to_primary() {
        let incident = validate_incident(&json!({ "title": "Outage", "content": "Investigating" })).unwrap();
        assert_eq!(incident.get("style"), Some(&json!("primary")));
    }

    #[test]
    fn test_unknown_style_rejected() {
        let err = validate_incident(&json!({ "title": "Outage", "content": "x", "style": "red" })).unwrap_err();
        assert_eq!(err.fields(), vec!["style"]);
    }
}
