use serde_json::{json, Value};
use tracing::{error, info, warn};

use shared_models::{AppError, ValidationError};

use crate::error::{KumaError, KumaResult};

/// The entity an upstream call was about, used to phrase not-found errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub entity: &'static str,
    pub id: String,
}

impl Target {
    pub fn new(entity: &'static str, id: impl ToString) -> Self {
        Self {
            entity,
            id: id.to_string(),
        }
    }

    pub fn monitor(id: i64) -> Self {
        Self::new("monitor", id)
    }

    pub fn maintenance(id: i64) -> Self {
        Self::new("maintenance", id)
    }

    pub fn status_page(slug: &str) -> Self {
        Self::new("status page", slug)
    }
}

/// Map an upstream failure onto the gateway error taxonomy.
pub fn translate(err: KumaError, target: &Target) -> AppError {
    match err {
        KumaError::NotFound(detail) => {
            info!(entity = target.entity, id = %target.id, "Not found upstream: {}", detail);
            AppError::not_found(target.entity, &target.id)
        }
        KumaError::InvalidArgument(detail) => {
            warn!(entity = target.entity, id = %target.id, "Engine rejected arguments: {}", detail);
            AppError::InvalidInput(ValidationError::single(
                "payload",
                format!("rejected by the monitoring engine: {}", detail),
            ))
        }
        other => {
            error!(entity = target.entity, id = %target.id, error = %other, "Upstream failure");
            AppError::upstream()
        }
    }
}

/// Deletion is idempotent: an entity that is already gone counts as deleted.
pub fn translate_delete(result: KumaResult<Value>, target: &Target) -> Result<Value, AppError> {
    match result {
        Ok(value) => Ok(value),
        Err(KumaError::NotFound(detail)) => {
            info!(entity = target.entity, id = %target.id, "Delete of absent entity treated as success: {}", detail);
            Ok(json!({ "msg": "Deleted Successfully." }))
        }
        Err(err) => Err(translate(err, target)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_not_found_names_target() {
        let err = translate(KumaError::NotFound("gone".into()), &Target::monitor(5));
        assert_matches!(err, AppError::NotFound { ref entity, ref id } if entity == "monitor" && id == "5");
    }

    #[test]
    fn test_invalid_argument_is_invalid_input() {
        let err = translate(
            KumaError::InvalidArgument("unexpected keyword".into()),
            &Target::monitor(1),
        );
        assert_matches!(err, AppError::InvalidInput(_));
    }

    #[test]
    fn test_other_failures_hide_detail() {
        for err in [
            KumaError::Failure("SQLITE_BUSY: database is locked".into()),
            KumaError::Transport("connection reset".into()),
            KumaError::Decode("bad json".into()),
        ] {
            let translated = translate(err, &Target::status_page("main"));
            assert_matches!(translated, AppError::Upstream(ref msg) if !msg.contains("SQLITE") && !msg.contains("reset"));
        }
    }

    #[test]
    fn test_delete_of_absent_entity_succeeds() {
        let result = translate_delete(
            Err(KumaError::NotFound("no such monitor".into())),
            &Target::monitor(42),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_delete_failure_still_surfaces() {
        let result = translate_delete(
            Err(KumaError::Transport("timeout".into())),
            &Target::maintenance(3),
        );
        assert_matches!(result, Err(AppError::Upstream(_)));
    }
}
