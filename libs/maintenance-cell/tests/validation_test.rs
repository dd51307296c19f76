use assert_matches::assert_matches;
use chrono::NaiveDate;
use serde_json::json;

use maintenance_cell::models::DEFAULT_TIME_RANGE;
use maintenance_cell::{validate_maintenance, Strategy, Submission};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
}

fn create(payload: serde_json::Value) -> Result<shared_models::NormalizedConfig, shared_models::ValidationError> {
    validate_maintenance(&payload, Submission::Create, today())
}

#[test]
fn test_weekday_set_accepted_and_deduplicated() {
    let config = create(json!({
        "title": "patch night",
        "strategy": "recurring-weekday",
        "weekdays": [5, 1, 3, 1]
    }))
    .unwrap();

    assert_eq!(config.get("weekdays"), Some(&json!([1, 3, 5])));
    assert_eq!(config.get("strategy"), Some(&json!("recurring-weekday")));
}

#[test]
fn test_empty_weekdays_rejected() {
    let err = create(json!({
        "title": "patch night",
        "strategy": "recurring-weekday",
        "weekdays": []
    }))
    .unwrap_err();

    assert!(err.has_field("weekdays"));
}

#[test]
fn test_weekday_out_of_range_rejected() {
    let err = create(json!({
        "title": "patch night",
        "strategy": "recurring-weekday",
        "weekdays": [7]
    }))
    .unwrap_err();

    assert!(err.has_field("weekdays"));
}

#[test]
fn test_day_of_week_alias_normalizes() {
    let config = create(json!({
        "title": "patch night",
        "strategy": "recurring-day-of-week",
        "weekdays": [0]
    }))
    .unwrap();

    assert_eq!(config.get("strategy"), Some(&json!("recurring-weekday")));
}

#[test]
fn test_last_day_marker_accepted() {
    let config = create(json!({
        "title": "month end",
        "strategy": "recurring-day-of-month",
        "daysOfMonth": ["lastDay1", 15]
    }))
    .unwrap();

    assert_eq!(config.get("daysOfMonth"), Some(&json!([15, "lastDay1"])));
}

#[test]
fn test_cron_requires_expression_and_timezone() {
    let err = create(json!({ "title": "nightly", "strategy": "cron" })).unwrap_err();

    assert!(err.has_field("cron"));
    assert!(err.has_field("timezoneOption"));
}

#[test]
fn test_cron_with_wrong_field_count_rejected() {
    let err = create(json!({
        "title": "nightly",
        "strategy": "cron",
        "cron": "0 3 *",
        "timezoneOption": "UTC"
    }))
    .unwrap_err();

    assert_eq!(err.fields(), vec!["cron"]);
}

#[test]
fn test_cron_duration_defaults() {
    let config = create(json!({
        "title": "nightly",
        "strategy": "cron",
        "cron": "30 3 * * *",
        "timezoneOption": "Europe/Berlin"
    }))
    .unwrap();

    assert_eq!(config.get("durationMinutes"), Some(&json!(60)));
    assert_eq!(config.get("timezoneOption"), Some(&json!("Europe/Berlin")));
}

#[test]
fn test_defaults_fill_ranges() {
    let config = create(json!({ "title": "ad hoc", "strategy": "manual" })).unwrap();

    assert_eq!(config.get("dateRange"), Some(&json!(["2024-03-09 00:00:00"])));
    assert_eq!(
        config.get("timeRange"),
        Some(&serde_json::to_value(DEFAULT_TIME_RANGE).unwrap())
    );
    assert_eq!(config.get("active"), Some(&json!(true)));
    assert_eq!(config.get("description"), Some(&json!("")));
}

#[test]
fn test_date_range_must_be_ordered() {
    let err = create(json!({
        "title": "upgrade",
        "strategy": "single",
        "dateRange": ["2024-03-10 04:00:00", "2024-03-10 02:00:00"]
    }))
    .unwrap_err();

    assert_eq!(err.fields(), vec!["dateRange"]);
}

#[test]
fn test_malformed_date_rejected() {
    let err = create(json!({
        "title": "upgrade",
        "strategy": "single",
        "dateRange": ["10/03/2024"]
    }))
    .unwrap_err();

    assert_eq!(err.fields(), vec!["dateRange"]);
}

#[test]
fn test_time_range_bounds() {
    let err = create(json!({
        "title": "upgrade",
        "strategy": "single",
        "timeRange": [{ "hours": 24, "minutes": 0 }, { "hours": 1, "minutes": 0 }]
    }))
    .unwrap_err();

    assert_eq!(err.fields(), vec!["timeRange"]);
}

#[test]
fn test_other_strategies_fields_dropped() {
    let config = create(json!({
        "title": "every other day",
        "strategy": "recurring-interval",
        "intervalDay": 2,
        "weekdays": [1],
        "cron": "* * * * *"
    }))
    .unwrap();

    assert_eq!(config.get("intervalDay"), Some(&json!(2)));
    assert!(!config.contains_key("weekdays"));
    assert!(!config.contains_key("cron"));
}

#[test]
fn test_missing_strategy_and_title() {
    let err = create(json!({})).unwrap_err();

    assert!(err.has_field("strategy"));
    assert!(err.has_field("title"));
}

#[test]
fn test_patch_echoes_supplied_keys() {
    let changes = validate_maintenance(
        &json!({ "title": "renamed", "weekdays": [2] }),
        Submission::Update { current_strategy: Some(Strategy::Cron) },
        today(),
    )
    .unwrap();

    assert_eq!(changes.to_value(), json!({ "title": "renamed" }));
}

#[test]
fn test_patch_checks_value_domains_without_strategy() {
    let err = validate_maintenance(
        &json!({ "intervalDay": 0 }),
        Submission::Update { current_strategy: None },
        today(),
    )
    .unwrap_err();

    assert_eq!(err.fields(), vec!["intervalDay"]);
}

#[test]
fn test_strategy_switch_needs_new_schedule_keys() {
    let err = validate_maintenance(
        &json!({ "strategy": "recurring-weekday" }),
        Submission::Update { current_strategy: Some(Strategy::Manual) },
        today(),
    )
    .unwrap_err();
    assert_eq!(err.fields(), vec!["weekdays"]);

    let err = validate_maintenance(
        &json!({ "strategy": "cron" }),
        Submission::Update { current_strategy: Some(Strategy::Single) },
        today(),
    )
    .unwrap_err();
    assert_eq!(err.fields(), vec!["cron", "timezoneOption"]);
}

#[test]
fn test_strategy_switch_accepts_stored_schedule_keys() {
    let stored = json!({ "strategy": "manual", "weekdays": [1, 3] });
    let changes = validate_maintenance(
        &json!({ "strategy": "recurring-weekday" }),
        Submission::UpdateStored { stored: stored.as_object().unwrap() },
        today(),
    )
    .unwrap();
    assert_eq!(changes.to_value(), json!({ "strategy": "recurring-weekday" }));
}

#[test]
fn test_non_object_payload_rejected() {
    assert_matches!(create(json!([1, 2])), Err(_));
}
