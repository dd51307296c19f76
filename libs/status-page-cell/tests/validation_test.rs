use assert_matches::assert_matches;
use serde_json::json;

use status_page_cell::{validate_incident, validate_new_page, validate_save, Slug};

#[test]
fn test_new_page_slug_is_trimmed() {
    let page = validate_new_page(&json!({ "slug": " ops-status ", "title": "Ops" })).unwrap();

    assert_eq!(page.slug.as_str(), "ops-status");
    assert_eq!(page.title, "Ops");
}

#[test]
fn test_new_page_rejects_uppercase_slug_and_blank_title() {
    let err = validate_new_page(&json!({ "slug": "Ops_Status", "title": "  " })).unwrap_err();

    assert!(err.has_field("slug"));
    assert!(err.has_field("title"));
}

#[test]
fn test_save_applies_defaults() {
    let settings = validate_save(&json!({ "title": "Public" })).unwrap();

    assert_eq!(settings.get("theme"), Some(&json!("auto")));
    assert_eq!(settings.get("published"), Some(&json!(true)));
    assert_eq!(settings.get("showTags"), Some(&json!(false)));
    assert_eq!(settings.get("domainNameList"), Some(&json!([])));
    assert_eq!(settings.get("customCSS"), Some(&json!("")));
    assert_eq!(settings.get("showPoweredBy"), Some(&json!(true)));
    assert_eq!(settings.get("showCertificateExpiry"), Some(&json!(false)));
    assert_eq!(settings.get("icon"), Some(&json!("/icon.svg")));
    assert_eq!(settings.get("publicGroupList"), Some(&json!([])));
    assert!(!settings.contains_key("footerText"));
}

#[test]
fn test_save_keeps_group_and_monitor_order() {
    let settings = validate_save(&json!({
        "title": "Public",
        "publicGroupList": [
            { "name": "Edge", "monitorList": [{ "id": 9 }, { "id": 2 }] },
            { "name": "Core", "monitorList": [{ "id": 1, "name": "db" }] }
        ]
    }))
    .unwrap();

    assert_eq!(
        settings.get("publicGroupList"),
        Some(&json!([
            { "name": "Edge", "monitorList": [{ "id": 9 }, { "id": 2 }] },
            { "name": "Core", "monitorList": [{ "id": 1, "name": "db" }] }
        ]))
    );
}

#[test]
fn test_save_rejects_malformed_group() {
    let err = validate_save(&json!({
        "title": "Public",
        "publicGroupList": [{ "name": "Edge", "monitorList": [{ "id": "nine" }] }]
    }))
    .unwrap_err();

    assert_eq!(err.fields(), vec!["publicGroupList"]);
}

#[test]
fn test_save_rejects_unknown_theme_and_slug_change() {
    let err = validate_save(&json!({ "title": "Public", "theme": "neon", "slug": "other" })).unwrap_err();

    assert!(err.has_field("theme"));
    assert!(err.has_field("slug"));
}

#[test]
fn test_path_slug_parsing() {
    assert_matches!(Slug::parse("ops-2"), Ok(ref slug) if slug.as_str() == "ops-2");
    assert_matches!(Slug::parse("ops/2"), Err(ref err) if err.has_field("slug"));
}

#[test]
fn test_incident_requires_title_and_content() {
    let err = validate_incident(&json!({ "style": "danger" })).unwrap_err();

    assert!(err.has_field("title"));
    assert!(err.has_field("content"));
}
