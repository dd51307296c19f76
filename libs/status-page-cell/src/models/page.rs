use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use shared_models::validation::{as_object, FieldReader, Presence};
use shared_models::{NormalizedConfig, ValidationError};

const SLUG_PATTERN: &str = r"^[a-z0-9]+(-[a-z0-9]+)*$";

pub const THEMES: &[&str] = &["auto", "light", "dark"];

/// A status page's URL identifier. Fixed once the page exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let slug = raw.trim();
        let valid = Regex::new(SLUG_PATTERN)
            .map(|re| re.is_match(slug))
            .unwrap_or(false);

        if valid {
            Ok(Slug(slug.to_string()))
        } else {
            Err(ValidationError::single(
                "slug",
                "must be lowercase letters and digits separated by single hyphens",
            ))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewStatusPage {
    pub slug: Slug,
    pub title: String,
}

pub fn validate_new_page(payload: &Value) -> Result<NewStatusPage, ValidationError> {
    let raw = as_object(payload)?;
    let mut r = FieldReader::new(raw, false);

    let slug_text = r.required_str("slug");
    let title = r.required_str("title");
    let slug = if slug_text.is_empty() {
        None
    } else {
        match Slug::parse(&slug_text) {
            Ok(slug) => Some(slug),
            Err(err) => {
                for field in err.errors {
                    r.reject(&field.field, field.message);
                }
                None
            }
        }
    };
    r.finish()?;

    match slug {
        Some(slug) => Ok(NewStatusPage { slug, title }),
        None => Err(ValidationError::single("slug", "is required")),
    }
}

/// A monitor shown inside a public group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMonitor {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// An ordered, named block of monitors on a status page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(rename = "monitorList", default)]
    pub monitor_list: Vec<GroupMonitor>,
}

fn read_public_groups(r: &mut FieldReader<'_>) -> Vec<PublicGroup> {
    let items = match r.presence("publicGroupList") {
        Presence::Absent | Presence::Null => return Vec::new(),
        Presence::Value(Value::Array(items)) => items.clone(),
        Presence::Value(_) => {
            r.reject("publicGroupList", "must be a list");
            return Vec::new();
        }
    };

    let mut groups = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<PublicGroup>(item) {
            Ok(group) if group.name.trim().is_empty() => {
                r.reject("publicGroupList", format!("group {} needs a name", index));
            }
            Ok(group) => groups.push(group),
            Err(e) => {
                r.reject("publicGroupList", format!("group {} is malformed: {}", index, e));
            }
        }
    }
    groups
}

fn read_domains(r: &mut FieldReader<'_>) -> Vec<String> {
    let mut domains = Vec::new();
    for item in r.list_or("domainNameList", Vec::new()) {
        match item {
            Value::String(domain) if !domain.trim().is_empty() => domains.push(domain.trim().to_string()),
            _ => {
                r.reject("domainNameList", "must contain only non-empty strings");
                return Vec::new();
            }
        }
    }
    domains
}

/// Everything a save replaces on a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusPageSettings {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub theme: String,
    pub published: bool,
    #[serde(rename = "showTags")]
    pub show_tags: bool,
    #[serde(rename = "domainNameList")]
    pub domain_names: Vec<String>,
    #[serde(rename = "googleAnalyticsId", skip_serializing_if = "Option::is_none")]
    pub google_analytics_id: Option<String>,
    #[serde(rename = "customCSS")]
    pub custom_css: String,
    #[serde(rename = "footerText", skip_serializing_if = "Option::is_none")]
    pub footer_text: Option<String>,
    #[serde(rename = "showPoweredBy")]
    pub show_powered_by: bool,
    #[serde(rename = "showCertificateExpiry")]
    pub show_certificate_expiry: bool,
    pub icon: String,
    #[serde(rename = "publicGroupList")]
    pub public_groups: Vec<PublicGroup>,
}

impl StatusPageSettings {
    fn read(r: &mut FieldReader<'_>) -> Self {
        Self {
            title: r.required_str("title"),
            description: r.optional_str("description"),
            theme: r.one_of("theme", "auto", THEMES),
            published: r.bool_or("published", true),
            show_tags: r.bool_or("showTags", false),
            domain_names: read_domains(r),
            google_analytics_id: r.optional_str("googleAnalyticsId"),
            custom_css: r.str_or("customCSS", ""),
            footer_text: r.optional_str("footerText"),
            show_powered_by: r.bool_or("showPoweredBy", true),
            show_certificate_expiry: r.bool_or("showCertificateExpiry", false),
            icon: r.str_or("icon", "/icon.svg"),
            public_groups: read_public_groups(r),
        }
    }

    pub fn to_normalized(&self) -> Result<NormalizedConfig, ValidationError> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => Ok(NormalizedConfig::new(map)),
            _ => Err(ValidationError::single("body", "could not be normalized")),
        }
    }
}

/// Validate a full save of a page's settings. Omitted options take their defaults.
pub fn validate_save(payload: &Value) -> Result<NormalizedConfig, ValidationError> {
    let raw: &Map<String, Value> = as_object(payload)?;
    let mut r = FieldReader::new(raw, false);
    if raw.contains_key("slug") {
        r.reject("slug", "cannot be changed by a save");
    }
    let settings = StatusPageSettings::read(&mut r);
    r.finish()?;
    settings.to_normalized()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_shapes() {
        assert_eq!(Slug::parse("  status-2024 ").unwrap().as_str(), "status-2024");
        assert!(Slug::parse("Status").is_err());
        assert!(Slug::parse("double--hyphen").is_err());
        assert!(Slug::parse("-leading").is_err());
        assert!(Slug::parse("trailing-").is_err());
        assert!(Slug::parse("").is_err());
    }
}
