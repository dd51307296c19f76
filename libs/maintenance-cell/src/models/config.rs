//! Maintenance window validation.
//!
//! A window's schedule is a sum type keyed on `strategy`; each variant carries
//! only the keys it needs. Settings shared by all strategies (title, date and
//! time ranges, timezone) sit beside it.

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use shared_models::validation::{as_object, FieldReader, Presence};
use shared_models::{NormalizedConfig, ValidationError};

use super::strategy::Strategy;

pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeOfDay {
    pub hours: u8,
    pub minutes: u8,
}

impl TimeOfDay {
    pub const fn new(hours: u8, minutes: u8) -> Self {
        Self { hours, minutes }
    }
}

/// Default daily window, 02:00 to 03:00.
pub const DEFAULT_TIME_RANGE: [TimeOfDay; 2] = [TimeOfDay::new(2, 0), TimeOfDay::new(3, 0)];

/// A day-of-month selector: a calendar day or the nth day from the month's end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MonthDay {
    Day(u8),
    FromEnd(u8),
}

impl Serialize for MonthDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MonthDay::Day(day) => serializer.serialize_u8(*day),
            MonthDay::FromEnd(n) => serializer.serialize_str(&format!("lastDay{}", n)),
        }
    }
}

impl MonthDay {
    fn parse(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n
                .as_u64()
                .filter(|day| (1..=31).contains(day))
                .map(|day| MonthDay::Day(day as u8)),
            Value::String(marker) => match marker.as_str() {
                "lastDay1" => Some(MonthDay::FromEnd(1)),
                "lastDay2" => Some(MonthDay::FromEnd(2)),
                "lastDay3" => Some(MonthDay::FromEnd(3)),
                "lastDay4" => Some(MonthDay::FromEnd(4)),
                _ => None,
            },
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "strategy")]
pub enum Schedule {
    #[serde(rename = "manual")]
    Manual,
    #[serde(rename = "single")]
    Single,
    #[serde(rename = "recurring-interval")]
    RecurringInterval {
        #[serde(rename = "intervalDay")]
        interval_day: i64,
    },
    #[serde(rename = "recurring-weekday")]
    RecurringWeekday { weekdays: Vec<u8> },
    #[serde(rename = "recurring-day-of-month")]
    RecurringDayOfMonth {
        #[serde(rename = "daysOfMonth")]
        days_of_month: Vec<MonthDay>,
    },
    #[serde(rename = "cron")]
    Cron {
        cron: String,
        #[serde(rename = "durationMinutes")]
        duration_minutes: i64,
    },
}

impl Schedule {
    pub fn strategy(&self) -> Strategy {
        match self {
            Schedule::Manual => Strategy::Manual,
            Schedule::Single => Strategy::Single,
            Schedule::RecurringInterval { .. } => Strategy::RecurringInterval,
            Schedule::RecurringWeekday { .. } => Strategy::RecurringWeekday,
            Schedule::RecurringDayOfMonth { .. } => Strategy::RecurringDayOfMonth,
            Schedule::Cron { .. } => Strategy::Cron,
        }
    }

    fn read(strategy: Strategy, r: &mut FieldReader<'_>) -> Self {
        match strategy {
            Strategy::Manual => Schedule::Manual,
            Strategy::Single => Schedule::Single,
            Strategy::RecurringInterval => Schedule::RecurringInterval {
                interval_day: r.int_or("intervalDay", 1, 1),
            },
            Strategy::RecurringWeekday => Schedule::RecurringWeekday {
                weekdays: read_weekdays(r),
            },
            Strategy::RecurringDayOfMonth => Schedule::RecurringDayOfMonth {
                days_of_month: read_days_of_month(r),
            },
            Strategy::Cron => Schedule::Cron {
                cron: read_cron(r),
                duration_minutes: r.int_or("durationMinutes", 60, 1),
            },
        }
    }
}

/// Weekdays form a set, Sunday = 0.
fn read_weekdays(r: &mut FieldReader<'_>) -> Vec<u8> {
    let mut days = BTreeSet::new();
    for item in r.required_list("weekdays") {
        match item.as_u64().filter(|day| *day <= 6) {
            Some(day) => {
                days.insert(day as u8);
            }
            None => {
                r.reject("weekdays", "must contain only integers 0-6 (Sunday = 0)");
                return Vec::new();
            }
        }
    }
    days.into_iter().collect()
}

fn read_days_of_month(r: &mut FieldReader<'_>) -> Vec<MonthDay> {
    let mut days = BTreeSet::new();
    for item in r.required_list("daysOfMonth") {
        match MonthDay::parse(&item) {
            Some(day) => {
                days.insert(day);
            }
            None => {
                r.reject("daysOfMonth", "must contain only days 1-31 or lastDay1-lastDay4");
                return Vec::new();
            }
        }
    }
    days.into_iter().collect()
}

fn read_cron(r: &mut FieldReader<'_>) -> String {
    let cron = r.required_str("cron");
    let fields = cron.split_whitespace().count();
    if !cron.is_empty() && !(5..=6).contains(&fields) {
        r.reject("cron", "must have five or six fields");
    }
    cron
}

fn read_date_range(r: &mut FieldReader<'_>, today: NaiveDate) -> Vec<String> {
    let default = vec![format!("{} 00:00:00", today.format("%Y-%m-%d"))];
    let items = match r.presence("dateRange") {
        Presence::Absent => return default,
        Presence::Value(Value::Array(items)) => items.clone(),
        _ => {
            r.reject("dateRange", "must be a list");
            return default;
        }
    };

    if items.is_empty() || items.len() > 2 {
        r.reject("dateRange", "must hold a start and an optional end");
        return default;
    }

    let mut parsed = Vec::with_capacity(items.len());
    for item in &items {
        match item.as_str().map(|s| NaiveDateTime::parse_from_str(s, DATE_TIME_FORMAT)) {
            Some(Ok(at)) => parsed.push(at),
            _ => {
                r.reject("dateRange", "entries must be formatted YYYY-MM-DD HH:MM:SS");
                return default;
            }
        }
    }

    if parsed.len() == 2 && parsed[0] > parsed[1] {
        r.reject("dateRange", "must not end before it starts");
    }

    parsed
        .iter()
        .map(|at| at.format(DATE_TIME_FORMAT).to_string())
        .collect()
}

fn read_time_range(r: &mut FieldReader<'_>) -> Vec<TimeOfDay> {
    let items = match r.presence("timeRange") {
        Presence::Absent => return DEFAULT_TIME_RANGE.to_vec(),
        Presence::Value(Value::Array(items)) => items.clone(),
        _ => {
            r.reject("timeRange", "must be a list");
            return DEFAULT_TIME_RANGE.to_vec();
        }
    };

    if items.len() != 2 {
        r.reject("timeRange", "must hold a start and an end time");
        return DEFAULT_TIME_RANGE.to_vec();
    }

    let mut times = Vec::with_capacity(2);
    for item in &items {
        let hours = item.get("hours").and_then(Value::as_u64).filter(|h| *h <= 23);
        let minutes = item.get("minutes").and_then(Value::as_u64).filter(|m| *m <= 59);
        match (hours, minutes) {
            (Some(h), Some(m)) => times.push(TimeOfDay::new(h as u8, m as u8)),
            _ => {
                r.reject("timeRange", "entries must be {\"hours\": 0-23, \"minutes\": 0-59}");
                return DEFAULT_TIME_RANGE.to_vec();
            }
        }
    }
    times
}

/// Settings shared by every strategy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaintenanceSettings {
    pub title: String,
    pub active: bool,
    pub description: String,
    #[serde(rename = "dateRange")]
    pub date_range: Vec<String>,
    #[serde(rename = "timeRange")]
    pub time_range: Vec<TimeOfDay>,
    #[serde(rename = "timezoneOption", skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl MaintenanceSettings {
    fn read(r: &mut FieldReader<'_>, today: NaiveDate) -> Self {
        Self {
            title: r.required_str("title"),
            active: r.bool_or("active", true),
            description: r.str_or("description", ""),
            date_range: read_date_range(r, today),
            time_range: read_time_range(r),
            timezone: r.optional_str("timezoneOption"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaintenanceConfig {
    #[serde(flatten)]
    pub settings: MaintenanceSettings,
    #[serde(flatten)]
    pub schedule: Schedule,
}

impl MaintenanceConfig {
    pub fn to_normalized(&self) -> Result<NormalizedConfig, ValidationError> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => Ok(NormalizedConfig::new(map)),
            _ => Err(ValidationError::single("body", "could not be normalized")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission<'a> {
    Create,
    /// A partial update. Switching away from a known strategy needs every
    /// key the new strategy requires in the patch itself.
    Update { current_strategy: Option<Strategy> },
    /// A partial update checked against the stored window, whose values
    /// count towards what a strategy switch requires.
    UpdateStored { stored: &'a Map<String, Value> },
}

fn read_strategy(r: &mut FieldReader<'_>) -> Option<Strategy> {
    match r.presence("strategy") {
        Presence::Absent => {
            if !r.is_partial() {
                r.reject("strategy", "is required");
            }
            None
        }
        Presence::Null => {
            r.reject("strategy", "is required");
            None
        }
        Presence::Value(Value::String(raw)) => {
            let parsed = Strategy::parse(raw);
            if parsed.is_none() {
                r.reject("strategy", format!("unknown maintenance strategy '{}'", raw));
            }
            parsed
        }
        Presence::Value(_) => {
            r.reject("strategy", "must be a string");
            None
        }
    }
}

/// Cron windows need a timezone to be evaluated in.
fn require_timezone(r: &mut FieldReader<'_>, strategy: Option<Strategy>) {
    if strategy != Some(Strategy::Cron) {
        return;
    }
    match r.presence("timezoneOption") {
        Presence::Absent if r.is_partial() => {}
        Presence::Value(Value::String(tz)) if !tz.trim().is_empty() => {}
        _ => r.reject("timezoneOption", "is required for the cron strategy"),
    }
}

/// Validate a maintenance payload. `today` anchors the default `dateRange`.
pub fn validate_maintenance(
    payload: &Value,
    submission: Submission<'_>,
    today: NaiveDate,
) -> Result<NormalizedConfig, ValidationError> {
    let raw = as_object(payload)?;

    match submission {
        Submission::Create => {
            let mut reader = FieldReader::new(raw, false);
            let strategy = read_strategy(&mut reader);
            let settings = MaintenanceSettings::read(&mut reader, today);
            let schedule = strategy.map(|s| Schedule::read(s, &mut reader));
            require_timezone(&mut reader, strategy);
            reader.finish()?;

            match schedule {
                Some(schedule) => MaintenanceConfig { settings, schedule }.to_normalized(),
                None => Err(ValidationError::single("strategy", "is required")),
            }
        }
        Submission::Update { current_strategy } => validate_patch(raw, current_strategy, None, today),
        Submission::UpdateStored { stored } => {
            let current_strategy = stored
                .get("strategy")
                .and_then(Value::as_str)
                .and_then(Strategy::parse);
            validate_patch(raw, current_strategy, Some(stored), today)
        }
    }
}

fn validate_patch(
    raw: &Map<String, Value>,
    current_strategy: Option<Strategy>,
    stored: Option<&Map<String, Value>>,
    today: NaiveDate,
) -> Result<NormalizedConfig, ValidationError> {
    let mut reader = FieldReader::new(raw, true);
    let declared = read_strategy(&mut reader);
    MaintenanceSettings::read(&mut reader, today);
    let strategy = declared.or(current_strategy);
    match strategy {
        Some(s) => {
            Schedule::read(s, &mut reader);
        }
        // Without a strategy only the supplied values' domains are checked.
        None => {
            for s in Strategy::ALL {
                Schedule::read(s, &mut reader);
            }
        }
    }
    require_timezone(&mut reader, declared);

    if let Some(new_strategy) = declared {
        let switching = match stored {
            Some(_) => current_strategy != Some(new_strategy),
            None => current_strategy.is_some_and(|current| current != new_strategy),
        };
        if switching {
            let message = format!("is required when changing the strategy to '{}'", new_strategy);
            reader.require_filled(new_strategy.required_fields(), stored, &message);
        }
    }
    reader.finish()?;

    let scope = match strategy {
        Some(s) => s.fields(),
        None => Strategy::all_fields(),
    };
    Ok(NormalizedConfig::new(patch_subset(raw, &scope, declared)))
}

fn patch_subset(raw: &Map<String, Value>, scope: &[&str], declared: Option<Strategy>) -> Map<String, Value> {
    raw.iter()
        .filter(|(key, _)| scope.contains(&key.as_str()))
        .map(|(key, value)| match (key.as_str(), declared) {
            ("strategy", Some(s)) => (key.clone(), Value::String(s.as_str().to_string())),
            _ => (key.clone(), value.clone()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_month_day_serialization() {
        let days = vec![MonthDay::Day(15), MonthDay::FromEnd(2)];
        assert_eq!(serde_json::to_value(days).unwrap(), json!([15, "lastDay2"]));
    }

    #[test]
    fn test_month_day_parse_bounds() {
        assert_eq!(MonthDay::parse(&json!(31)), Some(MonthDay::Day(31)));
        assert_eq!(MonthDay::parse(&json!(0)), None);
        assert_eq!(MonthDay::parse(&json!(32)), None);
        assert_eq!(MonthDay::parse(&json!("lastDay5")), None);
    }

    #[test]
    fn test_schedule_serializes_strategy_tag() {
        let schedule = Schedule::Cron {
            cron: "0 4 * * 0".into(),
            duration_minutes: 30,
        };
        assert_eq!(
            serde_json::to_value(schedule).unwrap(),
            json!({ "strategy": "cron", "cron": "0 4 * * 0", "durationMinutes": 30 })
        );
    }
}
