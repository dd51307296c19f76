use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Keys every maintenance window accepts.
pub const COMMON_FIELDS: &[&str] = &[
    "strategy",
    "title",
    "active",
    "description",
    "dateRange",
    "timeRange",
    "timezoneOption",
];

/// How a maintenance window recurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    #[serde(rename = "manual")]
    Manual,
    #[serde(rename = "single")]
    Single,
    #[serde(rename = "recurring-interval")]
    RecurringInterval,
    #[serde(rename = "recurring-weekday", alias = "recurring-day-of-week")]
    RecurringWeekday,
    #[serde(rename = "recurring-day-of-month")]
    RecurringDayOfMonth,
    #[serde(rename = "cron")]
    Cron,
}

impl Strategy {
    pub const ALL: [Strategy; 6] = [
        Strategy::Manual,
        Strategy::Single,
        Strategy::RecurringInterval,
        Strategy::RecurringWeekday,
        Strategy::RecurringDayOfMonth,
        Strategy::Cron,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Manual => "manual",
            Strategy::Single => "single",
            Strategy::RecurringInterval => "recurring-interval",
            Strategy::RecurringWeekday => "recurring-weekday",
            Strategy::RecurringDayOfMonth => "recurring-day-of-month",
            Strategy::Cron => "cron",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let wanted = raw.trim().to_lowercase().replace('_', "-");
        if wanted == "recurring-day-of-week" {
            return Some(Strategy::RecurringWeekday);
        }
        Self::ALL.into_iter().find(|s| s.as_str() == wanted)
    }

    /// Keys only this strategy uses.
    pub fn scope(self) -> &'static [&'static str] {
        match self {
            Strategy::Manual | Strategy::Single => &[],
            Strategy::RecurringInterval => &["intervalDay"],
            Strategy::RecurringWeekday => &["weekdays"],
            Strategy::RecurringDayOfMonth => &["daysOfMonth"],
            Strategy::Cron => &["cron", "durationMinutes"],
        }
    }

    /// Keys a window of this strategy cannot be scheduled without.
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            Strategy::Manual | Strategy::Single | Strategy::RecurringInterval => &[],
            Strategy::RecurringWeekday => &["weekdays"],
            Strategy::RecurringDayOfMonth => &["daysOfMonth"],
            Strategy::Cron => &["cron", "timezoneOption"],
        }
    }

    pub fn fields(self) -> Vec<&'static str> {
        let mut keys = COMMON_FIELDS.to_vec();
        keys.extend_from_slice(self.scope());
        keys
    }

    pub fn all_fields() -> Vec<&'static str> {
        let mut keys = COMMON_FIELDS.to_vec();
        for strategy in Self::ALL {
            keys.extend_from_slice(strategy.scope());
        }
        keys
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown maintenance strategy '{0}'")]
pub struct UnknownStrategy(pub String);

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_of_week_alias() {
        assert_eq!(Strategy::parse("recurring-day-of-week"), Some(Strategy::RecurringWeekday));
        assert_eq!(Strategy::parse("RECURRING_WEEKDAY"), Some(Strategy::RecurringWeekday));
        assert_eq!("cron".parse::<Strategy>().unwrap(), Strategy::Cron);
        assert!("hourly".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_scoped_fields() {
        assert!(Strategy::Cron.fields().contains(&"durationMinutes"));
        assert!(!Strategy::Manual.fields().contains(&"weekdays"));
        assert_eq!(Strategy::all_fields().len(), COMMON_FIELDS.len() + 5);
    }
}
