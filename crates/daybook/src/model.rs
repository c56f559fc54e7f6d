//! Template inputs.
//!
//! Every type here is a read-only view handed to one template call. They all
//! (de)serialize with camelCase field names so hosts can feed them from JSON
//! or YAML documents, and so sheet overrides can read them by the same names
//! the template contract uses.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::time::parse_timestamp;

/// Rendering family of an event.
///
/// The four known tags are explicit variants; anything else is kept verbatim
/// in [`EventCategory::Other`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventCategory {
    Milestone,
    Task,
    Allday,
    #[default]
    Time,
    Other(String),
}

impl EventCategory {
    /// The tag text.
    pub fn as_str(&self) -> &str {
        match self {
            EventCategory::Milestone => "milestone",
            EventCategory::Task => "task",
            EventCategory::Allday => "allday",
            EventCategory::Time => "time",
            EventCategory::Other(tag) => tag,
        }
    }
}

impl From<&str> for EventCategory {
    fn from(tag: &str) -> Self {
        match tag {
            "milestone" => EventCategory::Milestone,
            "task" => EventCategory::Task,
            "allday" => EventCategory::Allday,
            "time" => EventCategory::Time,
            other => EventCategory::Other(other.to_string()),
        }
    }
}

impl From<String> for EventCategory {
    fn from(tag: String) -> Self {
        match EventCategory::from(tag.as_str()) {
            EventCategory::Other(_) => EventCategory::Other(tag),
            known => known,
        }
    }
}

impl From<EventCategory> for String {
    fn from(category: EventCategory) -> Self {
        match category {
            EventCategory::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Availability shown for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventState {
    Free,
    Busy,
}

impl EventState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventState::Free => "Free",
            EventState::Busy => "Busy",
        }
    }
}

impl fmt::Display for EventState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(EventState::Free),
            "busy" => Ok(EventState::Busy),
            other => Err(format!("unknown event state: {}", other)),
        }
    }
}

// An empty string means "no state", same as a missing field.
fn state_or_none<'de, D>(deserializer: D) -> Result<Option<EventState>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

// Timestamps may omit the offset; those are read as UTC.
fn timestamp<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
}

fn timestamp_or_none<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_timestamp(value)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", value))),
    }
}

/// The event fields templates read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventModel {
    /// Display title. May embed markup from untrusted sources.
    pub title: String,
    pub category: EventCategory,
    /// Display color, any CSS color value. Empty means unset.
    pub bg_color: String,
    #[serde(deserialize_with = "timestamp_or_none")]
    pub start: Option<DateTime<FixedOffset>>,
    #[serde(deserialize_with = "timestamp_or_none")]
    pub end: Option<DateTime<FixedOffset>>,
    pub is_allday: bool,
    /// Travel time before the event, in minutes.
    pub going_duration: u32,
    /// Travel time after the event, in minutes.
    pub coming_duration: u32,
    pub location: String,
    pub attendees: Vec<String>,
    #[serde(deserialize_with = "state_or_none")]
    pub state: Option<EventState>,
    pub recurrence_rule: String,
    pub body: String,
}

impl EventModel {
    /// Creates an event with a title and category, everything else empty.
    pub fn new(title: impl Into<String>, category: impl Into<EventCategory>) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            ..Self::default()
        }
    }
}

/// A month-view grid cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonthGridModel {
    /// Date as `YYYY-MM-DD`.
    pub date: String,
    pub is_today: bool,
}

/// A month-view weekday header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonthDayNameModel {
    pub label: String,
}

/// A week-view day header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeekDayNameModel {
    /// Day of month.
    pub date: u32,
    /// Sunday-based weekday index.
    pub day: u32,
    pub day_name: String,
    pub is_today: bool,
}

/// Title of the "more events" popup in month view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MoreTitleDate {
    /// Day of month.
    pub date: u32,
    /// Sunday-based weekday index, 0 through 6.
    pub day: u32,
}

/// A timezone badge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimezoneLabelModel {
    /// Explicit label. Wins over the offset when present.
    pub display_label: Option<String>,
    /// Signed minutes from UTC.
    pub timezone_offset: Option<i32>,
}

impl TimezoneLabelModel {
    /// Badge for an IANA zone, with its offset at `instant`.
    pub fn for_zone(zone: chrono_tz::Tz, instant: DateTime<Utc>) -> Self {
        Self {
            display_label: None,
            timezone_offset: Some(crate::time::offset_minutes(zone, instant)),
        }
    }
}

/// A clock reading on the time grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentTimeModel {
    #[serde(deserialize_with = "timestamp")]
    pub time: DateTime<FixedOffset>,
    /// Token pattern; `HH:mm` when absent.
    #[serde(default)]
    pub format: Option<String>,
}

impl CurrentTimeModel {
    pub fn new(time: DateTime<FixedOffset>) -> Self {
        Self { time, format: None }
    }
}

/// Arguments of the popup date line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupDateRange {
    #[serde(default)]
    pub is_allday: bool,
    #[serde(deserialize_with = "timestamp")]
    pub start: DateTime<FixedOffset>,
    #[serde(deserialize_with = "timestamp")]
    pub end: DateTime<FixedOffset>,
}
