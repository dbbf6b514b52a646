use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Accepted local date-time layouts, most specific first.
const LOCAL_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Identifier assigned by the store. Never interpreted, only echoed back in URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskId(String);

impl TaskId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        TaskId(s.to_string())
    }
}

impl From<u64> for TaskId {
    fn from(n: u64) -> Self {
        TaskId(n.to_string())
    }
}

// Stores hand out either numeric or string ids.
impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(TaskId(s)),
            Value::Number(n) => Ok(TaskId(n.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "unsupported task id: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Open,
    InProgress,
    Closed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Open => "Open",
            Status::InProgress => "In Progress",
            Status::Closed => "Closed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field of a stored record.
///
/// The store keeps whatever it was sent, so a field can be absent, `null` or
/// any JSON value, and each of those displays differently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Field {
    #[default]
    Missing,
    Null,
    Value(Value),
}

impl Field {
    /// The field as a template string would print it.
    pub fn text(&self) -> String {
        match self {
            Field::Missing => "undefined".to_string(),
            Field::Null => "null".to_string(),
            Field::Value(Value::String(s)) => s.clone(),
            Field::Value(other) => other.to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => Field::Null,
            value => Field::Value(value),
        })
    }
}

#[cfg(test)]
impl From<&str> for Field {
    fn from(s: &str) -> Self {
        Field::Value(Value::String(s.to_string()))
    }
}

#[cfg(test)]
impl From<String> for Field {
    fn from(s: String) -> Self {
        Field::Value(Value::String(s))
    }
}

#[cfg(test)]
impl From<Option<String>> for Field {
    fn from(value: Option<String>) -> Self {
        value.map_or(Field::Null, Field::from)
    }
}

/// A task as returned by the store.
///
/// Only the id is guaranteed: edits send whatever the user typed, including
/// nothing at all, and the store takes any JSON.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    #[serde(default)]
    pub title: Field,
    #[serde(default)]
    pub description: Field,
    #[serde(default)]
    pub status: Field,
    #[serde(default)]
    pub due_date: Field,
}

impl Task {
    /// Due date in local time, `None` when absent or unparsable.
    ///
    /// A `null` due date reads as the Unix epoch and a number as milliseconds
    /// since the epoch.
    pub fn due(&self) -> Option<DateTime<Local>> {
        match &self.due_date {
            Field::Missing => None,
            Field::Null => Some(Utc.timestamp_opt(0, 0).single()?.with_timezone(&Local)),
            Field::Value(Value::String(s)) => parse_due_date(s),
            Field::Value(Value::Number(n)) => {
                let millis = n.as_i64()?;
                Some(Utc.timestamp_millis_opt(millis).single()?.with_timezone(&Local))
            }
            Field::Value(_) => None,
        }
    }
}

/// Body of a creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: String,
    pub due_date: String,
}

#[cfg(test)]
impl NewTask {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        status: Status,
        due: DateTime<Local>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            status: status.to_string(),
            due_date: due.format("%Y-%m-%dT%H:%M:%S").to_string(),
        }
    }
}

/// Body of an update request. All four fields are always sent, `null` included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub due_date: Option<String>,
}

/// Parses a due date the way the store's clients write them.
///
/// RFC 3339 keeps its offset, bare date-times are local, a bare date is midnight UTC.
pub fn parse_due_date(input: &str) -> Option<DateTime<Local>> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Local));
    }
    if let Some(naive) = LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
    {
        return Local.from_local_datetime(&naive).earliest();
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive).with_timezone(&Local))
}
