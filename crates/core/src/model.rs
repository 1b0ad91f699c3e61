//! Task records as written to the feed.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Status value rendered with the positive badge.
pub const STATUS_IN_PROGRESS: &str = "In Progress";
/// Status value rendered with the negative badge.
pub const STATUS_ERROR: &str = "Error";

/// One task as written by the producer, one per feed line.
///
/// Every field is optional. Unknown fields are dropped on decode, absent
/// fields are omitted on encode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Stable identity used as the card key.
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    /// Human-readable description.
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    /// Agent that owns the task.
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    /// Free-form status.
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Textual result.
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Priority annotation from the Griptape planner.
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub griptape_priority: Option<String>,
    /// Priority annotation from the OpenAI planner.
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub openai_priority: Option<String>,
    /// Priority annotation from the Grok planner.
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub grok_priority: Option<String>,
    /// Error text reported by the producer.
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Visual class of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusClass {
    /// "In Progress".
    Positive,
    /// "Error".
    Negative,
    /// Anything else, including no status.
    Neutral,
}

impl StatusClass {
    /// Classifies a raw status by exact match.
    pub fn of(status: Option<&str>) -> Self {
        match status {
            Some(STATUS_IN_PROGRESS) => Self::Positive,
            Some(STATUS_ERROR) => Self::Negative,
            _ => Self::Neutral,
        }
    }

    /// Stable lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

/// Why a single value could not be turned into a [`TaskRecord`].
#[derive(Debug, Error)]
pub enum RecordError {
    /// The line is not valid JSON.
    #[error("invalid json: {0}")]
    Syntax(#[source] serde_json::Error),
    /// Valid JSON, but not an object.
    #[error("expected a json object, found {0}")]
    NotAnObject(&'static str),
    /// An object whose known fields have the wrong shape.
    #[error("invalid task field: {0}")]
    Field(#[source] serde_json::Error),
}

impl TaskRecord {
    /// Parses one feed line.
    pub fn from_line(line: &str) -> Result<Self, RecordError> {
        let value: Value = serde_json::from_str(line).map_err(RecordError::Syntax)?;
        Self::from_value(value)
    }

    /// Converts an already-parsed JSON value. Only objects are accepted.
    pub fn from_value(value: Value) -> Result<Self, RecordError> {
        if !value.is_object() {
            return Err(RecordError::NotAnObject(json_kind(&value)));
        }
        serde_json::from_value(value).map_err(RecordError::Field)
    }

    /// Badge class derived from `status`.
    pub fn status_class(&self) -> StatusClass {
        StatusClass::of(self.status.as_deref())
    }

    /// `task_id` if present and not blank.
    pub fn id(&self) -> Option<&str> {
        non_empty(&self.task_id)
    }
}

/// Returns the field's text unless it is absent or blank.
pub fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// Producers occasionally write numeric ids or boolean flags; keep them as text.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected a string, found {}",
            json_kind(&other)
        ))),
    }
}
