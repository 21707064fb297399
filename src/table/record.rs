//! Records displayed by the data table

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single displayable field value.
///
/// Missing fields are represented by `None` at the [`Record::field`] level;
/// both `None` and [`FieldValue::Null`] read as the empty string.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Text(Cow<'a, str>),
    Number(f64),
    Bool(bool),
    Null,
}

impl<'a> FieldValue<'a> {
    pub fn text(value: &'a str) -> Self {
        FieldValue::Text(Cow::Borrowed(value))
    }

    pub fn owned(value: String) -> Self {
        FieldValue::Text(Cow::Owned(value))
    }

    /// String form used for filtering and display
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Text(s) => Cow::Borrowed(s.as_ref()),
            FieldValue::Number(n) => Cow::Owned(format_number(*n)),
            FieldValue::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            FieldValue::Null => Cow::Borrowed(""),
        }
    }

    /// Numeric reading of the value, if it has one.
    ///
    /// Text counts as numeric when it parses as a finite number after trimming,
    /// so a year delivered as `"2019"` sorts next to a year delivered as `2019`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) if n.is_finite() => Some(*n),
            FieldValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
            }
            _ => None,
        }
    }

    pub fn into_owned(self) -> FieldValue<'static> {
        match self {
            FieldValue::Text(s) => FieldValue::Text(Cow::Owned(s.into_owned())),
            FieldValue::Number(n) => FieldValue::Number(n),
            FieldValue::Bool(b) => FieldValue::Bool(b),
            FieldValue::Null => FieldValue::Null,
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<i64> for FieldValue<'_> {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<i32> for FieldValue<'_> {
    fn from(value: i32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

impl From<f64> for FieldValue<'_> {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<bool> for FieldValue<'_> {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(value: &'a str) -> Self {
        FieldValue::text(value)
    }
}

impl<'a> From<&'a Option<String>> for FieldValue<'a> {
    fn from(value: &'a Option<String>) -> Self {
        match value {
            Some(s) => FieldValue::text(s),
            None => FieldValue::Null,
        }
    }
}

/// Integral numbers print without a fractional part ("2020", not "2020.0").
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Anything the data table can display: a unique id plus named fields.
pub trait Record {
    /// Stable row identity
    fn id(&self) -> &str;

    /// Value of the named field, `None` when the record has no such field
    fn field(&self, key: &str) -> Option<FieldValue<'_>>;

    /// String form of a field; missing and null fields read as empty
    fn field_text(&self, key: &str) -> String {
        self.field(key)
            .map(|v| v.to_text().into_owned())
            .unwrap_or_default()
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        (**self).field(key)
    }
}

/// Record backed by an arbitrary JSON object, for payloads without a
/// dedicated model type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct JsonRecord {
    id: String,
    fields: Map<String, Value>,
}

impl JsonRecord {
    /// Build from a JSON object; the `id` field may be a string or a number.
    pub fn from_object(fields: Map<String, Value>) -> Option<Self> {
        let id = match fields.get("id")? {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        Some(Self { id, fields })
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl TryFrom<Map<String, Value>> for JsonRecord {
    type Error = String;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        JsonRecord::from_object(fields).ok_or_else(|| "record requires a string or numeric 'id'".to_string())
    }
}

impl From<JsonRecord> for Map<String, Value> {
    fn from(record: JsonRecord) -> Self {
        record.fields
    }
}

impl Record for JsonRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        let value = self.fields.get(key)?;
        Some(match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(*b),
            Value::Number(n) => n.as_f64().map(FieldValue::Number).unwrap_or(FieldValue::Null),
            Value::String(s) => FieldValue::text(s),
            // Nested values are shown in their JSON form
            other => FieldValue::owned(other.to_string()),
        })
    }
}
