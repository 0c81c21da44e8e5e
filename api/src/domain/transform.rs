//! Row transform layer
//!
//! Database rows arrive as untyped JSON objects keyed by column name. Every
//! entity implements [`FromRow`] to turn such a row into its fixed-shape
//! record. Transforms are total: a missing, null or mistyped column falls back
//! to a default instead of failing, so the same function can shape rows for
//! public pages and authenticated handlers alike.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

/// Build a record from an untyped database row.
pub trait FromRow: Sized {
    fn from_row(row: &Value) -> Self;

    fn from_rows(rows: &[Value]) -> Vec<Self> {
        rows.iter().map(Self::from_row).collect()
    }
}

/// Read-only accessor over a row with defaulting getters.
pub struct Row<'a> {
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> Row<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self {
            fields: value.as_object(),
        }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.fields
            .and_then(|m| m.get(key))
            .filter(|v| !v.is_null())
    }

    /// Non-nullable text; defaults to `""`.
    pub fn string(&self, key: &str) -> String {
        self.opt_string(key).unwrap_or_default()
    }

    /// Nullable text; scalars are stringified, objects and arrays are ignored.
    pub fn opt_string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Defaults to `false`. Accepts Postgres-style text booleans.
    pub fn bool(&self, key: &str) -> bool {
        match self.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => matches!(s.as_str(), "true" | "t" | "TRUE" | "1"),
            Some(Value::Number(n)) => n.as_i64().map(|v| v != 0).unwrap_or(false),
            _ => false,
        }
    }

    pub fn opt_i64(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn i64(&self, key: &str) -> i64 {
        self.opt_i64(key).unwrap_or_default()
    }

    pub fn i32(&self, key: &str) -> i32 {
        self.opt_i64(key)
            .and_then(|v| i32::try_from(v).ok())
            .unwrap_or_default()
    }

    pub fn opt_uuid<T: From<Uuid>>(&self, key: &str) -> Option<T> {
        self.get(key)
            .and_then(Value::as_str)
            .and_then(|s| Uuid::parse_str(s).ok())
            .map(T::from)
    }

    /// Defaults to the nil UUID.
    pub fn uuid<T: From<Uuid>>(&self, key: &str) -> T {
        self.opt_uuid(key).unwrap_or_else(|| T::from(Uuid::nil()))
    }

    pub fn opt_timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        self.get(key).and_then(Value::as_str).and_then(parse_timestamp)
    }

    /// Defaults to the Unix epoch.
    pub fn timestamp(&self, key: &str) -> DateTime<Utc> {
        self.opt_timestamp(key).unwrap_or_default()
    }

    /// Raw JSON column; defaults to `null`.
    pub fn json(&self, key: &str) -> Value {
        self.get(key).cloned().unwrap_or(Value::Null)
    }

    /// JSON array column; defaults to empty.
    pub fn json_array(&self, key: &str) -> Vec<Value> {
        match self.get(key) {
            Some(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        }
    }

    /// Text array column; non-string items are dropped.
    pub fn string_list(&self, key: &str) -> Vec<String> {
        self.json_array(key)
            .into_iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect()
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Inverse of the application-facing rename: serializes a record and maps its
/// camelCase keys back to snake_case column names. Nested JSON is left as is.
pub fn to_row<T: Serialize>(record: &T) -> Value {
    match serde_json::to_value(record) {
        Ok(Value::Object(fields)) => Value::Object(
            fields
                .into_iter()
                .map(|(key, value)| (camel_to_snake(&key), value))
                .collect(),
        ),
        Ok(other) => other,
        Err(_) => Value::Null,
    }
}

pub fn camel_to_snake(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, ch) in key.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
