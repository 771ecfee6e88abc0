//! Cell values extracted from records.
//!
//! Columns never look inside a record themselves; they hold extractor
//! functions that turn a record into a [`Value`]. Sorting and export both
//! operate on these values, so any record type can be displayed as long as
//! its columns know how to read it.
//!
//! # Example
//!
//! ```rust
//! use std::cmp::Ordering;
//! use tabula::value::Value;
//!
//! assert_eq!(Value::from(30).to_export_string(), "30");
//! assert_eq!(Value::from(true).to_export_string(), "true");
//! assert_eq!(Value::Null.compare(&Value::from("a")), Ordering::Less);
//! assert_eq!(Value::from("apple").compare(&Value::from("Banana")), Ordering::Less);
//! ```

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Missing value. Sorts before everything else and exports as "".
    #[default]
    Null,
    /// Boolean, exported as `true` / `false`.
    Bool(bool),
    /// Any numeric value.
    Number(f64),
    /// Free text.
    Text(String),
    /// Point in time, exported as an ISO-8601 timestamp.
    Date(DateTime<Utc>),
}

impl Value {
    /// Returns true for [`Value::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the string used for export and for text comparison.
    #[must_use]
    pub fn to_export_string(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => format_number(*n),
            Self::Text(s) => s.clone(),
            Self::Date(d) => d.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Compares two values in ascending order.
    ///
    /// Nulls come first. Two dates compare by epoch milliseconds and two
    /// numbers numerically, with `-0.0 == 0.0` and NaN equal to any number. Every other pairing, mixed types included, falls
    /// back to a case-insensitive comparison of the export strings.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Null, _) => Ordering::Less,
            (_, Self::Null) => Ordering::Greater,
            (Self::Date(a), Self::Date(b)) => a.timestamp_millis().cmp(&b.timestamp_millis()),
            (Self::Number(a), Self::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            _ => compare_text(&self.to_export_string(), &other.to_export_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_export_string())
    }
}

/// Integral numbers print without a fractional part (`30`, not `30.0`).
/// Infinities print as `Infinity` / `-Infinity`.
fn format_number(n: f64) -> String {
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Self::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Self::Text(s.clone())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Self::Date(d)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl From<&serde_json::Value> for Value {
    fn from(v: &serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(*b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
            serde_json::Value::String(s) => Self::Text(s.clone()),
            other => Self::Text(other.to_string()),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Self::from(&v)
    }
}
