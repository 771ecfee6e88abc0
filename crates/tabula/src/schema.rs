//! Table definitions for JSON records.
//!
//! Records fetched from a REST API arrive as JSON objects, so this module
//! provides the field-name lookup case on top of the typed [`Column`] API:
//! a [`TableDefinition`] read from TOML turns into columns over
//! [`JsonRecord`]s.
//!
//! # Example
//!
//! ```rust
//! use tabula::schema::{TableDefinition, load_records};
//!
//! let definition = TableDefinition::from_toml_str(r#"
//!     key_field = "id"
//!
//!     [options]
//!     initial_sort = { column_key = "Name", direction = "asc" }
//!
//!     [[columns]]
//!     header = "Name"
//!     field = "name"
//!     sortable = true
//! "#).unwrap();
//!
//! let records = load_records(r#"{ "data": [
//!     { "id": 1, "name": "Bob" },
//!     { "id": 2, "name": "Ana" }
//! ] }"#).unwrap();
//!
//! let table = definition.build_table(records);
//! let keys: Vec<_> = table.rows().iter().map(|r| r.key.to_string()).collect();
//! assert_eq!(keys, ["2", "1"]);
//! ```

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use tracing::debug;

use crate::column::{Align, Column};
use crate::error::{Error, Result};
use crate::options::TableOptions;
use crate::selection::RowKey;
use crate::table::Table;
use crate::value::Value;

/// A record decoded from a JSON object.
pub type JsonRecord = serde_json::Map<String, Json>;

/// How a JSON field is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Use the JSON type as-is.
    #[default]
    Auto,
    /// Always text.
    Text,
    /// Numbers, parsing numeric strings.
    Number,
    /// Booleans, parsing `"true"` / `"false"`.
    Bool,
    /// Dates from RFC 3339 / `YYYY-MM-DD` strings or epoch milliseconds.
    Date,
}

impl FieldKind {
    /// Converts a raw JSON field. Values that do not parse keep their JSON
    /// meaning instead of failing.
    #[must_use]
    pub fn convert(self, raw: &Json) -> Value {
        match (self, raw) {
            (_, Json::Null) => Value::Null,
            (Self::Text, Json::String(s)) => Value::Text(s.clone()),
            (Self::Text, other) => Value::Text(Value::from(other).to_export_string()),
            (Self::Number, Json::String(s)) => s
                .trim()
                .parse::<f64>()
                .map_or_else(|_| Value::Text(s.clone()), Value::Number),
            (Self::Bool, Json::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                _ => Value::Text(s.clone()),
            },
            (Self::Date, Json::String(s)) => {
                parse_date(s).map_or_else(|| Value::Text(s.clone()), Value::Date)
            }
            (Self::Date, Json::Number(n)) => n
                .as_i64()
                .and_then(DateTime::<Utc>::from_timestamp_millis)
                .map_or_else(|| Value::from(raw), Value::Date),
            (_, other) => Value::from(other),
        }
    }
}

fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(d) = DateTime::parse_from_rfc3339(s) {
        return Some(d.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn default_true() -> bool {
    true
}

/// One column of a [`TableDefinition`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    /// Header text, also the default sort key.
    pub header: String,
    /// Explicit sort key.
    #[serde(default)]
    pub key: Option<String>,
    /// JSON field read by the column. Without one the column is always empty.
    #[serde(default)]
    pub field: Option<String>,
    /// Interpretation of the field.
    #[serde(default)]
    pub kind: FieldKind,
    /// Whether header clicks sort by this column.
    #[serde(default)]
    pub sortable: bool,
    /// Whether the column appears in exports.
    #[serde(default = "default_true")]
    pub exportable: bool,
    /// Width hint; 0 sizes to content.
    #[serde(default)]
    pub width: usize,
    /// Alignment hint.
    #[serde(default)]
    pub align: Align,
}

impl ColumnDefinition {
    /// Builds the typed column.
    #[must_use]
    pub fn to_column(&self) -> Column<JsonRecord> {
        let mut column = Column::new(self.header.clone())
            .sortable(self.sortable)
            .export_disabled(!self.exportable)
            .width(self.width)
            .align(self.align);
        if let Some(key) = &self.key {
            column = column.key(key.clone());
        }
        if let Some(field) = &self.field {
            let field = field.clone();
            let kind = self.kind;
            column = column.accessor(move |record: &JsonRecord| {
                record.get(&field).map_or(Value::Null, |raw| kind.convert(raw))
            });
        }
        column
    }
}

/// Columns, options and key field for a table over JSON records.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TableDefinition {
    /// Field whose value keys each row. Rows are keyed by position without it.
    pub key_field: Option<String>,
    /// Table options.
    pub options: TableOptions,
    /// Column definitions, in display order.
    pub columns: Vec<ColumnDefinition>,
}

impl TableDefinition {
    /// Parses a definition from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let definition: Self = toml::from_str(s)?;
        if definition.columns.is_empty() {
            return Err(Error::EmptyColumns);
        }
        Ok(definition)
    }

    /// Reads and parses a TOML definition file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let definition = Self::from_toml_str(&text)?;
        debug!(
            path = %path.as_ref().display(),
            columns = definition.columns.len(),
            "table definition loaded"
        );
        Ok(definition)
    }

    /// Builds the typed columns.
    #[must_use]
    pub fn columns(&self) -> Vec<Column<JsonRecord>> {
        self.columns.iter().map(ColumnDefinition::to_column).collect()
    }

    /// Builds a table over `records`.
    #[must_use]
    pub fn build_table(&self, records: Vec<JsonRecord>) -> Table<JsonRecord> {
        let table = Table::new(self.columns(), records, self.options.clone());
        match &self.key_field {
            Some(field) => {
                let field = field.clone();
                table.key_fn(move |record: &JsonRecord| {
                    let key = record.get(&field).map(Value::from).unwrap_or_default();
                    RowKey::new(key.to_export_string())
                })
            }
            None => table,
        }
    }
}

/// Decodes records from a JSON array or a `{ "data": [...] }` envelope.
pub fn load_records(json: &str) -> Result<Vec<JsonRecord>> {
    let parsed: Json = serde_json::from_str(json)?;
    let list = match parsed {
        Json::Object(mut envelope) => envelope.remove("data").ok_or_else(|| {
            Error::invalid_records("expected an array or an object with a \"data\" field")
        })?,
        other => other,
    };
    let Json::Array(items) = list else {
        return Err(Error::invalid_records("expected an array of records"));
    };
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Json::Object(record) => Ok(record),
            _ => Err(Error::invalid_records(format!("record {i} is not an object"))),
        })
        .collect()
}

/// Reads and decodes a JSON record file.
pub fn load_records_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<JsonRecord>> {
    let text = std::fs::read_to_string(path.as_ref())?;
    let records = load_records(&text)?;
    debug!(
        path = %path.as_ref().display(),
        records = records.len(),
        "records loaded"
    );
    Ok(records)
}
