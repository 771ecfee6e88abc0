//! Column descriptors.
//!
//! A [`Column`] describes how one table column reads, renders, sorts and
//! exports a field of a record. Extractors are stored behind `Arc` so column
//! sets can be cloned and shared between tables.
//!
//! # Example
//!
//! ```rust
//! use tabula::column::{Align, Column};
//!
//! struct Partner {
//!     name: String,
//!     active: bool,
//! }
//!
//! let name = Column::new("Name")
//!     .accessor(|p: &Partner| p.name.clone().into())
//!     .sortable(true)
//!     .width(20);
//!
//! let status = Column::new("Status")
//!     .accessor(|p: &Partner| p.active.into())
//!     .render(|p: &Partner| if p.active { "Active".into() } else { "Inactive".into() })
//!     .align(Align::Center);
//!
//! let partner = Partner { name: "Acme".into(), active: true };
//! assert_eq!(name.display(&partner), "Acme");
//! assert_eq!(status.display(&partner), "Active");
//! assert_eq!(status.resolve_export_value(&partner).to_export_string(), "true");
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Reads a [`Value`] out of a record.
pub type Extractor<R> = Arc<dyn Fn(&R) -> Value + Send + Sync>;

/// Renders a record into display text for one cell.
pub type Renderer<R> = Arc<dyn Fn(&R) -> String + Send + Sync>;

/// Horizontal alignment hint for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Pad on the right.
    #[default]
    Left,
    /// Pad on both sides.
    Center,
    /// Pad on the left.
    Right,
}

/// A single column definition for the table.
pub struct Column<R> {
    header: String,
    key: Option<String>,
    accessor: Option<Extractor<R>>,
    render: Option<Renderer<R>>,
    sort_value: Option<Extractor<R>>,
    export_value: Option<Extractor<R>>,
    width: usize,
    align: Align,
    sortable: bool,
    export_disabled: bool,
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            header: self.header.clone(),
            key: self.key.clone(),
            accessor: self.accessor.clone(),
            render: self.render.clone(),
            sort_value: self.sort_value.clone(),
            export_value: self.export_value.clone(),
            width: self.width,
            align: self.align,
            sortable: self.sortable,
            export_disabled: self.export_disabled,
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("header", &self.header)
            .field("key", &self.get_key())
            .field("width", &self.width)
            .field("align", &self.align)
            .field("sortable", &self.sortable)
            .field("export_disabled", &self.export_disabled)
            .finish()
    }
}

impl<R> Column<R> {
    /// Creates a new column with the given header.
    ///
    /// The column key defaults to the header text.
    #[must_use]
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            key: None,
            accessor: None,
            render: None,
            sort_value: None,
            export_value: None,
            width: 0,
            align: Align::Left,
            sortable: false,
            export_disabled: false,
        }
    }

    /// Sets an explicit key used by sort requests (builder pattern).
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the direct field accessor (builder pattern).
    #[must_use]
    pub fn accessor<F>(mut self, f: F) -> Self
    where
        F: Fn(&R) -> Value + Send + Sync + 'static,
    {
        self.accessor = Some(Arc::new(f));
        self
    }

    /// Sets a custom cell renderer (builder pattern).
    #[must_use]
    pub fn render<F>(mut self, f: F) -> Self
    where
        F: Fn(&R) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(f));
        self
    }

    /// Sets the value used for sorting, overriding the accessor (builder pattern).
    #[must_use]
    pub fn sort_value<F>(mut self, f: F) -> Self
    where
        F: Fn(&R) -> Value + Send + Sync + 'static,
    {
        self.sort_value = Some(Arc::new(f));
        self
    }

    /// Sets the value used for export, overriding the accessor (builder pattern).
    #[must_use]
    pub fn export_value<F>(mut self, f: F) -> Self
    where
        F: Fn(&R) -> Value + Send + Sync + 'static,
    {
        self.export_value = Some(Arc::new(f));
        self
    }

    /// Sets the width hint in terminal cells. 0 sizes the column to its content.
    #[must_use]
    pub fn width(mut self, w: usize) -> Self {
        self.width = w;
        self
    }

    /// Sets the alignment hint (builder pattern).
    #[must_use]
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Marks the column as sortable (builder pattern).
    #[must_use]
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Excludes the column from CSV and spreadsheet export (builder pattern).
    #[must_use]
    pub fn export_disabled(mut self, disabled: bool) -> Self {
        self.export_disabled = disabled;
        self
    }

    /// Returns the header text.
    #[must_use]
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Returns the key sort requests refer to.
    #[must_use]
    pub fn get_key(&self) -> &str {
        self.key.as_deref().unwrap_or(&self.header)
    }

    /// Returns the width hint.
    #[must_use]
    pub fn get_width(&self) -> usize {
        self.width
    }

    /// Returns the alignment hint.
    #[must_use]
    pub fn get_align(&self) -> Align {
        self.align
    }

    /// Returns whether the column accepts sort requests.
    #[must_use]
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// Returns whether the column is left out of exports.
    #[must_use]
    pub fn is_export_disabled(&self) -> bool {
        self.export_disabled
    }

    /// Reads the raw value through the accessor, or null without one.
    #[must_use]
    pub fn value(&self, record: &R) -> Value {
        self.accessor.as_ref().map_or(Value::Null, |f| f(record))
    }

    /// Resolves the sort value: sort extractor, then accessor, then null.
    #[must_use]
    pub fn resolve_sort_value(&self, record: &R) -> Value {
        match &self.sort_value {
            Some(f) => f(record),
            None => self.value(record),
        }
    }

    /// Resolves the export value: export extractor, then accessor, then null.
    #[must_use]
    pub fn resolve_export_value(&self, record: &R) -> Value {
        match &self.export_value {
            Some(f) => f(record),
            None => self.value(record),
        }
    }

    /// Renders the cell text: custom renderer, else the accessor value.
    #[must_use]
    pub fn display(&self, record: &R) -> String {
        match &self.render {
            Some(f) => f(record),
            None => self.value(record).to_export_string(),
        }
    }
}
