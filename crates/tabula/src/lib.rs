#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # Tabula
//!
//! A generic client-side data table engine.
//!
//! Tabula owns everything a data table does besides drawing pixels:
//! - **value** - Cell values and the sort comparator
//! - **column** - Column descriptors with typed extractors
//! - **sort** - Sort state and stable row ordering
//! - **paginator** - 1-based pagination with clamping
//! - **selection** - Row keys and the selection set
//! - **state** - Table state and the pure reducer
//! - **table** - The engine tying it all together, plus a text view
//! - **export** - CSV and HTML-spreadsheet serialization
//! - **sink** - Destinations for finished exports
//! - **schema** - TOML table definitions over JSON records
//!
//! ## Example
//!
//! ```rust
//! use tabula::prelude::*;
//!
//! struct Receipt {
//!     number: u32,
//!     payer: &'static str,
//! }
//!
//! let columns = vec![
//!     Column::new("Number").accessor(|r: &Receipt| r.number.into()).sortable(true),
//!     Column::new("Payer").accessor(|r: &Receipt| r.payer.into()),
//! ];
//! let data = vec![
//!     Receipt { number: 2, payer: "Acme" },
//!     Receipt { number: 1, payer: "Globex" },
//! ];
//!
//! let mut table = Table::new(columns, data, TableOptions::new().export("recibos"));
//! table.sort_by("Number");
//!
//! let csv = table.export_csv();
//! assert_eq!(csv.file_name, "recibos.csv");
//! assert_eq!(csv.contents, "\"Number\",\"Payer\"\n\"1\",\"Globex\"\n\"2\",\"Acme\"\n");
//! ```

pub mod column;
pub mod error;
pub mod export;
pub mod options;
pub mod paginator;
pub mod schema;
pub mod selection;
pub mod sink;
pub mod sort;
pub mod state;
pub mod table;
pub mod value;

pub use error::{Error, Result};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::column::{Align, Column};
    pub use crate::error::{Error, Result};
    pub use crate::export::{ExportFile, ExportFormat, Grid};
    pub use crate::options::TableOptions;
    pub use crate::paginator::Paginator;
    pub use crate::schema::{JsonRecord, TableDefinition, load_records};
    pub use crate::selection::{RowKey, Selection};
    pub use crate::sink::{DirectorySink, ExportSink, MemorySink};
    pub use crate::sort::{SortDirection, SortState};
    pub use crate::state::{Action, TableState};
    pub use crate::table::{KeyedRow, Table};
    pub use crate::value::Value;
}
