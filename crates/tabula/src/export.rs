//! CSV and spreadsheet serialization.
//!
//! Both formats start from a [`Grid`] of already-resolved cell strings. CSV
//! quotes every field and doubles embedded quotes. The spreadsheet format is
//! an HTML document holding a single `<table>`; spreadsheet applications
//! open it as a worksheet when it is saved with the `.xls` extension and the
//! Excel MIME type.
//!
//! # Example
//!
//! ```rust
//! use tabula::export::Grid;
//!
//! let grid = Grid::new(
//!     vec!["Quote".into()],
//!     vec![vec![r#"He said "hi""#.into()]],
//! );
//! assert_eq!(grid.to_csv(), "\"Quote\"\n\"He said \"\"hi\"\"\"\n");
//! ```

use std::fmt;
use std::io;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};

/// MIME type of CSV exports.
pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8;";

/// MIME type of spreadsheet exports.
pub const SPREADSHEET_MIME_TYPE: &str = "application/vnd.ms-excel";

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Comma separated values.
    Csv,
    /// HTML table opened by spreadsheet software.
    #[serde(alias = "xls")]
    Spreadsheet,
}

impl ExportFormat {
    /// File extension without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Spreadsheet => "xls",
        }
    }

    /// MIME type handed to the sink.
    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Csv => CSV_MIME_TYPE,
            Self::Spreadsheet => SPREADSHEET_MIME_TYPE,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A finished export, ready for a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    /// File name including extension.
    pub file_name: String,
    /// MIME type of `contents`.
    pub mime_type: &'static str,
    /// Serialized payload.
    pub contents: String,
}

impl ExportFile {
    /// Serializes `grid` in `format` under `base_name.<ext>`.
    #[must_use]
    pub fn new(format: ExportFormat, base_name: &str, grid: &Grid) -> Self {
        let contents = match format {
            ExportFormat::Csv => grid.to_csv(),
            ExportFormat::Spreadsheet => grid.to_spreadsheet(),
        };
        Self {
            file_name: format!("{base_name}.{}", format.extension()),
            mime_type: format.mime_type(),
            contents,
        }
    }

    /// Payload size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    /// Returns true for an empty payload.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

/// Header row plus body rows of export strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    /// Column headers.
    pub headers: Vec<String>,
    /// Body rows, one string per header.
    pub rows: Vec<Vec<String>>,
}

impl Grid {
    /// Creates a grid.
    #[must_use]
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Serializes to CSV: every field quoted, rows terminated by `\n`.
    ///
    /// Writing into memory does not fail in practice; if it ever does, the
    /// error is logged and the payload is empty.
    #[must_use]
    pub fn to_csv(&self) -> String {
        self.write_csv().unwrap_or_else(|err| {
            warn!(error = %err, "csv serialization failed");
            String::new()
        })
    }

    /// Serializes to CSV, surfacing writer errors.
    pub fn write_csv(&self) -> Result<String> {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::Any(b'\n'))
            .flexible(true)
            .from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|err| Error::Io(io::Error::other(err.to_string())))?;
        String::from_utf8(bytes)
            .map_err(|err| Error::Io(io::Error::new(io::ErrorKind::InvalidData, err)))
    }

    /// Serializes to an HTML document wrapping one `<table>`.
    #[must_use]
    pub fn to_spreadsheet(&self) -> String {
        let mut out = String::from(
            "<html>\n<head><meta charset=\"utf-8\"></head>\n<body>\n<table>\n<thead><tr>",
        );
        for header in &self.headers {
            out.push_str("<th>");
            out.push_str(&escape_html(header));
            out.push_str("</th>");
        }
        out.push_str("</tr></thead>\n<tbody>\n");
        for row in &self.rows {
            out.push_str("<tr>");
            for cell in row {
                out.push_str("<td>");
                out.push_str(&escape_html(cell));
                out.push_str("</td>");
            }
            out.push_str("</tr>\n");
        }
        out.push_str("</tbody>\n</table>\n</body>\n</html>\n");
        out
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
