//! Table options.
//!
//! Defaults:
//! - sorting and pagination enabled
//! - selection and export disabled
//! - 10 rows per page, page size choices `[10, 25, 50]`
//! - export file name `"dados"`
//!
//! # Example
//!
//! ```rust
//! use tabula::options::TableOptions;
//! use tabula::sort::SortState;
//!
//! let options = TableOptions::new()
//!     .initial_sort(SortState::asc("Name"))
//!     .page_size(25)
//!     .selection(true)
//!     .export("parceiros");
//! assert!(options.enable_export);
//! assert_eq!(options.export_file_name, "parceiros");
//! ```

use serde::{Deserialize, Serialize};

use crate::sort::SortState;

/// Default rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Default page size choices.
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 3] = [10, 25, 50];

/// Default export file name, without extension.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "dados";

/// Behaviour switches for a [`Table`](crate::table::Table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    /// Accept sort requests.
    pub enable_sorting: bool,
    /// Sort applied at construction, if the column exists and is sortable.
    pub initial_sort: Option<SortState>,
    /// Split rows into pages.
    pub enable_pagination: bool,
    /// Rows per page at construction.
    pub initial_page_size: usize,
    /// Page sizes offered to the user.
    pub page_size_options: Vec<usize>,
    /// Allow row selection.
    pub enable_selection: bool,
    /// Allow exporting to a sink.
    pub enable_export: bool,
    /// Export file name without extension.
    pub export_file_name: String,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl TableOptions {
    /// Creates options with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            enable_sorting: true,
            initial_sort: None,
            enable_pagination: true,
            initial_page_size: DEFAULT_PAGE_SIZE,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            enable_selection: false,
            enable_export: false,
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
        }
    }

    /// Enables or disables sorting.
    #[must_use]
    pub fn sorting(mut self, enabled: bool) -> Self {
        self.enable_sorting = enabled;
        self
    }

    /// Sets the initial sort.
    #[must_use]
    pub fn initial_sort(mut self, sort: SortState) -> Self {
        self.initial_sort = Some(sort);
        self
    }

    /// Enables or disables pagination.
    #[must_use]
    pub fn pagination(mut self, enabled: bool) -> Self {
        self.enable_pagination = enabled;
        self
    }

    /// Sets the initial page size.
    #[must_use]
    pub fn page_size(mut self, size: usize) -> Self {
        self.initial_page_size = size;
        self
    }

    /// Sets the page size choices.
    #[must_use]
    pub fn page_size_options(mut self, sizes: Vec<usize>) -> Self {
        self.page_size_options = sizes;
        self
    }

    /// Enables or disables row selection.
    #[must_use]
    pub fn selection(mut self, enabled: bool) -> Self {
        self.enable_selection = enabled;
        self
    }

    /// Enables export under the given file name.
    #[must_use]
    pub fn export(mut self, file_name: impl Into<String>) -> Self {
        self.enable_export = true;
        self.export_file_name = file_name.into();
        self
    }
}
