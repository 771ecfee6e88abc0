//! Data table engine.
//!
//! [`Table`] owns the sort, pagination and selection state for one list of
//! records. It never mutates the records themselves: sorting produces an
//! index order, pages are slices of that order, and selection is a set of
//! row keys.
//!
//! # Example
//!
//! ```rust
//! use tabula::column::Column;
//! use tabula::options::TableOptions;
//! use tabula::sort::SortState;
//! use tabula::table::Table;
//!
//! struct Person {
//!     name: &'static str,
//!     age: u32,
//! }
//!
//! let columns = vec![
//!     Column::new("Name").accessor(|p: &Person| p.name.into()).sortable(true),
//!     Column::new("Age").accessor(|p: &Person| p.age.into()).sortable(true),
//! ];
//! let data = vec![
//!     Person { name: "Bob", age: 30 },
//!     Person { name: "Ana", age: 25 },
//! ];
//!
//! let mut table = Table::new(
//!     columns,
//!     data,
//!     TableOptions::new().initial_sort(SortState::asc("Name")),
//! );
//! let names: Vec<_> = table.rows().iter().map(|r| r.record.name).collect();
//! assert_eq!(names, ["Ana", "Bob"]);
//!
//! table.sort_by("Age");
//! let ages: Vec<_> = table.rows().iter().map(|r| r.record.age).collect();
//! assert_eq!(ages, [25, 30]);
//! ```

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, trace, warn};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::column::{Align, Column};
use crate::error::Result;
use crate::export::{ExportFile, ExportFormat, Grid};
use crate::options::TableOptions;
use crate::selection::RowKey;
use crate::sink::ExportSink;
use crate::sort::{SortDirection, SortState, sorted_indices};
use crate::state::{Action, Snapshot, TableState, reduce};

/// Derives a row key from a record.
pub type KeyFn<R> = Arc<dyn Fn(&R) -> RowKey + Send + Sync>;

/// Receives the full list of selected records after a selection change.
pub type SelectionCallback<R> = Box<dyn FnMut(&[&R]) + Send>;

/// Shown in place of rows when the table is empty.
const EMPTY_MESSAGE: &str = "No records";

/// A record paired with its key.
#[derive(Debug)]
pub struct KeyedRow<'a, R> {
    /// Row key.
    pub key: &'a RowKey,
    /// The record.
    pub record: &'a R,
    /// Position of the record in the data vector.
    pub index: usize,
}

/// Sortable, paginated, selectable, exportable view over a list of records.
pub struct Table<R> {
    columns: Vec<Column<R>>,
    data: Vec<R>,
    options: TableOptions,
    key_fn: Option<KeyFn<R>>,
    on_selection_change: Option<SelectionCallback<R>>,
    state: TableState,
    /// Key of each record, by data index.
    keys: Vec<RowKey>,
    /// Data indices in display order.
    order: Vec<usize>,
}

impl<R> fmt::Debug for Table<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("columns", &self.columns)
            .field("rows", &self.data.len())
            .field("options", &self.options)
            .field("state", &self.state)
            .finish()
    }
}

impl<R> Table<R> {
    /// Creates a table over `data`.
    ///
    /// An initial sort naming a missing or unsortable column is dropped and
    /// the rows keep their data order.
    pub fn new(columns: Vec<Column<R>>, data: Vec<R>, options: TableOptions) -> Self {
        let initial_sort = options.initial_sort.clone().filter(|sort| {
            let usable = options.enable_sorting && is_sortable_key(&columns, &sort.column_key);
            if !usable {
                warn!(
                    column = %sort.column_key,
                    "initial sort ignored: column missing or not sortable"
                );
            }
            usable
        });
        if options.initial_page_size == 0 {
            warn!("initial page size is 0, using 1");
        }

        let state = TableState::new(initial_sort, options.initial_page_size);
        let mut table = Self {
            columns,
            data,
            options,
            key_fn: None,
            on_selection_change: None,
            state,
            keys: Vec::new(),
            order: Vec::new(),
        };
        table.rebuild();
        table
    }

    /// Sets the function deriving row keys (builder pattern).
    ///
    /// Without one, a record's key is its position in the data vector.
    #[must_use]
    pub fn key_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&R) -> RowKey + Send + Sync + 'static,
    {
        self.key_fn = Some(Arc::new(f));
        self.rebuild();
        self
    }

    /// Sets the selection change callback (builder pattern).
    #[must_use]
    pub fn on_selection_change<F>(mut self, f: F) -> Self
    where
        F: FnMut(&[&R]) + Send + 'static,
    {
        self.on_selection_change = Some(Box::new(f));
        self
    }

    // -------------------------------------------------------------------------
    // Data
    // -------------------------------------------------------------------------

    /// Returns the column definitions.
    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// Returns the records in data order.
    pub fn data(&self) -> &[R] {
        &self.data
    }

    /// Returns the options the table was built with.
    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Returns the current state.
    pub fn state(&self) -> &TableState {
        &self.state
    }

    /// Replaces the records.
    ///
    /// Sort is kept, the page is clamped to the new page count and keys that
    /// no longer exist are dropped from the selection.
    pub fn set_data(&mut self, data: Vec<R>) {
        let before = self.state.selection.clone();
        self.data = data;
        let pruned = self.rebuild();
        debug!(rows = self.data.len(), pruned, "table data replaced");
        if self.state.selection != before {
            self.notify_selection();
        }
    }

    /// Replaces the columns.
    ///
    /// The active sort is dropped if its column is gone or no longer sortable.
    pub fn set_columns(&mut self, columns: Vec<Column<R>>) {
        self.columns = columns;
        let stale = self
            .state
            .sort
            .as_ref()
            .is_some_and(|sort| !is_sortable_key(&self.columns, &sort.column_key));
        if stale {
            debug!(sort = ?self.state.sort, "sort column removed");
            self.state.sort = None;
        }
        self.resort();
    }

    // -------------------------------------------------------------------------
    // Actions
    // -------------------------------------------------------------------------

    /// Applies an action, then recomputes derived state.
    pub fn update(&mut self, action: Action) {
        trace!(?action, "table action");
        let before = self.state.selection.clone();
        let visible = self.visible_keys();
        let sortable: Vec<&str> = self
            .columns
            .iter()
            .filter(|c| c.is_sortable())
            .map(|c| c.get_key())
            .collect();
        let snapshot = Snapshot {
            sorting: self.options.enable_sorting,
            pagination: self.options.enable_pagination,
            selection: self.options.enable_selection,
            sortable_keys: &sortable,
            visible_keys: &visible,
        };

        let next = reduce(&self.state, &action, &snapshot);
        let sort_changed = next.sort != self.state.sort;
        self.state = next;

        if sort_changed {
            debug!(sort = ?self.state.sort, "sort changed");
            self.resort();
        }
        self.state
            .pagination
            .set_total_pages_from_items(self.data.len());
        self.prune_selection();

        if self.state.selection != before {
            self.notify_selection();
        }
    }

    /// Header click on the column with the given key.
    ///
    /// The current page index is kept, so the same page number may now show
    /// different rows.
    pub fn sort_by(&mut self, column_key: &str) {
        self.update(Action::SortBy(column_key.to_string()));
    }

    /// Moves to a 1-based page, clamped into range.
    pub fn set_page(&mut self, page: usize) {
        self.update(Action::SetPage(page));
    }

    /// Moves forward one page.
    pub fn next_page(&mut self) {
        self.update(Action::NextPage);
    }

    /// Moves back one page.
    pub fn prev_page(&mut self) {
        self.update(Action::PrevPage);
    }

    /// Changes rows per page and returns to page 1.
    pub fn set_page_size(&mut self, size: usize) {
        self.update(Action::SetPageSize(size));
    }

    /// Flips selection of one row.
    pub fn toggle_row_selection(&mut self, key: impl Into<RowKey>) {
        self.update(Action::ToggleRow(key.into()));
    }

    /// Selects every row on the current page, or deselects them all if they
    /// are already selected.
    pub fn toggle_select_all_visible(&mut self) {
        self.update(Action::ToggleAllVisible);
    }

    /// Deselects every row.
    pub fn clear_selection(&mut self) {
        self.update(Action::ClearSelection);
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Returns the active sort.
    pub fn sort_state(&self) -> Option<&SortState> {
        self.state.sort.as_ref()
    }

    /// Returns the current 1-based page.
    pub fn page(&self) -> usize {
        self.state.pagination.page()
    }

    /// Returns rows per page.
    pub fn page_size(&self) -> usize {
        self.state.pagination.get_per_page()
    }

    /// Returns the page size choices from the options.
    pub fn page_size_options(&self) -> &[usize] {
        &self.options.page_size_options
    }

    /// Returns the number of pages; 1 when pagination is disabled.
    pub fn total_pages(&self) -> usize {
        if self.options.enable_pagination {
            self.state.pagination.total_pages()
        } else {
            1
        }
    }

    /// Returns the number of records.
    pub fn total_items(&self) -> usize {
        self.data.len()
    }

    /// Returns the page indicator, e.g. `"2/5"`.
    pub fn page_label(&self) -> String {
        if self.options.enable_pagination {
            self.state.pagination.view()
        } else {
            "1/1".to_string()
        }
    }

    /// Returns the rows on the current page, or all rows without pagination.
    pub fn rows(&self) -> Vec<KeyedRow<'_, R>> {
        self.keyed(self.visible_indices())
    }

    /// Returns every row in display order.
    pub fn sorted_rows(&self) -> Vec<KeyedRow<'_, R>> {
        self.keyed(&self.order)
    }

    /// Returns whether the row with `key` is selected.
    pub fn is_selected(&self, key: &RowKey) -> bool {
        self.state.selection.contains(key)
    }

    /// Returns the selected keys.
    pub fn selected_keys(&self) -> Vec<RowKey> {
        self.state.selection.iter().cloned().collect()
    }

    /// Returns the selected records in display order.
    pub fn selected_records(&self) -> Vec<&R> {
        self.order
            .iter()
            .filter(|&&i| self.state.selection.contains(&self.keys[i]))
            .map(|&i| &self.data[i])
            .collect()
    }

    /// Returns true when the current page has rows and all are selected.
    pub fn all_visible_selected(&self) -> bool {
        let visible = self.visible_indices();
        self.state
            .selection
            .contains_all(visible.iter().map(|&i| &self.keys[i]))
    }

    // -------------------------------------------------------------------------
    // Export
    // -------------------------------------------------------------------------

    /// Resolves every exportable cell of every row, in display order.
    pub fn export_grid(&self) -> Grid {
        let columns: Vec<&Column<R>> = self
            .columns
            .iter()
            .filter(|c| !c.is_export_disabled())
            .collect();
        let headers = columns.iter().map(|c| c.header().to_string()).collect();
        let rows = self
            .order
            .iter()
            .map(|&i| {
                let record = &self.data[i];
                columns
                    .iter()
                    .map(|c| c.resolve_export_value(record).to_export_string())
                    .collect()
            })
            .collect();
        Grid::new(headers, rows)
    }

    /// Builds an export of all rows in the given format.
    pub fn export(&self, format: ExportFormat) -> ExportFile {
        let file = ExportFile::new(format, &self.options.export_file_name, &self.export_grid());
        debug!(
            file = %file.file_name,
            rows = self.data.len(),
            bytes = file.len(),
            "export built"
        );
        file
    }

    /// Builds a CSV export of all rows.
    pub fn export_csv(&self) -> ExportFile {
        self.export(ExportFormat::Csv)
    }

    /// Builds a spreadsheet export of all rows.
    pub fn export_spreadsheet(&self) -> ExportFile {
        self.export(ExportFormat::Spreadsheet)
    }

    /// Builds an export and hands it to `sink`.
    ///
    /// Returns `Ok(None)` without touching the sink when export is disabled.
    pub fn export_to(
        &self,
        format: ExportFormat,
        sink: &mut dyn ExportSink,
    ) -> Result<Option<PathBuf>> {
        if !self.options.enable_export {
            debug!(%format, "export disabled");
            return Ok(None);
        }
        sink.save(&self.export(format)).map(Some)
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Renders the current page as plain text.
    pub fn view(&self) -> String {
        let visible = self.visible_indices();
        let headers: Vec<String> = self.columns.iter().map(|c| self.header_label(c)).collect();
        let cells: Vec<Vec<String>> = visible
            .iter()
            .map(|&i| self.columns.iter().map(|c| c.display(&self.data[i])).collect())
            .collect();

        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(ci, col)| {
                if col.get_width() > 0 {
                    return col.get_width();
                }
                cells
                    .iter()
                    .map(|row| row[ci].width())
                    .chain(std::iter::once(headers[ci].width()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let selection = self.options.enable_selection;
        let mut lines = Vec::with_capacity(visible.len() + 2);

        let header_prefix = if selection {
            checkbox(self.all_visible_selected())
        } else {
            ""
        };
        lines.push(format!("{header_prefix}{}", self.render_line(&headers, &widths)));

        if visible.is_empty() {
            lines.push(EMPTY_MESSAGE.to_string());
        }
        for (&i, row) in visible.iter().zip(&cells) {
            let prefix = if selection {
                checkbox(self.state.selection.contains(&self.keys[i]))
            } else {
                ""
            };
            lines.push(format!("{prefix}{}", self.render_line(row, &widths)));
        }

        if self.options.enable_pagination {
            lines.push(self.page_label());
        }

        lines
            .iter()
            .map(|l| l.trim_end())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn header_label(&self, column: &Column<R>) -> String {
        match &self.state.sort {
            Some(sort) if sort.column_key == column.get_key() => {
                format!("{} {}", column.header(), sort.direction.indicator())
            }
            _ => column.header().to_string(),
        }
    }

    fn render_line(&self, cells: &[String], widths: &[usize]) -> String {
        self.columns
            .iter()
            .zip(cells.iter().zip(widths))
            .map(|(col, (cell, &width))| {
                align_cell(&truncate_string(cell, width), width, col.get_align())
            })
            .collect::<Vec<_>>()
            .join("  ")
    }

    // -------------------------------------------------------------------------
    // Derived state
    // -------------------------------------------------------------------------

    /// Recomputes keys, order, page count and selection from scratch.
    /// Returns the number of selection keys pruned.
    fn rebuild(&mut self) -> usize {
        self.keys = match &self.key_fn {
            Some(f) => self.data.iter().map(|r| f(r)).collect(),
            None => (0..self.data.len()).map(RowKey::from).collect(),
        };
        self.resort();
        let page = self.state.pagination.page();
        self.state
            .pagination
            .set_total_pages_from_items(self.data.len());
        if self.state.pagination.page() != page {
            debug!(from = page, to = self.state.pagination.page(), "page clamped");
        }
        self.prune_selection()
    }

    fn resort(&mut self) {
        let order = match self.active_sort() {
            Some((column, direction)) => sorted_indices(&self.data, column, direction),
            None => (0..self.data.len()).collect(),
        };
        self.order = order;
    }

    fn active_sort(&self) -> Option<(&Column<R>, SortDirection)> {
        let sort = self.state.sort.as_ref()?;
        self.columns
            .iter()
            .find(|c| c.get_key() == sort.column_key)
            .map(|c| (c, sort.direction))
    }

    fn prune_selection(&mut self) -> usize {
        if self.state.selection.is_empty() {
            return 0;
        }
        let present: HashSet<&RowKey> = self.keys.iter().collect();
        let removed = self.state.selection.retain(|k| present.contains(k));
        if removed > 0 {
            debug!(removed, "stale selection keys pruned");
        }
        removed
    }

    fn visible_indices(&self) -> &[usize] {
        if self.options.enable_pagination {
            let (start, end) = self.state.pagination.get_slice_bounds(self.order.len());
            &self.order[start..end]
        } else {
            &self.order
        }
    }

    fn visible_keys(&self) -> Vec<RowKey> {
        self.visible_indices()
            .iter()
            .map(|&i| self.keys[i].clone())
            .collect()
    }

    fn keyed<'a>(&'a self, indices: &[usize]) -> Vec<KeyedRow<'a, R>> {
        indices
            .iter()
            .map(|&i| KeyedRow {
                key: &self.keys[i],
                record: &self.data[i],
                index: i,
            })
            .collect()
    }

    fn notify_selection(&mut self) {
        let Some(callback) = self.on_selection_change.as_mut() else {
            return;
        };
        let selected: Vec<&R> = self
            .order
            .iter()
            .filter(|&&i| self.state.selection.contains(&self.keys[i]))
            .map(|&i| &self.data[i])
            .collect();
        trace!(selected = selected.len(), "selection changed");
        callback(&selected);
    }
}

fn is_sortable_key<R>(columns: &[Column<R>], key: &str) -> bool {
    columns.iter().any(|c| c.get_key() == key && c.is_sortable())
}

fn checkbox(checked: bool) -> &'static str {
    if checked { "[x] " } else { "[ ] " }
}

/// Truncates a string to the given display width, adding ellipsis if needed.
fn truncate_string(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Pads a string to `width` display cells according to `align`.
fn align_cell(s: &str, width: usize, align: Align) -> String {
    let pad = width.saturating_sub(s.width());
    match align {
        Align::Left => format!("{s}{}", " ".repeat(pad)),
        Align::Right => format!("{}{s}", " ".repeat(pad)),
        Align::Center => {
            let left = pad / 2;
            format!("{}{s}{}", " ".repeat(left), " ".repeat(pad - left))
        }
    }
}
