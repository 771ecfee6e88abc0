//! Table state and the reducer that advances it.
//!
//! [`reduce`] is a pure step function: it never looks at records, only at a
//! [`Snapshot`] of what the table currently shows. Derived state (row order,
//! page clamping after data changes, selection pruning) is recomputed by
//! [`Table`](crate::table::Table) after each step.

use crate::paginator::Paginator;
use crate::selection::{RowKey, Selection};
use crate::sort::SortState;

/// Something the user did to the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Header click on a column, by key.
    SortBy(String),
    /// Jump to a 1-based page.
    SetPage(usize),
    /// Go forward one page.
    NextPage,
    /// Go back one page.
    PrevPage,
    /// Change rows per page.
    SetPageSize(usize),
    /// Flip one row's selection.
    ToggleRow(RowKey),
    /// Select or deselect every row on the current page.
    ToggleAllVisible,
    /// Deselect everything.
    ClearSelection,
}

/// Mutable state owned by one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    /// Active sort, if any.
    pub sort: Option<SortState>,
    /// Current page and page size.
    pub pagination: Paginator,
    /// Selected row keys.
    pub selection: Selection,
}

impl TableState {
    /// Creates the initial state.
    #[must_use]
    pub fn new(sort: Option<SortState>, page_size: usize) -> Self {
        Self {
            sort,
            pagination: Paginator::new().per_page(page_size),
            selection: Selection::new(),
        }
    }
}

/// What the reducer may consult about the table.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    /// Sort requests are honoured.
    pub sorting: bool,
    /// Page changes are honoured.
    pub pagination: bool,
    /// Selection changes are honoured.
    pub selection: bool,
    /// Keys of columns that accept sort requests.
    pub sortable_keys: &'a [&'a str],
    /// Keys of the rows on the current page.
    pub visible_keys: &'a [RowKey],
}

/// Applies one action and returns the next state.
#[must_use]
pub fn reduce(state: &TableState, action: &Action, snapshot: &Snapshot<'_>) -> TableState {
    let mut next = state.clone();
    match action {
        Action::SortBy(key) => {
            if snapshot.sorting && snapshot.sortable_keys.contains(&key.as_str()) {
                next.sort = Some(SortState::next(state.sort.as_ref(), key));
            }
        }
        Action::SetPage(page) => {
            if snapshot.pagination {
                next.pagination.set_page(*page);
            }
        }
        Action::NextPage => {
            if snapshot.pagination {
                next.pagination.next_page();
            }
        }
        Action::PrevPage => {
            if snapshot.pagination {
                next.pagination.prev_page();
            }
        }
        Action::SetPageSize(size) => {
            if snapshot.pagination {
                next.pagination.set_per_page(*size);
            }
        }
        Action::ToggleRow(key) => {
            if snapshot.selection {
                next.selection.toggle(key.clone());
            }
        }
        Action::ToggleAllVisible => {
            if snapshot.selection {
                if next.selection.contains_all(snapshot.visible_keys) {
                    next.selection.deselect_all(snapshot.visible_keys);
                } else {
                    next.selection.select_all(snapshot.visible_keys);
                }
            }
        }
        Action::ClearSelection => {
            if snapshot.selection {
                next.selection.clear();
            }
        }
    }
    next
}
