//! Sort state and the stable row ordering.
//!
//! Only one column sorts at a time. Clicking a header either switches to
//! that column in ascending order or flips the direction of the active one.
//!
//! # Example
//!
//! ```rust
//! use tabula::sort::{SortDirection, SortState};
//!
//! let first = SortState::next(None, "Name");
//! assert_eq!(first.direction, SortDirection::Asc);
//!
//! let second = SortState::next(Some(&first), "Name");
//! assert_eq!(second.direction, SortDirection::Desc);
//!
//! let other = SortState::next(Some(&second), "Age");
//! assert_eq!(other, SortState::asc("Age"));
//! ```

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    #[serde(alias = "ascending")]
    Asc,
    /// Largest first.
    #[serde(alias = "descending")]
    Desc,
}

impl SortDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Applies the direction to an ascending comparison result.
    #[must_use]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }

    /// Header indicator shown next to the active column.
    #[must_use]
    pub fn indicator(self) -> &'static str {
        match self {
            Self::Asc => "▲",
            Self::Desc => "▼",
        }
    }
}

/// The active sort column and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    /// Key of the sorted column.
    pub column_key: String,
    /// Direction of the sort.
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortState {
    /// Creates a sort state.
    #[must_use]
    pub fn new(column_key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column_key: column_key.into(),
            direction,
        }
    }

    /// Ascending sort on the given column.
    #[must_use]
    pub fn asc(column_key: impl Into<String>) -> Self {
        Self::new(column_key, SortDirection::Asc)
    }

    /// Descending sort on the given column.
    #[must_use]
    pub fn desc(column_key: impl Into<String>) -> Self {
        Self::new(column_key, SortDirection::Desc)
    }

    /// Returns the state after a header click on `column_key`.
    #[must_use]
    pub fn next(current: Option<&Self>, column_key: &str) -> Self {
        match current {
            Some(state) if state.column_key == column_key => {
                Self::new(column_key, state.direction.toggled())
            }
            _ => Self::asc(column_key),
        }
    }
}

/// Returns row indices ordered by `column`, keeping ties in data order.
#[must_use]
pub fn sorted_indices<R>(records: &[R], column: &Column<R>, direction: SortDirection) -> Vec<usize> {
    let values: Vec<Value> = records
        .iter()
        .map(|r| column.resolve_sort_value(r))
        .collect();
    let mut order: Vec<usize> = (0..records.len()).collect();
    stable_sort_by(&mut order, |&a, &b| {
        direction.apply(values[a].compare(&values[b]))
    });
    order
}

/// Bottom-up merge sort.
///
/// Equal elements keep their relative order, and a comparator that is not a
/// total order (mixed-type values can produce cycles) still yields a
/// permutation instead of a panic.
pub fn stable_sort_by<T, F>(items: &mut [T], mut compare: F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = items.len();
    if len < 2 {
        return;
    }

    let mut buf = items.to_vec();
    let mut width = 1;
    let mut in_items = true;
    while width < len {
        if in_items {
            merge_pass(items, &mut buf, width, &mut compare);
        } else {
            merge_pass(&buf, items, width, &mut compare);
        }
        in_items = !in_items;
        width *= 2;
    }

    if !in_items {
        items.copy_from_slice(&buf);
    }
}

fn merge_pass<T, F>(src: &[T], dst: &mut [T], width: usize, compare: &mut F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = src.len();
    let mut start = 0;
    while start < len {
        let mid = (start + width).min(len);
        let end = (start + 2 * width).min(len);
        let (mut i, mut j) = (start, mid);
        for slot in &mut dst[start..end] {
            // Take from the right run only when strictly smaller.
            let take_right = i >= mid
                || (j < end && compare(&src[j], &src[i]) == Ordering::Less);
            if take_right {
                *slot = src[j];
                j += 1;
            } else {
                *slot = src[i];
                i += 1;
            }
        }
        start = end;
    }
}
