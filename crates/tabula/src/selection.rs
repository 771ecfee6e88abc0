//! Row keys and the selection set.

use std::collections::BTreeSet;
use std::fmt;

/// Stable identity of a row within one data snapshot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowKey(String);

impl RowKey {
    /// Creates a key from any string-like value.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RowKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Positional keys: the record's index in the data vector.
impl From<usize> for RowKey {
    fn from(i: usize) -> Self {
        Self(i.to_string())
    }
}

impl From<u64> for RowKey {
    fn from(i: u64) -> Self {
        Self(i.to_string())
    }
}

/// Set of selected row keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    keys: BTreeSet<RowKey>,
}

impl Selection {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether `key` is selected.
    #[must_use]
    pub fn contains(&self, key: &RowKey) -> bool {
        self.keys.contains(key)
    }

    /// Flips one key. Returns true if the key is now selected.
    pub fn toggle(&mut self, key: RowKey) -> bool {
        if self.keys.remove(&key) {
            false
        } else {
            self.keys.insert(key);
            true
        }
    }

    /// Returns true if `keys` is non-empty and every key in it is selected.
    #[must_use]
    pub fn contains_all<'a>(&self, keys: impl IntoIterator<Item = &'a RowKey>) -> bool {
        let mut any = false;
        for key in keys {
            if !self.keys.contains(key) {
                return false;
            }
            any = true;
        }
        any
    }

    /// Selects every key in `keys`.
    pub fn select_all<'a>(&mut self, keys: impl IntoIterator<Item = &'a RowKey>) {
        self.keys.extend(keys.into_iter().cloned());
    }

    /// Deselects every key in `keys`.
    pub fn deselect_all<'a>(&mut self, keys: impl IntoIterator<Item = &'a RowKey>) {
        for key in keys {
            self.keys.remove(key);
        }
    }

    /// Drops keys not accepted by `keep`. Returns the number removed.
    pub fn retain(&mut self, mut keep: impl FnMut(&RowKey) -> bool) -> usize {
        let before = self.keys.len();
        self.keys.retain(|k| keep(k));
        before - self.keys.len()
    }

    /// Deselects everything.
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Number of selected keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterates over selected keys in key order.
    pub fn iter(&self) -> impl Iterator<Item = &RowKey> {
        self.keys.iter()
    }
}
