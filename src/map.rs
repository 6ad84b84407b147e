//! Ordered map type for decoded documents.
//!
//! This module provides [`Map`], a wrapper around [`IndexMap`] that keeps
//! keys in the order they were decoded. Hand-edited configuration files
//! should come back out of the codec with their keys where the author put
//! them, so every mapping in a [`Value`](crate::Value) tree is a `Map`.
//!
//! Equality between two maps ignores order, so a document that was
//! re-laid-out by an encoder (TOML, for instance, must write scalars before
//! sub-tables) still compares equal to its source.
//!
//! ## Examples
//!
//! ```rust
//! use sitedoc::{Map, Value};
//!
//! let mut map = Map::new();
//! map.insert("title".to_string(), Value::from("Hello"));
//! map.insert("weight".to_string(), Value::from(10));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("title").and_then(|v| v.as_str()), Some("Hello"));
//! ```

use indexmap::IndexMap;
use std::collections::HashMap;

/// An insertion-ordered map of string keys to [`Value`](crate::Value)s.
///
/// # Examples
///
/// ```rust
/// use sitedoc::{Map, Value};
///
/// let mut map = Map::new();
/// map.insert("first".to_string(), Value::from(1));
/// map.insert("second".to_string(), Value::from(2));
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Map(IndexMap<String, crate::Value>);

impl Map {
    /// Creates an empty `Map`.
    #[must_use]
    pub fn new() -> Self {
        Map(IndexMap::new())
    }

    /// Creates an empty `Map` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Map(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// An existing key keeps its position and has its value replaced; the old
    /// value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sitedoc::{Map, Value};
    ///
    /// let mut map = Map::new();
    /// assert!(map.insert("key".to_string(), Value::from(42)).is_none());
    /// assert!(map.insert("key".to_string(), Value::from(43)).is_some());
    /// ```
    pub fn insert(&mut self, key: String, value: crate::Value) -> Option<crate::Value> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&crate::Value> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut crate::Value> {
        self.0.get_mut(key)
    }

    /// Removes a key, shifting later entries down so the remaining order is
    /// unchanged.
    pub fn remove(&mut self, key: &str) -> Option<crate::Value> {
        self.0.shift_remove(key)
    }

    /// Removes a key and reports the position it held.
    pub(crate) fn remove_full(&mut self, key: &str) -> Option<(usize, String, crate::Value)> {
        self.0.shift_remove_full(key)
    }

    /// Puts an entry back at `index`, shifting later entries up.
    pub(crate) fn insert_at(&mut self, index: usize, key: String, value: crate::Value) {
        self.0.shift_insert(index, key, value);
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sorts the entries by key.
    pub fn sort_keys(&mut self) {
        self.0.sort_keys();
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, crate::Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, crate::Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, crate::Value> {
        self.0.iter()
    }
}

impl From<HashMap<String, crate::Value>> for Map {
    fn from(map: HashMap<String, crate::Value>) -> Self {
        Map(map.into_iter().collect())
    }
}

impl IntoIterator for Map {
    type Item = (String, crate::Value);
    type IntoIter = indexmap::map::IntoIter<String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a String, &'a crate::Value);
    type IntoIter = indexmap::map::Iter<'a, String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, crate::Value)> for Map {
    fn from_iter<T: IntoIterator<Item = (String, crate::Value)>>(iter: T) -> Self {
        Map(IndexMap::from_iter(iter))
    }
}
