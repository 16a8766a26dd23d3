//! Registry of scene entries, keyed by kind and name.

use std::collections::HashMap;

use crate::error::{Result, VesselError};

/// Registry for named scene entries.
///
/// Entries are organized by kind (e.g. `"Profile"`, `"Object"`) and then by
/// instance name; names are unique within a kind. Insertion order is kept so
/// that iteration is deterministic.
#[derive(Debug, Clone)]
pub struct Registry<T> {
    /// Map from kind -> (instance name -> position in `entries`)
    index: HashMap<String, HashMap<String, usize>>,
    entries: Vec<(String, String, T)>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<T> Registry<T> {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an entry.
    ///
    /// Returns an error if an entry with the same kind and name already exists.
    pub fn register(&mut self, kind: &str, name: &str, entry: T) -> Result<()> {
        let kind_map = self.index.entry(kind.to_string()).or_default();

        if kind_map.contains_key(name) {
            return Err(VesselError::ObjectExists(name.to_string()));
        }

        kind_map.insert(name.to_string(), self.entries.len());
        self.entries
            .push((kind.to_string(), name.to_string(), entry));
        Ok(())
    }

    /// Gets an entry by kind and name.
    pub fn get(&self, kind: &str, name: &str) -> Option<&T> {
        self.index
            .get(kind)
            .and_then(|m| m.get(name))
            .map(|&i| &self.entries[i].2)
    }

    /// Checks if an entry with the given kind and name exists.
    pub fn contains(&self, kind: &str, name: &str) -> bool {
        self.index
            .get(kind)
            .is_some_and(|m| m.contains_key(name))
    }

    /// Removes all entries of a given kind.
    pub fn remove_all_of_kind(&mut self, kind: &str) {
        self.entries.retain(|(k, _, _)| k != kind);
        self.reindex();
    }

    /// Removes all entries from the registry.
    pub fn clear(&mut self) {
        self.index.clear();
        self.entries.clear();
    }

    /// Returns an iterator over all entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, _, e)| e)
    }

    /// Returns all entries of a given kind in insertion order.
    pub fn get_all_of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a T> + 'a {
        self.entries
            .iter()
            .filter(move |(k, _, _)| k == kind)
            .map(|(_, _, e)| e)
    }

    /// Returns the number of entries of a given kind.
    pub fn len_of_kind(&self, kind: &str) -> usize {
        self.index.get(kind).map_or(0, HashMap::len)
    }

    /// Returns the total number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (i, (kind, name, _)) in self.entries.iter().enumerate() {
            self.index
                .entry(kind.clone())
                .or_default()
                .insert(name.clone(), i);
        }
    }
}
