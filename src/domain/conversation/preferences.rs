//! Accumulated travel preferences.
//!
//! Keys are free-form and case-sensitive. The model is nudged toward
//! [`SUGGESTED_PREFERENCE_KEYS`] but nothing here enforces a schema.

use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};

/// Keys the collector prompt suggests to the model.
pub const SUGGESTED_PREFERENCE_KEYS: [&str; 8] = [
    "destination",
    "duration",
    "budget",
    "accommodation_type",
    "interests",
    "travel_style",
    "dining_preferences",
    "transportation",
];

/// Mapping from preference key to value.
///
/// # Invariants
///
/// - No value is empty or whitespace-only; such entries are refused by
///   [`PreferenceSet::insert`].
/// - Entries are never removed. A later non-empty value for the same key
///   replaces the earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreferenceSet(BTreeMap<String, String>);

impl PreferenceSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites a preference.
    ///
    /// Returns `false` and leaves the set untouched when the value is blank.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let value = value.into();
        if value.trim().is_empty() {
            return false;
        }
        self.0.insert(key.into(), value);
        true
    }

    /// Returns the value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns true if the key has been learned.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of learned preferences.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing has been learned yet.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(key, value)` pairs in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.0.iter()
    }

    /// Serializes the set as indented JSON for prompt injection.
    pub fn to_pretty_json(&self) -> String {
        // A map of strings always serializes.
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| "{}".to_string())
    }
}

impl<'a> IntoIterator for &'a PreferenceSet {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
