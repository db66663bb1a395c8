//! Requested addition sets.
//!
//! An [`Additions`] value carries what the client asked for, verbatim.
//! Acceptability is the validator's decision; nothing here consults the
//! vocabulary. The decaf flag is carried separately because RFC 2324
//! §2.1.1 refuses it outright rather than treating it as a vocabulary
//! entry.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Addition key for milk. A successful brew carrying it starts a milk pour.
pub const MILK_TYPE: &str = "milk-type";

/// Header token for the decaf flag.
pub const DECAF: &str = "decaf";

/// A parsed set of requested additions for a single brew command.
///
/// # Example
///
/// ```rust
/// use percolate::core::Additions;
///
/// let additions = Additions::new()
///     .with("milk-type", "Whole-milk")
///     .with("alcohol-type", "Whisky");
///
/// assert!(additions.requests_milk());
/// assert!(!additions.decaf());
/// assert_eq!(additions.get("alcohol-type"), Some("Whisky"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Additions {
    #[serde(default)]
    entries: BTreeMap<String, String>,
    #[serde(default)]
    decaf: bool,
}

impl Additions {
    /// An empty addition set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `key=value` entry. A later entry for the same key wins.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let _ = self.entries.insert(key.into(), value.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set the decaf flag.
    pub fn set_decaf(&mut self, decaf: bool) {
        self.decaf = decaf;
    }

    /// Builder-style [`set_decaf`](Self::set_decaf).
    pub fn with_decaf(mut self, decaf: bool) -> Self {
        self.set_decaf(decaf);
        self
    }

    /// Whether the client asked for decaf. Sympathies.
    pub fn decaf(&self) -> bool {
        self.decaf
    }

    /// The requested value for one key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Iterate over `(key, value)` entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of `key=value` entries (the decaf flag not included).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries are present and decaf was not requested.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && !self.decaf
    }

    /// Whether a `milk-type` entry is present.
    pub fn requests_milk(&self) -> bool {
        self.entries.contains_key(MILK_TYPE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_has_no_milk_and_no_decaf() {
        let additions = Additions::new();
        assert!(additions.is_empty());
        assert!(!additions.requests_milk());
        assert!(!additions.decaf());
    }

    #[test]
    fn entries_are_retrievable() {
        let additions = Additions::new().with(MILK_TYPE, "Cream");
        assert_eq!(additions.get(MILK_TYPE), Some("Cream"));
        assert_eq!(additions.get("syrup-type"), None);
        assert!(additions.requests_milk());
        assert_eq!(additions.len(), 1);
    }

    #[test]
    fn later_entry_for_a_key_wins() {
        let additions = Additions::new()
            .with(MILK_TYPE, "Cream")
            .with(MILK_TYPE, "Skim");
        assert_eq!(additions.get(MILK_TYPE), Some("Skim"));
        assert_eq!(additions.len(), 1);
    }

    #[test]
    fn decaf_alone_makes_the_set_non_empty() {
        let additions = Additions::new().with_decaf(true);
        assert!(!additions.is_empty());
        assert_eq!(additions.len(), 0);
    }

    #[test]
    fn iteration_is_key_ordered() {
        let additions = Additions::new()
            .with("syrup-type", "Vanilla")
            .with("alcohol-type", "Whisky");
        let keys: Vec<&str> = additions.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["alcohol-type", "syrup-type"]);
    }
}
