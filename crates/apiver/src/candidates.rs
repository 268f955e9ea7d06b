//! Request-scoped collection of raw version strings

use std::collections::BTreeMap;

/// Raw version strings gathered while negotiating one request
///
/// Values are deduplicated ignoring ASCII case and kept sorted by their
/// case-folded text. The first spelling seen for a value is the one kept.
/// A set belongs to exactly one negotiation and is never shared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    values: BTreeMap<String, String>,
}

impl CandidateSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw value; blank values are ignored
    ///
    /// Returns `true` when the value was not already present.
    pub fn insert(&mut self, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return false;
        }
        let key = value.to_ascii_uppercase();
        if self.values.contains_key(&key) {
            return false;
        }
        self.values.insert(key, value.to_string());
        true
    }

    /// Number of distinct values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no value was collected
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over the distinct values in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.values().map(String::as_str)
    }

    /// Consume the set into its distinct values
    pub fn into_vec(self) -> Vec<String> {
        self.values.into_values().collect()
    }
}

impl<'a> Extend<&'a str> for CandidateSet {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a> FromIterator<&'a str> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl IntoIterator for CandidateSet {
    type Item = String;
    type IntoIter = std::collections::btree_map::IntoValues<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_ignores_case() {
        let set: CandidateSet = ["1.0-beta", "1.0-BETA", "1.0-Beta"].into_iter().collect();
        assert_eq!(set.into_vec(), vec!["1.0-beta"]);
    }

    #[test]
    fn test_distinct_values_are_sorted() {
        let set: CandidateSet = ["2.0", "1.0", "", "  ", "2.0"].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["1.0", "2.0"]);
    }
}
