//! Cosmetic renaming of generated text: `xa0` -> `p1.x`.
//!
//! Replacement is plain substring substitution applied in table order, so a
//! table must list longer names before any name that is a prefix of them
//! (`t1_10` before `t1_1`). Constructors warn when that ordering is violated.
use log::warn;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenameTable {
    pairs: Vec<(String, String)>,
}

impl RenameTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let mut table = Self::new();
        for (pattern, replacement) in pairs {
            table.push(pattern, replacement);
        }
        table
    }

    /// Appends a pair; empty patterns are ignored.
    pub fn push(&mut self, pattern: &str, replacement: &str) {
        if pattern.is_empty() {
            warn!("ignoring empty rename pattern (replacement '{}')", replacement);
            return;
        }
        if let Some((earlier, _)) = self
            .pairs
            .iter()
            .find(|(earlier, _)| pattern.starts_with(earlier.as_str()) && pattern != earlier)
        {
            warn!(
                "rename '{}' is shadowed by the earlier, shorter pattern '{}'",
                pattern, earlier
            );
        }
        self.pairs.push((pattern.to_string(), replacement.to_string()));
    }

    /// Appends a map of extra renames in sorted key order, longest first for
    /// shared prefixes.
    pub fn extend_from_map(&mut self, map: &HashMap<String, String>) {
        let mut keys: Vec<&String> = map.keys().collect();
        keys.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        for key in keys {
            self.push(key, &map[key]);
        }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Applies every replacement, in order, to `text`.
    pub fn apply(&self, text: &str) -> String {
        self.pairs
            .iter()
            .fold(text.to_string(), |acc, (pattern, replacement)| {
                acc.replace(pattern.as_str(), replacement)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rename_points() {
        let table = RenameTable::from_pairs(&[("xa0", "p1.x"), ("xb1", "p2.y")]);
        assert_eq!(table.apply("xa0 + xb1"), "p1.x + p2.y");
    }

    #[test]
    fn test_rename_order_matters() {
        let table = RenameTable::from_pairs(&[("t1_10", "T[10]"), ("t1_1", "T[1]")]);
        assert_eq!(table.apply("t1_10*t1_1"), "T[10]*T[1]");
    }

    #[test]
    fn test_rename_empty_pattern_ignored() {
        let mut table = RenameTable::new();
        table.push("", "boom");
        assert!(table.is_empty());
        assert_eq!(table.apply("abc"), "abc");
    }

    #[test]
    fn test_extend_from_map_longest_first() {
        let mut map = HashMap::new();
        map.insert("K1".to_string(), "k[1]".to_string());
        map.insert("K12".to_string(), "k[12]".to_string());
        let mut table = RenameTable::new();
        table.extend_from_map(&map);
        assert_eq!(table.len(), 2);
        assert_eq!(table.apply("K12 + K1"), "k[12] + k[1]");
    }
}
