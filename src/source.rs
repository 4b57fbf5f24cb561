//! The flat key/value source consulted during loading.

use std::collections::BTreeMap;

/// A flat string-to-string mapping, frozen before any record is loaded.
///
/// Built once by [`LoaderBuilder::build`](crate::LoaderBuilder::build) from
/// the process environment (or synthetic pairs) plus any overlay files.
/// Later entries win over earlier ones on duplicate keys.
#[derive(Debug, Default, Clone)]
pub struct Source {
    entries: BTreeMap<String, String>,
}

impl Source {
    /// Snapshot the current process environment.
    pub fn from_env() -> Self {
        Self {
            entries: std::env::vars().collect(),
        }
    }

    /// Build from explicit pairs. Later duplicates win.
    pub fn from_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            entries: vars.into_iter().collect(),
        }
    }

    /// Overlay more pairs; incoming entries overwrite existing ones.
    pub fn merge<I>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.entries.extend(vars);
    }

    /// Look up a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries are present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
        list.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn from_vars_and_get() {
        let source = Source::from_vars(pairs(&[("HOST", "localhost"), ("PORT", "8080")]));
        assert_eq!(source.get("HOST"), Some("localhost"));
        assert_eq!(source.get("PORT"), Some("8080"));
        assert_eq!(source.get("MISSING"), None);
        assert_eq!(source.len(), 2);
    }

    #[test]
    fn later_duplicate_wins_within_one_batch() {
        let source = Source::from_vars(pairs(&[("KEY", "first"), ("KEY", "second")]));
        assert_eq!(source.get("KEY"), Some("second"));
    }

    #[test]
    fn merge_overwrites_existing_keys() {
        let mut source = Source::from_vars(pairs(&[("KEY", "env"), ("KEEP", "env")]));
        source.merge(pairs(&[("KEY", "overlay")]));
        assert_eq!(source.get("KEY"), Some("overlay"));
        assert_eq!(source.get("KEEP"), Some("env"));
    }

    #[test]
    fn empty_source() {
        let source = Source::from_vars(Vec::new());
        assert!(source.is_empty());
        assert_eq!(source.get("ANY"), None);
    }
}
