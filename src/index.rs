use std::collections::HashMap;

use crate::record::Record;

/// In-memory view of the log: each key maps to the value of the last record
/// applied for it.
///
/// Entirely derived state. It can be dropped and rebuilt from the log at any
/// time.
#[derive(Debug, Default)]
pub(crate) struct Index {
    entries: HashMap<String, String>,
}

impl Index {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Applies a record. A later call for the same key always overwrites an
    /// earlier one.
    pub(crate) fn apply(&mut self, record: Record) {
        let (key, value) = record.into_parts();
        self.entries.insert(key, value);
    }

    pub(crate) fn lookup(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of distinct keys.
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! rec {
        ($k:expr, $v:expr) => {
            Record::new($k, $v).expect("valid record")
        };
    }

    #[test]
    fn create_empty_index() {
        let index = Index::new();
        assert!(index.is_empty());
        assert_eq!(index.lookup("anything"), None);
    }

    #[test]
    fn apply_and_lookup() {
        let mut index = Index::new();
        index.apply(rec!("key1", "value1"));
        index.apply(rec!("key2", "value2"));

        assert_eq!(index.lookup("key1"), Some("value1"));
        assert_eq!(index.lookup("key2"), Some("value2"));
        assert_eq!(index.lookup("key3"), None);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn later_apply_wins() {
        let mut index = Index::new();
        for v in ["1", "2", "3"] {
            index.apply(rec!("x", v));
        }

        assert_eq!(index.lookup("x"), Some("3"));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn reapplying_history_from_empty_gives_same_mapping() {
        let history = vec![rec!("a", "1"), rec!("b", "2"), rec!("a", "3")];

        let mut first = Index::new();
        history.iter().cloned().for_each(|r| first.apply(r));

        let mut second = Index::new();
        history.into_iter().for_each(|r| second.apply(r));

        assert_eq!(first.entries, second.entries);
        assert_eq!(second.lookup("a"), Some("3"));
    }
}
