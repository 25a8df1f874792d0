// Composite key index
// Maps each match key to the positions of the rows that carry it

use super::{Keyed, MatchKey};
use std::collections::BTreeMap;

/// Index from `MatchKey` to row ids, built once per relation and reused by
/// every join against that relation
///
/// A key normally maps to a single row. More than one row id means a same-day
/// rematch (or a duplicated record), which makes joins fan out.
#[derive(Debug, Clone, Default)]
pub struct KeyIndex {
    tree: BTreeMap<MatchKey, Vec<usize>>,
}

impl KeyIndex {
    pub fn new() -> Self {
        Self {
            tree: BTreeMap::new(),
        }
    }

    /// Index every row of a relation by its position
    pub fn build<R: Keyed>(rows: &[R]) -> Self {
        let mut index = Self::new();
        for (row_id, row) in rows.iter().enumerate() {
            index.insert(row.key(), row_id);
        }
        index
    }

    /// Insert a key pointing at the given row
    pub fn insert(&mut self, key: MatchKey, row_id: usize) {
        self.tree.entry(key).or_default().push(row_id);
    }

    /// Row ids stored under a key, empty when the key is unknown
    pub fn lookup(&self, key: &MatchKey) -> &[usize] {
        self.tree.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, key: &MatchKey) -> bool {
        self.tree.contains_key(key)
    }

    /// Keys that point at more than one row
    pub fn duplicate_keys(&self) -> impl Iterator<Item = (&MatchKey, &[usize])> {
        self.tree
            .iter()
            .filter(|(_, ids)| ids.len() > 1)
            .map(|(key, ids)| (key, ids.as_slice()))
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}
