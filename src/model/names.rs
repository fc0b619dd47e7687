use serde::Serialize;
use std::collections::HashMap;

/// Canonical idol names in phonetic order
#[derive(Debug, Clone, Default, Serialize)]
pub struct NameIndex {
    names: Vec<String>,
    #[serde(skip)]
    positions: HashMap<String, usize>,
}

impl NameIndex {
    /// Build from names in file order. Repeated names keep their first position.
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        let mut index = Self::default();
        for name in names {
            let name = name.trim().to_string();
            if name.is_empty() || index.positions.contains_key(&name) {
                continue;
            }
            index.positions.insert(name.clone(), index.names.len());
            index.names.push(name);
        }
        index
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Phonetic position of a name, if indexed
    pub fn rank(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Stable sort of names by phonetic position; unknown names go last.
    pub fn sort<S: AsRef<str>>(&self, names: &mut [S]) {
        names.sort_by_key(|n| self.rank(n.as_ref()).unwrap_or(usize::MAX));
    }
}
