use std::collections::HashMap;

/// Maps stripped atom-type labels (e.g. `CA`, `OH2`, `HY1`) to element symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementTable {
    entries: HashMap<String, String>,
}

impl ElementTable {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    /// Looks up the element symbol for an atom-type label; column padding is ignored.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries.get(label.trim()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for ElementTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
