//! The student's current symptom selection.

use serde::{Serialize, Serializer};

/// Set of selected symptom ids.
///
/// Keeps insertion order for display, but membership is all that matters
/// for matching. Ids are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedSymptomSet {
    ids: Vec<String>,
}

impl SelectedSymptomSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(pos) = self.ids.iter().position(|s| s == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id.to_string());
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.ids.clone()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Order-independent equality.
    pub fn same_members(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|id| other.contains(id))
    }
}

impl<'a> FromIterator<&'a str> for SelectedSymptomSet {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        let mut set = Self::new();
        for id in iter {
            if !set.contains(id) {
                set.ids.push(id.to_string());
            }
        }
        set
    }
}

impl Serialize for SelectedSymptomSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.ids.serialize(serializer)
    }
}
