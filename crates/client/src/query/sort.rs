//! Multi-field sort specification

use super::{join_min, json_str};

/// Ascending sort direction.
const ASC: i8 = 1;
/// Descending sort direction.
const DESC: i8 = -1;

/// An ordered field-to-direction sort specification.
///
/// Entries keep insertion order so the serialized document is deterministic
/// across runs. Re-adding a field replaces its direction in place.
#[derive(Debug, Clone, Default)]
pub struct Sort {
    entries: Vec<(String, i8)>,
}

impl Sort {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an ascending sort field.
    #[must_use]
    pub fn asc(mut self, field: impl Into<String>) -> Self {
        self.set(field.into(), ASC);
        self
    }

    /// Add a descending sort field.
    #[must_use]
    pub fn desc(mut self, field: impl Into<String>) -> Self {
        self.set(field.into(), DESC);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize to `{"field": 1, "other": -1}`; an empty sort yields `{}`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let entries: Vec<String> = self
            .entries
            .iter()
            .map(|(field, direction)| format!("{}: {direction}", json_str(field)))
            .collect();
        format!("{{{}}}", join_min(",", 1, &entries))
    }

    fn set(&mut self, field: String, direction: i8) {
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some(entry) => entry.1 = direction,
            None => self.entries.push((field, direction)),
        }
    }
}
