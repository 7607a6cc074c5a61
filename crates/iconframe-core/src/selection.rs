//! Object identifiers and selection state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a scene object, unique within one host scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The host's object selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selection {
    /// Selected objects.
    pub selected: Vec<ObjectId>,
    /// The active object, if any.
    pub active: Option<ObjectId>,
}

impl Selection {
    /// Selects exactly `ids`, making the first one active.
    #[must_use]
    pub fn only(ids: &[ObjectId]) -> Self {
        Self {
            selected: ids.to_vec(),
            active: ids.first().copied(),
        }
    }

    /// Returns true if `id` is selected.
    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.selected.contains(&id)
    }

    /// Returns true if nothing is selected and nothing is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty() && self.active.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_sets_first_active() {
        let selection = Selection::only(&[ObjectId(4), ObjectId(2)]);
        assert_eq!(selection.active, Some(ObjectId(4)));
        assert!(selection.contains(ObjectId(2)));
        assert!(!selection.contains(ObjectId(3)));
    }

    #[test]
    fn test_empty() {
        assert!(Selection::default().is_empty());
        assert!(Selection::only(&[]).is_empty());
    }
}
