use crate::models::NodeId;
use std::collections::HashMap;

/// Append-only map from `(parent path, name)` to a node id.
///
/// Entries are never removed, so a branch that collapses and later re-expands
/// gets back exactly the ids it had before.
#[derive(Debug, Default)]
pub(crate) struct IdRegistry {
    /// parent path -> child name -> id
    ids: HashMap<String, HashMap<String, NodeId>>,
    next: u64,
}

impl IdRegistry {
    pub fn id_for(&mut self, parent_path: &str, name: &str) -> NodeId {
        if let Some(id) = self.get(parent_path, name) {
            return id;
        }

        self.next += 1;
        let id = NodeId(self.next);
        self.ids
            .entry(parent_path.to_string())
            .or_default()
            .insert(name.to_string(), id);
        id
    }

    pub fn get(&self, parent_path: &str, name: &str) -> Option<NodeId> {
        self.ids.get(parent_path)?.get(name).copied()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.ids.values().map(|m| m.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_key_reuses_id() {
        let mut r = IdRegistry::default();
        let a = r.id_for("", "Sports");
        let b = r.id_for("", "Sports");
        assert_eq!(a, b);
        assert_eq!(r.len(), 1);
    }

    #[test]
    fn test_same_name_under_different_parents_gets_distinct_ids() {
        let mut r = IdRegistry::default();
        let us = r.id_for("Politics", "Elections");
        let intl = r.id_for("World", "Elections");
        assert_ne!(us, intl);
        assert_eq!(r.get("Politics", "Elections"), Some(us));
        assert_eq!(r.get("Sports", "Elections"), None);
    }
}
