//! Supplier name to identifier mapping

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Suppliers known to the catalog, keyed by display name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupplierDirectory {
    entries: BTreeMap<String, Uuid>,
}

impl SupplierDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_supplier<S: Into<String>>(mut self, name: S, id: Uuid) -> Self {
        self.entries.insert(name.into(), id);
        self
    }

    pub fn id_for(&self, name: &str) -> Option<Uuid> {
        self.entries.get(name).copied()
    }

    /// Reverse lookup used to label per-supplier counts
    pub fn name_for(&self, id: &Uuid) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, v)| *v == id)
            .map(|(k, _)| k.as_str())
    }

    /// Display name for a supplier id, falling back to the id itself
    pub fn label_for(&self, id: &Uuid) -> String {
        self.name_for(id)
            .map(str::to_string)
            .unwrap_or_else(|| id.to_string())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids mapped from more than one name
    pub fn duplicate_ids(&self) -> Vec<Uuid> {
        let mut seen = std::collections::HashSet::new();
        let mut duplicates: Vec<Uuid> = self
            .entries
            .values()
            .filter(|id| !seen.insert(**id))
            .copied()
            .collect();
        duplicates.sort();
        duplicates.dedup();
        duplicates
    }
}
