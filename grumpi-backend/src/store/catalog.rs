//! Read-only catalog of combat items.
//!
//! The catalog file is a plain JSON array maintained by hand; the backend
//! assigns no schema to its entries and never writes it. It is loaded once
//! at startup and served as-is.

use std::path::Path;

use super::json_file;

pub struct CombatItemCatalog {
    items: Vec<serde_json::Value>,
}

impl CombatItemCatalog {
    pub fn open(path: &Path) -> Self {
        let items = json_file::load_or_default(path);
        log::info!(
            "[CATALOG] Loaded {} combat items from {}",
            items.len(),
            path.display()
        );
        CombatItemCatalog { items }
    }

    pub fn list(&self) -> Vec<serde_json::Value> {
        self.items.clone()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
