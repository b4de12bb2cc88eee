//! JSON file persistence - the durable side of the trainer store.
//!
//! The unit of durability is a whole collection: files hold one JSON array
//! and every save rewrites it completely.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

use super::error::StoreError;

/// Load a collection, degrading to empty on any problem.
///
/// A missing or unparsable file is logged and treated as an empty
/// collection; this never errors to the caller.
pub fn load_or_default<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!(
                "[STORE] {} not readable ({}); starting with an empty collection",
                path.display(),
                e
            );
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(items) => items,
        Err(e) => {
            log::warn!(
                "[STORE] {} is not valid JSON ({}); starting with an empty collection",
                path.display(),
                e
            );
            Vec::new()
        }
    }
}

/// Serialize the full collection and overwrite the backing file.
///
/// Writes to a sibling temp file and renames it over the target, so a crash
/// mid-write never leaves a truncated table behind.
pub fn save<T: Serialize>(path: &Path, items: &[T]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(items)?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
