//! File-backed trainer table.
//!
//! The table is loaded once at startup and is the single source of truth
//! while the process runs; no route re-reads the file. Every mutation runs
//! under the table mutex across the whole locate-mutate-persist sequence,
//! so overlapping callers cannot lose each other's writes, and persists the
//! entire table before returning.
//!
//! Lookups match the first record with an exactly equal name. Nothing
//! rejects a duplicate name at creation, so first-match is the contract.

use std::path::PathBuf;
use std::sync::Mutex;

use crate::models::{CreateTrainerRequest, ItemKind, Trainer, UpdateTrainerRequest};

use super::error::StoreError;
use super::json_file;

struct TableState {
    trainers: Vec<Trainer>,
    next_id: u64,
}

impl TableState {
    fn find_mut(&mut self, name: &str) -> Option<&mut Trainer> {
        self.trainers.iter_mut().find(|t| t.name == name)
    }
}

pub struct TrainerStore {
    path: PathBuf,
    state: Mutex<TableState>,
}

impl TrainerStore {
    /// Load the table from `path`. An absent or unparsable file starts the
    /// process with an empty table; the id counter is seeded past the
    /// highest persisted id so deleted ids are never reused.
    pub fn open(path: PathBuf) -> Self {
        let trainers: Vec<Trainer> = json_file::load_or_default(&path);
        let next_id = trainers.iter().map(|t| t.id).max().map_or(1, |max| max + 1);

        log::info!(
            "[STORE] Loaded {} trainers from {} (next id {})",
            trainers.len(),
            path.display(),
            next_id
        );

        TrainerStore {
            path,
            state: Mutex::new(TableState { trainers, next_id }),
        }
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap().trainers.len()
    }

    /// Snapshot of the full table.
    pub fn list(&self) -> Vec<Trainer> {
        self.state.lock().unwrap().trainers.clone()
    }

    /// First record matching `name`, if any. Absence is not an error here;
    /// the caller decides how to report it.
    pub fn get(&self, name: &str) -> Option<Trainer> {
        let state = self.state.lock().unwrap();
        state.trainers.iter().find(|t| t.name == name).cloned()
    }

    /// Append a new record with the next id and persist.
    pub fn create(&self, req: CreateTrainerRequest) -> Result<Trainer, StoreError> {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;

        let trainer = Trainer {
            id,
            name: req.name,
            password: req.password,
            currency: req.currency,
            creatures: Vec::new(),
            energies: Vec::new(),
            medals: Vec::new(),
            combat_items: Vec::new(),
            evolution_items: Vec::new(),
        };

        state.trainers.push(trainer.clone());
        json_file::save(&self.path, &state.trainers)?;

        log::info!("[STORE] Created trainer '{}' (id {})", trainer.name, trainer.id);
        Ok(trainer)
    }

    /// Remove every record matching `name` and persist the remainder.
    /// Returns the updated table. The file is left untouched when nothing
    /// matches.
    pub fn delete(&self, name: &str) -> Result<Vec<Trainer>, StoreError> {
        let mut state = self.state.lock().unwrap();
        let before = state.trainers.len();
        state.trainers.retain(|t| t.name != name);

        if state.trainers.len() == before {
            return Err(StoreError::not_found(name));
        }

        json_file::save(&self.path, &state.trainers)?;
        log::info!("[STORE] Deleted trainer '{}'", name);
        Ok(state.trainers.clone())
    }

    /// Overwrite the profile fields present in the request, leaving the
    /// rest of the record untouched.
    pub fn update_profile(
        &self,
        name: &str,
        req: UpdateTrainerRequest,
    ) -> Result<Trainer, StoreError> {
        let mut state = self.state.lock().unwrap();
        let trainer = state
            .find_mut(name)
            .ok_or_else(|| StoreError::not_found(name))?;

        if let Some(new_name) = req.name {
            trainer.name = new_name;
        }
        if let Some(password) = req.password {
            trainer.password = password;
        }
        if let Some(currency) = req.currency {
            trainer.currency = currency;
        }
        let updated = trainer.clone();

        json_file::save(&self.path, &state.trainers)?;
        Ok(updated)
    }

    /// Append an item to the trainer's sequence for `kind`. Sequences keep
    /// insertion order and are never deduplicated.
    pub fn assign_item(
        &self,
        name: &str,
        kind: ItemKind,
        value: &str,
    ) -> Result<Trainer, StoreError> {
        let mut state = self.state.lock().unwrap();
        let trainer = state
            .find_mut(name)
            .ok_or_else(|| StoreError::not_found(name))?;

        let sequence = match kind {
            ItemKind::Creature => &mut trainer.creatures,
            ItemKind::Energy => &mut trainer.energies,
            ItemKind::Medal => &mut trainer.medals,
        };
        sequence.push(value.to_string());
        let updated = trainer.clone();

        json_file::save(&self.path, &state.trainers)?;
        log::info!("[STORE] Assigned {} '{}' to trainer '{}'", kind, value, name);
        Ok(updated)
    }

    /// Add a positive amount to the trainer's balance and persist.
    /// Returns the new balance.
    pub fn deposit(&self, name: &str, amount: &serde_json::Value) -> Result<i64, StoreError> {
        let amount = coerce_amount(amount)?;

        let mut state = self.state.lock().unwrap();
        let trainer = state
            .find_mut(name)
            .ok_or_else(|| StoreError::not_found(name))?;

        trainer.currency += amount;
        let balance = trainer.currency;

        json_file::save(&self.path, &state.trainers)?;
        log::info!(
            "[STORE] Deposited {} grumpidolars for '{}' (balance {})",
            amount,
            name,
            balance
        );
        Ok(balance)
    }

    /// Post-purchase variant of [`deposit`](Self::deposit): validates the
    /// amount the same way, but only logs the balance the deposit would
    /// produce and persists the table unchanged. The trainer's currency
    /// does not move. Returns the current balance.
    //
    // Upstream product behavior for the purchase flow; do not fold this
    // into `deposit` without product sign-off.
    pub fn deposit_after_purchase(
        &self,
        name: &str,
        amount: &serde_json::Value,
    ) -> Result<i64, StoreError> {
        let amount = coerce_amount(amount)?;

        let mut state = self.state.lock().unwrap();
        let trainer = state
            .find_mut(name)
            .ok_or_else(|| StoreError::not_found(name))?;

        let would_be = trainer.currency + amount;
        let balance = trainer.currency;
        log::info!(
            "[STORE] Post-purchase deposit of {} for '{}' validated (balance would be {})",
            amount,
            name,
            would_be
        );

        json_file::save(&self.path, &state.trainers)?;
        Ok(balance)
    }
}

/// Coerce a raw JSON amount to a positive integer number of grumpidolars.
/// Finite floats are truncated toward zero before the positivity check.
fn coerce_amount(value: &serde_json::Value) -> Result<i64, StoreError> {
    let amount = value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64)
    });

    match amount {
        Some(a) if a > 0 => Ok(a),
        Some(a) => Err(StoreError::InvalidAmount(format!(
            "deposit amount must be positive, got {}",
            a
        ))),
        None => Err(StoreError::InvalidAmount(format!(
            "deposit amount must be a number, got {}",
            value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn create_req(name: &str, currency: i64) -> CreateTrainerRequest {
        serde_json::from_value(json!({
            "name": name,
            "password": "pw",
            "currency": currency,
        }))
        .unwrap()
    }

    fn store_at(path: &Path) -> TrainerStore {
        TrainerStore::open(path.to_path_buf())
    }

    #[test]
    fn test_ids_are_monotonic_and_never_reused() {
        let dir = tempdir().unwrap();
        let store = store_at(&dir.path().join("trainers.json"));

        let ash = store.create(create_req("Ash", 1000)).unwrap();
        let misty = store.create(create_req("Misty", 500)).unwrap();
        assert_eq!(ash.id, 1);
        assert_eq!(misty.id, 2);

        let remaining = store.delete("Ash").unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "Misty");

        let brock = store.create(create_req("Brock", 0)).unwrap();
        assert_eq!(brock.id, 3);
    }

    #[test]
    fn test_next_id_seeded_from_persisted_max() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trainers.json");
        fs::write(
            &path,
            r#"[
                {"id": 3, "name": "Ash", "password": "p"},
                {"id": 7, "name": "Misty", "password": "p"}
            ]"#,
        )
        .unwrap();

        let store = store_at(&path);
        let created = store.create(create_req("Brock", 0)).unwrap();
        assert_eq!(created.id, 8);
    }

    #[test]
    fn test_delete_missing_name_leaves_file_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trainers.json");
        let store = store_at(&path);
        store.create(create_req("Ash", 1000)).unwrap();

        let before = fs::read(&path).unwrap();
        let err = store.delete("Nobody").unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));

        let after = fs::read(&path).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_assign_items_keeps_insertion_order_without_dedup() {
        let dir = tempdir().unwrap();
        let store = store_at(&dir.path().join("trainers.json"));
        store.create(create_req("Ash", 0)).unwrap();

        for medal in ["RockBadge", "CascadeBadge", "RockBadge"] {
            store.assign_item("Ash", ItemKind::Medal, medal).unwrap();
        }
        store.assign_item("Ash", ItemKind::Creature, "Pikachu").unwrap();
        store.assign_item("Ash", ItemKind::Energy, "Electric").unwrap();

        let ash = store.get("Ash").unwrap();
        assert_eq!(ash.medals, vec!["RockBadge", "CascadeBadge", "RockBadge"]);
        assert_eq!(ash.creatures, vec!["Pikachu"]);
        assert_eq!(ash.energies, vec!["Electric"]);
    }

    #[test]
    fn test_assign_item_to_missing_trainer() {
        let dir = tempdir().unwrap();
        let store = store_at(&dir.path().join("trainers.json"));

        let err = store
            .assign_item("Nobody", ItemKind::Medal, "RockBadge")
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_assign_medal_heals_record_missing_sequences() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trainers.json");
        fs::write(
            &path,
            r#"[{"id": 1, "name": "Ash", "password": "p", "currency": "not-a-number"}]"#,
        )
        .unwrap();

        let store = store_at(&path);
        let ash = store.assign_item("Ash", ItemKind::Medal, "RockBadge").unwrap();
        assert_eq!(ash.medals, vec!["RockBadge"]);
        assert_eq!(ash.currency, 0);
    }

    #[test]
    fn test_deposit_adds_to_balance() {
        let dir = tempdir().unwrap();
        let store = store_at(&dir.path().join("trainers.json"));
        store.create(create_req("Ash", 1000)).unwrap();

        let balance = store.deposit("Ash", &json!(50)).unwrap();
        assert_eq!(balance, 1050);
        assert_eq!(store.get("Ash").unwrap().currency, 1050);
    }

    #[test]
    fn test_deposit_rejects_bad_amounts_and_leaves_balance() {
        let dir = tempdir().unwrap();
        let store = store_at(&dir.path().join("trainers.json"));
        store.create(create_req("Ash", 1000)).unwrap();
        store.deposit("Ash", &json!(50)).unwrap();

        for amount in [json!(-5), json!(0), json!("abc"), json!(null), json!([1])] {
            let err = store.deposit("Ash", &amount).unwrap_err();
            assert!(
                matches!(err, StoreError::InvalidAmount(_)),
                "amount: {}",
                amount
            );
        }

        assert_eq!(store.get("Ash").unwrap().currency, 1050);
    }

    #[test]
    fn test_deposit_to_missing_trainer() {
        let dir = tempdir().unwrap();
        let store = store_at(&dir.path().join("trainers.json"));

        let err = store.deposit("Nobody", &json!(50)).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_deposit_after_purchase_validates_but_does_not_apply() {
        let dir = tempdir().unwrap();
        let store = store_at(&dir.path().join("trainers.json"));
        store.create(create_req("Ash", 1000)).unwrap();

        let balance = store.deposit_after_purchase("Ash", &json!(50)).unwrap();
        assert_eq!(balance, 1000);
        assert_eq!(store.get("Ash").unwrap().currency, 1000);

        let err = store.deposit_after_purchase("Ash", &json!(-5)).unwrap_err();
        assert!(matches!(err, StoreError::InvalidAmount(_)));
    }

    #[test]
    fn test_update_profile_overwrites_only_present_fields() {
        let dir = tempdir().unwrap();
        let store = store_at(&dir.path().join("trainers.json"));
        store.create(create_req("Ash", 1000)).unwrap();
        store.assign_item("Ash", ItemKind::Medal, "RockBadge").unwrap();

        let updated = store
            .update_profile(
                "Ash",
                UpdateTrainerRequest {
                    password: Some("new-pw".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.password, "new-pw");
        assert_eq!(updated.name, "Ash");
        assert_eq!(updated.currency, 1000);
        assert_eq!(updated.medals, vec!["RockBadge"]);

        let err = store
            .update_profile("Nobody", UpdateTrainerRequest::default())
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_reopen_round_trips_all_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trainers.json");

        let store = store_at(&path);
        store.create(create_req("Ash", 1000)).unwrap();
        store.assign_item("Ash", ItemKind::Creature, "Pikachu").unwrap();
        store.assign_item("Ash", ItemKind::Medal, "RockBadge").unwrap();
        let before = store.list();

        let reopened = store_at(&path);
        assert_eq!(reopened.list(), before);
    }

    #[test]
    fn test_duplicate_names_resolve_to_first_match() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trainers.json");
        fs::write(
            &path,
            r#"[
                {"id": 1, "name": "Ash", "password": "p", "currency": 100},
                {"id": 2, "name": "Ash", "password": "p", "currency": 200}
            ]"#,
        )
        .unwrap();

        let store = store_at(&path);
        assert_eq!(store.get("Ash").unwrap().id, 1);

        store.deposit("Ash", &json!(10)).unwrap();
        let table = store.list();
        assert_eq!(table[0].currency, 110);
        assert_eq!(table[1].currency, 200);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let dir = tempdir().unwrap();
        let store = store_at(&dir.path().join("trainers.json"));
        store.create(create_req("Ash", 0)).unwrap();

        assert!(store.get("ash").is_none());
        assert!(matches!(store.delete("ASH"), Err(StoreError::NotFound(_))));
    }
}
