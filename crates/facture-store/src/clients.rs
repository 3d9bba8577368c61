//! # Client Directory
//!
//! The saved customer list behind the client picker.
//!
//! ## Upsert Decision
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  upsert(record)                                                         │
//! │     │                                                                   │
//! │     ├── no stored name matches ───────────────► append, write: Inserted │
//! │     │                                                                   │
//! │     └── a stored name matches (trim + lowercase)                        │
//! │            │                                                            │
//! │            ├── every field equal after trim ──► no write: Unchanged     │
//! │            │                                                            │
//! │            └── some field differs ────────────► no write:               │
//! │                                                 ConflictDetected(diff)  │
//! │                                                        │                │
//! │                               user confirms ───────────┘                │
//! │                                     │                                   │
//! │                                     ▼                                   │
//! │                          confirm_update(record) ──► replace, write:     │
//! │                                                      Updated            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutating call rewrites the whole file. The in-memory list only
//! changes once that write has succeeded.

use facture_core::client::normalize_name;
use facture_core::validation::validate_company_name;
use facture_core::{ClientRecord, FieldChange};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::json_file::{read_json, write_json_atomic};

/// Outcome of saving a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertResult {
    /// New client, appended and saved.
    Inserted,
    /// Known client, nothing changed, nothing written.
    Unchanged,
    /// Known client with different details. Nothing was written; call
    /// [`ClientDirectory::confirm_update`] to apply them.
    ConflictDetected(Vec<FieldChange>),
    /// Known client, details replaced and saved.
    Updated,
}

/// The persisted set of known clients, in insertion order.
#[derive(Debug, Clone)]
pub struct ClientDirectory {
    path: PathBuf,
    records: Vec<ClientRecord>,
}

impl ClientDirectory {
    /// Loads the directory from `path`.
    ///
    /// An absent or empty file is an empty directory. When several records
    /// share a name (ignoring case and surrounding spaces) the first one is
    /// kept, each later one is logged and dropped, and the file is left as
    /// is until the next write.
    ///
    /// ## Errors
    /// [`StoreError::Corrupt`] if the file is not a JSON array of clients;
    /// the customer list is never silently discarded.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let loaded: Vec<ClientRecord> = read_json(&path)?.unwrap_or_default();
        let records = first_of_each_name(loaded);

        info!(path = %path.display(), count = records.len(), "Client directory loaded");
        Ok(ClientDirectory { path, records })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All clients in insertion order.
    pub fn list(&self) -> &[ClientRecord] {
        &self.records
    }

    /// Number of stored clients.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Checks if no client is stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Finds a client by name, ignoring case and surrounding spaces.
    pub fn find_by_name(&self, name: &str) -> Option<&ClientRecord> {
        self.position(name).map(|i| &self.records[i])
    }

    /// Like [`ClientDirectory::find_by_name`] but absent is an error.
    pub fn get(&self, name: &str) -> StoreResult<&ClientRecord> {
        self.find_by_name(name)
            .ok_or_else(|| StoreError::not_found(name.trim()))
    }

    /// Clients whose name contains `text`, case-insensitively.
    ///
    /// A blank filter returns every client. Order is preserved.
    pub fn filter(&self, text: &str) -> Vec<&ClientRecord> {
        let needle = text.trim().to_lowercase();
        self.records
            .iter()
            .filter(|r| r.company_name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Saves a client, or reports how it differs from the stored one.
    ///
    /// See the module docs for the decision table. The record is trimmed
    /// before it is compared or stored.
    pub fn upsert(&mut self, record: &ClientRecord) -> StoreResult<UpsertResult> {
        let record = prepare(record)?;

        let Some(index) = self.position(&record.company_name) else {
            let mut records = self.records.clone();
            records.push(record);
            self.replace_all(records)?;
            info!(client = %self.records[self.records.len() - 1].company_name, "Client added");
            return Ok(UpsertResult::Inserted);
        };

        let changes = self.records[index].differences(&record);
        if changes.is_empty() {
            debug!(client = %record.company_name, "Client unchanged");
            return Ok(UpsertResult::Unchanged);
        }

        debug!(
            client = %record.company_name,
            fields = changes.len(),
            "Client details differ from stored record"
        );
        Ok(UpsertResult::ConflictDetected(changes))
    }

    /// Applies a confirmed update: the stored record (display name included)
    /// is replaced by `record`.
    ///
    /// An unknown client is inserted instead and reported as `Inserted`.
    pub fn confirm_update(&mut self, record: &ClientRecord) -> StoreResult<UpsertResult> {
        let record = prepare(record)?;

        let Some(index) = self.position(&record.company_name) else {
            return self.upsert(&record);
        };

        let mut records = self.records.clone();
        records[index] = record;
        self.replace_all(records)?;

        info!(client = %self.records[index].company_name, "Client updated");
        Ok(UpsertResult::Updated)
    }

    /// Removes a client.
    ///
    /// ## Returns
    /// `Ok(false)` without touching the file when no client matches.
    pub fn delete(&mut self, name: &str) -> StoreResult<bool> {
        let Some(index) = self.position(name) else {
            debug!(client = %name.trim(), "Delete ignored, no such client");
            return Ok(false);
        };

        let mut records = self.records.clone();
        let removed = records.remove(index);
        self.replace_all(records)?;

        info!(client = %removed.company_name, "Client deleted");
        Ok(true)
    }

    fn position(&self, name: &str) -> Option<usize> {
        let key = normalize_name(name);
        self.records.iter().position(|r| r.normalized_name() == key)
    }

    fn replace_all(&mut self, records: Vec<ClientRecord>) -> StoreResult<()> {
        write_json_atomic(&self.path, &records)?;
        self.records = records;
        Ok(())
    }
}

fn first_of_each_name(records: Vec<ClientRecord>) -> Vec<ClientRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| {
            let fresh = seen.insert(record.normalized_name());
            if !fresh {
                warn!(client = %record.company_name, "Duplicate client in file, keeping the first");
            }
            fresh
        })
        .collect()
}

fn prepare(record: &ClientRecord) -> StoreResult<ClientRecord> {
    validate_company_name(&record.company_name)?;
    Ok(record.trimmed())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use facture_core::ClientField;
    use std::fs;

    fn acme() -> ClientRecord {
        ClientRecord::new("Acme SARL")
            .street_address("12 rue des Lilas")
            .postal_code("75011")
            .city("Paris")
            .contact_phone("01 23 45 67 89")
    }

    fn open_temp() -> (tempfile::TempDir, ClientDirectory) {
        let dir = tempfile::tempdir().unwrap();
        let directory = ClientDirectory::open(dir.path().join("clients.json")).unwrap();
        (dir, directory)
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let (_dir, directory) = open_temp();
        assert!(directory.is_empty());
    }

    #[test]
    fn test_open_corrupt_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clients.json");
        fs::write(&path, "{\"oops\": true}").unwrap();

        assert!(matches!(
            ClientDirectory::open(&path),
            Err(StoreError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_open_keeps_first_of_duplicate_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clients.json");
        let records = vec![
            ClientRecord::new("Acme").city("Paris"),
            ClientRecord::new("Boulangerie"),
            ClientRecord::new("  ACME ").city("Lyon"),
        ];
        fs::write(&path, serde_json::to_string(&records).unwrap()).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        let directory = ClientDirectory::open(&path).unwrap();
        assert_eq!(directory.len(), 2);
        assert_eq!(directory.get("acme").unwrap().city, "Paris");
        assert_eq!(directory.list()[1].company_name, "Boulangerie");
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_insert_then_find_case_insensitive() {
        let (_dir, mut directory) = open_temp();

        assert_eq!(directory.upsert(&acme()).unwrap(), UpsertResult::Inserted);
        assert_eq!(directory.len(), 1);
        assert!(directory.find_by_name("  acme sarl ").is_some());
        assert!(directory.find_by_name("Acme").is_none());
    }

    #[test]
    fn test_upsert_same_details_is_unchanged() {
        let (_dir, mut directory) = open_temp();
        directory.upsert(&acme()).unwrap();

        let again = acme().city(" Paris ");
        assert_eq!(directory.upsert(&again).unwrap(), UpsertResult::Unchanged);
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn test_unchanged_does_not_rewrite_file() {
        let (_dir, mut directory) = open_temp();
        directory.upsert(&acme()).unwrap();

        let marker = "[{\"Nom de l'entreprise\": \"marker\"}]";
        fs::write(directory.path(), marker).unwrap();

        directory.upsert(&acme()).unwrap();
        assert_eq!(fs::read_to_string(directory.path()).unwrap(), marker);
    }

    #[test]
    fn test_conflict_reports_fields_and_writes_nothing() {
        let (_dir, mut directory) = open_temp();
        directory.upsert(&acme()).unwrap();
        let before = fs::read_to_string(directory.path()).unwrap();

        let moved = acme().street_address("3 avenue Foch");
        let changes = match directory.upsert(&moved).unwrap() {
            UpsertResult::ConflictDetected(changes) => changes,
            other => panic!("expected a conflict, got {other:?}"),
        };
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].field, ClientField::StreetAddress);
        assert_eq!(changes[0].before, "12 rue des Lilas");
        assert_eq!(changes[0].after, "3 avenue Foch");

        assert_eq!(directory.find_by_name("Acme SARL").unwrap().street_address, "12 rue des Lilas");
        assert_eq!(fs::read_to_string(directory.path()).unwrap(), before);
    }

    #[test]
    fn test_confirm_update_replaces_record() {
        let (_dir, mut directory) = open_temp();
        directory.upsert(&acme()).unwrap();

        let renamed = ClientRecord::new("ACME sarl")
            .street_address("3 avenue Foch")
            .tax_id("FR123");
        assert_eq!(directory.confirm_update(&renamed).unwrap(), UpsertResult::Updated);

        let stored = directory.get("acme sarl").unwrap();
        assert_eq!(stored.company_name, "ACME sarl");
        assert_eq!(stored.street_address, "3 avenue Foch");
        assert_eq!(stored.city, "");
        assert_eq!(stored.tax_id.as_deref(), Some("FR123"));

        let reopened = ClientDirectory::open(directory.path()).unwrap();
        assert_eq!(reopened.list(), directory.list());
    }

    #[test]
    fn test_confirm_update_of_unknown_client_inserts() {
        let (_dir, mut directory) = open_temp();
        assert_eq!(directory.confirm_update(&acme()).unwrap(), UpsertResult::Inserted);
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn test_blank_company_name_is_rejected() {
        let (_dir, mut directory) = open_temp();
        let result = directory.upsert(&ClientRecord::new("   "));
        assert!(matches!(result, Err(StoreError::Validation(_))));
        assert!(directory.is_empty());
    }

    #[test]
    fn test_stored_values_are_trimmed() {
        let (_dir, mut directory) = open_temp();
        directory
            .upsert(&ClientRecord::new(" Beta ").city(" Lyon ").tax_id("  "))
            .unwrap();

        let stored = directory.get("beta").unwrap();
        assert_eq!(stored.company_name, "Beta");
        assert_eq!(stored.city, "Lyon");
        assert_eq!(stored.tax_id, None);
    }

    #[test]
    fn test_delete() {
        let (_dir, mut directory) = open_temp();
        directory.upsert(&acme()).unwrap();
        directory.upsert(&ClientRecord::new("Beta")).unwrap();

        assert!(directory.delete("ACME SARL").unwrap());
        assert_eq!(directory.len(), 1);
        assert!(!directory.delete("Acme SARL").unwrap());

        let reopened = ClientDirectory::open(directory.path()).unwrap();
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.list()[0].company_name, "Beta");
    }

    #[test]
    fn test_delete_missing_does_not_write() {
        let (_dir, mut directory) = open_temp();
        assert!(!directory.delete("nobody").unwrap());
        assert!(!directory.path().exists());
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let (_dir, directory) = open_temp();
        assert!(matches!(
            directory.get(" Nobody "),
            Err(StoreError::NotFound { name }) if name == "Nobody"
        ));
    }

    #[test]
    fn test_filter_keeps_insertion_order() {
        let (_dir, mut directory) = open_temp();
        for name in ["Zeta Import", "alpha", "Import Export", "Beta"] {
            directory.upsert(&ClientRecord::new(name)).unwrap();
        }

        let names: Vec<_> = directory
            .filter("IMPORT")
            .iter()
            .map(|r| r.company_name.as_str())
            .collect();
        assert_eq!(names, ["Zeta Import", "Import Export"]);

        assert_eq!(directory.filter("  ").len(), 4);
        assert!(directory.filter("gamma").is_empty());
    }

    #[test]
    fn test_failed_write_leaves_list_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        let mut directory = ClientDirectory::open(data_dir.join("clients.json")).unwrap();

        // a regular file where the data directory should be
        fs::write(&data_dir, "").unwrap();

        assert!(matches!(
            directory.upsert(&acme()),
            Err(StoreError::Persistence { .. })
        ));
        assert!(directory.is_empty());
    }
}
