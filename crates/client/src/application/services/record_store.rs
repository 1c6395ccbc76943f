//! Local record store
//!
//! A collection is one JSON object mapping record id to record, stored under
//! a single key. Every mutation rewrites the whole object; the medium has no
//! append. Reads of an absent key yield an empty collection.
//!
//! Entries are held as raw JSON text and only decoded on read, so a rewrite
//! reproduces every untouched entry byte for byte. An entry that does not
//! decode is logged and skipped by reads but stays in storage.

use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::rc::Rc;

use issuedraft_domain::{DomainError, Issue, Record, Repository};
use serde_json::value::RawValue;
use thiserror::Error;

use crate::ports::outbound::{storage_keys, StorageError, StorageProvider};

type RawEntries = BTreeMap<String, Box<RawValue>>;

/// Result of [`RecordStore::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// A record with this id already exists; nothing was written
    Duplicate,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] DomainError),

    /// The stored value is not a valid collection. It is left untouched.
    #[error("Stored '{collection}' data is corrupt: {message}")]
    Corrupt {
        collection: &'static str,
        message: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl StoreError {
    pub fn corrupt(collection: &'static str, message: impl ToString) -> Self {
        Self::Corrupt {
            collection,
            message: message.to_string(),
        }
    }

    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }
}

/// Keyed collection of `T` persisted as JSON under one storage key.
pub struct RecordStore<T> {
    storage: Rc<dyn StorageProvider>,
    collection: &'static str,
    _record: PhantomData<fn() -> T>,
}

pub type IssueStore = RecordStore<Issue>;
pub type RepositoryStore = RecordStore<Repository>;

/// Store over the `issues` collection.
pub fn issue_store(storage: Rc<dyn StorageProvider>) -> IssueStore {
    RecordStore::new(storage, storage_keys::ISSUES)
}

/// Store over the `repositories` collection.
pub fn repository_store(storage: Rc<dyn StorageProvider>) -> RepositoryStore {
    RecordStore::new(storage, storage_keys::REPOSITORIES)
}

impl<T> Clone for RecordStore<T> {
    fn clone(&self) -> Self {
        Self {
            storage: Rc::clone(&self.storage),
            collection: self.collection,
            _record: PhantomData,
        }
    }
}

impl<T: Record> RecordStore<T> {
    pub fn new(storage: Rc<dyn StorageProvider>, collection: &'static str) -> Self {
        Self {
            storage,
            collection,
            _record: PhantomData,
        }
    }

    /// Insert a record unless its id is already present.
    ///
    /// Repeated delivery of the same record is a no-op reported as
    /// [`AddOutcome::Duplicate`]; the stored record is never overwritten.
    pub fn add(&self, record: T) -> Result<AddOutcome, StoreError> {
        let id = record.record_id();
        if id.trim().is_empty() {
            let message = format!("{} id cannot be empty", T::ENTITY_TYPE);
            return Err(DomainError::validation(message).into());
        }

        let mut entries = self.load()?;
        if entries.contains_key(id) {
            tracing::debug!(collection = self.collection, id, "Skipping duplicate record");
            return Ok(AddOutcome::Duplicate);
        }

        let raw = serde_json::value::to_raw_value(&record).map_err(StoreError::serialization)?;
        let id = id.to_string();
        entries.insert(id.clone(), raw);
        self.persist(&entries)?;
        tracing::debug!(collection = self.collection, id = %id, "Record added");
        Ok(AddOutcome::Added)
    }

    /// Look up a record by id. A missing or undecodable entry is `Ok(None)`.
    pub fn get(&self, id: &str) -> Result<Option<T>, StoreError> {
        let entries = self.load()?;
        Ok(entries.get(id).and_then(|raw| self.decode(id, raw)))
    }

    /// All decodable records, in no meaningful order. Callers sort before
    /// display.
    pub fn get_all(&self) -> Result<Vec<T>, StoreError> {
        let entries = self.load()?;
        Ok(entries
            .iter()
            .filter_map(|(id, raw)| self.decode(id, raw))
            .collect())
    }

    /// Remove a record. Storage is rewritten only if something was removed.
    pub fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let mut entries = self.load()?;
        if entries.remove(id).is_none() {
            return Ok(false);
        }
        self.persist(&entries)?;
        tracing::debug!(collection = self.collection, id, "Record removed");
        Ok(true)
    }

    /// Load the collection as undecoded entries.
    ///
    /// Only a value that is not a JSON object at all is `Corrupt`; it is
    /// never overwritten.
    fn load(&self) -> Result<RawEntries, StoreError> {
        match self.storage.load(self.collection)? {
            None => Ok(RawEntries::new()),
            Some(raw) if raw.trim().is_empty() => Ok(RawEntries::new()),
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| StoreError::corrupt(self.collection, e)),
        }
    }

    fn decode(&self, id: &str, raw: &RawValue) -> Option<T> {
        match serde_json::from_str(raw.get()) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(
                    collection = self.collection,
                    id,
                    error = %e,
                    "Skipping unreadable record"
                );
                None
            }
        }
    }

    fn persist(&self, entries: &RawEntries) -> Result<(), StoreError> {
        let raw = serde_json::to_string(entries).map_err(StoreError::serialization)?;
        self.storage.save(self.collection, &raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::platform::mock::MemoryStorage;
    use crate::ports::outbound::MockStorageProvider;
    use issuedraft_domain::IssueId;

    fn issue(id: &str, title: &str) -> Issue {
        Issue {
            id: IssueId::parse(id).unwrap(),
            title: title.into(),
            story: "story".into(),
            criteria: String::new(),
            requirements: String::new(),
            created_at: "2024-01-01T00:00:00.000Z".into(),
            extra: Default::default(),
        }
    }

    fn store() -> (IssueStore, MemoryStorage) {
        let storage = MemoryStorage::new();
        (issue_store(Rc::new(storage.clone())), storage)
    }

    #[test]
    fn add_then_get_all_returns_the_record() {
        let (store, _) = store();
        let record = issue("a", "First");
        assert_eq!(store.add(record.clone()).unwrap(), AddOutcome::Added);
        assert_eq!(store.get_all().unwrap(), vec![record]);
    }

    #[test]
    fn duplicate_id_keeps_the_original_record() {
        let (store, storage) = store();
        store.add(issue("a", "Original")).unwrap();
        let writes = storage.write_count();

        assert_eq!(store.add(issue("a", "Impostor")).unwrap(), AddOutcome::Duplicate);
        assert_eq!(store.get("a").unwrap().unwrap().title, "Original");
        assert_eq!(store.get_all().unwrap().len(), 1);
        assert_eq!(storage.write_count(), writes);
    }

    #[test]
    fn get_missing_id_is_none() {
        let (store, _) = store();
        assert!(store.get("nope").unwrap().is_none());
    }

    #[test]
    fn remove_missing_id_does_not_rewrite_storage() {
        let (store, storage) = store();
        store.add(issue("a", "First")).unwrap();
        let writes = storage.write_count();

        assert!(!store.remove("missing").unwrap());
        assert_eq!(storage.write_count(), writes);

        assert!(store.remove("a").unwrap());
        assert_eq!(storage.write_count(), writes + 1);
        assert!(store.get_all().unwrap().is_empty());
    }

    #[test]
    fn collection_is_one_json_object_keyed_by_id() {
        let (store, storage) = store();
        store.add(issue("a", "First")).unwrap();
        store.add(issue("b", "Second")).unwrap();

        let raw = storage.raw(storage_keys::ISSUES).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["a"]["title"], "First");
        assert_eq!(value["b"]["id"], "b");
    }

    #[test]
    fn reads_collections_written_by_the_browser() {
        let storage = MemoryStorage::new();
        storage.seed(
            storage_keys::ISSUES,
            r#"{"x1":{"id":"x1","title":"T","story":"S","criteria":"","requirements":"",
                "created_at":"2024-02-03T04:05:06.789Z"}}"#,
        );
        let store = issue_store(Rc::new(storage));
        let issue = store.get("x1").unwrap().unwrap();
        assert_eq!(issue.title, "T");
    }

    #[test]
    fn corrupt_collection_is_reported_and_left_alone() {
        let storage = MemoryStorage::new();
        storage.seed(storage_keys::ISSUES, "{not json");
        let store = issue_store(Rc::new(storage.clone()));

        assert!(matches!(store.get_all(), Err(StoreError::Corrupt { .. })));
        assert!(matches!(store.add(issue("a", "A")), Err(StoreError::Corrupt { .. })));
        assert_eq!(storage.raw(storage_keys::ISSUES).unwrap(), "{not json");
    }

    /// Entry written by another tool: no offset, non-UTC offset, an unknown
    /// field and its own spacing.
    const FOREIGN_ENTRY: &str = r#"{ "id": "old", "title": "Legacy", "story": "S",
        "created_at": "2024-01-15T10:30:00.123456", "source": "cli" }"#;
    const OFFSET_ENTRY: &str =
        r#"{"id":"jp","title":"T","story":"S","created_at":"2024-04-01T17:00:00.000+09:00"}"#;

    #[test]
    fn unrelated_add_keeps_stored_entries_verbatim() {
        let storage = MemoryStorage::new();
        storage.seed(
            storage_keys::ISSUES,
            &format!(r#"{{"old": {FOREIGN_ENTRY}, "jp": {OFFSET_ENTRY}}}"#),
        );
        let store = issue_store(Rc::new(storage.clone()));

        assert_eq!(store.add(issue("new", "New")).unwrap(), AddOutcome::Added);

        let raw = storage.raw(storage_keys::ISSUES).unwrap();
        assert!(raw.contains(FOREIGN_ENTRY), "{raw}");
        assert!(raw.contains(OFFSET_ENTRY), "{raw}");
        assert_eq!(store.get_all().unwrap().len(), 3);
        assert_eq!(
            store.get("jp").unwrap().unwrap().created_at,
            "2024-04-01T17:00:00.000+09:00"
        );
    }

    #[test]
    fn undecodable_entry_is_skipped_but_kept() {
        let storage = MemoryStorage::new();
        let broken = r#"{"id":"bad","title":42}"#;
        storage.seed(
            storage_keys::ISSUES,
            &format!(r#"{{"bad":{broken},"good":{OFFSET_ENTRY}}}"#),
        );
        let store = issue_store(Rc::new(storage.clone()));

        let all = store.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id.as_str(), "jp");
        assert!(store.get("bad").unwrap().is_none());

        // The id stays taken, and rewrites carry the entry along.
        assert_eq!(store.add(issue("bad", "Retry")).unwrap(), AddOutcome::Duplicate);
        store.add(issue("c", "C")).unwrap();
        assert!(storage.raw(storage_keys::ISSUES).unwrap().contains(broken));

        assert!(store.remove("bad").unwrap());
        assert!(!storage.raw(storage_keys::ISSUES).unwrap().contains(broken));
    }

    #[test]
    fn blank_id_is_rejected() {
        let (store, _) = store();
        let mut record = issue("a", "A");
        record.id = serde_json::from_str("\"  \"").unwrap();
        assert!(matches!(store.add(record), Err(StoreError::Validation(_))));
    }

    #[test]
    fn write_failure_surfaces_as_storage_error() {
        let mut storage = MockStorageProvider::new();
        storage.expect_load().returning(|_| Ok(None));
        storage
            .expect_save()
            .times(1)
            .returning(|key, _| Err(StorageError::write(key, "QuotaExceededError")));
        let store = issue_store(Rc::new(storage));

        let err = store.add(issue("a", "A")).unwrap_err();
        assert!(matches!(err, StoreError::Storage(StorageError::Write { .. })));
        assert!(err.to_string().contains("QuotaExceededError"));
    }

    #[test]
    fn unavailable_storage_fails_reads() {
        let mut storage = MockStorageProvider::new();
        storage
            .expect_load()
            .returning(|_| Err(StorageError::unavailable("localStorage disabled")));
        let store = repository_store(Rc::new(storage));
        assert!(matches!(store.get_all(), Err(StoreError::Storage(_))));
    }
}
