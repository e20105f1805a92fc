//! In-process person store with optional JSON snapshot persistence.

use async_trait::async_trait;
use dashmap::DashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::model::validation::validate_fields;
use crate::model::{FieldInput, FieldValue, Person, PersonDraft, PersonId};
use crate::store::{PersonStore, StoreResult};

/// A concurrent map of person records.
///
/// When a snapshot path is configured, the whole collection is rewritten
/// after every successful mutation. A mutation whose snapshot write fails
/// is rolled back in memory before the error is returned. Mutations hold
/// the write lock from change to rollback, so a rollback never discards a
/// concurrent writer's record.
#[derive(Clone, Default)]
pub struct MemoryStore {
    records: Arc<DashMap<PersonId, Person>>,
    snapshot_path: Option<PathBuf>,
    /// Serializes mutations together with their snapshot write.
    save_lock: Arc<Mutex<()>>,
}

impl MemoryStore {
    /// Create an empty, memory-only store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a store backed by `path`, loading existing records if the file exists.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let store = Self {
            snapshot_path: Some(path.to_path_buf()),
            ..Self::default()
        };

        if path.exists() {
            let reader = BufReader::new(File::open(path)?);
            let persons: Vec<Person> = serde_json::from_reader(reader)?;
            for person in persons {
                store.records.insert(person.id, person);
            }
            tracing::info!(
                path = %path.display(),
                records = store.records.len(),
                "Loaded phonebook snapshot"
            );
        }
        Ok(store)
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot_path.as_deref()
    }

    fn sorted(&self) -> Vec<Person> {
        let mut persons: Vec<Person> = self.records.iter().map(|r| r.value().clone()).collect();
        persons.sort_by_key(|p| p.id);
        persons
    }

    /// Rewrite the snapshot file from the current contents.
    ///
    /// Callers must hold `save_lock`.
    async fn write_snapshot(&self) -> StoreResult<()> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };

        let bytes = serde_json::to_vec_pretty(&self.sorted())?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, path).await?;

        tracing::debug!(path = %path.display(), records = self.records.len(), "Saved phonebook snapshot");
        Ok(())
    }

    async fn insert_person(&self, draft: PersonDraft) -> StoreResult<Person> {
        validate_fields(FieldValue::input(draft.name.as_ref()), FieldValue::input(draft.number.as_ref()))?;

        let person = Person {
            id: PersonId::generate(),
            name: text_of(draft.name),
            number: text_of(draft.number),
        };

        let _guard = self.save_lock.lock().await;
        self.records.insert(person.id, person.clone());

        if let Err(e) = self.write_snapshot().await {
            self.records.remove(&person.id);
            return Err(e);
        }
        Ok(person)
    }

    async fn update_person(&self, id: &str, number: Option<FieldValue>) -> StoreResult<Option<Person>> {
        let id: PersonId = id.parse()?;

        let _guard = self.save_lock.lock().await;
        let (previous, updated) = {
            let Some(mut entry) = self.records.get_mut(&id) else {
                return Ok(None);
            };
            validate_fields(FieldInput::Text(entry.name.as_str()), FieldValue::input(number.as_ref()))?;

            let previous = entry.value().clone();
            entry.number = text_of(number);
            (previous, entry.value().clone())
        };

        if let Err(e) = self.write_snapshot().await {
            self.records.insert(id, previous);
            return Err(e);
        }
        Ok(Some(updated))
    }

    async fn delete_person(&self, id: &str) -> StoreResult<Option<Person>> {
        let id: PersonId = id.parse()?;

        let _guard = self.save_lock.lock().await;
        let Some((_, removed)) = self.records.remove(&id) else {
            return Ok(None);
        };

        if let Err(e) = self.write_snapshot().await {
            self.records.insert(id, removed);
            return Err(e);
        }
        Ok(Some(removed))
    }
}

/// Text of a field that already passed validation.
fn text_of(value: Option<FieldValue>) -> String {
    match value {
        Some(FieldValue::Text(s)) => s,
        _ => String::new(),
    }
}

#[async_trait]
impl PersonStore for MemoryStore {
    async fn find_all(&self) -> StoreResult<Vec<Person>> {
        Ok(self.sorted())
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.records.len())
    }

    async fn insert(&self, draft: PersonDraft) -> StoreResult<Person> {
        self.insert_person(draft).await
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Person>> {
        let id: PersonId = id.parse()?;
        Ok(self.records.get(&id).map(|r| r.value().clone()))
    }

    async fn update_number(&self, id: &str, number: Option<FieldValue>) -> StoreResult<Option<Person>> {
        self.update_person(id, number).await
    }

    async fn delete(&self, id: &str) -> StoreResult<Option<Person>> {
        self.delete_person(id).await
    }
}
