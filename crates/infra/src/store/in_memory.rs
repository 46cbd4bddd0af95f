use std::collections::BTreeMap;
use std::sync::RwLock;

use jobdesk_job_descriptions::{JobDescription, JobDescriptionId, JobDescriptionRecord};

use super::{JobDescriptionStore, StoreError};

/// In-memory job description store for tests/dev.
///
/// Ids start at 1 and are never reused, even after deletes.
#[derive(Debug)]
pub struct InMemoryJobDescriptionStore {
    inner: RwLock<Inner>,
}

#[derive(Debug)]
struct Inner {
    rows: BTreeMap<JobDescriptionId, JobDescription>,
    next_id: i64,
}

impl InMemoryJobDescriptionStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryJobDescriptionStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Storage("in-memory store lock poisoned".to_string())
}

#[async_trait::async_trait]
impl JobDescriptionStore for InMemoryJobDescriptionStore {
    async fn save(&self, record: JobDescriptionRecord) -> Result<JobDescription, StoreError> {
        let mut inner = self.inner.write().map_err(poisoned)?;

        let id = match record.id {
            Some(id) if inner.rows.contains_key(&id) => id,
            Some(id) => return Err(StoreError::Missing(id)),
            None => {
                let id = JobDescriptionId::new(inner.next_id);
                inner.next_id += 1;
                id
            }
        };

        let saved = JobDescription::new(id, record.details);
        inner.rows.insert(id, saved.clone());
        Ok(saved)
    }

    async fn find_by_id(&self, id: JobDescriptionId) -> Result<Option<JobDescription>, StoreError> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<JobDescription>, StoreError> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.rows.values().cloned().collect())
    }

    async fn exists_by_id(&self, id: JobDescriptionId) -> Result<bool, StoreError> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.rows.contains_key(&id))
    }

    async fn delete_by_id(&self, id: JobDescriptionId) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        Ok(inner.rows.remove(&id).is_some())
    }
}
