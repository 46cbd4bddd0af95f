//! Job description record storage.

mod in_memory;
mod postgres;

pub use in_memory::InMemoryJobDescriptionStore;
pub use postgres::PostgresJobDescriptionStore;

use std::sync::Arc;

use jobdesk_job_descriptions::{JobDescription, JobDescriptionId, JobDescriptionRecord};

/// Record store error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An overwrite targeted an id that has no row (e.g. deleted concurrently).
    #[error("job description {0} is not stored")]
    Missing(JobDescriptionId),
    #[error("database error in {operation}: {source}")]
    Database {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },
    #[error("storage error: {0}")]
    Storage(String),
}

/// Persistence abstraction over the single table of job descriptions.
#[async_trait::async_trait]
pub trait JobDescriptionStore: Send + Sync {
    /// Insert a record without id, or overwrite the row with the record's id.
    async fn save(&self, record: JobDescriptionRecord) -> Result<JobDescription, StoreError>;

    /// Load one record. Absence is `Ok(None)`.
    async fn find_by_id(&self, id: JobDescriptionId) -> Result<Option<JobDescription>, StoreError>;

    /// All records in id order.
    async fn find_all(&self) -> Result<Vec<JobDescription>, StoreError>;

    async fn exists_by_id(&self, id: JobDescriptionId) -> Result<bool, StoreError>;

    /// Remove a row. Returns whether a row was actually removed.
    async fn delete_by_id(&self, id: JobDescriptionId) -> Result<bool, StoreError>;
}

#[async_trait::async_trait]
impl<S> JobDescriptionStore for Arc<S>
where
    S: JobDescriptionStore + ?Sized,
{
    async fn save(&self, record: JobDescriptionRecord) -> Result<JobDescription, StoreError> {
        (**self).save(record).await
    }

    async fn find_by_id(&self, id: JobDescriptionId) -> Result<Option<JobDescription>, StoreError> {
        (**self).find_by_id(id).await
    }

    async fn find_all(&self) -> Result<Vec<JobDescription>, StoreError> {
        (**self).find_all().await
    }

    async fn exists_by_id(&self, id: JobDescriptionId) -> Result<bool, StoreError> {
        (**self).exists_by_id(id).await
    }

    async fn delete_by_id(&self, id: JobDescriptionId) -> Result<bool, StoreError> {
        (**self).delete_by_id(id).await
    }
}
